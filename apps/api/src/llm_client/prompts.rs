// Shared prompt fragments. Each service that prompts the model defines its
// own templates alongside it; this file holds the cross-cutting pieces.

/// Output layout every analysis prompt asks for. The section parser relies on
/// a header line followed by one item per line and a blank line between sections.
pub const SECTION_FORMAT_INSTRUCTION: &str = "\
Format the output as plain text with clear sections. \
Write each section header on its own line, followed by one item per line. \
Separate sections with a single blank line.";
