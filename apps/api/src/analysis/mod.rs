// Request pipeline tying the three units together: upload → extract → generate → score → report.

pub mod handlers;
pub mod report;
pub mod upload;
