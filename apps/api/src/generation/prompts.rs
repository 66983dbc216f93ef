// All LLM prompt templates for the Structured Info Generator.
// Section headers are shared with the output parser so the two cannot drift.

pub const SKILLS: &str = "Skills";
pub const WORK_EXPERIENCE: &str = "Work Experience";
pub const EDUCATION: &str = "Education";
pub const CERTIFICATIONS: &str = "Certifications";
pub const PROJECTS: &str = "Projects";

pub const REQUIRED_SKILLS: &str = "Required Skills";
pub const REQUIRED_EXPERIENCE: &str = "Required Experience";
pub const REQUIRED_EDUCATION: &str = "Required Education";
pub const NICE_TO_HAVE_SKILLS: &str = "Nice-to-have Skills";

/// Resume analysis prompt. Replace `{format}` and `{resume_text}` before sending.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = "\
You are an expert resume analyzer. Analyze the following resume and extract the following information in a structured format:

1. Skills: List all technical and soft skills mentioned
2. Work Experience: List each job with duration, role, and key responsibilities
3. Education: List all educational qualifications with details
4. Certifications: List all professional certifications
5. Projects: List all significant projects with descriptions

{format}

Resume:
{resume_text}
";

/// Job requirements prompt. Replace `{format}` and `{job_description}` before sending.
pub const JOB_ANALYSIS_PROMPT_TEMPLATE: &str = "\
You are an expert job requirements analyzer. Analyze the following job description and extract:

1. Required Skills: List all mandatory technical and soft skills
2. Required Experience: Extract years of experience and specific experience requirements
3. Required Education: List all educational requirements
4. Nice-to-have Skills: List any additional preferred skills

{format}

Job Description:
{job_description}
";
