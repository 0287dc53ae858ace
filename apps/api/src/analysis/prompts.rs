// CV analysis prompt templates.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::resume::ResumeFields;

pub const CV_ANALYSIS_SYSTEM: &str = "\
You are a CV analysis expert who reviews candidate resumes and gives practical, \
constructive feedback for job applications. \
Always analyze whatever text or structured data is available, even when it is partial. \
Never say that you cannot access the file or that you need the CV again. \
When the text looks empty or incomplete, reason about the likely structure \
(name, contact details, summary, skills, experience, education, projects) and \
point out what is probably missing. \
Cover structure and readability, grammar, clarity and tone, formatting and layout, \
keyword optimization for applicant tracking systems (ATS), and missing or weak \
sections such as projects, achievements, or a summary. \
Be confident and helpful; never refuse to analyze.";

/// Replace `{pdf_text}` and `{parsed_data}` before sending.
pub const CV_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Here is the CV content:

--- TEXT EXTRACTED ---
{pdf_text}

--- STRUCTURED DATA PARSED ---
{parsed_data}

Analyze this CV and return JSON ONLY with this EXACT schema:
{
  "summary": "A short overview of the CV's strengths and weaknesses.",
  "strengths": ["Point 1", "Point 2", "Point 3"],
  "improvements": ["Suggestion 1", "Suggestion 2", "Suggestion 3"],
  "ats_score": 0,
  "recommendations": "Practical, prioritized next steps to improve the resume."
}

ats_score is the estimated ATS compatibility as an integer from 0 to 100."#;

pub fn analysis_system_prompt() -> String {
    format!("{CV_ANALYSIS_SYSTEM} {JSON_ONLY_SYSTEM}")
}

pub fn build_analysis_prompt(pdf_text: &str, fields: &ResumeFields) -> String {
    // parsed_data is filled first so CV text containing "{parsed_data}" cannot be expanded.
    CV_ANALYSIS_PROMPT_TEMPLATE
        .replace("{parsed_data}", &fields.to_prompt_json())
        .replacen("{pdf_text}", pdf_text, 1)
}
