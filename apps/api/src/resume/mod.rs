// Structured resume hints scanned from document text.

use serde::{Deserialize, Serialize};

pub mod scanner;

/// Flat record of labeled fields found in a resume.
///
/// `error` is only set when the document could not be opened; every other
/// field then keeps its empty default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResumeFields {
    /// Degraded record for a document that could not be opened.
    pub fn from_error(error: impl ToString) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    /// Pretty JSON for embedding in a prompt.
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
