//! Critique post-processing: turns raw generated text into a `CvCritique`.
//!
//! The model is asked for bare JSON but may still wrap it in prose or code
//! fences, return a single string where a list was requested, or phrase the
//! ATS score as text. Parsing tolerates all of these.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

const NO_SUMMARY: &str = "No summary found";
const NO_RECOMMENDATIONS: &str = "No recommendations provided";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvCritique {
    #[serde(default = "default_summary")]
    pub summary: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub improvements: Vec<String>,
    /// 0 – 100
    #[serde(default, deserialize_with = "lenient_score")]
    pub ats_score: u8,
    #[serde(default = "default_recommendations")]
    pub recommendations: String,
}

fn default_summary() -> String {
    NO_SUMMARY.to_string()
}

fn default_recommendations() -> String {
    NO_RECOMMENDATIONS.to_string()
}

/// Slices from the first `{` to the last `}`. Falls back to the trimmed text.
pub fn extract_json_block(text: &str) -> &str {
    let text = text.trim();
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Parses the raw generated text. Returns the JSON error when no valid
/// critique object can be recovered.
pub fn parse_critique(raw: &str) -> Result<CvCritique, serde_json::Error> {
    serde_json::from_str(extract_json_block(raw))
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => vec![],
        Value::String(s) => vec![s],
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        other => vec![other.to_string()],
    })
}

fn lenient_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let score = match &value {
        Value::Number(n) => n.as_f64().map(|f| f.round() as i64),
        Value::String(s) => first_integer(s),
        _ => None,
    };
    match score {
        Some(score) => Ok(score.clamp(0, 100) as u8),
        None => {
            warn!("Unparseable ats_score {value}, defaulting to 0");
            Ok(0)
        }
    }
}

/// First run of ASCII digits in `text`, e.g. `"Estimated 78/100"` → 78.
fn first_integer(text: &str) -> Option<i64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
