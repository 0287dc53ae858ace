//! Field Scanner: line-by-line label matching over the whole document text.
//!
//! Rules are an ordered table of `(label, field)` pairs. Each trimmed line is
//! checked against the table in order and the first rule whose label occurs
//! anywhere in the line wins. The label match is a substring check, so
//! `Contact Email: x@y.com` still feeds `email`.

use std::path::Path;

use tracing::warn;

use crate::document::Document;
use crate::resume::ResumeFields;

/// Target field of a label rule. Decides how a match is accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    Education,
    Experience,
    Skills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelRule {
    pub label: &'static str,
    pub field: Field,
}

/// Default rule order: name, email, phone, education, experience, skills.
pub const DEFAULT_RULES: &[LabelRule] = &[
    LabelRule {
        label: "Name:",
        field: Field::Name,
    },
    LabelRule {
        label: "Email:",
        field: Field::Email,
    },
    LabelRule {
        label: "Phone:",
        field: Field::Phone,
    },
    LabelRule {
        label: "Education:",
        field: Field::Education,
    },
    LabelRule {
        label: "Experience:",
        field: Field::Experience,
    },
    LabelRule {
        label: "Skills:",
        field: Field::Skills,
    },
];

/// Line terminators recognised when splitting document text into lines.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

pub struct FieldScanner {
    rules: Vec<LabelRule>,
}

impl Default for FieldScanner {
    fn default() -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec())
    }
}

impl FieldScanner {
    pub fn with_rules(rules: Vec<LabelRule>) -> Self {
        Self { rules }
    }

    /// Opens `source` and scans every page.
    ///
    /// Never fails: an unopenable document yields a record with only `error` set.
    pub fn scan(&self, source: &Path) -> ResumeFields {
        match Document::open(source) {
            Ok(doc) => self.scan_document(&doc),
            Err(e) => {
                warn!("Field scan skipped, document could not be opened: {e}");
                ResumeFields::from_error(e)
            }
        }
    }

    pub fn scan_document(&self, doc: &Document) -> ResumeFields {
        self.scan_text(&doc.text())
    }

    pub fn scan_text(&self, text: &str) -> ResumeFields {
        let mut fields = ResumeFields::default();
        for line in text.split(LINE_BREAKS) {
            self.apply_line(&mut fields, line.trim());
        }
        fields
    }

    fn apply_line(&self, fields: &mut ResumeFields, line: &str) {
        let Some((rule, rest)) = self
            .rules
            .iter()
            .find_map(|rule| line.split_once(rule.label).map(|(_, rest)| (rule, rest)))
        else {
            return;
        };

        let value = rest.trim();
        match rule.field {
            Field::Name => fields.name = value.to_string(),
            Field::Email => fields.email = value.to_string(),
            Field::Phone => fields.phone = value.to_string(),
            Field::Education => fields.education.push(value.to_string()),
            Field::Experience => fields.experience.push(value.to_string()),
            // Empty tokens from doubled or trailing commas are kept.
            Field::Skills => fields
                .skills
                .extend(value.split(',').map(|s| s.trim().to_string())),
        }
    }
}

/// Scans `source` with the default rule table.
pub fn scan(source: &Path) -> ResumeFields {
    FieldScanner::default().scan(source)
}
