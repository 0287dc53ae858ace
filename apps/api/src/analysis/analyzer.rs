//! CV Analysis: orchestrates the full pipeline for one uploaded document.
//!
//! Flow: extract excerpt pages → scan fields → build prompt → generate →
//!       parse critique → return report.
//!
//! The excerpt is mandatory context: a document that cannot be opened fails
//! the request. The field record is a hint only and degrades to its `error` form.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::critique::{parse_critique, CvCritique};
use crate::analysis::prompts::{analysis_system_prompt, build_analysis_prompt};
use crate::document::extractor::extract_pages;
use crate::errors::AppError;
use crate::llm_client::Generator;
use crate::resume::scanner::scan;
use crate::resume::ResumeFields;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub critique: CvCritique,
    pub fields: ResumeFields,
}

/// Runs synchronous document work on the blocking pool.
pub async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(anyhow::Error::from)?
}

/// Extracts the excerpt and the field record for `source`.
pub async fn ingest(
    source: &Path,
    excerpt_pages: &[i64],
) -> Result<(String, ResumeFields), AppError> {
    let path: PathBuf = source.to_path_buf();
    let pages = excerpt_pages.to_vec();
    run_blocking(move || {
        let pdf_text = extract_pages(&path, &pages)?;
        let fields = scan(&path);
        Ok((pdf_text, fields))
    })
    .await
}

pub async fn analyze_cv(
    source: &Path,
    generator: &dyn Generator,
    excerpt_pages: &[i64],
) -> Result<AnalysisReport, AppError> {
    let analysis_id = Uuid::new_v4();
    async move {
        let (pdf_text, fields) = ingest(source, excerpt_pages).await?;
        info!(
            "Ingested CV: excerpt_chars={}, structured_hints={}",
            pdf_text.chars().count(),
            fields.error.is_none()
        );

        let prompt = build_analysis_prompt(&pdf_text, &fields);
        let raw_output = generator
            .generate(&prompt, &analysis_system_prompt())
            .await
            .map_err(|e| AppError::Llm(format!("CV analysis failed: {e}")))?;

        let critique = parse_critique(&raw_output).map_err(|e| {
            warn!("Generated critique is not valid JSON: {e}");
            AppError::InvalidCritique(raw_output.trim().to_string())
        })?;
        info!("CV analyzed: ats_score={}", critique.ats_score);

        Ok(AnalysisReport {
            analysis_id,
            analyzed_at: Utc::now(),
            critique,
            fields,
        })
    }
    .instrument(info_span!("analyze_cv", %analysis_id))
    .await
}
