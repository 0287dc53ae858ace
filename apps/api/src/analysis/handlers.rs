//! Axum route handlers for the CV API.
//!
//! Every endpoint takes a multipart upload with the PDF in the `file` field.
//! The upload is spooled to a temp file that is removed when the handler returns.

use std::io::Write;

use anyhow::Context;
use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::info;

use crate::analysis::analyzer::{analyze_cv, run_blocking, AnalysisReport};
use crate::document::extractor::{extract_pages, parse_page_list};
use crate::errors::AppError;
use crate::resume::scanner::scan;
use crate::resume::ResumeFields;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct ExtractQuery {
    /// Comma-separated page indices, e.g. `0,1,2`.
    pub pages: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// Reads the `file` field and spools it to disk.
async fn spool_upload(mut multipart: Multipart) -> Result<NamedTempFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let data: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if data.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }

        let mut file = tempfile::Builder::new()
            .prefix("cv-upload-")
            .suffix(".pdf")
            .tempfile()
            .context("Failed to create upload temp file")?;
        file.write_all(&data)
            .context("Failed to write upload temp file")?;
        info!("Received upload '{}' ({} bytes)", file_name, data.len());
        return Ok(file);
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}

/// POST /api/v1/cv/extract?pages=0,1,2
///
/// Returns the text of the requested pages. Pages default to the configured excerpt window.
pub async fn handle_extract(
    State(state): State<AppState>,
    Query(query): Query<ExtractQuery>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let pages = match query.pages.as_deref() {
        Some(raw) => parse_page_list(raw).map_err(AppError::Validation)?,
        None => state.config.excerpt_pages.clone(),
    };

    let upload = spool_upload(multipart).await?;
    let text = run_blocking(move || Ok(extract_pages(upload.path(), &pages)?)).await?;

    Ok(Json(ExtractResponse { text }))
}

/// POST /api/v1/cv/fields
///
/// Returns the labeled fields. Always 200: an unreadable document is reported in `error`.
pub async fn handle_fields(multipart: Multipart) -> Result<Json<ResumeFields>, AppError> {
    let upload = spool_upload(multipart).await?;
    let fields = run_blocking(move || Ok(scan(upload.path()))).await?;
    Ok(Json(fields))
}

/// POST /api/v1/cv/analyze
///
/// Full pipeline: excerpt + fields → generation → parsed critique.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let upload = spool_upload(multipart).await?;
    let report = analyze_cv(
        upload.path(),
        state.generator.as_ref(),
        &state.config.excerpt_pages,
    )
    .await?;
    Ok(Json(report))
}
