//! Axum route handlers for the meta-generation API.
//!
//! One upload, one run: every endpoint accepts a multipart form carrying the
//! tabular file plus the operator's run settings, parses it, and either
//! previews the parsed head, returns the generated preview, or streams back
//! the enhanced file. Nothing is persisted between requests.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::assembler::Strategy;
use crate::generation::generator::{
    run_batch, BatchWarning, GeneratedMeta, GenerationOptions,
};
use crate::generation::selector::{FirstSelector, SeededSelector, TemplateSelector};
use crate::generation::templates::Tone;
use crate::models::record::{LengthStatus, PageRecord};
use crate::state::AppState;
use crate::tabular::reader::{parse_csv, InputTable};
use crate::tabular::writer::{write_csv, EXPORT_FILENAME};

/// Rows shown by the inspect endpoint.
const PREVIEW_ROWS: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Upload form
// ────────────────────────────────────────────────────────────────────────────

/// Template sampling mode requested by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionMode {
    Random,
    First,
}

impl FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(SelectionMode::Random),
            "first" => Ok(SelectionMode::First),
            other => Err(format!(
                "unknown selection mode '{other}' (expected: random, first)"
            )),
        }
    }
}

/// One decoded upload: the file bytes plus the run configuration.
struct Upload {
    file: Vec<u8>,
    options: GenerationOptions,
    selection: SelectionMode,
    seed: Option<u64>,
}

/// Reads the multipart form. Unknown fields are ignored; a missing file is a
/// validation error, and window fields are checked before any generation.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut file = None;
    let mut options = GenerationOptions::default();
    let mut selection = SelectionMode::Random;
    let mut seed = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Parse(format!("invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Parse(format!("could not read uploaded file: {e}"))
                })?;
                file = Some(bytes.to_vec());
            }
            "tone" => options.tone = parse_field::<Tone>(field, "tone").await?,
            "strategy" => options.strategy = parse_field::<Strategy>(field, "strategy").await?,
            "dedup" => options.dedup = parse_field::<bool>(field, "dedup").await?,
            "title_min" => options.title_window.min = parse_field(field, "title_min").await?,
            "title_max" => options.title_window.max = parse_field(field, "title_max").await?,
            "desc_min" => options.desc_window.min = parse_field(field, "desc_min").await?,
            "desc_max" => options.desc_window.max = parse_field(field, "desc_max").await?,
            "selection" => selection = parse_field(field, "selection").await?,
            "seed" => seed = Some(parse_field::<u64>(field, "seed").await?),
            _ => {}
        }
    }

    options.title_window.validate().map_err(AppError::Validation)?;
    options.desc_window.validate().map_err(AppError::Validation)?;

    let file = file
        .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;

    Ok(Upload {
        file,
        options,
        selection,
        seed,
    })
}

async fn parse_field<T>(field: Field<'_>, name: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let text = field
        .text()
        .await
        .map_err(|e| AppError::Parse(format!("could not read field '{name}': {e}")))?;
    text.trim()
        .parse::<T>()
        .map_err(|e| AppError::Validation(format!("invalid '{name}': {e}")))
}

fn resolve_selector(
    state: &AppState,
    selection: SelectionMode,
    seed: Option<u64>,
) -> Arc<dyn TemplateSelector> {
    match (selection, seed) {
        (SelectionMode::First, _) => Arc::new(FirstSelector),
        (SelectionMode::Random, Some(seed)) => Arc::new(SeededSelector::new(seed)),
        (SelectionMode::Random, None) => state.selector.clone(),
    }
}

/// Parses the upload and runs the batch off the async executor; assembly is
/// CPU-bound, so it goes through `spawn_blocking`.
async fn run_upload(
    state: &AppState,
    multipart: Multipart,
) -> Result<(InputTable, Vec<GeneratedMeta>, Vec<BatchWarning>), AppError> {
    let upload = read_upload(multipart).await?;
    let table = parse_csv(&upload.file)?;
    let selector = resolve_selector(state, upload.selection, upload.seed);

    let records = table.records();
    let options = upload.options;
    let report = tokio::task::spawn_blocking(move || run_batch(&records, &options, selector.as_ref()))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in generation: {e}")))?;

    Ok((table, report.rows, report.warnings))
}

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct InspectResponse {
    pub row_count: usize,
    pub headers: Vec<String>,
    pub preview: Vec<PageRecord>,
}

/// One preview table row: the input record next to what was generated for it.
#[derive(Debug, Serialize)]
pub struct PreviewRow {
    pub record: PageRecord,
    pub meta: GeneratedMeta,
}

/// Per-field tallies the preview table shows as its color legend.
#[derive(Debug, Serialize)]
pub struct LengthSummary {
    pub titles_within: usize,
    pub titles_below: usize,
    pub titles_above: usize,
    pub descriptions_within: usize,
    pub descriptions_below: usize,
    pub descriptions_above: usize,
}

impl LengthSummary {
    fn tally(rows: &[GeneratedMeta]) -> Self {
        let mut summary = LengthSummary {
            titles_within: 0,
            titles_below: 0,
            titles_above: 0,
            descriptions_within: 0,
            descriptions_below: 0,
            descriptions_above: 0,
        };
        for meta in rows {
            match meta.title_status {
                LengthStatus::WithinWindow => summary.titles_within += 1,
                LengthStatus::BelowMinimum => summary.titles_below += 1,
                LengthStatus::AboveMaximum => summary.titles_above += 1,
            }
            match meta.description_status {
                LengthStatus::WithinWindow => summary.descriptions_within += 1,
                LengthStatus::BelowMinimum => summary.descriptions_below += 1,
                LengthStatus::AboveMaximum => summary.descriptions_above += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub row_count: usize,
    pub rows: Vec<PreviewRow>,
    pub warnings: Vec<BatchWarning>,
    pub summary: LengthSummary,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/meta/inspect
///
/// Parses the upload and returns its shape and first rows, so the operator
/// can confirm column mapping before generating.
pub async fn handle_inspect(multipart: Multipart) -> Result<Json<InspectResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let table = parse_csv(&upload.file)?;
    info!("Upload inspected: {} rows", table.rows.len());

    Ok(Json(InspectResponse {
        row_count: table.rows.len(),
        headers: table.headers.clone(),
        preview: table
            .rows
            .iter()
            .take(PREVIEW_ROWS)
            .map(|r| r.record.clone())
            .collect(),
    }))
}

/// POST /api/v1/meta/generate
///
/// Full pipeline: parse → classify → assemble → dedup. Returns the preview
/// rows with per-field length verdicts plus the run's soft warnings.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let (table, rows, warnings) = run_upload(&state, multipart).await?;

    let summary = LengthSummary::tally(&rows);
    let preview = table
        .rows
        .iter()
        .zip(rows)
        .map(|(input, meta)| PreviewRow {
            record: input.record.clone(),
            meta,
        })
        .collect();

    Ok(Json(GenerateResponse {
        row_count: table.rows.len(),
        rows: preview,
        warnings,
        summary,
    }))
}

/// POST /api/v1/meta/export
///
/// Same pipeline as generate, but returns the enhanced CSV as a download.
pub async fn handle_export(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (table, rows, _warnings) = run_upload(&state, multipart).await?;
    let bytes = write_csv(&table, &rows)?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{EXPORT_FILENAME}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
