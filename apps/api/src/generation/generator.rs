//! Batch generation pipeline.
//!
//! Flow per record, in row order: classify intent → assemble title →
//! assemble description, each field against its own length window. The only
//! state crossing record boundaries is the per-run deduplication sets; both
//! are discarded with the run.
//!
//! Window violations are soft findings, logged and surfaced per record. The
//! duplicate-retry loop is capped so a template space smaller than the row
//! count degrades to an accepted duplicate instead of a hang.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::generation::assembler::{assemble, char_len, AssembleInput, Strategy};
use crate::generation::intent::{classify, Intent};
use crate::generation::selector::TemplateSelector;
use crate::generation::templates::{
    render, template_set, tone_phrases, Tone, DESC_FILLERS, FRAGMENT_SEPARATOR, TITLE_FILLERS,
};
use crate::models::record::{LengthStatus, LengthWindow, PageRecord};

/// Max re-assemblies when a generated value collides with one already
/// produced this run.
const MAX_DEDUP_RETRIES: u32 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Options and report models
// ────────────────────────────────────────────────────────────────────────────

/// Operator configuration for one run. Request-scoped; nothing persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub tone: Tone,
    pub strategy: Strategy,
    pub dedup: bool,
    pub title_window: LengthWindow,
    pub desc_window: LengthWindow,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            tone: Tone::default(),
            strategy: Strategy::default(),
            dedup: true,
            title_window: LengthWindow::TITLE,
            desc_window: LengthWindow::DESCRIPTION,
        }
    }
}

/// Generated output for one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMeta {
    pub intent: Intent,
    pub meta_title: String,
    pub meta_description: String,
    pub title_char_count: usize,
    pub description_char_count: usize,
    pub title_status: LengthStatus,
    pub description_status: LengthStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaField {
    Title,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The duplicate-retry cap was exhausted; the colliding value was kept.
    DuplicateAccepted,
    BelowMinimum,
    AboveMaximum,
}

/// A soft, per-record finding. Never fails the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchWarning {
    /// Zero-based input row index.
    pub row: usize,
    pub field: MetaField,
    pub kind: WarningKind,
    pub char_count: usize,
}

/// Everything one run produced, in input row order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub rows: Vec<GeneratedMeta>,
    pub warnings: Vec<BatchWarning>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full batch synchronously: one record is fully classified and
/// assembled before the next begins.
pub fn run_batch(
    records: &[PageRecord],
    options: &GenerationOptions,
    selector: &dyn TemplateSelector,
) -> BatchReport {
    info!(
        "Generating meta for {} records (tone={}, strategy={}, dedup={})",
        records.len(),
        options.tone,
        options.strategy,
        options.dedup
    );

    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut seen_descriptions: HashSet<String> = HashSet::new();
    let mut rows = Vec::with_capacity(records.len());
    let mut warnings = Vec::new();

    for (row, record) in records.iter().enumerate() {
        let intent = classify(&record.title, &record.existing_description);

        let meta_title = generate_field(
            || {
                assemble(
                    &title_input(record, intent, options.tone),
                    options.title_window,
                    options.strategy,
                    selector,
                )
            },
            options.dedup.then_some(&mut seen_titles),
            row,
            MetaField::Title,
            &mut warnings,
        );

        let meta_description = generate_field(
            || {
                assemble(
                    &description_input(record, intent, options.tone),
                    options.desc_window,
                    options.strategy,
                    selector,
                )
            },
            options.dedup.then_some(&mut seen_descriptions),
            row,
            MetaField::Description,
            &mut warnings,
        );

        let title_char_count = char_len(&meta_title);
        let description_char_count = char_len(&meta_description);
        let title_status = options.title_window.status_of(title_char_count);
        let description_status = options.desc_window.status_of(description_char_count);

        record_window_warning(row, MetaField::Title, title_status, title_char_count, &mut warnings);
        record_window_warning(
            row,
            MetaField::Description,
            description_status,
            description_char_count,
            &mut warnings,
        );

        rows.push(GeneratedMeta {
            intent,
            meta_title,
            meta_description,
            title_char_count,
            description_char_count,
            title_status,
            description_status,
        });
    }

    info!(
        "Batch complete: {} rows, {} warnings",
        rows.len(),
        warnings.len()
    );

    BatchReport { rows, warnings }
}

/// Assembles one field, resampling on collision with earlier rows when
/// deduplication is on. Exceeding the retry cap keeps the duplicate and
/// records a warning instead of looping forever.
fn generate_field(
    mut assemble_once: impl FnMut() -> String,
    seen: Option<&mut HashSet<String>>,
    row: usize,
    field: MetaField,
    warnings: &mut Vec<BatchWarning>,
) -> String {
    let Some(seen) = seen else {
        return assemble_once();
    };

    let mut value = assemble_once();
    let mut retries = 0;
    while seen.contains(&value) && retries < MAX_DEDUP_RETRIES {
        value = assemble_once();
        retries += 1;
    }

    if seen.contains(&value) {
        warn!("Row {row}: duplicate {field:?} accepted after {MAX_DEDUP_RETRIES} retries");
        warnings.push(BatchWarning {
            row,
            field,
            kind: WarningKind::DuplicateAccepted,
            char_count: char_len(&value),
        });
    }

    seen.insert(value.clone());
    value
}

fn record_window_warning(
    row: usize,
    field: MetaField,
    status: LengthStatus,
    char_count: usize,
    warnings: &mut Vec<BatchWarning>,
) {
    let kind = match status {
        LengthStatus::WithinWindow => return,
        LengthStatus::BelowMinimum => WarningKind::BelowMinimum,
        LengthStatus::AboveMaximum => WarningKind::AboveMaximum,
    };
    warn!("Row {row}: {field:?} length {char_count} outside window");
    warnings.push(BatchWarning {
        row,
        field,
        kind,
        char_count,
    });
}

// ────────────────────────────────────────────────────────────────────────────
// Per-field assembly inputs
// ────────────────────────────────────────────────────────────────────────────

fn title_input(record: &PageRecord, intent: Intent, tone: Tone) -> AssembleInput {
    let phrases = tone_phrases(tone);
    AssembleInput {
        templates: template_set(intent)
            .titles
            .iter()
            .map(|t| render(t, record))
            .collect(),
        lead_ins: phrases.title_lead_ins,
        tails: phrases.title_tails,
        fillers: TITLE_FILLERS,
        required: vec![record.title.clone(), record.primary_kw.clone()],
        optional: vec![record.secondary_kw.clone()],
        separator: FRAGMENT_SEPARATOR,
    }
}

fn description_input(record: &PageRecord, intent: Intent, tone: Tone) -> AssembleInput {
    let phrases = tone_phrases(tone);
    AssembleInput {
        templates: template_set(intent)
            .descriptions
            .iter()
            .map(|t| render(t, record))
            .collect(),
        lead_ins: phrases.desc_lead_ins,
        tails: phrases.desc_tails,
        fillers: DESC_FILLERS,
        required: vec![record.title.clone(), record.primary_kw.clone()],
        optional: vec![record.secondary_kw.clone(), record.tertiary_kw.clone()],
        separator: FRAGMENT_SEPARATOR,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
