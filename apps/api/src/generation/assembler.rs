//! Bounded text assembly — builds a string from fragments to satisfy a
//! character-length window.
//!
//! Four interchangeable fragment-composition strategies share one shape: a
//! monotone builder that adds optional content only while length budget
//! remains, plus a final safety clamp. `Accrete` is the default; it is the
//! only strategy that both enforces the minimum and never cuts mid-word.
//!
//! All guarantees are best-effort: a single over-long fragment can leave the
//! output outside the window even after truncation. Callers surface that as a
//! soft warning, never an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::generation::selector::TemplateSelector;
use crate::generation::templates::FILLER_TOKEN;
use crate::models::record::LengthWindow;

/// Attempt budget for the retry-sampling strategy.
const RETRY_BUDGET: usize = 10;

/// Characters stripped from the end of a hard-cut string.
const TRAILING_TRIM: &[char] = &[' ', '.', ',', '!', ';', ':', '-', '–', '|'];

// ────────────────────────────────────────────────────────────────────────────
// Strategy
// ────────────────────────────────────────────────────────────────────────────

/// Fragment-composition policy for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Render one sampled template, hard-clamp to the maximum, pad with a
    /// filler token while under the minimum.
    Strict,
    /// Sample templates up to a retry budget, return the first draw already
    /// inside the window; fall back to the last draw clamped. Never pads.
    Retry,
    /// Build the complete string first (lead-in, required, every optional,
    /// trailing phrase if it fits), then strip from the end until it fits.
    Complete,
    /// Grow from required fragments, appending each optional piece only while
    /// it fits, then fill toward the minimum. Word-boundary safe.
    #[default]
    Accrete,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Strict => "strict",
            Strategy::Retry => "retry",
            Strategy::Complete => "complete",
            Strategy::Accrete => "accrete",
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(Strategy::Strict),
            "retry" => Ok(Strategy::Retry),
            "complete" => Ok(Strategy::Complete),
            "accrete" => Ok(Strategy::Accrete),
            other => Err(format!(
                "unknown strategy '{other}' (expected one of: strict, retry, complete, accrete)"
            )),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly input
// ────────────────────────────────────────────────────────────────────────────

/// Everything one field's assembly needs, pre-rendered for one record.
///
/// `templates` are full rendered candidates for the sampling strategies;
/// `required`/`optional` are bare fragments for the accretion strategies.
/// Empty fragments are skipped, never joined.
pub struct AssembleInput {
    pub templates: Vec<String>,
    pub lead_ins: &'static [&'static str],
    pub tails: &'static [&'static str],
    pub fillers: &'static [&'static str],
    pub required: Vec<String>,
    pub optional: Vec<String>,
    pub separator: &'static str,
}

/// Assembles one output string for one field of one record.
pub fn assemble(
    input: &AssembleInput,
    window: LengthWindow,
    strategy: Strategy,
    selector: &dyn TemplateSelector,
) -> String {
    match strategy {
        Strategy::Strict => assemble_strict(input, window, selector),
        Strategy::Retry => assemble_retry(input, window, selector),
        Strategy::Complete => assemble_complete(input, window, selector),
        Strategy::Accrete => assemble_accrete(input, window, selector),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Strategies
// ────────────────────────────────────────────────────────────────────────────

fn assemble_strict(
    input: &AssembleInput,
    window: LengthWindow,
    selector: &dyn TemplateSelector,
) -> String {
    let rendered = sample_template(&input.templates, selector);
    let clamped = clamp_to_max(&rendered, window.max);
    pad_to_window(&clamped, window, FILLER_TOKEN)
}

fn assemble_retry(
    input: &AssembleInput,
    window: LengthWindow,
    selector: &dyn TemplateSelector,
) -> String {
    let mut last = String::new();
    for _ in 0..RETRY_BUDGET {
        let candidate = sample_template(&input.templates, selector);
        if window.contains(char_len(&candidate)) {
            return candidate;
        }
        last = candidate;
    }
    // All draws were out of range: clamp the last one, accept a short result.
    clamp_to_max(&last, window.max)
}

fn assemble_complete(
    input: &AssembleInput,
    window: LengthWindow,
    selector: &dyn TemplateSelector,
) -> String {
    let lead = pick_phrase(input.lead_ins, selector);
    let tail = pick_phrase(input.tails, selector);
    let required: Vec<&str> = non_empty(&input.required);
    let mut optionals: Vec<&str> = non_empty(&input.optional);

    let body = compose(lead, &required, &optionals, input.separator);
    let mut out = if !body.is_empty() && char_len(&body) + char_len(tail) <= window.max {
        format!("{body}{tail}")
    } else {
        body
    };

    if char_len(&out) > window.max {
        // Strip the trailing phrase first, then optionals from the end,
        // re-checking after each removal. Hard truncation is the last resort.
        out = compose(lead, &required, &optionals, input.separator);
        while char_len(&out) > window.max && !optionals.is_empty() {
            optionals.pop();
            out = compose(lead, &required, &optionals, input.separator);
        }
        if char_len(&out) > window.max {
            out = truncate_at_word_boundary(&out, window.max);
        }
    }

    tidy(&out)
}

fn assemble_accrete(
    input: &AssembleInput,
    window: LengthWindow,
    selector: &dyn TemplateSelector,
) -> String {
    let lead = pick_phrase(input.lead_ins, selector);
    let tail = pick_phrase(input.tails, selector);
    let required: Vec<&str> = non_empty(&input.required);

    let mut out = if required.is_empty() {
        lead.trim_end().to_string()
    } else {
        format!("{lead}{}", required.join(input.separator))
    };

    // Optional fragments in priority order, each only while it fits.
    for opt in non_empty(&input.optional) {
        let candidate = append_fragment(&out, opt, input.separator);
        if char_len(&candidate) <= window.max {
            out = candidate;
        }
    }

    if !out.is_empty() && char_len(&out) + char_len(tail) <= window.max {
        out.push_str(tail);
    }

    if char_len(&out) < window.min {
        for filler in input.fillers {
            if char_len(&out) >= window.min {
                break;
            }
            if char_len(&out) + char_len(filler) <= window.max {
                out.push_str(filler);
            }
        }
        while char_len(&out) < window.min
            && char_len(&out) + char_len(FILLER_TOKEN) <= window.max
        {
            out.push_str(FILLER_TOKEN);
        }
    }

    if char_len(&out) > window.max {
        out = truncate_at_word_boundary(&out, window.max);
    }

    tidy(&out)
}

// ────────────────────────────────────────────────────────────────────────────
// Length-fitting helpers
// ────────────────────────────────────────────────────────────────────────────

/// Character count as the operator sees it: Unicode scalars, not bytes.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Hard-truncates to `max` characters and strips trailing punctuation.
/// Idempotent: clamping an already-clamped string is a no-op.
pub fn clamp_to_max(s: &str, max: usize) -> String {
    let s = s.trim();
    if char_len(s) <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max).collect();
    cut.trim_end_matches(TRAILING_TRIM).to_string()
}

/// Appends the filler token while under the minimum, re-clamping once if the
/// padding overshoots the maximum.
pub fn pad_to_window(s: &str, window: LengthWindow, token: &str) -> String {
    let mut out = s.trim().to_string();
    while char_len(&out) < window.min {
        out.push_str(token);
        if char_len(&out) > window.max {
            out = clamp_to_max(&out, window.max);
            break;
        }
    }
    out
}

/// Truncates at the last whole-word boundary at or before `max`. A single
/// unbroken word longer than `max` is hard-cut; there is no boundary to keep.
pub fn truncate_at_word_boundary(s: &str, max: usize) -> String {
    if char_len(s) <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max).collect();
    let cut = match cut.rfind(' ') {
        Some(i) if i > 0 => cut[..i].to_string(),
        _ => cut,
    };
    cut.trim_end_matches(TRAILING_TRIM).to_string()
}

fn sample_template(templates: &[String], selector: &dyn TemplateSelector) -> String {
    if templates.is_empty() {
        return String::new();
    }
    templates
        .get(selector.pick(templates.len()))
        .cloned()
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn pick_phrase(pool: &'static [&'static str], selector: &dyn TemplateSelector) -> &'static str {
    if pool.is_empty() {
        return "";
    }
    pool.get(selector.pick(pool.len())).copied().unwrap_or("")
}

fn non_empty(fragments: &[String]) -> Vec<&str> {
    fragments
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect()
}

fn append_fragment(base: &str, fragment: &str, separator: &str) -> String {
    if base.is_empty() {
        fragment.to_string()
    } else {
        format!("{base}{separator}{fragment}")
    }
}

fn compose(lead: &str, required: &[&str], optionals: &[&str], separator: &str) -> String {
    let mut body = String::new();
    for part in required.iter().chain(optionals.iter()) {
        body = append_fragment(&body, part, separator);
    }
    if body.is_empty() {
        lead.trim_end().to_string()
    } else {
        format!("{lead}{body}")
    }
}

/// Final cleanup: trims and drops any leading separator left behind by a
/// record whose required fragments were all empty.
fn tidy(s: &str) -> String {
    s.trim()
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '–' | '|' | '-' | ',' | '.' | ':'))
        .to_string()
}
