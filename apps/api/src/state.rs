use std::sync::Arc;

use crate::config::Config;
use crate::generation::selector::TemplateSelector;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable template selector. Default: ThreadRngSelector. Requests may
    /// override it with a seeded or first-index selector for reproducible runs.
    pub selector: Arc<dyn TemplateSelector>,
}
