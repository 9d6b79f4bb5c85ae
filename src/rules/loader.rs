//! Rule loading.
//!
//! # Responsibilities
//! - Read the configured source fresh for each request
//! - Select the rule sheet (configured name, else the first sheet)
//! - Validate every row, dropping invalid ones with a warning
//! - Keep source row order; duplicates are retained
//!
//! # Design Decisions
//! - Reading happens on the blocking pool so slow disks never stall the runtime
//! - The read is bounded by a deadline; a timeout counts as "unavailable"

use std::sync::Arc;
use std::time::Duration;

use crate::rules::error::LoadError;
use crate::rules::rule::{RedirectRule, RuleSet};
use crate::rules::source::TabularSource;

/// Load and validate rules from `source`.
///
/// Returns `RuleSet::Unavailable` when the source cannot be read and
/// `LoadError` when it is readable but has no usable sheet.
pub fn load_rules(source: &dyn TabularSource, sheet: Option<&str>) -> Result<RuleSet, LoadError> {
    let workbook = match source.read() {
        Ok(workbook) => workbook,
        Err(e) => {
            tracing::error!(path = %source.location(), error = %e, "Could not read file");
            return Ok(RuleSet::Unavailable);
        }
    };

    let sheet_name = match sheet.or_else(|| workbook.first_sheet_name()) {
        Some(name) => name.to_string(),
        None => {
            tracing::error!("No sheets found in the rule source");
            return Err(LoadError::NoSheets);
        }
    };

    let Some(data) = workbook.sheet(&sheet_name) else {
        tracing::error!(sheet = %sheet_name, "Worksheet not found in rule source");
        return Err(LoadError::SheetMissing(sheet_name));
    };

    let mut rules = Vec::with_capacity(data.rows.len());
    for row in &data.rows {
        match RedirectRule::from_row(row) {
            Ok(rule) => rules.push(rule),
            Err(e) => tracing::warn!(row = ?row, error = %e, "Skipping invalid row"),
        }
    }

    tracing::debug!(count = rules.len(), "Loaded redirect rules");
    Ok(RuleSet::Available(rules))
}

/// Async front for [`load_rules`], shared by all request handlers.
#[derive(Clone)]
pub struct RuleLoader {
    source: Arc<dyn TabularSource>,
    sheet: Option<String>,
    read_timeout: Duration,
}

impl RuleLoader {
    pub fn new(source: Arc<dyn TabularSource>, sheet: Option<String>, read_timeout: Duration) -> Self {
        Self {
            source,
            sheet,
            read_timeout,
        }
    }

    /// Produce a fresh rule set. Nothing is cached between calls.
    pub async fn load(&self) -> Result<RuleSet, LoadError> {
        let source = Arc::clone(&self.source);
        let sheet = self.sheet.clone();
        let task = tokio::task::spawn_blocking(move || load_rules(source.as_ref(), sheet.as_deref()));

        match tokio::time::timeout(self.read_timeout, task).await {
            Ok(joined) => joined?,
            Err(_) => {
                tracing::error!(
                    path = %self.source.location(),
                    timeout_ms = self.read_timeout.as_millis() as u64,
                    "Timed out reading rule source"
                );
                Ok(RuleSet::Unavailable)
            }
        }
    }
}

impl std::fmt::Debug for RuleLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleLoader")
            .field("source", &self.source.location())
            .field("sheet", &self.sheet)
            .field("read_timeout", &self.read_timeout)
            .finish()
    }
}
