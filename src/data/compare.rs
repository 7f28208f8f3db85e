use std::collections::HashSet;

use crate::error::{DataError, Result};

use super::filter::filter_by_models;
use super::model::{Dataset, RowSubset, Table};

// ---------------------------------------------------------------------------
// Request / result types
// ---------------------------------------------------------------------------

/// One user interaction's worth of selections. Built fresh each time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub base_column: String,
    /// Selected base-model values, in selection order.
    pub models: Vec<String>,
    /// Competitor brand columns, in display order.
    pub competitors: Vec<String>,
}

impl ComparisonRequest {
    pub fn new(
        base_column: impl Into<String>,
        models: impl IntoIterator<Item = impl Into<String>>,
        competitors: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        ComparisonRequest {
            base_column: base_column.into(),
            models: dedup(models.into_iter().map(Into::into)),
            competitors: dedup(competitors.into_iter().map(Into::into)),
        }
    }
}

fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.filter(|s| seen.insert(s.clone())).collect()
}

/// Tables produced for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    /// `(model, table)` for every selected model, in selection order. A table
    /// may be empty when that model has no competitor data.
    pub per_model: Vec<(String, Table)>,
    /// All selected models together; this is what gets exported.
    pub export: Table,
}

/// What the comparison view should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonOutcome {
    /// Nothing selected yet. Not an error.
    EmptySelection,
    /// Selections made but no row survived pruning.
    NoMatch,
    Ready(ComparisonResult),
}

// ---------------------------------------------------------------------------
// Table building
// ---------------------------------------------------------------------------

/// Project `subset` onto `[base] ++ competitors`, blank out missing cells and
/// drop rows without any competitor data.
pub fn build_comparison_table<S: AsRef<str>>(
    subset: &RowSubset<'_>,
    base_column: &str,
    competitor_columns: &[S],
) -> Result<Table> {
    let dataset = subset.dataset;
    let base_idx = dataset.require_column(base_column)?;

    let mut columns = vec![base_column.to_string()];
    let mut competitor_idx = Vec::with_capacity(competitor_columns.len());
    for col in competitor_columns {
        let col = col.as_ref();
        if col == base_column {
            return Err(DataError::BaseAsCompetitor(col.to_string()));
        }
        competitor_idx.push(dataset.require_column(col)?);
        columns.push(col.to_string());
    }

    let rows = subset
        .rows()
        .filter_map(|row| {
            let competitors: Vec<String> =
                competitor_idx.iter().map(|&i| row[i].display_text()).collect();
            if competitors.iter().all(String::is_empty) {
                return None;
            }
            let mut out = Vec::with_capacity(columns.len());
            out.push(row[base_idx].display_text());
            out.extend(competitors);
            Some(out)
        })
        .collect();

    Ok(Table { columns, rows })
}

/// The combined table for every selected model, used for CSV export.
///
/// Identical input always yields identical rows in identical order.
pub fn build_export_table<S: AsRef<str>>(
    filtered: &RowSubset<'_>,
    base_column: &str,
    competitor_columns: &[S],
) -> Result<Table> {
    build_comparison_table(filtered, base_column, competitor_columns)
}

/// Run a full comparison for `request`.
pub fn compare(dataset: &Dataset, request: &ComparisonRequest) -> Result<ComparisonOutcome> {
    dataset.require_column(&request.base_column)?;

    if request.models.is_empty() || request.competitors.is_empty() {
        return Ok(ComparisonOutcome::EmptySelection);
    }

    let filtered = filter_by_models(dataset, &request.base_column, &request.models)?;
    let export = build_export_table(&filtered, &request.base_column, &request.competitors)?;

    let mut per_model = Vec::with_capacity(request.models.len());
    for model in &request.models {
        let subset = filter_by_models(dataset, &request.base_column, std::slice::from_ref(model))?;
        let table = build_comparison_table(&subset, &request.base_column, &request.competitors)?;
        per_model.push((model.clone(), table));
    }

    if export.is_empty() {
        log::warn!(
            "No competitor data for {} selected model(s) in '{}'",
            request.models.len(),
            request.base_column
        );
        return Ok(ComparisonOutcome::NoMatch);
    }

    Ok(ComparisonOutcome::Ready(ComparisonResult { per_model, export }))
}
