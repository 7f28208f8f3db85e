use std::collections::{BTreeSet, HashSet};

use crate::error::Result;

use super::model::{Dataset, RowSubset};

// ---------------------------------------------------------------------------
// Distinct values (feeds the model pickers)
// ---------------------------------------------------------------------------

/// Every non-empty value of `column` as display text, de-duplicated and in
/// ascending lexical order.
pub fn list_distinct_values(dataset: &Dataset, column: &str) -> Result<Vec<String>> {
    let idx = dataset.require_column(column)?;
    let values: BTreeSet<String> = dataset
        .rows
        .iter()
        .map(|row| row[idx].display_text())
        .filter(|s| !s.is_empty())
        .collect();
    Ok(values.into_iter().collect())
}

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Rows whose `column` value (as display text) is one of `selected`.
///
/// Original row order is kept and each row appears at most once.
pub fn filter_by_models<'a, S: AsRef<str>>(
    dataset: &'a Dataset,
    column: &str,
    selected: &[S],
) -> Result<RowSubset<'a>> {
    let idx = dataset.require_column(column)?;
    let wanted: HashSet<&str> = selected.iter().map(AsRef::as_ref).collect();

    let indices = dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            let value = row[idx].display_text();
            !value.is_empty() && wanted.contains(value.as_str())
        })
        .map(|(i, _)| i)
        .collect();

    Ok(RowSubset { dataset, indices })
}
