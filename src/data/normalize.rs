use std::collections::HashSet;

use crate::error::{DataError, Result};

use super::model::{CellValue, Dataset, RawDataset};

/// Clean a freshly loaded sheet.
///
/// * headers are trimmed; blank ones become `Unnamed: <index>` and repeated
///   names get a `.1`, `.2`, … suffix
/// * rows empty in every column are dropped
/// * the base column must exist, and rows without a base value are dropped
///
/// The input is consumed and a new [`Dataset`] is returned.
pub fn normalize(raw: RawDataset, base_column: &str) -> Result<Dataset> {
    let columns = clean_headers(&raw.headers);

    let base_idx = columns
        .iter()
        .position(|c| c == base_column.trim())
        .ok_or_else(|| DataError::MissingColumn(base_column.trim().to_string()))?;

    let rows: Vec<Vec<CellValue>> = raw
        .rows
        .into_iter()
        .filter(|row| !row.iter().all(CellValue::is_empty))
        .filter(|row| row.get(base_idx).is_some_and(|v| !v.is_empty()))
        .collect();

    Ok(Dataset { columns, rows })
}

fn clean_headers(headers: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let trimmed = h.trim();
            let base = if trimmed.is_empty() {
                format!("Unnamed: {i}")
            } else {
                trimmed.to_string()
            };
            let mut name = base.clone();
            let mut n = 1;
            while seen.contains(&name) {
                name = format!("{base}.{n}");
                n += 1;
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn raw() -> RawDataset {
        RawDataset::new(
            vec![" TNB Model ".into(), "Krueger\t".into(), "Titus".into()],
            vec![
                vec![text("100"), text("K1"), CellValue::Null],
                vec![CellValue::Null, CellValue::Null, CellValue::Null],
                vec![CellValue::Null, text("K9"), text("T9")],
                vec![CellValue::Float(200.0), CellValue::Null, text("T2")],
                vec![text("  "), text(""), CellValue::Null],
            ],
        )
    }

    #[test]
    fn trims_headers_and_drops_blank_rows() {
        let ds = normalize(raw(), "TNB Model").unwrap();
        assert_eq!(ds.columns, vec!["TNB Model", "Krueger", "Titus"]);
        assert_eq!(ds.len(), 2);
        assert!(ds.columns.iter().all(|c| c.trim() == c));
        assert!(ds.rows.iter().all(|r| !r[0].is_empty()));
    }

    #[test]
    fn padded_base_column_name_still_matches() {
        let ds = normalize(raw(), "  TNB Model").unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn missing_base_column_is_reported() {
        let err = normalize(raw(), "Price").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "Price"));
        assert!(err.is_blocking());
    }

    #[test]
    fn blank_and_duplicate_headers_get_unique_names() {
        let raw = RawDataset::new(
            vec!["TNB Model".into(), "".into(), "Titus".into(), "Titus ".into()],
            vec![vec![text("1"), text("x"), text("a"), text("b")]],
        );
        let ds = normalize(raw, "TNB Model").unwrap();
        assert_eq!(ds.columns, vec!["TNB Model", "Unnamed: 1", "Titus", "Titus.1"]);
    }
}
