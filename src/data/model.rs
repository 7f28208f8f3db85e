use crate::error::DataError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the cross-reference sheet
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as it comes out of a spreadsheet reader.
///
/// Model numbers are usually text, but spreadsheets happily store `100` as a
/// number, so the numeric variants are kept and only turned into text through
/// [`CellValue::display_text`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// Largest magnitude for which an integral float is printed as an integer.
const MAX_EXACT_INTEGRAL: f64 = 9_007_199_254_740_992.0;

impl CellValue {
    /// Whether the cell carries no data (null, NaN or blank text).
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Float(v) => v.is_nan(),
            CellValue::Integer(_) | CellValue::Bool(_) => false,
        }
    }

    /// Canonical textual form used for matching, display and CSV export.
    ///
    /// Empty cells become `""`. Integral floats lose their fractional part so a
    /// model number read as `100.0` still shows as `100`.
    pub fn display_text(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(v) => {
                if v.fract() == 0.0 && v.abs() < MAX_EXACT_INTEGRAL {
                    format!("{}", *v as i64)
                } else {
                    format!("{v}")
                }
            }
            CellValue::Bool(b) => b.to_string(),
            CellValue::Null => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// RawDataset – straight out of a loader
// ---------------------------------------------------------------------------

/// A rectangular sheet exactly as read: headers may be padded or blank and
/// rows may be entirely empty.
#[derive(Debug, Clone, Default)]
pub struct RawDataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawDataset {
    /// Build a raw dataset, padding or truncating every row to header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        RawDataset { headers, rows }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the normalized cross-reference table
// ---------------------------------------------------------------------------

/// The normalized dataset shared (read-only) by every view.
///
/// Every column is a brand column; `columns` keeps the sheet order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Like [`Dataset::column_index`] but reports a missing column as an error.
    pub fn require_column(&self, column: &str) -> Result<usize, DataError> {
        self.column_index(column)
            .ok_or_else(|| DataError::MissingColumn(column.to_string()))
    }

    /// The first `n` rows rendered as display text.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .take(n)
                .map(|row| row.iter().map(CellValue::display_text).collect())
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// RowSubset – a filtered view into a dataset
// ---------------------------------------------------------------------------

/// Rows of a [`Dataset`] selected by index, in original order.
#[derive(Debug, Clone)]
pub struct RowSubset<'a> {
    pub dataset: &'a Dataset,
    pub indices: Vec<usize>,
}

impl<'a> RowSubset<'a> {
    pub fn rows(&self) -> impl Iterator<Item = &'a [CellValue]> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| dataset.rows[i].as_slice())
    }
}

// ---------------------------------------------------------------------------
// Table – text-only output of the comparison engine
// ---------------------------------------------------------------------------

/// A rendered table. Every cell is text; `""` marks "no data".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_float_has_no_trailing_decimal() {
        assert_eq!(CellValue::Float(100.0).display_text(), "100");
        assert_eq!(CellValue::Float(-3.0).display_text(), "-3");
        assert_eq!(CellValue::Float(12.5).display_text(), "12.5");
        assert_eq!(CellValue::Integer(200).display_text(), "200");
    }

    #[test]
    fn blank_values_are_empty() {
        assert!(CellValue::Null.is_empty());
        assert!(CellValue::Text("   ".into()).is_empty());
        assert!(CellValue::Float(f64::NAN).is_empty());
        assert_eq!(CellValue::Float(f64::NAN).display_text(), "");
        assert!(!CellValue::Integer(0).is_empty());
    }

    #[test]
    fn raw_rows_are_padded_to_header_width() {
        let raw = RawDataset::new(
            vec!["A".into(), "B".into(), "C".into()],
            vec![vec![CellValue::Integer(1)], vec![CellValue::Null; 4]],
        );
        assert!(raw.rows.iter().all(|r| r.len() == 3));
    }

    #[test]
    fn head_renders_display_text() {
        let ds = Dataset {
            columns: vec!["TNB Model".into(), "Titus".into()],
            rows: vec![
                vec![CellValue::Float(100.0), CellValue::Null],
                vec![CellValue::Text("200".into()), CellValue::Text("T2".into())],
            ],
        };
        let head = ds.head(1);
        assert_eq!(head.rows, vec![vec!["100".to_string(), String::new()]]);
        assert_eq!(head.columns, ds.columns);
    }
}
