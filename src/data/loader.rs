use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use bytes::Bytes;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use crate::error::DataError;

use super::model::{CellValue, RawDataset};

// ---------------------------------------------------------------------------
// File formats
// ---------------------------------------------------------------------------

/// Supported input formats, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first worksheet.
    Spreadsheet,
    Csv,
    /// Records array: `[{ "TNB Model": "100", "Titus": "T1" }, ...]`
    Json,
    Parquet,
}

/// Extensions offered in the upload dialog.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "json", "parquet", "pq",
];

impl SourceFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(SourceFormat::Spreadsheet),
            "csv" => Some(SourceFormat::Csv),
            "json" => Some(SourceFormat::Json),
            "parquet" | "pq" => Some(SourceFormat::Parquet),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        SourceFormat::from_extension(ext)
            .ok_or_else(|| anyhow!("Unsupported file extension: .{ext}"))
    }
}

/// Read and parse a file from disk.
pub fn load_file(path: &Path) -> Result<RawDataset> {
    let format = SourceFormat::from_path(path)?;
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse_bytes(Bytes::from(bytes), format)
}

/// Parse an in-memory file of the given format.
pub fn parse_bytes(bytes: Bytes, format: SourceFormat) -> Result<RawDataset> {
    match format {
        SourceFormat::Spreadsheet => parse_spreadsheet(bytes),
        SourceFormat::Csv => parse_csv(&bytes),
        SourceFormat::Json => parse_json(&bytes),
        SourceFormat::Parquet => parse_parquet(bytes),
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet (calamine)
// ---------------------------------------------------------------------------

/// First worksheet, first row is the header.
fn parse_spreadsheet(bytes: Bytes) -> Result<RawDataset> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| anyhow!("opening workbook: {e}"))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("workbook does not contain any worksheets")?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| anyhow!("reading worksheet '{sheet}': {e}"))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .with_context(|| format!("worksheet '{sheet}' is empty"))?
        .iter()
        .map(|c| spreadsheet_cell(c).display_text())
        .collect();

    let body = rows
        .map(|row| row.iter().map(spreadsheet_cell).collect())
        .collect();

    Ok(RawDataset::new(headers, body))
}

fn spreadsheet_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Header row with brand names. Cells are kept as text so leading zeros in
/// model numbers survive.
fn parse_csv(bytes: &[u8]) -> Result<RawDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(text_cell).collect());
    }

    Ok(RawDataset::new(headers, rows))
}

fn text_cell(s: &str) -> CellValue {
    if s.trim().is_empty() {
        CellValue::Null
    } else {
        CellValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`). Columns are taken
/// in first-seen key order across all records.
fn parse_json(bytes: &[u8]) -> Result<RawDataset> {
    let root: JsonValue = serde_json::from_slice(bytes).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map_or(CellValue::Null, json_cell))
                .collect()
        })
        .collect();

    Ok(RawDataset::new(headers, rows))
}

fn json_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => text_cell(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Every column is a brand column. Works with files written by Pandas
/// (`df.to_parquet()`) and Polars (`df.write_parquet()`).
fn parse_parquet(bytes: Bytes) -> Result<RawDataset> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(bytes).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| arrow_cell(col, row))
                    .collect(),
            );
        }
    }

    Ok(RawDataset::new(headers, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => text_cell(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => text_cell(col.as_string::<i64>().value(row)),
        DataType::Int8 => CellValue::Integer(col.as_primitive::<Int8Type>().value(row).into()),
        DataType::Int16 => CellValue::Integer(col.as_primitive::<Int16Type>().value(row).into()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row).into()),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => CellValue::Integer(col.as_primitive::<UInt8Type>().value(row).into()),
        DataType::UInt16 => CellValue::Integer(col.as_primitive::<UInt16Type>().value(row).into()),
        DataType::UInt32 => CellValue::Integer(col.as_primitive::<UInt32Type>().value(row).into()),
        DataType::UInt64 => {
            let v = col.as_primitive::<UInt64Type>().value(row);
            i64::try_from(v).map_or_else(|_| CellValue::Text(v.to_string()), CellValue::Integer)
        }
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row).into()),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        _ => arrow::util::display::array_value_to_string(col, row)
            .map_or(CellValue::Null, |s| text_cell(&s)),
    }
}

// ---------------------------------------------------------------------------
// Ranked sources
// ---------------------------------------------------------------------------

/// One way of obtaining the raw sheet.
pub trait DatasetSource: Send + Sync {
    /// Short label for logs and the status bar.
    fn name(&self) -> String;
    fn fetch(&self) -> Result<RawDataset>;
}

/// A file shipped next to the application.
pub struct BundledFile {
    pub path: PathBuf,
}

impl DatasetSource for BundledFile {
    fn name(&self) -> String {
        format!("bundled file {}", self.path.display())
    }

    fn fetch(&self) -> Result<RawDataset> {
        if !self.path.exists() {
            bail!("{} does not exist", self.path.display());
        }
        load_file(&self.path)
    }
}

/// A file downloaded over HTTP(S). The format comes from the URL path.
pub struct RemoteUrl {
    pub url: String,
    client: reqwest::blocking::Client,
}

impl RemoteUrl {
    pub fn new(url: impl Into<String>) -> Self {
        RemoteUrl {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn format(&self) -> Result<SourceFormat> {
        let parsed = reqwest::Url::parse(&self.url)
            .with_context(|| format!("invalid URL '{}'", self.url))?;
        SourceFormat::from_path(Path::new(parsed.path()))
    }
}

impl DatasetSource for RemoteUrl {
    fn name(&self) -> String {
        format!("remote {}", self.url)
    }

    fn fetch(&self) -> Result<RawDataset> {
        let format = self.format()?;
        let bytes = self
            .client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .with_context(|| format!("downloading {}", self.url))?;
        parse_bytes(bytes, format)
    }
}

/// A file picked by the user at runtime.
pub struct ManualUpload {
    pub path: PathBuf,
}

impl DatasetSource for ManualUpload {
    fn name(&self) -> String {
        let file = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        format!("upload {file}")
    }

    fn fetch(&self) -> Result<RawDataset> {
        load_file(&self.path)
    }
}

/// A raw sheet plus the name of the source that produced it.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub raw: RawDataset,
    pub source: String,
}

/// Tries each source in rank order and returns the first that succeeds.
#[derive(Clone, Default)]
pub struct Loader {
    sources: Vec<Arc<dyn DatasetSource>>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl DatasetSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn load(&self) -> Result<LoadedDataset, DataError> {
        let mut attempts = Vec::new();
        for source in &self.sources {
            let name = source.name();
            match source.fetch() {
                Ok(raw) => {
                    log::info!(
                        "Loaded {} rows with columns {:?} from {name}",
                        raw.rows.len(),
                        raw.headers
                    );
                    return Ok(LoadedDataset { raw, source: name });
                }
                Err(e) => {
                    log::warn!("Could not load from {name}: {e:#}");
                    attempts.push(format!("{name}: {e:#}"));
                }
            }
        }
        if attempts.is_empty() {
            attempts.push("no source configured".to_string());
        }
        Err(DataError::MissingInput { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use crate::data::compare::{compare, ComparisonOutcome, ComparisonRequest};
    use crate::data::normalize::normalize;

    struct Stub {
        label: &'static str,
        result: Option<RawDataset>,
    }

    impl DatasetSource for Stub {
        fn name(&self) -> String {
            self.label.to_string()
        }

        fn fetch(&self) -> Result<RawDataset> {
            self.result.clone().context("unavailable")
        }
    }

    fn sheet(marker: &str) -> RawDataset {
        RawDataset::new(
            vec!["TNB Model".into()],
            vec![vec![CellValue::Text(marker.into())]],
        )
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("data/Cross.XLSX")).unwrap(),
            SourceFormat::Spreadsheet
        );
        assert_eq!(SourceFormat::from_extension("pq"), Some(SourceFormat::Parquet));
        assert!(SourceFormat::from_path(Path::new("notes.txt")).is_err());
    }

    #[test]
    fn remote_format_ignores_query_string() {
        let remote = RemoteUrl::new("https://example.com/raw/main/data.csv?token=abc");
        assert_eq!(remote.format().unwrap(), SourceFormat::Csv);
    }

    #[test]
    fn csv_cells_stay_text() {
        let raw = parse_csv(b"TNB Model ,Krueger,Titus\n0100,K1,\n200,,T2\n").unwrap();
        assert_eq!(raw.headers, vec!["TNB Model ", "Krueger", "Titus"]);
        assert_eq!(raw.rows[0][0], CellValue::Text("0100".into()));
        assert_eq!(raw.rows[0][2], CellValue::Null);
        assert_eq!(raw.rows[1][1], CellValue::Null);
    }

    #[test]
    fn csv_short_rows_are_padded() {
        let raw = parse_csv(b"A,B,C\n1\n").unwrap();
        assert_eq!(raw.rows[0].len(), 3);
    }

    #[test]
    fn json_records_keep_key_order_and_numbers() {
        let raw = parse_json(
            br#"[{"TNB Model": 100.0, "Titus": "T1"}, {"TNB Model": 200, "Krueger": null}]"#,
        )
        .unwrap();
        assert_eq!(raw.headers, vec!["TNB Model", "Titus", "Krueger"]);
        assert_eq!(raw.rows[0][0].display_text(), "100");
        assert_eq!(raw.rows[1][0], CellValue::Integer(200));
        assert_eq!(raw.rows[1][1], CellValue::Null);
    }

    #[test]
    fn json_must_be_array() {
        assert!(parse_json(br#"{"TNB Model": 1}"#).is_err());
    }

    #[test]
    fn parquet_columns_become_cells() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("TNB Model", DataType::Float64, true),
            Field::new("Titus", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Float64Array::from(vec![Some(100.0), None])),
                Arc::new(StringArray::from(vec![None, Some("T2")])),
            ],
        )
        .unwrap();
        let mut buf = Vec::new();
        let mut writer = ArrowWriter::try_new(&mut buf, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let raw = parse_bytes(Bytes::from(buf), SourceFormat::Parquet).unwrap();
        assert_eq!(raw.headers, vec!["TNB Model", "Titus"]);
        assert_eq!(raw.rows[0][0].display_text(), "100");
        assert_eq!(raw.rows[0][1], CellValue::Null);
        assert_eq!(raw.rows[1][1], CellValue::Text("T2".into()));
    }

    fn inline_str(cell: &str, text: &str) -> String {
        format!(r#"<c r="{cell}" t="inlineStr"><is><t xml:space="preserve">{text}</t></is></c>"#)
    }

    /// Minimal single-sheet `.xlsx` package around `sheet_data`.
    fn xlsx(sheet_data: &str) -> Vec<u8> {
        let parts = [
            (
                "[Content_Types].xml",
                r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#.to_string(),
            ),
            (
                "_rels/.rels",
                r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#.to_string(),
            ),
            (
                "xl/workbook.xml",
                r#"<?xml version="1.0" encoding="UTF-8"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Cross Reference" sheetId="1" r:id="rId1"/></sheets></workbook>"#.to_string(),
            ),
            (
                "xl/_rels/workbook.xml.rels",
                r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#.to_string(),
            ),
            (
                "xl/worksheets/sheet1.xml",
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_data}</sheetData></worksheet>"#
                ),
            ),
        ];

        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        for (name, body) in parts {
            zip.start_file(name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn xlsx_numeric_models_compare_without_fraction() {
        // Row 3 is fully blank and row 4 has no base model.
        let sheet_data = [
            format!(
                r#"<row r="1">{}{}{}</row>"#,
                inline_str("A1", " TNB Model "),
                inline_str("B1", "Krueger"),
                inline_str("C1", "Titus")
            ),
            format!(r#"<row r="2"><c r="A2"><v>100</v></c>{}</row>"#, inline_str("B2", "K1")),
            format!(
                r#"<row r="4">{}{}</row>"#,
                inline_str("B4", "K9"),
                inline_str("C4", "T9")
            ),
            format!(r#"<row r="5"><c r="A5"><v>200</v></c>{}</row>"#, inline_str("C5", "T2")),
        ]
        .concat();

        let raw = parse_bytes(Bytes::from(xlsx(&sheet_data)), SourceFormat::Spreadsheet).unwrap();
        assert_eq!(raw.headers.len(), 3);
        assert_eq!(raw.rows[0][0], CellValue::Float(100.0));

        let ds = normalize(raw, "TNB Model").unwrap();
        assert_eq!(ds.columns, vec!["TNB Model", "Krueger", "Titus"]);
        assert_eq!(ds.len(), 2);

        let request = ComparisonRequest::new("TNB Model", ["100"], ["Krueger", "Titus"]);
        let ComparisonOutcome::Ready(result) = compare(&ds, &request).unwrap() else {
            panic!("expected a comparison result");
        };
        assert_eq!(
            result.export.rows,
            vec![vec!["100".to_string(), "K1".to_string(), String::new()]]
        );
    }

    #[test]
    fn spreadsheet_without_cells_is_an_error() {
        let err = parse_bytes(Bytes::from(xlsx("")), SourceFormat::Spreadsheet).unwrap_err();
        assert!(format!("{err:#}").contains("is empty"));
    }

    /// Answer a single HTTP request on an ephemeral local port with `response`.
    fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = stream.write_all(response.as_bytes());
        });
        format!("http://{addr}")
    }

    fn local_remote(url: String) -> RemoteUrl {
        RemoteUrl {
            url,
            client: reqwest::blocking::Client::builder()
                .no_proxy()
                .build()
                .unwrap(),
        }
    }

    #[test]
    fn remote_csv_is_downloaded_and_parsed() {
        let body = "TNB Model,Titus\n100,T1\n";
        let base = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ));
        let raw = local_remote(format!("{base}/crossref.csv")).fetch().unwrap();
        assert_eq!(raw.headers, vec!["TNB Model", "Titus"]);
        assert_eq!(raw.rows[0][1], CellValue::Text("T1".into()));
    }

    #[test]
    fn remote_not_found_falls_back_to_next_source() {
        let not_found =
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string();

        let remote = local_remote(format!("{}/crossref.csv", serve_once(not_found.clone())));
        let err = remote.fetch().unwrap_err();
        assert!(format!("{err:#}").contains("404"));

        let loader = Loader::new()
            .with_source(local_remote(format!("{}/crossref.csv", serve_once(not_found))))
            .with_source(Stub { label: "upload", result: Some(sheet("upload")) });
        let loaded = loader.load().unwrap();
        assert_eq!(loaded.source, "upload");
        assert_eq!(loaded.raw.rows[0][0], CellValue::Text("upload".into()));
    }

    #[test]
    fn loader_falls_back_in_rank_order() {
        let loader = Loader::new()
            .with_source(Stub { label: "bundled", result: None })
            .with_source(Stub { label: "remote", result: Some(sheet("remote")) })
            .with_source(Stub { label: "upload", result: Some(sheet("upload")) });
        let loaded = loader.load().unwrap();
        assert_eq!(loaded.source, "remote");
        assert_eq!(loaded.raw.rows[0][0], CellValue::Text("remote".into()));
    }

    #[test]
    fn loader_reports_every_failed_attempt() {
        let loader = Loader::new()
            .with_source(Stub { label: "bundled", result: None })
            .with_source(BundledFile { path: PathBuf::from("/nonexistent/crossref.xlsx") });
        match loader.load() {
            Err(DataError::MissingInput { attempts }) => {
                assert_eq!(attempts.len(), 2);
                assert!(attempts[0].starts_with("bundled"));
                assert!(attempts[1].contains("does not exist"));
            }
            other => panic!("expected MissingInput, got {other:?}"),
        }
    }

    #[test]
    fn empty_loader_is_missing_input() {
        assert!(matches!(
            Loader::new().load(),
            Err(DataError::MissingInput { .. })
        ));
    }
}
