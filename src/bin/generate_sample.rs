use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Competitor brands and the prefix their model numbers use.
const BRANDS: &[(&str, &str)] = &[
    ("Krueger", "K"),
    ("Titus", "T"),
    ("Price", "P"),
    ("Nailor", "N"),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        ((self.next_u64() >> 11) as f64 / (1u64 << 53) as f64) < p
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // Base models are stored as numbers, the way spreadsheets tend to keep them.
    let base_models: Vec<f64> = (1..=40).map(|i| (i * 100) as f64).collect();

    let mut tnb: Vec<Option<f64>> = Vec::new();
    let mut competitors: Vec<Vec<Option<String>>> = vec![Vec::new(); BRANDS.len()];

    for &model in &base_models {
        // one or two cross-reference rows per base model
        let variants = if rng.chance(0.3) { 2 } else { 1 };
        for variant in 0..variants {
            tnb.push(Some(model));
            for (col, (_, prefix)) in competitors.iter_mut().zip(BRANDS) {
                let value = (!rng.chance(0.35))
                    .then(|| format!("{prefix}{}-{}", model as i64 / 100, variant + 1));
                col.push(value);
            }
        }
        // occasional blank separator row, as found in hand-maintained sheets
        if rng.chance(0.1) {
            tnb.push(None);
            for col in &mut competitors {
                col.push(None);
            }
        }
    }

    let mut fields = vec![Field::new("TNB Model", DataType::Float64, true)];
    let mut columns: Vec<ArrayRef> = vec![Arc::new(Float64Array::from(tnb.clone()))];
    for ((brand, _), values) in BRANDS.iter().zip(&competitors) {
        fields.push(Field::new(*brand, DataType::Utf8, true));
        columns.push(Arc::new(StringArray::from(values.clone())));
    }
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    // Write Parquet
    let parquet_path = "sample_crossref.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    // Write CSV (same rows)
    let csv_path = "sample_crossref.csv";
    let mut csv_writer = csv::Writer::from_path(csv_path).context("creating CSV file")?;
    let mut header = vec!["TNB Model".to_string()];
    header.extend(BRANDS.iter().map(|(b, _)| b.to_string()));
    csv_writer.write_record(&header)?;
    for (i, model) in tnb.iter().enumerate() {
        let mut record = vec![model.map(|m| (m as i64).to_string()).unwrap_or_default()];
        record.extend(competitors.iter().map(|c| c[i].clone().unwrap_or_default()));
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;

    println!(
        "Wrote {} rows for {} base models to {parquet_path} and {csv_path}",
        tnb.len(),
        base_models.len()
    );
    Ok(())
}
