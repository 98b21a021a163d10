use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use spacex_dash::config::DEFAULT_DATA_PATH;
use spacex_dash::data::loader::LaunchRow;
use spacex_dash::data::model::{
    LaunchRecord, OutcomeClass, COL_BOOSTER_CATEGORY, COL_BOOSTER_VERSION, COL_CLASS,
    COL_FLIGHT_NUMBER, COL_LAUNCH_SITE, COL_PAYLOAD_MASS,
};

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster eras in flight order: (category, flights, max payload kg, success rate).
const ERAS: [(&str, usize, f64, f64); 5] = [
    ("v1.0", 5, 700.0, 0.2),
    ("v1.1", 15, 4500.0, 0.35),
    ("FT", 24, 9600.0, 0.7),
    ("B4", 11, 6000.0, 0.55),
    ("B5", 1, 3700.0, 1.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn generate_launches(rng: &mut SimpleRng) -> Vec<LaunchRecord> {
    let mut launches = Vec::new();
    let mut flight: i64 = 1;

    for &(category, flights, max_payload, success_rate) in &ERAS {
        for serial in 0..flights {
            // Payloads are reported to the nearest kilogram.
            let payload = (rng.next_f64() * max_payload).round();
            let class = if rng.next_f64() < success_rate {
                OutcomeClass::Success
            } else {
                OutcomeClass::Failure
            };
            launches.push(LaunchRecord {
                flight_number: Some(flight),
                launch_site: rng.pick(&SITES).to_string(),
                payload_mass_kg: payload,
                class,
                booster_version: Some(format!("F9 {category} B{:04}", 1000 + serial)),
                booster_version_category: category.to_string(),
            });
            flight += 1;
        }
    }
    launches
}

fn write_csv(path: &Path, rows: &[LaunchRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[LaunchRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(COL_FLIGHT_NUMBER, DataType::Int64, true),
        Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
        Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
        Field::new(COL_CLASS, DataType::Int64, false),
        Field::new(COL_BOOSTER_VERSION, DataType::Utf8, true),
        Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.launch_site.as_str()))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.booster_version.as_deref()))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_version_category.as_str()),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

    let mut rng = SimpleRng::new(42);
    let rows: Vec<LaunchRow> = generate_launches(&mut rng).iter().map(LaunchRow::from).collect();

    let is_parquet = output_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet") || ext.eq_ignore_ascii_case("pq"));
    if is_parquet {
        write_parquet(&output_path, &rows)?;
    } else {
        write_csv(&output_path, &rows)?;
    }

    println!("Wrote {} launches to {}", rows.len(), output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_launches_survive_the_row_view() {
        let launches = generate_launches(&mut SimpleRng::new(42));
        assert_eq!(launches.len(), ERAS.iter().map(|e| e.1).sum::<usize>());
        for (i, rec) in launches.iter().enumerate() {
            let row = LaunchRow::from(rec);
            assert_eq!(row.class, i64::from(rec.class.code()));
            assert_eq!(row.into_record(i).unwrap(), *rec);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(
            generate_launches(&mut SimpleRng::new(7)),
            generate_launches(&mut SimpleRng::new(7))
        );
    }
}
