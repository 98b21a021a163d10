use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{
    LaunchDataset, LaunchRecord, OutcomeClass, COL_BOOSTER_CATEGORY, COL_BOOSTER_VERSION,
    COL_CLASS, COL_FLIGHT_NUMBER, COL_LAUNCH_SITE, COL_PAYLOAD_MASS, REQUIRED_COLUMNS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the launch record column names
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, ... }, ...]`
/// * `.parquet` – one Arrow column per launch record field
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading launch records from {}", path.display()))?;

    log::info!(
        "Loaded {} launches across {} sites, payload range {:?}",
        dataset.len(),
        dataset.site_names().len(),
        dataset.payload_bounds()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// LaunchRow – serde view of one input row
// ---------------------------------------------------------------------------

/// One row as it appears in CSV / JSON input. Unknown columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRow {
    #[serde(rename = "Flight Number", default)]
    pub flight_number: Option<i64>,
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "class")]
    pub class: i64,
    #[serde(rename = "Booster Version", default)]
    pub booster_version: Option<String>,
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
}

impl LaunchRow {
    /// Validate the raw cells of row `row` into a typed record.
    pub fn into_record(self, row: usize) -> Result<LaunchRecord, DataError> {
        let class = OutcomeClass::from_code(self.class).ok_or_else(|| DataError::InvalidValue {
            row,
            column: COL_CLASS,
            value: self.class.to_string(),
        })?;

        Ok(LaunchRecord {
            flight_number: self.flight_number,
            launch_site: self.launch_site,
            payload_mass_kg: self.payload_mass_kg,
            class,
            booster_version: self.booster_version.filter(|v| !v.is_empty()),
            booster_version_category: self.booster_version_category,
        })
    }
}

impl From<&LaunchRecord> for LaunchRow {
    fn from(rec: &LaunchRecord) -> Self {
        LaunchRow {
            flight_number: rec.flight_number,
            launch_site: rec.launch_site.clone(),
            payload_mass_kg: rec.payload_mass_kg,
            class: i64::from(rec.class.code()),
            booster_version: rec.booster_version.clone(),
            booster_version_category: rec.booster_version_category.clone(),
        }
    }
}

/// Fail with the first required column not present in `names`.
fn check_columns<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<(), DataError> {
    let names: Vec<&str> = names.into_iter().collect();
    match REQUIRED_COLUMNS.iter().find(|col| !names.contains(*col)) {
        Some(missing) => Err(DataError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_columns(headers.iter())?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: LaunchRow = record
            .deserialize(Some(&headers))
            .with_context(|| format!("CSV row {row_no}"))?;
        records.push(row.into_record(row_no)?);
    }

    Ok(LaunchDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, i.e. the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, rec) in rows.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        check_columns(obj.keys().map(String::as_str))?;

        let row: LaunchRow =
            serde_json::from_value(rec.clone()).with_context(|| format!("JSON row {i}"))?;
        records.push(row.into_record(i)?);
    }

    Ok(LaunchDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); integer and float payload columns are
/// both accepted.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        check_columns(schema.fields().iter().map(|f| f.name().as_str()))?;

        let site_col = required_column(&batch, COL_LAUNCH_SITE)?;
        let payload_col = required_column(&batch, COL_PAYLOAD_MASS)?;
        let class_col = required_column(&batch, COL_CLASS)?;
        let category_col = required_column(&batch, COL_BOOSTER_CATEGORY)?;
        let flight_col = optional_column(&batch, COL_FLIGHT_NUMBER);
        let version_col = optional_column(&batch, COL_BOOSTER_VERSION);

        for i in 0..batch.num_rows() {
            let row_no = records.len();
            let row = LaunchRow {
                flight_number: match flight_col {
                    Some(col) => i64_cell(col, i)?,
                    None => None,
                },
                launch_site: required(string_cell(site_col, i)?, row_no, COL_LAUNCH_SITE)?,
                payload_mass_kg: required(f64_cell(payload_col, i)?, row_no, COL_PAYLOAD_MASS)?,
                class: required(i64_cell(class_col, i)?, row_no, COL_CLASS)?,
                booster_version: match version_col {
                    Some(col) => string_cell(col, i)?,
                    None => None,
                },
                booster_version_category: required(
                    string_cell(category_col, i)?,
                    row_no,
                    COL_BOOSTER_CATEGORY,
                )?,
            };
            records.push(row.into_record(row_no)?);
        }
    }

    Ok(LaunchDataset::from_records(records)?)
}

// -- Parquet / Arrow helpers --

fn required_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, DataError> {
    optional_column(batch, name).ok_or_else(|| DataError::MissingColumn(name.to_string()))
}

fn optional_column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a ArrayRef> {
    let idx = batch.schema().index_of(name).ok()?;
    Some(batch.column(idx))
}

fn required<T>(value: Option<T>, row: usize, column: &'static str) -> Result<T, DataError> {
    value.ok_or_else(|| DataError::InvalidValue {
        row,
        column,
        value: "null".to_string(),
    })
}

fn f64_cell(col: &ArrayRef, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(Some(value))
}

fn i64_cell(col: &ArrayRef, row: usize) -> Result<Option<i64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row),
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as i64,
        // Pandas promotes integer columns with NaNs to float64.
        DataType::Float64 => {
            let v = col.as_primitive::<Float64Type>().value(row);
            if v.fract() != 0.0 {
                bail!("Expected an integer value, got {v}");
            }
            v as i64
        }
        other => bail!("Expected an integer column, got {other:?}"),
    };
    Ok(Some(value))
}

fn string_cell(col: &ArrayRef, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row),
        other => bail!("Expected a string column, got {other:?}"),
    };
    Ok(Some(value.to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;

    const CSV_HEADER: &str =
        "Unnamed: 0,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category";

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn data_error(err: &anyhow::Error) -> Option<&DataError> {
        err.chain().find_map(|e| e.downcast_ref::<DataError>())
    }

    #[test]
    fn loads_csv_with_extra_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "launches.csv",
            &format!(
                "{CSV_HEADER}\n\
                 0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0\n\
                 1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0\n\
                 2,3,VAFB SLC-4E,1,9600.0,F9 FT B1029.1,FT\n"
            ),
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.payload_bounds(), (0.0, 9600.0));
        assert_eq!(ds.site_names().len(), 2);

        let last = &ds.records()[2];
        assert_eq!(last.flight_number, Some(3));
        assert_eq!(last.launch_site, "VAFB SLC-4E");
        assert_eq!(last.class, OutcomeClass::Success);
        assert_eq!(last.booster_version.as_deref(), Some("F9 FT B1029.1"));
        assert_eq!(last.booster_version_category, "FT");
    }

    #[test]
    fn csv_missing_required_column_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "launches.csv",
            "Launch Site,class,Booster Version Category\nCCAFS LC-40,1,FT\n",
        );

        let err = load_file(&path).unwrap_err();
        assert_eq!(
            data_error(&err),
            Some(&DataError::MissingColumn(COL_PAYLOAD_MASS.to_string()))
        );
    }

    #[test]
    fn csv_class_outside_zero_one_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "launches.csv",
            &format!("{CSV_HEADER}\n0,1,CCAFS LC-40,0,10.0,F9,v1.0\n1,2,CCAFS LC-40,3,20.0,F9,v1.0\n"),
        );

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            data_error(&err),
            Some(DataError::InvalidValue { row: 1, column: COL_CLASS, .. })
        ));
    }

    #[test]
    fn header_only_csv_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "launches.csv", &format!("{CSV_HEADER}\n"));
        let err = load_file(&path).unwrap_err();
        assert_eq!(data_error(&err), Some(&DataError::Empty));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_file(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "launches.xlsx", "");
        let err = load_file(&path).unwrap_err();
        assert_eq!(
            data_error(&err),
            Some(&DataError::UnsupportedExtension("xlsx".to_string()))
        );
    }

    #[test]
    fn loads_records_oriented_json() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "launches.json",
            r#"[
                {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490, "class": 1,
                 "Booster Version": null, "Booster Version Category": "FT"},
                {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 5300.5, "class": 0,
                 "Booster Version Category": "FT"}
            ]"#,
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.payload_bounds(), (2490.0, 5300.5));
        assert_eq!(ds.records()[0].booster_version, None);
    }

    #[test]
    fn json_row_missing_column_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "launches.json",
            r#"[{"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490, "class": 1}]"#,
        );
        let err = load_file(&path).unwrap_err();
        assert_eq!(
            data_error(&err),
            Some(&DataError::MissingColumn(COL_BOOSTER_CATEGORY.to_string()))
        );
    }

    #[test]
    fn loads_parquet_with_integer_payload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("launches.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Int64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
            Field::new(COL_FLIGHT_NUMBER, DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["SiteA", "SiteB"])),
                Arc::new(Int64Array::from(vec![500, 1500])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["FT", "B4"])),
                Arc::new(Float64Array::from(vec![Some(1.0), None])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.payload_bounds(), (500.0, 1500.0));
        assert_eq!(ds.records()[0].flight_number, Some(1));
        assert_eq!(ds.records()[1].flight_number, None);
        assert_eq!(ds.records()[1].class, OutcomeClass::Failure);
    }

    #[test]
    fn record_to_row_keeps_columns() {
        let rec = LaunchRecord {
            flight_number: Some(7),
            launch_site: "SiteA".into(),
            payload_mass_kg: 42.0,
            class: OutcomeClass::Success,
            booster_version: Some("F9 B5".into()),
            booster_version_category: "B5".into(),
        };
        let row = LaunchRow::from(&rec);
        assert_eq!(row.class, 1);
        assert_eq!(row.into_record(0).unwrap(), rec);
    }
}
