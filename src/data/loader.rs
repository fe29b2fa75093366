use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{
    LaunchDataset, LaunchRecord, RowError, COL_BOOSTER_VERSION, COL_CLASS, COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS, REQUIRED_COLUMNS,
};

/// Structural problems that make a file unusable as a whole.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input is missing the '{0}' column")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load launch records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Launch Site`, `Payload Mass (kg)`,
///   `Booster Version` and `class`; other columns are ignored
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Rows that cannot be turned into a [`LaunchRecord`] are skipped with a
/// warning; a missing column fails the whole load.
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
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} launch records from {} ({} sites)",
        dataset.len(),
        path.display(),
        dataset.sites.len()
    );
    Ok(dataset)
}

/// Keep the good rows, log the bad ones.
fn collect_rows<I>(rows: I) -> LaunchDataset
where
    I: IntoIterator<Item = (usize, Result<LaunchRecord, RowError>)>,
{
    let mut skipped = 0usize;
    let records: Vec<LaunchRecord> = rows
        .into_iter()
        .filter_map(|(row, result)| match result {
            Ok(rec) => Some(rec),
            Err(e) => {
                log::warn!("Skipping row {row}: {e}");
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        log::warn!("{skipped} malformed rows were skipped");
    }
    LaunchDataset::from_records(records)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV text from any reader. Ragged rows are tolerated and end up as
/// missing cells, which the row validation then rejects.
pub fn read_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    let position = |col: &'static str| {
        headers
            .iter()
            .position(|h| h == col)
            .ok_or(LoadError::MissingColumn(col))
    };
    let site_idx = position(COL_LAUNCH_SITE)?;
    let payload_idx = position(COL_PAYLOAD_MASS)?;
    let booster_idx = position(COL_BOOSTER_VERSION)?;
    let class_idx = position(COL_CLASS)?;

    let rows = reader.records().enumerate().filter_map(|(row_no, result)| {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping unreadable CSV row {row_no}: {e}");
                return None;
            }
        };
        let parsed = LaunchRecord::from_text(
            record.get(site_idx),
            record.get(payload_idx),
            record.get(booster_idx),
            record.get(class_idx),
        );
        Some((row_no, parsed))
    });

    Ok(collect_rows(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS SLC 40",
///     "Payload Mass (kg)": 2500.0,
///     "Booster Version": "F9 v1.1 B1011",
///     "class": 0
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<LaunchDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    for col in REQUIRED_COLUMNS {
        let present = rows
            .iter()
            .any(|r| r.as_object().is_some_and(|o| o.contains_key(col)));
        if !rows.is_empty() && !present {
            return Err(LoadError::MissingColumn(col).into());
        }
    }

    let parsed = rows.iter().enumerate().filter_map(|(i, rec)| {
        let Some(obj) = rec.as_object() else {
            log::warn!("Skipping row {i}: not a JSON object");
            return None;
        };
        let cell = |col: &str| obj.get(col).and_then(json_to_text);
        let result = LaunchRecord::from_text(
            cell(COL_LAUNCH_SITE).as_deref(),
            cell(COL_PAYLOAD_MASS).as_deref(),
            cell(COL_BOOSTER_VERSION).as_deref(),
            cell(COL_CLASS).as_deref(),
        );
        Some((i, result))
    });

    Ok(collect_rows(parsed))
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Text columns may be Utf8 or LargeUtf8, numeric columns any integer or
/// float width; everything is cast to `Utf8` / `Float64` before reading.
/// Works with files written by both Pandas and Polars.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    let mut offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |col: &'static str, ty: &DataType| -> Result<ArrayRef> {
            let idx = schema
                .index_of(col)
                .map_err(|_| LoadError::MissingColumn(col))?;
            cast(batch.column(idx), ty).with_context(|| format!("casting '{col}' to {ty}"))
        };

        let sites = column(COL_LAUNCH_SITE, &DataType::Utf8)?;
        let payloads = column(COL_PAYLOAD_MASS, &DataType::Float64)?;
        let boosters = column(COL_BOOSTER_VERSION, &DataType::Utf8)?;
        let classes = column(COL_CLASS, &DataType::Float64)?;

        let sites = sites.as_string::<i32>();
        let payloads = payloads.as_primitive::<Float64Type>();
        let boosters = boosters.as_string::<i32>();
        let classes = classes.as_primitive::<Float64Type>();

        for row in 0..batch.num_rows() {
            let result = LaunchRecord::from_values(
                sites.is_valid(row).then(|| sites.value(row)),
                payloads.is_valid(row).then(|| payloads.value(row)),
                boosters.is_valid(row).then(|| boosters.value(row)),
                classes.is_valid(row).then(|| classes.value(row)),
            );
            rows.push((offset + row, result));
        }
        offset += batch.num_rows();
    }

    Ok(collect_rows(rows))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::Outcome;

    const SAMPLE_CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS SLC 40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS SLC 40,0,525.0,F9 v1.0  B0005,v1.0
2,3,KSC LC 39A,1,3136.0,F9 FT B1021.1,FT
3,4,VAFB SLC 4E,1,9600.0,F9 B5 B1048.1,B5
";

    #[test]
    fn csv_with_extra_columns_loads() {
        let ds = read_csv(SAMPLE_CSV.as_bytes()).expect("csv loads");
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.records[2].launch_site, "KSC LC 39A");
        assert_eq!(ds.records[2].booster_version, "F9 FT B1021.1");
        assert_eq!(ds.records[2].class, Outcome::Success);
        let bounds = ds.payload_bounds.expect("bounds");
        assert_eq!((bounds.min, bounds.max), (0.0, 9600.0));
    }

    #[test]
    fn csv_missing_class_column_is_an_error() {
        let text = "Launch Site,Payload Mass (kg),Booster Version\nKSC LC 39A,500,FT\n";
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(
            matches!(err.downcast_ref::<LoadError>(), Some(LoadError::MissingColumn("class"))),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn csv_malformed_rows_are_skipped() {
        let text = "\
Launch Site,Payload Mass (kg),Booster Version,class
KSC LC 39A,500,FT,1
KSC LC 39A,lots,FT,1
KSC LC 39A,700,FT,3
KSC LC 39A,800
VAFB SLC 4E,,B5,0
CCAFS SLC 40,900,v1.1,0
";
        let ds = read_csv(text.as_bytes()).expect("csv loads");
        let payloads: Vec<f64> = ds.records.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(payloads, vec![500.0, 900.0]);
    }

    #[test]
    fn json_records_load_with_mixed_cell_types() {
        let text = r#"[
            {"Launch Site": "KSC LC 39A", "Payload Mass (kg)": 500, "Booster Version": "FT", "class": 1},
            {"Launch Site": "VAFB SLC 4E", "Payload Mass (kg)": "9600.0", "Booster Version": "B5", "class": 0.0},
            {"Launch Site": "VAFB SLC 4E", "Payload Mass (kg)": null, "Booster Version": "B5", "class": 0},
            42
        ]"#;
        let ds = parse_json(text).expect("json loads");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].payload_mass_kg, 9600.0);
        assert_eq!(ds.records[1].class, Outcome::Failure);
    }

    #[test]
    fn json_missing_column_is_an_error() {
        let text = r#"[{"Launch Site": "A", "Payload Mass (kg)": 1, "class": 1}]"#;
        let err = parse_json(text).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::MissingColumn("Booster Version"))
        ));
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().expect("tempdir");

        let csv_path = dir.path().join("launches.CSV");
        std::fs::File::create(&csv_path)
            .and_then(|mut f| f.write_all(SAMPLE_CSV.as_bytes()))
            .expect("write csv");
        assert_eq!(load_file(&csv_path).expect("csv").len(), 4);

        let txt_path = dir.path().join("launches.txt");
        std::fs::write(&txt_path, SAMPLE_CSV).expect("write txt");
        assert!(load_file(&txt_path).is_err());
    }

    #[test]
    fn parquet_with_integer_columns_loads() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, true),
            Field::new(COL_BOOSTER_VERSION, DataType::Utf8, false),
            Field::new(COL_CLASS, DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["KSC LC 39A", "VAFB SLC 4E", "KSC LC 39A"])),
                Arc::new(Float64Array::from(vec![Some(500.0), None, Some(4000.0)])),
                Arc::new(StringArray::from(vec!["F9 FT", "F9 B5", "F9 B4"])),
                Arc::new(Int64Array::from(vec![1, 1, 0])),
            ],
        )
        .expect("batch");

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("launches.parquet");
        let file = std::fs::File::create(&path).expect("create parquet");
        let mut writer = ArrowWriter::try_new(file, schema, None).expect("writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");

        let ds = load_file(&path).expect("parquet loads");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].payload_mass_kg, 4000.0);
        assert_eq!(ds.records[1].class, Outcome::Failure);
    }
}
