use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::DatasetError;
use super::model::{SalaryDataset, SalaryRecord, integral_f64};
use crate::config::{self, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch the dataset CSV over HTTP(S) and parse it.
pub fn load_url(url: &str) -> Result<SalaryDataset> {
    log::info!("Fetching dataset from {url}");
    let response = reqwest::blocking::get(url).with_context(|| format!("requesting {url}"))?;

    let status = response.status();
    if !status.is_success() {
        log::warn!("Dataset request returned {status}");
        return Err(DatasetError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        }
        .into());
    }

    let body = response.bytes().context("reading response body")?;
    let dataset = parse_csv(body.as_ref()).with_context(|| format!("parsing CSV from {url}"))?;
    log::info!("Loaded {} records from {url}", dataset.len());
    Ok(dataset)
}

/// Load a salary dataset from a local file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the source column names
/// * `.json`    – `[{ "año_trabajo": 2024, "puesto": "...", ... }, ...]`
/// * `.parquet` – one column per field, same names as the CSV header
pub fn load_file(path: &Path) -> Result<SalaryDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            parse_csv(file)
        }
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => return Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} records from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Parse CSV text with a header row. Extra columns are ignored.
pub fn parse_csv<R: Read>(input: R) -> Result<SalaryDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_columns(headers.iter())?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<SalaryRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(validate(record, row_no)?);
    }

    let dataset = SalaryDataset::from_records(records);
    if dataset.is_empty() {
        log::warn!("CSV has a header but no rows");
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<SalaryDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<SalaryRecord> = serde_json::from_str(&text).context("parsing JSON")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, rec)| validate(rec, i))
        .collect::<Result<Vec<_>>>()?;
    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): years may be stored as integers or
/// floats, salaries as any numeric type.
fn load_parquet(path: &Path) -> Result<SalaryDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    check_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = records.len();
        for row in 0..batch.num_rows() {
            let row_no = offset + row;
            let record = record_from_batch(&batch, row)
                .with_context(|| format!("parquet row {row_no}"))?;
            records.push(validate(record, row_no)?);
        }
    }

    Ok(SalaryDataset::from_records(records))
}

fn record_from_batch(batch: &RecordBatch, row: usize) -> Result<SalaryRecord> {
    let work_year = numeric_cell(batch, config::COL_WORK_YEAR, row)?;
    let work_year = integral_f64(work_year).ok_or_else(|| DatasetError::InvalidValue {
        row,
        column: config::COL_WORK_YEAR,
        value: work_year.to_string(),
    })?;

    Ok(SalaryRecord {
        work_year,
        experience_level: text_cell(batch, config::COL_EXPERIENCE_LEVEL, row)?,
        job_title: text_cell(batch, config::COL_JOB_TITLE, row)?,
        company_size: text_cell(batch, config::COL_COMPANY_SIZE, row)?,
        salary_usd: numeric_cell(batch, config::COL_SALARY_USD, row)?,
        remote_type: text_cell(batch, config::COL_REMOTE_TYPE, row)?,
        residence_iso3: text_cell(batch, config::COL_RESIDENCE_ISO3, row)?,
    })
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DatasetError::MissingColumns(vec![name.to_string()]))?;
    Ok(batch.column(idx))
}

/// Read a Utf8 / LargeUtf8 cell. Nulls become empty strings.
fn text_cell(batch: &RecordBatch, name: &str, row: usize) -> Result<String> {
    let col = column(batch, name)?;
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("column '{name}' has type {other:?}, expected a string"),
    }
}

/// Read a numeric cell as `f64`. Nulls are an error.
fn numeric_cell(batch: &RecordBatch, name: &str, row: usize) -> Result<f64> {
    let col = column(batch, name)?;
    if col.is_null(row) {
        bail!("null value in column '{name}'");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        other => bail!("column '{name}' has type {other:?}, expected a number"),
    };
    value.with_context(|| format!("column '{name}' does not match its declared type"))
}

// ---------------------------------------------------------------------------
// Shared checks
// ---------------------------------------------------------------------------

/// Fail with every required column that `present` lacks.
fn check_columns<'a>(present: impl Iterator<Item = &'a str>) -> Result<(), DatasetError> {
    let present: Vec<&str> = present.collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !present.contains(col))
        .map(|col| col.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DatasetError::MissingColumns(missing))
    }
}

fn validate(record: SalaryRecord, row: usize) -> Result<SalaryRecord> {
    if !record.salary_usd.is_finite() || record.salary_usd < 0.0 {
        return Err(DatasetError::InvalidValue {
            row,
            column: config::COL_SALARY_USD,
            value: record.salary_usd.to_string(),
        }
        .into());
    }
    Ok(record)
}
