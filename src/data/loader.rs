use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DatasetError;
use super::model::{GenreTable, RawRecord};
use super::normalize::{NormalizeOptions, normalize};

const ID_COLUMN: &str = "tconst";
const YEAR_COLUMN: &str = "startYear";
const GENRES_COLUMN: &str = "genres";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a title table from a file and normalize it into a [`GenreTable`].
///
/// Fails when the file cannot be read, lacks the `startYear` / `genres`
/// columns, or yields no valid row at all.
pub fn load_file(path: &Path, options: NormalizeOptions) -> Result<GenreTable> {
    let records = read_records(path)?;
    let rows = normalize(&records, options);
    log::debug!(
        "{}: {} raw records → {} (year, genre) rows",
        path.display(),
        records.len(),
        rows.len()
    );

    let table = GenreTable::from_rows(rows)
        .with_context(|| format!("loading {}", path.display()))?;
    log::info!(
        "Loaded {} rows ({} genres, years {}) from {}",
        table.len(),
        table.genres().len(),
        table.bounds(),
        path.display()
    );
    Ok(table)
}

/// Read raw records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.tsv` / `.txt` – IMDb `title.basics.tsv` layout, tab separated, no quoting
/// * `.csv`          – same columns, comma separated
/// * `.json`         – `[{ "tconst": ..., "startYear": ..., "genres": ... }, ...]`
/// * `.parquet`      – columns `startYear` and `genres` (text or numeric)
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "tsv" | "txt" => read_delimited(path, b'\t', false),
        "csv" => read_delimited(path, b',', true),
        "json" => read_json(path),
        "parquet" | "pq" => read_parquet(path),
        other => Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    }
}

fn require_columns(names: &[&str]) -> Result<(), DatasetError> {
    for required in [YEAR_COLUMN, GENRES_COLUMN] {
        if !names.contains(&required) {
            return Err(DatasetError::MissingColumn(required));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names; extra columns are ignored. Short rows are
/// accepted and their trailing fields read as missing.
fn read_delimited(path: &Path, delimiter: u8, quoting: bool) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quoting(quoting)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = reader.headers().context("reading header row")?.clone();
    require_columns(&headers.iter().collect::<Vec<_>>())?;

    let mut records = Vec::new();
    let mut malformed = 0usize;

    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        match result {
            Ok(rec) => records.push(rec),
            Err(e) if e.is_io_error() => {
                return Err(e).with_context(|| format!("reading row {row_no}"));
            }
            Err(e) => {
                log::trace!("row {row_no}: {e}");
                malformed += 1;
            }
        }
    }

    if malformed > 0 {
        log::debug!("{}: skipped {malformed} undecodable rows", path.display());
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "tconst": "tt0000001", "startYear": "1894", "genres": "Documentary,Short" },
///   { "tconst": "tt0000002", "startYear": 1892,   "genres": ["Animation", "Short"] }
/// ]
/// ```
fn read_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let objects: Vec<_> = rows.iter().filter_map(JsonValue::as_object).collect();
    if objects.len() < rows.len() {
        log::debug!(
            "{}: skipped {} non-object rows",
            path.display(),
            rows.len() - objects.len()
        );
    }

    if !objects.is_empty() {
        let keys: BTreeSet<&str> = objects
            .iter()
            .flat_map(|o| o.keys().map(String::as_str))
            .collect();
        require_columns(&keys.into_iter().collect::<Vec<_>>())?;
    }

    Ok(objects
        .into_iter()
        .map(|obj| RawRecord {
            id: json_to_text(obj.get(ID_COLUMN)),
            start_year: json_to_text(obj.get(YEAR_COLUMN)),
            genres: json_to_text(obj.get(GENRES_COLUMN)),
        })
        .collect())
}

fn json_to_text(val: Option<&JsonValue>) -> Option<String> {
    match val? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Array(items) => Some(
            items
                .iter()
                .map(|v| match v {
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with `startYear` and `genres` columns.
///
/// `startYear` may be stored as text or as an integer / float column (pandas
/// writes a float column when nulls are present). `tconst` is read if there.
fn read_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        require_columns(&names)?;

        let years = text_cells(batch.column(schema.index_of(YEAR_COLUMN)?), YEAR_COLUMN)?;
        let genres = text_cells(batch.column(schema.index_of(GENRES_COLUMN)?), GENRES_COLUMN)?;
        let ids = match schema.index_of(ID_COLUMN) {
            Ok(i) => text_cells(batch.column(i), ID_COLUMN)?,
            Err(_) => vec![None; batch.num_rows()],
        };

        records.extend(
            ids.into_iter()
                .zip(years)
                .zip(genres)
                .map(|((id, start_year), genres)| RawRecord {
                    id,
                    start_year,
                    genres,
                }),
        );
    }

    Ok(records)
}

/// Render every cell of a text or numeric column as `Option<String>`.
fn text_cells(col: &ArrayRef, name: &str) -> Result<Vec<Option<String>>> {
    let cells = match col.data_type() {
        DataType::Utf8 => col
            .as_string::<i32>()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect(),
        DataType::LargeUtf8 => col
            .as_string::<i64>()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect(),
        DataType::Int16 => numeric_cells(col.as_primitive::<Int16Type>().iter()),
        DataType::Int32 => numeric_cells(col.as_primitive::<Int32Type>().iter()),
        DataType::Int64 => numeric_cells(col.as_primitive::<Int64Type>().iter()),
        DataType::Float32 => numeric_cells(col.as_primitive::<Float32Type>().iter()),
        DataType::Float64 => numeric_cells(col.as_primitive::<Float64Type>().iter()),
        DataType::Null => vec![None; col.len()],
        other => bail!("Column '{name}' has unsupported type {other:?}"),
    };
    Ok(cells)
}

fn numeric_cells<T: ToString>(values: impl Iterator<Item = Option<T>>) -> Vec<Option<String>> {
    values.map(|v| v.map(|n| n.to_string())).collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::data::model::{NormalizedRow, YearRange};

    const TSV: &str = "tconst\ttitleType\tprimaryTitle\tstartYear\tgenres\n\
        tt0000001\tshort\tCarmencita\t1894\tDocumentary,Short\n\
        tt0000002\tmovie\t\"Quoted title\t1995\tComedy,Drama\n\
        tt0000003\tmovie\tNo year\t\\N\tDrama\n\
        tt0000004\tmovie\tNo genre\t1999\t\\N\n\
        tt0000005\tmovie\tBad year\tabc\tDrama\n\
        tt0000006\tmovie\tShort row\t2001\n";

    fn temp_with(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    fn expected_rows() -> Vec<NormalizedRow> {
        vec![
            NormalizedRow::new(1894, "Documentary"),
            NormalizedRow::new(1894, "Short"),
            NormalizedRow::new(1995, "Comedy"),
            NormalizedRow::new(1995, "Drama"),
        ]
    }

    #[test]
    fn loads_imdb_tsv() {
        let file = temp_with(".tsv", TSV);
        let table = load_file(file.path(), NormalizeOptions::default()).unwrap();
        assert_eq!(table.rows(), expected_rows().as_slice());
        assert_eq!(table.bounds(), YearRange::new(1894, 1995));
    }

    #[test]
    fn loads_csv_with_quoted_genres() {
        let file = temp_with(
            ".csv",
            "tconst,startYear,genres\n\
             tt0000001,1894,\"Documentary,Short\"\n\
             tt0000002,1995,\"Comedy,Drama\"\n\
             tt0000003,,Drama\n",
        );
        let table = load_file(file.path(), NormalizeOptions::default()).unwrap();
        assert_eq!(table.rows(), expected_rows().as_slice());
    }

    #[test]
    fn loads_json_records() {
        let file = temp_with(
            ".json",
            r#"[
                {"tconst": "tt0000001", "startYear": "1894", "genres": "Documentary,Short"},
                {"tconst": "tt0000002", "startYear": 1995, "genres": ["Comedy", "Drama"]},
                {"tconst": "tt0000003", "startYear": null, "genres": "Drama"},
                "not an object"
            ]"#,
        );
        let table = load_file(file.path(), NormalizeOptions::default()).unwrap();
        assert_eq!(table.rows(), expected_rows().as_slice());
    }

    #[test]
    fn loads_parquet_with_numeric_years() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("tconst", DataType::Utf8, false),
            Field::new("startYear", DataType::Int64, true),
            Field::new("genres", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["tt1", "tt2", "tt3"])),
                Arc::new(Int64Array::from(vec![Some(1894), Some(1995), None])),
                Arc::new(StringArray::from(vec![
                    Some("Documentary,Short"),
                    Some("Comedy,Drama"),
                    Some("Drama"),
                ])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path(), NormalizeOptions::default()).unwrap();
        assert_eq!(table.rows(), expected_rows().as_slice());
    }

    #[test]
    fn loads_parquet_with_float_years_and_nulls() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("startYear", DataType::Float64, true),
            Field::new("genres", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Float64Array::from(vec![Some(1995.0), None, Some(1995.5)])),
                Arc::new(StringArray::from(vec!["Comedy,Drama", "Drama", "Horror"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path(), NormalizeOptions::default()).unwrap();
        assert_eq!(
            table.rows(),
            &[
                NormalizedRow::new(1995, "Comedy"),
                NormalizedRow::new(1995, "Drama"),
            ]
        );
    }

    #[test]
    fn missing_genres_column_is_an_error() {
        let file = temp_with(".tsv", "tconst\tstartYear\ntt1\t1995\n");
        let err = load_file(file.path(), NormalizeOptions::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::MissingColumn("genres"))
        );
    }

    #[test]
    fn no_valid_rows_is_an_error() {
        let file = temp_with(".tsv", "tconst\tstartYear\tgenres\ntt1\t\\N\tDrama\ntt2\t1990\t \n");
        let err = load_file(file.path(), NormalizeOptions::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::NoValidRows)
        );
    }

    #[test]
    fn header_only_file_is_an_error() {
        let file = temp_with(".tsv", "tconst\tstartYear\tgenres\n");
        let err = load_file(file.path(), NormalizeOptions::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::NoValidRows)
        );
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let file = temp_with(".xlsx", "");
        let err = read_records(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::UnsupportedExtension("xlsx".to_string()))
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_file(Path::new("/nonexistent/title.basics.tsv"), NormalizeOptions::default()).is_err());
    }
}
