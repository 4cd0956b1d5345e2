use super::model::{NormalizedRow, RawRecord};

/// IMDb writes `\N` for absent values.
pub const IMDB_NULL: &str = "\\N";

/// Knobs for [`normalize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Trim whitespace around each genre token after splitting on `,`.
    /// Off by default so `"Drama"` and `" Drama"` stay distinct, as the
    /// source data is counted.
    pub trim_genres: bool,
}

/// Validate and expand raw records into one row per (year, genre).
///
/// Records with a missing year or genre field, an all-whitespace genre field
/// or a non-integer year are dropped without error.
pub fn normalize<'a, I>(records: I, options: NormalizeOptions) -> Vec<NormalizedRow>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for rec in records {
        if !expand_record(rec, options, &mut rows) {
            log::trace!("dropping record {:?}", rec.id);
            dropped += 1;
        }
    }

    if dropped > 0 {
        log::debug!("normalize: dropped {dropped} invalid records");
    }
    rows
}

/// Append the rows for one record. Returns `false` when the record is invalid.
fn expand_record(rec: &RawRecord, options: NormalizeOptions, out: &mut Vec<NormalizedRow>) -> bool {
    let (Some(year_text), Some(genres)) = (present(&rec.start_year), present(&rec.genres)) else {
        return false;
    };
    if genres.trim().is_empty() {
        return false;
    }
    let Some(year) = parse_year(year_text) else {
        return false;
    };

    for token in genres.split(',') {
        let token = if options.trim_genres { token.trim() } else { token };
        if token.is_empty() {
            continue;
        }
        out.push(NormalizedRow::new(year, token));
    }
    true
}

/// Treat absent, empty and `\N` cells alike.
fn present(field: &Option<String>) -> Option<&str> {
    match field.as_deref() {
        None | Some("") | Some(IMDB_NULL) => None,
        Some(s) => Some(s),
    }
}

/// Integer year, tolerating surrounding whitespace and an integral decimal
/// form such as `1995.0`.
pub fn parse_year(text: &str) -> Option<i32> {
    let text = text.trim();
    if let Ok(y) = text.parse::<i32>() {
        return Some(y);
    }
    let f = text.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}
