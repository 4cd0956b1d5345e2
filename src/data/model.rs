use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DatasetError;

// ---------------------------------------------------------------------------
// RawRecord – one row of the source file, before validation
// ---------------------------------------------------------------------------

/// A single title row as read from the source file.
///
/// Every field is optional: a column may be absent from the row, the cell may
/// be empty, or it may hold the IMDb null marker. Validation happens in
/// [`super::normalize`], never here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    /// Opaque title identifier (`tconst`).
    #[serde(rename = "tconst", default)]
    pub id: Option<String>,
    /// Release year as text (`startYear`).
    #[serde(rename = "startYear", default)]
    pub start_year: Option<String>,
    /// Comma-separated genre names (`genres`).
    #[serde(default)]
    pub genres: Option<String>,
}

#[cfg(test)]
impl RawRecord {
    pub fn new(start_year: Option<&str>, genres: Option<&str>) -> Self {
        Self {
            id: None,
            start_year: start_year.map(str::to_string),
            genres: genres.map(str::to_string),
        }
    }
}

// ---------------------------------------------------------------------------
// NormalizedRow – one (year, genre) pair
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedRow {
    pub year: i32,
    /// Never empty.
    pub genre: String,
}

impl NormalizedRow {
    pub fn new(year: i32, genre: impl Into<String>) -> Self {
        Self {
            year,
            genre: genre.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// YearRange – inclusive query interval
// ---------------------------------------------------------------------------

/// Closed interval `[start, end]`. `start <= end` is expected but not
/// enforced; an inverted range simply contains no year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Clamp both ends into `bounds`.
    pub fn clamped_to(self, bounds: YearRange) -> Self {
        Self {
            start: self.start.clamp(bounds.start, bounds.end),
            end: self.end.clamp(bounds.start, bounds.end),
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// GenreTable – the normalized dataset
// ---------------------------------------------------------------------------

/// The normalized table plus its year bounds.
///
/// Built once and never mutated afterwards; the UI shares it behind an
/// `Arc`. Construction refuses an empty table since the bounds would be
/// undefined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreTable {
    rows: Vec<NormalizedRow>,
    min_year: i32,
    max_year: i32,
}

impl GenreTable {
    pub fn from_rows(rows: Vec<NormalizedRow>) -> Result<Self, DatasetError> {
        let (min_year, max_year) = rows
            .iter()
            .map(|r| r.year)
            .fold(None, |acc: Option<(i32, i32)>, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })
            .ok_or(DatasetError::NoValidRows)?;

        Ok(GenreTable {
            rows,
            min_year,
            max_year,
        })
    }

    pub fn rows(&self) -> &[NormalizedRow] {
        &self.rows
    }

    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    pub fn max_year(&self) -> i32 {
        self.max_year
    }

    /// `[min_year, max_year]` as a range, used as the slider bounds.
    pub fn bounds(&self) -> YearRange {
        YearRange::new(self.min_year(), self.max_year())
    }

    /// Sorted set of every distinct genre in the table.
    pub fn genres(&self) -> BTreeSet<String> {
        self.rows.iter().map(|r| r.genre.clone()).collect()
    }

    /// Number of (year, genre) rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

// ---------------------------------------------------------------------------
// Query results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

impl GenreCount {
    pub fn new(genre: impl Into<String>, count: usize) -> Self {
        Self {
            genre: genre.into(),
            count,
        }
    }
}

/// Everything the bar chart needs for one year range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub counts: Vec<GenreCount>,
}

impl GenreChart {
    pub const X_LABEL: &'static str = "Genres";
    pub const Y_LABEL: &'static str = "Number of Movies";

    pub fn new(range: YearRange, counts: Vec<GenreCount>) -> Self {
        GenreChart {
            title: format!("Genre Popularity from {} to {}", range.start, range.end),
            x_label: Self::X_LABEL.to_string(),
            y_label: Self::Y_LABEL.to_string(),
            counts,
        }
    }

    /// Sum of all bar heights.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_tracks_year_bounds() {
        let table = GenreTable::from_rows(vec![
            NormalizedRow::new(1994, "Drama"),
            NormalizedRow::new(1921, "Comedy"),
            NormalizedRow::new(2003, "Drama"),
        ])
        .unwrap();
        assert_eq!(table.min_year(), 1921);
        assert_eq!(table.max_year(), 2003);
        assert_eq!(table.bounds(), YearRange::new(1921, 2003));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(
            GenreTable::from_rows(Vec::new()),
            Err(DatasetError::NoValidRows)
        );
    }

    #[test]
    fn genres_are_distinct_and_sorted() {
        let table = GenreTable::from_rows(vec![
            NormalizedRow::new(2000, "Western"),
            NormalizedRow::new(2001, "Action"),
            NormalizedRow::new(2002, "Western"),
        ])
        .unwrap();
        let genres: Vec<String> = table.genres().into_iter().collect();
        assert_eq!(genres, vec!["Action".to_string(), "Western".to_string()]);
    }

    #[test]
    fn range_contains_is_inclusive() {
        let r = YearRange::new(1990, 1995);
        assert!(r.contains(1990));
        assert!(r.contains(1995));
        assert!(!r.contains(1989));
        assert!(!r.contains(1996));
        assert!(!YearRange::new(1991, 1990).contains(1990));
    }

    #[test]
    fn range_clamps_into_bounds() {
        let bounds = YearRange::new(1900, 2020);
        assert_eq!(
            YearRange::new(1850, 2050).clamped_to(bounds),
            YearRange::new(1900, 2020)
        );
        assert_eq!(
            YearRange::new(1990, 2000).clamped_to(bounds),
            YearRange::new(1990, 2000)
        );
    }

    #[test]
    fn chart_title_and_labels() {
        let chart = GenreChart::new(
            YearRange::new(1990, 2000),
            vec![GenreCount::new("Drama", 3), GenreCount::new("Comedy", 1)],
        );
        assert_eq!(chart.title, "Genre Popularity from 1990 to 2000");
        assert_eq!(chart.x_label, "Genres");
        assert_eq!(chart.y_label, "Number of Movies");
        assert_eq!(chart.total(), 4);
    }
}
