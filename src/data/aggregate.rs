use std::collections::HashMap;

use super::model::{GenreChart, GenreCount, GenreTable, NormalizedRow, YearRange};

// ---------------------------------------------------------------------------
// Range aggregation: rows in [start, end] → counts per genre
// ---------------------------------------------------------------------------

/// Count rows per genre for years in the closed interval `[start_year, end_year]`.
///
/// The result is sorted by descending count. Equal counts keep the order in
/// which the genre first appears in `rows`. An inverted interval matches no
/// row and yields an empty result.
pub fn aggregate(rows: &[NormalizedRow], start_year: i32, end_year: i32) -> Vec<GenreCount> {
    let range = YearRange::new(start_year, end_year);

    let mut slot: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<GenreCount> = Vec::new();

    for row in rows.iter().filter(|r| range.contains(r.year)) {
        match slot.get(row.genre.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                slot.insert(row.genre.as_str(), counts.len());
                counts.push(GenreCount::new(row.genre.clone(), 1));
            }
        }
    }

    // `sort_by` is stable, so ties keep first-appearance order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Aggregate `table` over `range` and attach the chart title and labels.
pub fn chart(table: &GenreTable, range: YearRange) -> GenreChart {
    GenreChart::new(range, aggregate(table.rows(), range.start, range.end))
}

/// Upper bound on the quick-jump marks drawn under the sliders.
pub const MAX_MARKS: usize = 20;

/// Slider marks: `min`, `min + step`, … up to and including `max`.
///
/// When the span would need more than [`MAX_MARKS`] marks the step grows to a
/// multiple of `step` that keeps the count within the limit.
pub fn decade_marks(min: i32, max: i32, step: i32) -> Vec<i32> {
    if step <= 0 || min > max {
        return Vec::new();
    }
    let span = i64::from(max) - i64::from(min);
    let step = i64::from(step);
    let per_mark = (span + MAX_MARKS as i64 - 2) / (MAX_MARKS as i64 - 1);
    let multiples = ((per_mark + step - 1) / step).max(1);

    (i64::from(min)..=i64::from(max))
        .step_by((step * multiples) as usize)
        .map(|y| y as i32)
        .collect()
}
