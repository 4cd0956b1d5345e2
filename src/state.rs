use std::path::PathBuf;
use std::sync::Arc;

use crate::color::GenreColors;
use crate::config::DashboardConfig;
use crate::data::aggregate::{chart, decade_marks};
use crate::data::model::{GenreChart, GenreTable, YearRange};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Normalized dataset, shared read-only.
    pub table: Option<Arc<GenreTable>>,

    /// File the table was loaded from.
    pub source: Option<PathBuf>,

    /// Currently selected year range, always inside the table bounds.
    pub range: YearRange,

    /// Counts for `range` (cached, recomputed when the range changes).
    pub chart: Option<GenreChart>,

    /// Active colour map.
    pub colors: Option<GenreColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            range: config.initial_range,
            config,
            table: None,
            source: None,
            chart: None,
            colors: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded table, reset the range and recompute.
    pub fn set_dataset(&mut self, table: GenreTable, source: PathBuf) {
        let table = Arc::new(table);
        self.colors = Some(GenreColors::new(&table.genres()));
        self.range = self.config.initial_range.clamped_to(table.bounds());
        self.chart = Some(chart(&table, self.range));
        self.table = Some(table);
        self.source = Some(source);
        self.status_message = None;
    }

    /// Select a new range. Ends are clamped into the table bounds; the chart
    /// is only recomputed when the effective range differs.
    pub fn set_range(&mut self, range: YearRange) {
        let Some(table) = &self.table else {
            return;
        };
        let range = range.clamped_to(table.bounds());
        if range == self.range && self.chart.is_some() {
            return;
        }
        log::debug!("year range → {range}");
        self.range = range;
        self.chart = Some(chart(table, range));
    }

    /// Select the whole span of the data.
    pub fn reset_range(&mut self) {
        if let Some(bounds) = self.bounds() {
            self.set_range(bounds);
        }
    }

    pub fn bounds(&self) -> Option<YearRange> {
        self.table.as_ref().map(|t| t.bounds())
    }

    /// Quick-jump years for the range control.
    pub fn marks(&self) -> Vec<i32> {
        self.bounds()
            .map(|b| decade_marks(b.start, b.end, self.config.mark_step))
            .unwrap_or_default()
    }

    /// One range per mark, running up to the year before the next mark; the
    /// last one ends at the upper bound.
    pub fn jump_spans(&self) -> Vec<YearRange> {
        let Some(bounds) = self.bounds() else {
            return Vec::new();
        };
        let marks = self.marks();
        marks
            .iter()
            .enumerate()
            .map(|(i, &mark)| {
                let end = marks.get(i + 1).map_or(bounds.end, |next| next.saturating_sub(1));
                YearRange::new(mark, end)
            })
            .collect()
    }
}
