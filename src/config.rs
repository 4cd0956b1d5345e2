use std::path::PathBuf;

use crate::data::model::YearRange;
use crate::data::normalize::NormalizeOptions;

/// File read when no path is given on the command line.
pub const DEFAULT_DATASET: &str = "title.basics.tsv";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup settings. Built from defaults plus the optional positional path.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    /// Selected when a dataset is first shown; clamped to the data's bounds.
    pub initial_range: YearRange,
    /// Spacing of the quick-jump marks under the sliders.
    pub mark_step: i32,
    pub normalize: NormalizeOptions,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            initial_range: YearRange::new(1990, 2000),
            mark_step: 10,
            normalize: NormalizeOptions::default(),
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
        }
    }
}

impl DashboardConfig {
    /// First positional argument (if any) overrides the dataset path.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        let mut config = Self::default();
        if let Some(path) = args.into_iter().nth(1) {
            config.dataset_path = path.into();
        }
        config
    }
}
