//! Data layer: core types, loading, normalization and aggregation.
//!
//! Architecture:
//! ```text
//!  .tsv / .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<RawRecord>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ normalize  │  drop invalid, parse year, one row per genre
//!   └───────────┘
//!        │
//!        ▼
//!   ┌────────────┐
//!   │ GenreTable  │  Vec<NormalizedRow>, [min_year, max_year]
//!   └────────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  year range → counts per genre, descending
//!   └───────────┘
//! ```

pub mod aggregate;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod normalize;
