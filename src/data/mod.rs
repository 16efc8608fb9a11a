/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  HTTP CSV / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse source → SalaryDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ SalaryDataset  │  Vec<SalaryRecord>, distinct values per dimension
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  membership test per dimension → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  metrics + chart tables → PipelineResult
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
