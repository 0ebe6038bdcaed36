/// Data layer: record types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   insurance.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  owns the Table, optional smoker relabel
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region / smoker / age predicates → filtered Table
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  scatter points, per-region mean and total
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod store;
