/// Data layer: core types, loading, and the comparison engine.
///
/// Architecture:
/// ```text
///  bundled file → remote URL → manual upload
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  first source that parses → RawDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  trim headers, drop blank rows → Dataset
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  Arc<Dataset>, replaced on upload
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ filter / compare  │  selected models × competitor brands → Tables
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  Table → CSV bytes
///   └──────────┘
/// ```

pub mod cache;
pub mod compare;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
