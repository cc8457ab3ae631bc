//! Fluent builders for search-service request bodies.
//!
//! Everything here produces JSON: builders are assembled through chained
//! move-based setters and serialized with serde into the query DSL the
//! search service consumes. No network client is included; the output is a
//! `serde_json::Value` (or string) ready to be sent by whatever transport
//! the caller uses.
//!
//! Supported query types:
//! - Full-text: `match`, `match_all`, `match_phrase`, `match_phrase_prefix`,
//!   `multi_match`, `query_string`, `simple_query_string`
//! - Term-level: `term`, `terms`, `range`, `exists`, `prefix`, `wildcard`,
//!   `regexp`, `fuzzy`, `ids`
//! - Compound: `bool`, `boosting`, `constant_score`, `dis_max`,
//!   `function_score`
//! - Geo: `geo_distance`, `geo_bounding_box`
//!
//! Supported aggregations:
//! - Metric: `avg`, `sum`, `min`, `max`, `stats`, `extended_stats`,
//!   `value_count`, `cardinality`, `percentiles`
//! - Bucket: `terms`, `histogram`, `date_histogram`, `range`, `date_range`,
//!   `filter`, `filters`, `missing`, `global`
//!
//! # Example
//!
//! ```
//! use searchbody::aggs::HistogramOptions;
//! use searchbody::{aggs, query, Search};
//!
//! let body = Search::new()
//!     .query(
//!         query::bool_query()
//!             .must(query::match_query("title", "rust"))
//!             .filter(query::term("status", "published")),
//!     )
//!     .agg("by_age", aggs::histogram("age", 10.0).min_doc_count(5).keyed(true))
//!     .size(20);
//!
//! let json = body.to_value().unwrap();
//! assert_eq!(json["size"], 20);
//! assert_eq!(json["aggs"]["by_age"]["histogram"]["interval"], 10.0);
//! ```

pub mod aggs;
pub mod error;
pub mod geo;
pub mod highlight;
pub mod query;
pub mod search;
pub mod sort;
pub mod util;

pub use aggs::Aggregation;
pub use error::{Error, Result};
pub use geo::GeoPoint;
pub use highlight::{Highlight, HighlightField};
pub use query::Query;
pub use search::{Search, SourceFilter, TrackTotalHits};
pub use sort::{Sort, SortMode, SortOrder};
