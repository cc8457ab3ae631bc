//! Aggregation builders
//!
//! An [`Aggregation`] is one concrete aggregation plus any number of named
//! sub-aggregations under the `aggs` key. Concrete kinds come in two
//! families sharing option sets: the metric family (field / missing /
//! format) and the interval-bucketing family (see
//! [`bucket::HistogramOptions`]). The free functions at the bottom are the
//! flat factory layer.

pub mod bucket;
pub mod metric;

pub use bucket::{
    BoundValue, DateHistogramAggregation, DateRangeAggregation, DateRangeBucket,
    ExtendedBounds, FiltersAggregation, GlobalAggregation, HistogramAggregation,
    HistogramOptions, MissingAggregation, RangeAggregation, RangeBucket, TermsAggregation,
};
pub use metric::{
    CardinalityAggregation, MetricAggregation, MetricBody, PercentilesAggregation,
};

use crate::error::Result;
use crate::query::Query;
use crate::sort::SortOrder;
use metric::MetricKind;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Ordering spec for bucket output: exactly one key (`_count`, `_key`, or a
/// sub-aggregation name) mapped to a direction. Each call to an ordering
/// setter replaces the previous spec wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketOrder {
    key: String,
    direction: SortOrder,
}

impl BucketOrder {
    pub fn new(key: impl Into<String>, direction: SortOrder) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn direction(&self) -> SortOrder {
        self.direction
    }
}

impl Serialize for BucketOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, self.direction.as_str())?;
        map.end()
    }
}

/// One named aggregation: a concrete kind plus optional sub-aggregations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    #[serde(flatten)]
    kind: AggregationKind,
    #[serde(rename = "aggs", skip_serializing_if = "BTreeMap::is_empty")]
    sub: BTreeMap<String, Aggregation>,
}

impl Aggregation {
    pub fn new(kind: AggregationKind) -> Self {
        Self {
            kind,
            sub: BTreeMap::new(),
        }
    }

    /// Attach a named sub-aggregation. Reusing a name replaces the previous
    /// entry.
    pub fn aggregation(mut self, name: impl Into<String>, agg: impl Into<Aggregation>) -> Self {
        self.sub.insert(name.into(), agg.into());
        self
    }

    /// Check family-specific required members, recursing into wrapped
    /// queries and sub-aggregations.
    pub fn validate(&self) -> Result<()> {
        self.kind.validate()?;
        for agg in self.sub.values() {
            agg.validate()?;
        }
        Ok(())
    }

    /// Validate, then serialize to the wire envelope.
    pub fn to_value(&self) -> Result<Value> {
        self.validate()?;
        Ok(serde_json::to_value(self)?)
    }
}

impl From<AggregationKind> for Aggregation {
    fn from(kind: AggregationKind) -> Self {
        Aggregation::new(kind)
    }
}

/// The concrete aggregation kinds, externally tagged with their wire names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationKind {
    Avg(MetricBody),
    Sum(MetricBody),
    Min(MetricBody),
    Max(MetricBody),
    Stats(MetricBody),
    ExtendedStats(MetricBody),
    ValueCount(MetricBody),
    Cardinality(CardinalityAggregation),
    Percentiles(PercentilesAggregation),
    Terms(TermsAggregation),
    Histogram(HistogramAggregation),
    DateHistogram(DateHistogramAggregation),
    Range(RangeAggregation),
    DateRange(DateRangeAggregation),
    Filter(Box<Query>),
    Filters(FiltersAggregation),
    Missing(MissingAggregation),
    Global(GlobalAggregation),
}

impl AggregationKind {
    fn validate(&self) -> Result<()> {
        match self {
            AggregationKind::Range(agg) => agg.validate(),
            AggregationKind::DateRange(agg) => agg.validate(),
            AggregationKind::Filter(query) => query.validate(),
            AggregationKind::Filters(agg) => agg.validate(),
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Factory layer
// ---------------------------------------------------------------------------

pub fn avg(field: impl Into<String>) -> MetricAggregation {
    MetricAggregation::new(MetricKind::Avg, field)
}

pub fn sum(field: impl Into<String>) -> MetricAggregation {
    MetricAggregation::new(MetricKind::Sum, field)
}

pub fn min(field: impl Into<String>) -> MetricAggregation {
    MetricAggregation::new(MetricKind::Min, field)
}

pub fn max(field: impl Into<String>) -> MetricAggregation {
    MetricAggregation::new(MetricKind::Max, field)
}

pub fn stats(field: impl Into<String>) -> MetricAggregation {
    MetricAggregation::new(MetricKind::Stats, field)
}

pub fn extended_stats(field: impl Into<String>) -> MetricAggregation {
    MetricAggregation::new(MetricKind::ExtendedStats, field)
}

pub fn value_count(field: impl Into<String>) -> MetricAggregation {
    MetricAggregation::new(MetricKind::ValueCount, field)
}

pub fn cardinality(field: impl Into<String>) -> CardinalityAggregation {
    CardinalityAggregation::new(field)
}

pub fn percentiles(field: impl Into<String>) -> PercentilesAggregation {
    PercentilesAggregation::new(field)
}

pub fn terms(field: impl Into<String>) -> TermsAggregation {
    TermsAggregation::new(field)
}

pub fn histogram(field: impl Into<String>, interval: f64) -> HistogramAggregation {
    HistogramAggregation::new(field, interval)
}

pub fn date_histogram(field: impl Into<String>) -> DateHistogramAggregation {
    DateHistogramAggregation::new(field)
}

pub fn range(field: impl Into<String>) -> RangeAggregation {
    RangeAggregation::new(field)
}

pub fn date_range(field: impl Into<String>) -> DateRangeAggregation {
    DateRangeAggregation::new(field)
}

pub fn filter(query: impl Into<Query>) -> Aggregation {
    Aggregation::new(AggregationKind::Filter(Box::new(query.into())))
}

pub fn filters() -> FiltersAggregation {
    FiltersAggregation::new()
}

pub fn missing(field: impl Into<String>) -> MissingAggregation {
    MissingAggregation::new(field)
}

pub fn global() -> GlobalAggregation {
    GlobalAggregation::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;
    use serde_json::json;

    #[test]
    fn test_bucket_order_is_single_entry() {
        let order = BucketOrder::new("_count", SortOrder::Asc);
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({"_count": "asc"})
        );
    }

    #[test]
    fn test_nested_sub_aggregations() {
        let agg = Aggregation::from(terms("category"))
            .aggregation("avg_price", avg("price"));
        assert_eq!(
            agg.to_value().unwrap(),
            json!({
                "terms": {"field": "category"},
                "aggs": {"avg_price": {"avg": {"field": "price"}}}
            })
        );
    }

    #[test]
    fn test_reusing_sub_aggregation_name_replaces() {
        let agg = Aggregation::from(terms("category"))
            .aggregation("metric", avg("price"))
            .aggregation("metric", max("price"));
        assert_eq!(
            agg.to_value().unwrap(),
            json!({
                "terms": {"field": "category"},
                "aggs": {"metric": {"max": {"field": "price"}}}
            })
        );
    }

    #[test]
    fn test_filter_aggregation_wraps_query() {
        let agg = filter(query::term("status", "active")).aggregation("count_ids", value_count("id"));
        assert_eq!(
            agg.to_value().unwrap(),
            json!({
                "filter": {"term": {"status": {"value": "active"}}},
                "aggs": {"count_ids": {"value_count": {"field": "id"}}}
            })
        );
    }

    #[test]
    fn test_global_is_empty_object() {
        let agg = Aggregation::from(global());
        assert_eq!(agg.to_value().unwrap(), json!({"global": {}}));
    }
}
