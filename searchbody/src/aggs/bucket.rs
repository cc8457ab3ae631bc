//! Bucket aggregation builders
//!
//! `histogram` and `date_histogram` share the interval-bucketing option
//! family ([`HistogramOpts`] + [`HistogramOptions`]); the other bucket kinds
//! carry their own smaller option sets.

use crate::aggs::{Aggregation, AggregationKind, BucketOrder};
use crate::error::{Error, Result};
use crate::query::Query;
use crate::sort::SortOrder;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A bound that is either a plain number or a date-math expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoundValue {
    Number(f64),
    Expr(String),
}

impl From<f64> for BoundValue {
    fn from(value: f64) -> Self {
        BoundValue::Number(value)
    }
}

impl From<i64> for BoundValue {
    fn from(value: i64) -> Self {
        BoundValue::Number(value as f64)
    }
}

impl From<i32> for BoundValue {
    fn from(value: i32) -> Self {
        BoundValue::Number(value as f64)
    }
}

impl From<&str> for BoundValue {
    fn from(expr: &str) -> Self {
        BoundValue::Expr(expr.to_string())
    }
}

impl From<String> for BoundValue {
    fn from(expr: String) -> Self {
        BoundValue::Expr(expr)
    }
}

/// Explicit min/max forcing bucket generation beyond the matched range.
///
/// Always set and replaced as one unit; `min <= max` is not checked here,
/// the search service rejects inverted bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedBounds {
    min: BoundValue,
    max: BoundValue,
}

impl ExtendedBounds {
    pub fn new(min: impl Into<BoundValue>, max: impl Into<BoundValue>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }
}

/// The option family shared by the interval-based bucketing aggregations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistogramOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<BucketOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_doc_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extended_bounds: Option<ExtendedBounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keyed: Option<bool>,
}

/// Chained setters for the interval-bucketing option family.
///
/// Everything here stores its argument unvalidated and returns the builder;
/// the one exception is [`try_order`](HistogramOptions::try_order), which
/// rejects directions other than `asc`/`desc`.
pub trait HistogramOptions: Sized {
    fn histogram_opts_mut(&mut self) -> &mut HistogramOpts;

    /// Display-format mask for bucket keys; any string accepted.
    fn format(mut self, format: impl Into<String>) -> Self {
        self.histogram_opts_mut().format = Some(format.into());
        self
    }

    /// Shift of the bucket start (a number, or a date expression for the
    /// calendar variant).
    fn offset(mut self, offset: impl Into<Value>) -> Self {
        self.histogram_opts_mut().offset = Some(offset.into());
        self
    }

    /// Bucket ordering; replaces any previous ordering spec wholesale.
    fn order(mut self, key: impl Into<String>, direction: SortOrder) -> Self {
        self.histogram_opts_mut().order = Some(BucketOrder::new(key, direction));
        self
    }

    /// Like [`order`](HistogramOptions::order), but parses the direction
    /// case-insensitively; anything but `asc`/`desc` is rejected.
    fn try_order(self, key: impl Into<String>, direction: &str) -> Result<Self> {
        let direction = direction.parse()?;
        Ok(self.order(key, direction))
    }

    /// Minimum matching documents for a bucket to appear in the response.
    fn min_doc_count(mut self, count: u64) -> Self {
        self.histogram_opts_mut().min_doc_count = Some(count);
        self
    }

    /// Set both bounds as one unit, overwriting any prior pair.
    fn extended_bounds(mut self, min: impl Into<BoundValue>, max: impl Into<BoundValue>) -> Self {
        self.histogram_opts_mut().extended_bounds = Some(ExtendedBounds::new(min, max));
        self
    }

    /// Substitute value for documents lacking the field.
    fn missing(mut self, value: impl Into<Value>) -> Self {
        self.histogram_opts_mut().missing = Some(value.into());
        self
    }

    /// Keyed response: buckets as a mapping instead of an ordered sequence.
    fn keyed(mut self, keyed: bool) -> Self {
        self.histogram_opts_mut().keyed = Some(keyed);
        self
    }
}

/// Fixed-interval numeric bucketing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramAggregation {
    field: String,
    interval: f64,
    #[serde(flatten)]
    opts: HistogramOpts,
}

impl HistogramAggregation {
    pub fn new(field: impl Into<String>, interval: f64) -> Self {
        Self {
            field: field.into(),
            interval,
            opts: HistogramOpts::default(),
        }
    }
}

impl HistogramOptions for HistogramAggregation {
    fn histogram_opts_mut(&mut self) -> &mut HistogramOpts {
        &mut self.opts
    }

    fn offset(mut self, offset: impl Into<Value>) -> Self {
        let offset = offset.into();
        // The service rejects negative offsets for this variant only; the
        // value is stored unchanged either way.
        if offset.as_f64().is_some_and(|v| v < 0.0) {
            tracing::warn!(
                %offset,
                "negative offset on a fixed-interval histogram is rejected by the search service"
            );
        }
        self.opts.offset = Some(offset);
        self
    }
}

impl From<HistogramAggregation> for Aggregation {
    fn from(agg: HistogramAggregation) -> Self {
        Aggregation::new(AggregationKind::Histogram(agg))
    }
}

/// Calendar- or fixed-expression date bucketing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateHistogramAggregation {
    field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    calendar_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fixed_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_zone: Option<String>,
    #[serde(flatten)]
    opts: HistogramOpts,
}

impl DateHistogramAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            calendar_interval: None,
            fixed_interval: None,
            time_zone: None,
            opts: HistogramOpts::default(),
        }
    }

    /// Calendar expression (`"day"`, `"week"`, `"month"`); the legality of
    /// the expression is left to the search service.
    pub fn calendar_interval(mut self, interval: impl Into<String>) -> Self {
        self.calendar_interval = Some(interval.into());
        self
    }

    /// Fixed-duration expression (`"30s"`, `"12h"`); not validated.
    pub fn fixed_interval(mut self, interval: impl Into<String>) -> Self {
        self.fixed_interval = Some(interval.into());
        self
    }

    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }
}

impl HistogramOptions for DateHistogramAggregation {
    fn histogram_opts_mut(&mut self) -> &mut HistogramOpts {
        &mut self.opts
    }
}

impl From<DateHistogramAggregation> for Aggregation {
    fn from(agg: DateHistogramAggregation) -> Self {
        Aggregation::new(AggregationKind::DateHistogram(agg))
    }
}

/// Buckets by distinct field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermsAggregation {
    field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<BucketOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_doc_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<Value>,
}

impl TermsAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            size: None,
            order: None,
            min_doc_count: None,
            missing: None,
        }
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Bucket ordering; replaces any previous ordering spec wholesale.
    pub fn order(mut self, key: impl Into<String>, direction: SortOrder) -> Self {
        self.order = Some(BucketOrder::new(key, direction));
        self
    }

    /// Like [`TermsAggregation::order`], but parses the direction
    /// case-insensitively.
    pub fn try_order(self, key: impl Into<String>, direction: &str) -> Result<Self> {
        let direction = direction.parse()?;
        Ok(self.order(key, direction))
    }

    pub fn min_doc_count(mut self, count: u64) -> Self {
        self.min_doc_count = Some(count);
        self
    }

    pub fn missing(mut self, value: impl Into<Value>) -> Self {
        self.missing = Some(value.into());
        self
    }
}

impl From<TermsAggregation> for Aggregation {
    fn from(agg: TermsAggregation) -> Self {
        Aggregation::new(AggregationKind::Terms(agg))
    }
}

/// One bucket of a numeric `range` aggregation; open on either end.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeBucket {
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<f64>,
}

impl RangeBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn from(mut self, from: f64) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to(mut self, to: f64) -> Self {
        self.to = Some(to);
        self
    }
}

/// Buckets by explicit numeric ranges. At least one range is required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeAggregation {
    field: String,
    ranges: Vec<RangeBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keyed: Option<bool>,
}

impl RangeAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ranges: Vec::new(),
            keyed: None,
        }
    }

    pub fn range(mut self, bucket: RangeBucket) -> Self {
        self.ranges.push(bucket);
        self
    }

    pub fn keyed(mut self, keyed: bool) -> Self {
        self.keyed = Some(keyed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.ranges.is_empty() {
            return Err(Error::MissingRequiredField("ranges"));
        }
        Ok(())
    }
}

impl From<RangeAggregation> for Aggregation {
    fn from(agg: RangeAggregation) -> Self {
        Aggregation::new(AggregationKind::Range(agg))
    }
}

/// One bucket of a `date_range` aggregation; bounds are date expressions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DateRangeBucket {
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<String>,
}

impl DateRangeBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }
}

/// Buckets by explicit date ranges. At least one range is required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRangeAggregation {
    field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    ranges: Vec<DateRangeBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keyed: Option<bool>,
}

impl DateRangeAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            format: None,
            ranges: Vec::new(),
            keyed: None,
        }
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn range(mut self, bucket: DateRangeBucket) -> Self {
        self.ranges.push(bucket);
        self
    }

    pub fn keyed(mut self, keyed: bool) -> Self {
        self.keyed = Some(keyed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.ranges.is_empty() {
            return Err(Error::MissingRequiredField("ranges"));
        }
        Ok(())
    }
}

impl From<DateRangeAggregation> for Aggregation {
    fn from(agg: DateRangeAggregation) -> Self {
        Aggregation::new(AggregationKind::DateRange(agg))
    }
}

/// One bucket per named filter query. At least one filter is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FiltersAggregation {
    filters: BTreeMap<String, Query>,
    #[serde(skip_serializing_if = "Option::is_none")]
    other_bucket: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    other_bucket_key: Option<String>,
}

impl FiltersAggregation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named filter bucket. Reusing a name replaces the query.
    pub fn filter(mut self, name: impl Into<String>, query: impl Into<Query>) -> Self {
        self.filters.insert(name.into(), query.into());
        self
    }

    pub fn other_bucket(mut self, other_bucket: bool) -> Self {
        self.other_bucket = Some(other_bucket);
        self
    }

    pub fn other_bucket_key(mut self, key: impl Into<String>) -> Self {
        self.other_bucket_key = Some(key.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.filters.is_empty() {
            return Err(Error::MissingRequiredField("filters"));
        }
        for query in self.filters.values() {
            query.validate()?;
        }
        Ok(())
    }
}

impl From<FiltersAggregation> for Aggregation {
    fn from(agg: FiltersAggregation) -> Self {
        Aggregation::new(AggregationKind::Filters(agg))
    }
}

/// Buckets documents lacking the field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingAggregation {
    field: String,
}

impl MissingAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl From<MissingAggregation> for Aggregation {
    fn from(agg: MissingAggregation) -> Self {
        Aggregation::new(AggregationKind::Missing(agg))
    }
}

/// A single bucket over all documents, ignoring the request query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalAggregation {}

impl GlobalAggregation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<GlobalAggregation> for Aggregation {
    fn from(agg: GlobalAggregation) -> Self {
        Aggregation::new(AggregationKind::Global(agg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;
    use serde_json::json;

    #[test]
    fn test_histogram_exact_wire_keys() {
        let agg = HistogramAggregation::new("age", 10.0)
            .min_doc_count(5)
            .keyed(true);
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({"field": "age", "interval": 10.0, "min_doc_count": 5, "keyed": true})
        );
    }

    #[test]
    fn test_order_replaces_wholesale() {
        let agg = HistogramAggregation::new("age", 10.0)
            .try_order("_count", "ASC")
            .unwrap()
            .try_order("_count", "desc")
            .unwrap();
        let value = serde_json::to_value(&agg).unwrap();
        assert_eq!(value["order"], json!({"_count": "desc"}));
    }

    #[test]
    fn test_order_key_change_drops_old_key() {
        let agg = HistogramAggregation::new("age", 10.0)
            .order("_count", SortOrder::Asc)
            .order("_key", SortOrder::Desc);
        let value = serde_json::to_value(&agg).unwrap();
        assert_eq!(value["order"], json!({"_key": "desc"}));
    }

    #[test]
    fn test_try_order_rejects_bad_direction_without_mutation() {
        let agg = HistogramAggregation::new("age", 10.0).order("_count", SortOrder::Asc);
        let before = serde_json::to_value(&agg).unwrap();

        let err = agg.clone().try_order("_count", "up").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(serde_json::to_value(&agg).unwrap(), before);
    }

    #[test]
    fn test_extended_bounds_replaced_as_a_pair() {
        let agg = HistogramAggregation::new("age", 10.0)
            .extended_bounds(0.0, 100.0)
            .extended_bounds(50.0, 200.0);
        let value = serde_json::to_value(&agg).unwrap();
        assert_eq!(
            value["extended_bounds"],
            json!({"min": 50.0, "max": 200.0})
        );
    }

    #[test]
    fn test_date_histogram_calendar_interval_and_bounds() {
        let agg = DateHistogramAggregation::new("@timestamp")
            .calendar_interval("month")
            .time_zone("+01:00")
            .extended_bounds("now-1y/y", "now/y")
            .format("yyyy-MM");
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({
                "field": "@timestamp",
                "calendar_interval": "month",
                "time_zone": "+01:00",
                "format": "yyyy-MM",
                "extended_bounds": {"min": "now-1y/y", "max": "now/y"}
            })
        );
    }

    #[test]
    fn test_negative_offset_stored_unchanged() {
        let agg = HistogramAggregation::new("age", 10.0).offset(-5);
        let value = serde_json::to_value(&agg).unwrap();
        assert_eq!(value["offset"], json!(-5));
    }

    #[test]
    fn test_terms_options() {
        let agg = TermsAggregation::new("status")
            .size(20)
            .order("_key", SortOrder::Asc)
            .min_doc_count(2)
            .missing("unknown");
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({
                "field": "status",
                "size": 20,
                "order": {"_key": "asc"},
                "min_doc_count": 2,
                "missing": "unknown"
            })
        );
    }

    #[test]
    fn test_range_buckets() {
        let agg = RangeAggregation::new("price")
            .range(RangeBucket::new().to(50.0))
            .range(RangeBucket::new().from(50.0).to(100.0))
            .range(RangeBucket::new().from(100.0).key("expensive"))
            .keyed(true);
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({
                "field": "price",
                "ranges": [
                    {"to": 50.0},
                    {"from": 50.0, "to": 100.0},
                    {"key": "expensive", "from": 100.0}
                ],
                "keyed": true
            })
        );
    }

    #[test]
    fn test_range_requires_at_least_one_bucket() {
        let err = RangeAggregation::new("price").validate().unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField("ranges")));
    }

    #[test]
    fn test_date_range_buckets() {
        let agg = DateRangeAggregation::new("date")
            .format("yyyy-MM-dd")
            .range(DateRangeBucket::new().to("now-10M/M"))
            .range(DateRangeBucket::new().from("now-10M/M"));
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({
                "field": "date",
                "format": "yyyy-MM-dd",
                "ranges": [
                    {"to": "now-10M/M"},
                    {"from": "now-10M/M"}
                ]
            })
        );
    }

    #[test]
    fn test_filters_requires_at_least_one_filter() {
        let err = FiltersAggregation::new().validate().unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField("filters")));
    }

    #[test]
    fn test_filters_named_buckets() {
        let agg = FiltersAggregation::new()
            .filter("errors", query::term("level", "error"))
            .filter("warnings", query::term("level", "warn"))
            .other_bucket(true);
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({
                "filters": {
                    "errors": {"term": {"level": {"value": "error"}}},
                    "warnings": {"term": {"level": {"value": "warn"}}}
                },
                "other_bucket": true
            })
        );
    }
}
