//! Metric aggregation builders
//!
//! The single-value metrics all take the same option set (field, missing,
//! format), so one builder covers the whole family; the kind tag picks the
//! wire name at conversion. `cardinality` and `percentiles` carry extra
//! options and get their own builders.

use crate::aggs::{Aggregation, AggregationKind};
use serde::Serialize;
use serde_json::Value;

/// The shared wire body of the single-value metric family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricBody {
    field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MetricKind {
    Avg,
    Sum,
    Min,
    Max,
    Stats,
    ExtendedStats,
    ValueCount,
}

/// Builder for the single-value metric family.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricAggregation {
    kind: MetricKind,
    body: MetricBody,
}

impl MetricAggregation {
    pub(crate) fn new(kind: MetricKind, field: impl Into<String>) -> Self {
        Self {
            kind,
            body: MetricBody {
                field: field.into(),
                missing: None,
                format: None,
            },
        }
    }

    /// Substitute value for documents lacking the field.
    pub fn missing(mut self, value: impl Into<Value>) -> Self {
        self.body.missing = Some(value.into());
        self
    }

    /// Display-format mask for the computed value; any string accepted.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.body.format = Some(format.into());
        self
    }
}

impl From<MetricAggregation> for Aggregation {
    fn from(agg: MetricAggregation) -> Self {
        let kind = match agg.kind {
            MetricKind::Avg => AggregationKind::Avg(agg.body),
            MetricKind::Sum => AggregationKind::Sum(agg.body),
            MetricKind::Min => AggregationKind::Min(agg.body),
            MetricKind::Max => AggregationKind::Max(agg.body),
            MetricKind::Stats => AggregationKind::Stats(agg.body),
            MetricKind::ExtendedStats => AggregationKind::ExtendedStats(agg.body),
            MetricKind::ValueCount => AggregationKind::ValueCount(agg.body),
        };
        Aggregation::new(kind)
    }
}

/// Approximate distinct count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardinalityAggregation {
    field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    precision_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<Value>,
}

impl CardinalityAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            precision_threshold: None,
            missing: None,
        }
    }

    pub fn precision_threshold(mut self, threshold: u32) -> Self {
        self.precision_threshold = Some(threshold);
        self
    }

    pub fn missing(mut self, value: impl Into<Value>) -> Self {
        self.missing = Some(value.into());
        self
    }
}

impl From<CardinalityAggregation> for Aggregation {
    fn from(agg: CardinalityAggregation) -> Self {
        Aggregation::new(AggregationKind::Cardinality(agg))
    }
}

/// Percentile estimates over a numeric field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentilesAggregation {
    field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    percents: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keyed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<Value>,
}

impl PercentilesAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            percents: None,
            keyed: None,
            missing: None,
        }
    }

    pub fn percents<I>(mut self, percents: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        self.percents = Some(percents.into_iter().collect());
        self
    }

    /// Keyed response: percentiles as a mapping instead of a sequence.
    pub fn keyed(mut self, keyed: bool) -> Self {
        self.keyed = Some(keyed);
        self
    }

    pub fn missing(mut self, value: impl Into<Value>) -> Self {
        self.missing = Some(value.into());
        self
    }
}

impl From<PercentilesAggregation> for Aggregation {
    fn from(agg: PercentilesAggregation) -> Self {
        Aggregation::new(AggregationKind::Percentiles(agg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggs;
    use serde_json::json;

    #[test]
    fn test_metric_family_wire_names() {
        for (agg, tag) in [
            (aggs::avg("price"), "avg"),
            (aggs::sum("price"), "sum"),
            (aggs::min("price"), "min"),
            (aggs::max("price"), "max"),
            (aggs::stats("price"), "stats"),
            (aggs::extended_stats("price"), "extended_stats"),
            (aggs::value_count("price"), "value_count"),
        ] {
            let value = Aggregation::from(agg).to_value().unwrap();
            assert_eq!(value.as_object().unwrap().len(), 1, "tag: {tag}");
            assert_eq!(value[tag], json!({"field": "price"}), "tag: {tag}");
        }
    }

    #[test]
    fn test_metric_missing_and_format() {
        let agg = aggs::avg("grade").missing(10).format("0.0");
        assert_eq!(
            Aggregation::from(agg).to_value().unwrap(),
            json!({"avg": {"field": "grade", "missing": 10, "format": "0.0"}})
        );
    }

    #[test]
    fn test_cardinality_precision() {
        let agg = aggs::cardinality("user_id").precision_threshold(1000);
        assert_eq!(
            Aggregation::from(agg).to_value().unwrap(),
            json!({"cardinality": {"field": "user_id", "precision_threshold": 1000}})
        );
    }

    #[test]
    fn test_percentiles() {
        let agg = aggs::percentiles("load_time")
            .percents([50.0, 95.0, 99.0])
            .keyed(false);
        assert_eq!(
            Aggregation::from(agg).to_value().unwrap(),
            json!({
                "percentiles": {
                    "field": "load_time",
                    "percents": [50.0, 95.0, 99.0],
                    "keyed": false
                }
            })
        );
    }
}
