//! Term-level query builders (exact values, not analyzed)

use crate::util::keyed_map;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Exact-value match on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    field: String,
    body: TermBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct TermBody {
    value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    case_insensitive: Option<bool>,
}

impl TermQuery {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            body: TermBody {
                value: value.into(),
                boost: None,
                case_insensitive: None,
            },
        }
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.body.boost = Some(boost);
        self
    }

    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.body.case_insensitive = Some(case_insensitive);
        self
    }
}

impl Serialize for TermQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        keyed_map(&self.field, &self.body, serializer)
    }
}

/// Matches any of several exact values on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct TermsQuery {
    field: String,
    values: Vec<Value>,
    boost: Option<f32>,
}

impl TermsQuery {
    pub fn new<I, T>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            boost: None,
        }
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl Serialize for TermsQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // `boost` sits next to the field entry, not inside it.
        let entries = if self.boost.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(entries))?;
        map.serialize_entry(&self.field, &self.values)?;
        if let Some(boost) = self.boost {
            map.serialize_entry("boost", &boost)?;
        }
        map.end()
    }
}

/// Range conditions on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    field: String,
    body: RangeBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
struct RangeBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    gte: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gt: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lte: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lt: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
}

impl RangeQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            body: RangeBody::default(),
        }
    }

    pub fn gte(mut self, value: impl Into<Value>) -> Self {
        self.body.gte = Some(value.into());
        self
    }

    pub fn gt(mut self, value: impl Into<Value>) -> Self {
        self.body.gt = Some(value.into());
        self
    }

    pub fn lte(mut self, value: impl Into<Value>) -> Self {
        self.body.lte = Some(value.into());
        self
    }

    pub fn lt(mut self, value: impl Into<Value>) -> Self {
        self.body.lt = Some(value.into());
        self
    }

    /// Date-format mask applied to the bounds; not validated.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.body.format = Some(format.into());
        self
    }

    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.body.time_zone = Some(time_zone.into());
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.body.boost = Some(boost);
        self
    }
}

impl Serialize for RangeQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        keyed_map(&self.field, &self.body, serializer)
    }
}

/// Matches documents where the field has any indexed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExistsQuery {
    field: String,
}

impl ExistsQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

/// Exact prefix match on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixQuery {
    field: String,
    body: PrefixBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct PrefixBody {
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
}

impl PrefixQuery {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            body: PrefixBody {
                value: value.into(),
                boost: None,
            },
        }
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.body.boost = Some(boost);
        self
    }
}

impl Serialize for PrefixQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        keyed_map(&self.field, &self.body, serializer)
    }
}

/// Wildcard pattern match (`*` and `?`) on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct WildcardQuery {
    field: String,
    body: WildcardBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct WildcardBody {
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    case_insensitive: Option<bool>,
}

impl WildcardQuery {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            body: WildcardBody {
                value: value.into(),
                boost: None,
                case_insensitive: None,
            },
        }
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.body.boost = Some(boost);
        self
    }

    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.body.case_insensitive = Some(case_insensitive);
        self
    }
}

impl Serialize for WildcardQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        keyed_map(&self.field, &self.body, serializer)
    }
}

/// Regular-expression match on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct RegexpQuery {
    field: String,
    body: RegexpBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct RegexpBody {
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    case_insensitive: Option<bool>,
}

impl RegexpQuery {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            body: RegexpBody {
                value: value.into(),
                flags: None,
                boost: None,
                case_insensitive: None,
            },
        }
    }

    /// Pipe-separated operator flags (`"INTERSECTION|COMPLEMENT"`); not
    /// validated.
    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.body.flags = Some(flags.into());
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.body.boost = Some(boost);
        self
    }

    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.body.case_insensitive = Some(case_insensitive);
        self
    }
}

impl Serialize for RegexpQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        keyed_map(&self.field, &self.body, serializer)
    }
}

/// Edit-distance match on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyQuery {
    field: String,
    body: FuzzyBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct FuzzyBody {
    value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    fuzziness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prefix_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_expansions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
}

impl FuzzyQuery {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            body: FuzzyBody {
                value: value.into(),
                fuzziness: None,
                prefix_length: None,
                max_expansions: None,
                boost: None,
            },
        }
    }

    pub fn fuzziness(mut self, fuzziness: impl Into<String>) -> Self {
        self.body.fuzziness = Some(fuzziness.into());
        self
    }

    pub fn prefix_length(mut self, prefix_length: u32) -> Self {
        self.body.prefix_length = Some(prefix_length);
        self
    }

    pub fn max_expansions(mut self, max_expansions: u32) -> Self {
        self.body.max_expansions = Some(max_expansions);
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.body.boost = Some(boost);
        self
    }
}

impl Serialize for FuzzyQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        keyed_map(&self.field, &self.body, serializer)
    }
}

/// Matches documents by `_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdsQuery {
    values: Vec<String>,
}

impl IdsQuery {
    pub fn new<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_term_always_uses_object_form() {
        let q = TermQuery::new("status", "active");
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"status": {"value": "active"}})
        );
    }

    #[test]
    fn test_term_with_boost_and_case() {
        let q = TermQuery::new("status", "active")
            .boost(2.0)
            .case_insensitive(true);
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"status": {"value": "active", "boost": 2.0, "case_insensitive": true}})
        );
    }

    #[test]
    fn test_terms_boost_next_to_field() {
        let q = TermsQuery::new("status", ["a", "b", "c"]).boost(1.5);
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"status": ["a", "b", "c"], "boost": 1.5})
        );
    }

    #[test]
    fn test_range_bounds() {
        let q = RangeQuery::new("age").gte(18).lt(65);
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"age": {"gte": 18, "lt": 65}})
        );
    }

    #[test]
    fn test_range_date_expression() {
        let q = RangeQuery::new("@timestamp")
            .gte("now-1d")
            .format("strict_date_optional_time")
            .time_zone("+01:00");
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"@timestamp": {
                "gte": "now-1d",
                "format": "strict_date_optional_time",
                "time_zone": "+01:00"
            }})
        );
    }

    #[test]
    fn test_exists() {
        assert_eq!(
            serde_json::to_value(ExistsQuery::new("user")).unwrap(),
            json!({"field": "user"})
        );
    }

    #[test]
    fn test_wildcard() {
        let q = WildcardQuery::new("user", "ki*y").case_insensitive(true);
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"user": {"value": "ki*y", "case_insensitive": true}})
        );
    }

    #[test]
    fn test_ids() {
        let q = IdsQuery::new(["1", "2", "3"]);
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"values": ["1", "2", "3"]})
        );
    }
}
