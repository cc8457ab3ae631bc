//! Full-text query builders

use crate::util::keyed_map;
use serde::{Serialize, Serializer};

/// Boolean operator applied between analyzed terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    And,
    Or,
}

/// Matches every document, optionally with a constant boost.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchAllQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
}

impl MatchAllQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }
}

/// Analyzed full-text match on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    field: String,
    body: MatchBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct MatchBody {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    operator: Option<Operator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fuzziness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
}

impl MatchQuery {
    pub fn new(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            body: MatchBody {
                query: query.into(),
                operator: None,
                fuzziness: None,
                boost: None,
            },
        }
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.body.operator = Some(operator);
        self
    }

    /// Edit-distance expression (`"1"`, `"2"`, `"AUTO"`); not validated.
    pub fn fuzziness(mut self, fuzziness: impl Into<String>) -> Self {
        self.body.fuzziness = Some(fuzziness.into());
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.body.boost = Some(boost);
        self
    }
}

impl Serialize for MatchQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        keyed_map(&self.field, &self.body, serializer)
    }
}

/// Exact phrase match on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPhraseQuery {
    field: String,
    body: MatchPhraseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct MatchPhraseBody {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    slop: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
}

impl MatchPhraseQuery {
    pub fn new(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            body: MatchPhraseBody {
                query: query.into(),
                slop: None,
                boost: None,
            },
        }
    }

    pub fn slop(mut self, slop: u32) -> Self {
        self.body.slop = Some(slop);
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.body.boost = Some(boost);
        self
    }
}

impl Serialize for MatchPhraseQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        keyed_map(&self.field, &self.body, serializer)
    }
}

/// Phrase match where the last term acts as a prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPhrasePrefixQuery {
    field: String,
    body: MatchPhrasePrefixBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct MatchPhrasePrefixBody {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    slop: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_expansions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
}

impl MatchPhrasePrefixQuery {
    pub fn new(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            body: MatchPhrasePrefixBody {
                query: query.into(),
                slop: None,
                max_expansions: None,
                boost: None,
            },
        }
    }

    pub fn slop(mut self, slop: u32) -> Self {
        self.body.slop = Some(slop);
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

impl Serialize for MatchPhrasePrefixQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        keyed_map(&self.field, &self.body, serializer)
    }
}

/// How a multi-field match combines per-field scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiMatchType {
    BestFields,
    MostFields,
    CrossFields,
    Phrase,
    PhrasePrefix,
    BoolPrefix,
}

/// Full-text match across multiple fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiMatchQuery {
    query: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    match_type: Option<MultiMatchType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    operator: Option<Operator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tie_breaker: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
}

impl MultiMatchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            fields: Vec::new(),
            match_type: None,
            operator: None,
            tie_breaker: None,
            boost: None,
        }
    }

    /// Target fields, with optional `^boost` suffixes. Empty means all.
    pub fn fields<I, T>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn match_type(mut self, match_type: MultiMatchType) -> Self {
        self.match_type = Some(match_type);
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn tie_breaker(mut self, tie_breaker: f32) -> Self {
        self.tie_breaker = Some(tie_breaker);
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }
}

/// Lucene-syntax query string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryStringQuery {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_field: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_operator: Option<Operator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    analyze_wildcard: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
}

impl QueryStringQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            default_field: None,
            fields: Vec::new(),
            default_operator: None,
            analyze_wildcard: None,
            boost: None,
        }
    }

    pub fn default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = Some(field.into());
        self
    }

    pub fn fields<I, T>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_operator(mut self, operator: Operator) -> Self {
        self.default_operator = Some(operator);
        self
    }

    pub fn analyze_wildcard(mut self, analyze: bool) -> Self {
        self.analyze_wildcard = Some(analyze);
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }
}

/// Fault-tolerant variant of the query-string syntax.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleQueryStringQuery {
    query: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_operator: Option<Operator>,
}

impl SimpleQueryStringQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            fields: Vec::new(),
            default_operator: None,
        }
    }

    pub fn fields<I, T>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_operator(mut self, operator: Operator) -> Self {
        self.default_operator = Some(operator);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_all_empty_body() {
        assert_eq!(
            serde_json::to_value(MatchAllQuery::new()).unwrap(),
            json!({})
        );
        assert_eq!(
            serde_json::to_value(MatchAllQuery::new().boost(1.5)).unwrap(),
            json!({"boost": 1.5})
        );
    }

    #[test]
    fn test_match_is_field_keyed() {
        let q = MatchQuery::new("title", "hello world")
            .operator(Operator::And)
            .fuzziness("AUTO");
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"title": {"query": "hello world", "operator": "and", "fuzziness": "AUTO"}})
        );
    }

    #[test]
    fn test_match_phrase_with_slop() {
        let q = MatchPhraseQuery::new("msg", "quick brown fox").slop(2);
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"msg": {"query": "quick brown fox", "slop": 2}})
        );
    }

    #[test]
    fn test_multi_match_renames_type() {
        let q = MultiMatchQuery::new("test")
            .fields(["title^2", "body"])
            .match_type(MultiMatchType::BestFields);
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"query": "test", "fields": ["title^2", "body"], "type": "best_fields"})
        );
    }

    #[test]
    fn test_query_string() {
        let q = QueryStringQuery::new("status:active AND type:log")
            .default_operator(Operator::And)
            .analyze_wildcard(true);
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({
                "query": "status:active AND type:log",
                "default_operator": "and",
                "analyze_wildcard": true
            })
        );
    }

    #[test]
    fn test_simple_query_string() {
        let q = SimpleQueryStringQuery::new("foo + bar").fields(["title"]);
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"query": "foo + bar", "fields": ["title"]})
        );
    }
}
