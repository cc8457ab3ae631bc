//! Compound query builders and the score-function option family

use crate::error::Result;
use crate::query::Query;
use crate::util::keyed_map;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Boolean combination of sub-queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoolQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    must: Vec<Query>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    filter: Vec<Query>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    should: Vec<Query>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    must_not: Vec<Query>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_should_match: Option<MinimumShouldMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must(mut self, query: impl Into<Query>) -> Self {
        self.must.push(query.into());
        self
    }

    pub fn filter(mut self, query: impl Into<Query>) -> Self {
        self.filter.push(query.into());
        self
    }

    pub fn should(mut self, query: impl Into<Query>) -> Self {
        self.should.push(query.into());
        self
    }

    pub fn must_not(mut self, query: impl Into<Query>) -> Self {
        self.must_not.push(query.into());
        self
    }

    pub fn minimum_should_match(mut self, value: impl Into<MinimumShouldMatch>) -> Self {
        self.minimum_should_match = Some(value.into());
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn validate(&self) -> Result<()> {
        for clause in [&self.must, &self.filter, &self.should, &self.must_not] {
            for query in clause {
                query.validate()?;
            }
        }
        Ok(())
    }
}

/// `minimum_should_match`: an absolute count or a percentage expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MinimumShouldMatch {
    Count(i32),
    Percentage(String),
}

impl From<i32> for MinimumShouldMatch {
    fn from(count: i32) -> Self {
        MinimumShouldMatch::Count(count)
    }
}

impl From<&str> for MinimumShouldMatch {
    fn from(expr: &str) -> Self {
        MinimumShouldMatch::Percentage(expr.to_string())
    }
}

impl From<String> for MinimumShouldMatch {
    fn from(expr: String) -> Self {
        MinimumShouldMatch::Percentage(expr)
    }
}

/// Demotes (rather than excludes) documents matching the negative query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoostingQuery {
    positive: Box<Query>,
    negative: Box<Query>,
    negative_boost: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
}

impl BoostingQuery {
    pub fn new(
        positive: impl Into<Query>,
        negative: impl Into<Query>,
        negative_boost: f32,
    ) -> Self {
        Self {
            positive: Box::new(positive.into()),
            negative: Box::new(negative.into()),
            negative_boost,
            boost: None,
        }
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.positive.validate()?;
        self.negative.validate()
    }
}

/// Wraps a filter and scores every match with the same constant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantScoreQuery {
    filter: Box<Query>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
}

impl ConstantScoreQuery {
    pub fn new(filter: impl Into<Query>) -> Self {
        Self {
            filter: Box::new(filter.into()),
            boost: None,
        }
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.filter.validate()
    }
}

/// Takes the best score among the sub-queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisMaxQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    queries: Vec<Query>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tie_breaker: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
}

impl DisMaxQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<Query>) -> Self {
        self.queries.push(query.into());
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

    pub fn validate(&self) -> Result<()> {
        for query in &self.queries {
            query.validate()?;
        }
        Ok(())
    }
}

/// How per-function scores combine with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    Multiply,
    Sum,
    Avg,
    First,
    Max,
    Min,
}

/// How the combined function score merges with the query score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoostMode {
    Multiply,
    Replace,
    Sum,
    Avg,
    Max,
    Min,
}

/// Rescores query matches through a list of scoring functions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionScoreQuery {
    query: Box<Query>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    functions: Vec<ScoreFunction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    score_mode: Option<ScoreMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost_mode: Option<BoostMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_boost: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f32>,
}

impl FunctionScoreQuery {
    pub fn new(query: impl Into<Query>) -> Self {
        Self {
            query: Box::new(query.into()),
            functions: Vec::new(),
            score_mode: None,
            boost_mode: None,
            max_boost: None,
            min_score: None,
            boost: None,
        }
    }

    pub fn function(mut self, function: impl Into<ScoreFunction>) -> Self {
        self.functions.push(function.into());
        self
    }

    pub fn score_mode(mut self, mode: ScoreMode) -> Self {
        self.score_mode = Some(mode);
        self
    }

    pub fn boost_mode(mut self, mode: BoostMode) -> Self {
        self.boost_mode = Some(mode);
        self
    }

    pub fn max_boost(mut self, max_boost: f32) -> Self {
        self.max_boost = Some(max_boost);
        self
    }

    pub fn min_score(mut self, min_score: f32) -> Self {
        self.min_score = Some(min_score);
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.query.validate()?;
        for function in &self.functions {
            if let Some(filter) = &function.filter {
                filter.validate()?;
            }
        }
        Ok(())
    }
}

/// One entry of the `functions` array: an optional filter, an optional
/// scoring function, and an optional weight multiplier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreFunction {
    pub(crate) filter: Option<Box<Query>>,
    kind: Option<FunctionKind>,
    weight: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
enum FunctionKind {
    RandomScore(RandomScore),
    FieldValueFactor(FieldValueFactor),
    Decay(DecayFunction),
}

impl ScoreFunction {
    /// A bare function entry; with only a weight set it acts as a constant
    /// multiplier for whatever its filter matches.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, query: impl Into<Query>) -> Self {
        self.filter = Some(Box::new(query.into()));
        self
    }

    pub fn weight(mut self, weight: f32) -> Self {
        self.weight = Some(weight);
        self
    }
}

impl From<RandomScore> for ScoreFunction {
    fn from(function: RandomScore) -> Self {
        ScoreFunction {
            kind: Some(FunctionKind::RandomScore(function)),
            ..Default::default()
        }
    }
}

impl From<FieldValueFactor> for ScoreFunction {
    fn from(function: FieldValueFactor) -> Self {
        ScoreFunction {
            kind: Some(FunctionKind::FieldValueFactor(function)),
            ..Default::default()
        }
    }
}

impl From<DecayFunction> for ScoreFunction {
    fn from(function: DecayFunction) -> Self {
        ScoreFunction {
            kind: Some(FunctionKind::Decay(function)),
            ..Default::default()
        }
    }
}

impl Serialize for ScoreFunction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(filter) = &self.filter {
            map.serialize_entry("filter", filter)?;
        }
        match &self.kind {
            Some(FunctionKind::RandomScore(f)) => map.serialize_entry("random_score", f)?,
            Some(FunctionKind::FieldValueFactor(f)) => {
                map.serialize_entry("field_value_factor", f)?
            }
            Some(FunctionKind::Decay(f)) => map.serialize_entry(f.kind.as_str(), &f.body)?,
            None => {}
        }
        if let Some(weight) = self.weight {
            map.serialize_entry("weight", &weight)?;
        }
        map.end()
    }
}

/// Reproducibly random per-document score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RandomScore {
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl RandomScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Modifier applied to the field value before it becomes a factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorModifier {
    None,
    Log,
    Log1p,
    Log2p,
    Ln,
    Ln1p,
    Ln2p,
    Square,
    Sqrt,
    Reciprocal,
}

/// Scores by a numeric field's value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValueFactor {
    field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    factor: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modifier: Option<FactorModifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<f64>,
}

impl FieldValueFactor {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            factor: None,
            modifier: None,
            missing: None,
        }
    }

    pub fn factor(mut self, factor: f32) -> Self {
        self.factor = Some(factor);
        self
    }

    pub fn modifier(mut self, modifier: FactorModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// Substitute value for documents lacking the field.
    pub fn missing(mut self, value: f64) -> Self {
        self.missing = Some(value);
        self
    }
}

/// Decay curve shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecayKind {
    Gauss,
    Exp,
    Linear,
}

impl DecayKind {
    fn as_str(&self) -> &'static str {
        match self {
            DecayKind::Gauss => "gauss",
            DecayKind::Exp => "exp",
            DecayKind::Linear => "linear",
        }
    }
}

/// Distance-based score decay around an origin. The shared origin / scale /
/// offset / decay option set applies to all three curve shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayFunction {
    kind: DecayKind,
    body: DecayBody,
}

#[derive(Debug, Clone, PartialEq)]
struct DecayBody {
    field: String,
    params: DecayParams,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct DecayParams {
    origin: Value,
    scale: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decay: Option<f64>,
}

impl DecayFunction {
    pub fn new(
        kind: DecayKind,
        field: impl Into<String>,
        origin: impl Into<Value>,
        scale: impl Into<Value>,
    ) -> Self {
        Self {
            kind,
            body: DecayBody {
                field: field.into(),
                params: DecayParams {
                    origin: origin.into(),
                    scale: scale.into(),
                    offset: None,
                    decay: None,
                },
            },
        }
    }

    pub fn gauss(
        field: impl Into<String>,
        origin: impl Into<Value>,
        scale: impl Into<Value>,
    ) -> Self {
        Self::new(DecayKind::Gauss, field, origin, scale)
    }

    pub fn exp(
        field: impl Into<String>,
        origin: impl Into<Value>,
        scale: impl Into<Value>,
    ) -> Self {
        Self::new(DecayKind::Exp, field, origin, scale)
    }

    pub fn linear(
        field: impl Into<String>,
        origin: impl Into<Value>,
        scale: impl Into<Value>,
    ) -> Self {
        Self::new(DecayKind::Linear, field, origin, scale)
    }

    pub fn offset(mut self, offset: impl Into<Value>) -> Self {
        self.body.params.offset = Some(offset.into());
        self
    }

    pub fn decay(mut self, decay: f64) -> Self {
        self.body.params.decay = Some(decay);
        self
    }
}

impl Serialize for DecayBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        keyed_map(&self.field, &self.params, serializer)
    }
}
