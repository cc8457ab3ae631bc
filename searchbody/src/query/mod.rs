//! Query builders
//!
//! One typed builder per DSL query kind, wrapped by the [`Query`] enum whose
//! externally tagged serialization produces the wire envelope
//! (`{"match_all": {…}}`, `{"bool": {…}}`, …). The free functions at the
//! bottom are the flat factory layer: lowercase name in, builder out, no
//! logic of their own.

pub mod compound;
pub mod full_text;
pub mod geo;
pub mod term_level;

pub use compound::{
    BoolQuery, BoostMode, BoostingQuery, ConstantScoreQuery, DecayFunction, DisMaxQuery,
    FactorModifier, FieldValueFactor, FunctionScoreQuery, MinimumShouldMatch, RandomScore,
    ScoreFunction, ScoreMode,
};
pub use full_text::{
    MatchAllQuery, MatchPhrasePrefixQuery, MatchPhraseQuery, MatchQuery, MultiMatchQuery,
    MultiMatchType, Operator, QueryStringQuery, SimpleQueryStringQuery,
};
pub use geo::{DistanceType, GeoBoundingBoxQuery, GeoDistanceQuery};
pub use term_level::{
    ExistsQuery, FuzzyQuery, IdsQuery, PrefixQuery, RangeQuery, RegexpQuery, TermQuery, TermsQuery,
    WildcardQuery,
};

use crate::error::Result;
use crate::geo::GeoPoint;
use serde::Serialize;
use serde_json::Value;

/// A query clause of the search DSL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    MatchAll(MatchAllQuery),
    Match(MatchQuery),
    MatchPhrase(MatchPhraseQuery),
    MatchPhrasePrefix(MatchPhrasePrefixQuery),
    MultiMatch(MultiMatchQuery),
    QueryString(QueryStringQuery),
    SimpleQueryString(SimpleQueryStringQuery),
    Term(TermQuery),
    Terms(TermsQuery),
    Range(RangeQuery),
    Exists(ExistsQuery),
    Prefix(PrefixQuery),
    Wildcard(WildcardQuery),
    Regexp(RegexpQuery),
    Fuzzy(FuzzyQuery),
    Ids(IdsQuery),
    Bool(BoolQuery),
    Boosting(BoostingQuery),
    ConstantScore(ConstantScoreQuery),
    DisMax(DisMaxQuery),
    FunctionScore(FunctionScoreQuery),
    GeoDistance(GeoDistanceQuery),
    GeoBoundingBox(GeoBoundingBoxQuery),
}

impl Query {
    /// Check family-specific required members, recursing into compound
    /// clauses. Everything else is deliberately permissive: malformed option
    /// values are left for the search service to reject.
    pub fn validate(&self) -> Result<()> {
        match self {
            Query::Bool(q) => q.validate(),
            Query::Boosting(q) => q.validate(),
            Query::ConstantScore(q) => q.validate(),
            Query::DisMax(q) => q.validate(),
            Query::FunctionScore(q) => q.validate(),
            _ => Ok(()),
        }
    }

    /// Validate, then serialize to the wire envelope.
    pub fn to_value(&self) -> Result<Value> {
        self.validate()?;
        Ok(serde_json::to_value(self)?)
    }
}

impl From<MatchAllQuery> for Query {
    fn from(q: MatchAllQuery) -> Self {
        Query::MatchAll(q)
    }
}

impl From<MatchQuery> for Query {
    fn from(q: MatchQuery) -> Self {
        Query::Match(q)
    }
}

impl From<MatchPhraseQuery> for Query {
    fn from(q: MatchPhraseQuery) -> Self {
        Query::MatchPhrase(q)
    }
}

impl From<MatchPhrasePrefixQuery> for Query {
    fn from(q: MatchPhrasePrefixQuery) -> Self {
        Query::MatchPhrasePrefix(q)
    }
}

impl From<MultiMatchQuery> for Query {
    fn from(q: MultiMatchQuery) -> Self {
        Query::MultiMatch(q)
    }
}

impl From<QueryStringQuery> for Query {
    fn from(q: QueryStringQuery) -> Self {
        Query::QueryString(q)
    }
}

impl From<SimpleQueryStringQuery> for Query {
    fn from(q: SimpleQueryStringQuery) -> Self {
        Query::SimpleQueryString(q)
    }
}

impl From<TermQuery> for Query {
    fn from(q: TermQuery) -> Self {
        Query::Term(q)
    }
}

impl From<TermsQuery> for Query {
    fn from(q: TermsQuery) -> Self {
        Query::Terms(q)
    }
}

impl From<RangeQuery> for Query {
    fn from(q: RangeQuery) -> Self {
        Query::Range(q)
    }
}

impl From<ExistsQuery> for Query {
    fn from(q: ExistsQuery) -> Self {
        Query::Exists(q)
    }
}

impl From<PrefixQuery> for Query {
    fn from(q: PrefixQuery) -> Self {
        Query::Prefix(q)
    }
}

impl From<WildcardQuery> for Query {
    fn from(q: WildcardQuery) -> Self {
        Query::Wildcard(q)
    }
}

impl From<RegexpQuery> for Query {
    fn from(q: RegexpQuery) -> Self {
        Query::Regexp(q)
    }
}

impl From<FuzzyQuery> for Query {
    fn from(q: FuzzyQuery) -> Self {
        Query::Fuzzy(q)
    }
}

impl From<IdsQuery> for Query {
    fn from(q: IdsQuery) -> Self {
        Query::Ids(q)
    }
}

impl From<BoolQuery> for Query {
    fn from(q: BoolQuery) -> Self {
        Query::Bool(q)
    }
}

impl From<BoostingQuery> for Query {
    fn from(q: BoostingQuery) -> Self {
        Query::Boosting(q)
    }
}

impl From<ConstantScoreQuery> for Query {
    fn from(q: ConstantScoreQuery) -> Self {
        Query::ConstantScore(q)
    }
}

impl From<DisMaxQuery> for Query {
    fn from(q: DisMaxQuery) -> Self {
        Query::DisMax(q)
    }
}

impl From<FunctionScoreQuery> for Query {
    fn from(q: FunctionScoreQuery) -> Self {
        Query::FunctionScore(q)
    }
}

impl From<GeoDistanceQuery> for Query {
    fn from(q: GeoDistanceQuery) -> Self {
        Query::GeoDistance(q)
    }
}

impl From<GeoBoundingBoxQuery> for Query {
    fn from(q: GeoBoundingBoxQuery) -> Self {
        Query::GeoBoundingBox(q)
    }
}

// ---------------------------------------------------------------------------
// Factory layer
// ---------------------------------------------------------------------------

pub fn match_all() -> MatchAllQuery {
    MatchAllQuery::new()
}

pub fn match_query(field: impl Into<String>, query: impl Into<String>) -> MatchQuery {
    MatchQuery::new(field, query)
}

pub fn match_phrase(field: impl Into<String>, query: impl Into<String>) -> MatchPhraseQuery {
    MatchPhraseQuery::new(field, query)
}

pub fn match_phrase_prefix(
    field: impl Into<String>,
    query: impl Into<String>,
) -> MatchPhrasePrefixQuery {
    MatchPhrasePrefixQuery::new(field, query)
}

pub fn multi_match(query: impl Into<String>) -> MultiMatchQuery {
    MultiMatchQuery::new(query)
}

pub fn query_string(query: impl Into<String>) -> QueryStringQuery {
    QueryStringQuery::new(query)
}

pub fn simple_query_string(query: impl Into<String>) -> SimpleQueryStringQuery {
    SimpleQueryStringQuery::new(query)
}

pub fn term(field: impl Into<String>, value: impl Into<Value>) -> TermQuery {
    TermQuery::new(field, value)
}

pub fn terms<I, T>(field: impl Into<String>, values: I) -> TermsQuery
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    TermsQuery::new(field, values)
}

pub fn range(field: impl Into<String>) -> RangeQuery {
    RangeQuery::new(field)
}

pub fn exists(field: impl Into<String>) -> ExistsQuery {
    ExistsQuery::new(field)
}

pub fn prefix(field: impl Into<String>, value: impl Into<String>) -> PrefixQuery {
    PrefixQuery::new(field, value)
}

pub fn wildcard(field: impl Into<String>, value: impl Into<String>) -> WildcardQuery {
    WildcardQuery::new(field, value)
}

pub fn regexp(field: impl Into<String>, value: impl Into<String>) -> RegexpQuery {
    RegexpQuery::new(field, value)
}

pub fn fuzzy(field: impl Into<String>, value: impl Into<Value>) -> FuzzyQuery {
    FuzzyQuery::new(field, value)
}

pub fn ids<I, T>(values: I) -> IdsQuery
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    IdsQuery::new(values)
}

pub fn bool_query() -> BoolQuery {
    BoolQuery::new()
}

pub fn boosting(
    positive: impl Into<Query>,
    negative: impl Into<Query>,
    negative_boost: f32,
) -> BoostingQuery {
    BoostingQuery::new(positive, negative, negative_boost)
}

pub fn constant_score(filter: impl Into<Query>) -> ConstantScoreQuery {
    ConstantScoreQuery::new(filter)
}

pub fn dis_max() -> DisMaxQuery {
    DisMaxQuery::new()
}

pub fn function_score(query: impl Into<Query>) -> FunctionScoreQuery {
    FunctionScoreQuery::new(query)
}

pub fn geo_distance(
    field: impl Into<String>,
    distance: impl Into<String>,
    origin: impl Into<GeoPoint>,
) -> GeoDistanceQuery {
    GeoDistanceQuery::new(field, distance, origin)
}

pub fn geo_bounding_box(
    field: impl Into<String>,
    top_left: impl Into<GeoPoint>,
    bottom_right: impl Into<GeoPoint>,
) -> GeoBoundingBoxQuery {
    GeoBoundingBoxQuery::new(field, top_left, bottom_right)
}
