//! Root search request-body builder

use crate::aggs::Aggregation;
use crate::error::Result;
use crate::highlight::Highlight;
use crate::query::Query;
use crate::sort::Sort;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Whether (or up to what count) total hits are tracked exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrackTotalHits {
    Enabled(bool),
    Count(u64),
}

impl From<bool> for TrackTotalHits {
    fn from(enabled: bool) -> Self {
        TrackTotalHits::Enabled(enabled)
    }
}

impl From<u64> for TrackTotalHits {
    fn from(count: u64) -> Self {
        TrackTotalHits::Count(count)
    }
}

/// `_source` filtering: on/off, a field list, or include/exclude patterns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SourceFilter {
    Enabled(bool),
    Fields(Vec<String>),
    Filtered {
        #[serde(skip_serializing_if = "Option::is_none")]
        includes: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        excludes: Option<Vec<String>>,
    },
}

impl SourceFilter {
    pub fn fields<I, T>(fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        SourceFilter::Fields(fields.into_iter().map(Into::into).collect())
    }
}

impl From<bool> for SourceFilter {
    fn from(enabled: bool) -> Self {
        SourceFilter::Enabled(enabled)
    }
}

/// The root request body handed to the search service.
///
/// Assembled through chained setters, then serialized with
/// [`Search::to_value`] (or plain serde). Serialization does not change
/// state and can be repeated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Search {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<Query>,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_filter: Option<Query>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    track_total_hits: Option<TrackTotalHits>,
    #[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
    source: Option<SourceFilter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sort: Vec<Sort>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    aggs: BTreeMap<String, Aggregation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlight: Option<Highlight>,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<Query>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Filter applied after aggregations are computed.
    pub fn post_filter(mut self, query: impl Into<Query>) -> Self {
        self.post_filter = Some(query.into());
        self
    }

    pub fn from(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn min_score(mut self, min_score: f32) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Per-request timeout expression (`"500ms"`, `"2s"`); not validated.
    pub fn timeout(mut self, timeout: impl Into<String>) -> Self {
        self.timeout = Some(timeout.into());
        self
    }

    pub fn track_total_hits(mut self, track: impl Into<TrackTotalHits>) -> Self {
        self.track_total_hits = Some(track.into());
        self
    }

    pub fn source(mut self, source: impl Into<SourceFilter>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Append one sort clause; earlier clauses take precedence.
    pub fn sort(mut self, sort: impl Into<Sort>) -> Self {
        self.sort.push(sort.into());
        self
    }

    /// Add a named top-level aggregation. Reusing a name replaces the
    /// previous entry.
    pub fn agg(mut self, name: impl Into<String>, agg: impl Into<Aggregation>) -> Self {
        self.aggs.insert(name.into(), agg.into());
        self
    }

    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = Some(highlight);
        self
    }

    /// Check family-specific required members across the whole body.
    pub fn validate(&self) -> Result<()> {
        if let Some(query) = &self.query {
            query.validate()?;
        }
        if let Some(post_filter) = &self.post_filter {
            post_filter.validate()?;
        }
        for agg in self.aggs.values() {
            agg.validate()?;
        }
        Ok(())
    }

    /// Validate, then serialize to the wire tree.
    pub fn to_value(&self) -> Result<Value> {
        self.validate()?;
        let body = serde_json::to_value(self)?;
        tracing::debug!(
            has_query = self.query.is_some(),
            aggs = self.aggs.len(),
            sorts = self.sort.len(),
            "built search body"
        );
        Ok(body)
    }

    /// Validate, then serialize to a compact JSON string.
    pub fn to_json(&self) -> Result<String> {
        self.validate()?;
        Ok(serde_json::to_string(self)?)
    }
}
