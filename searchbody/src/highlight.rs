//! Highlighting configuration

use serde::Serialize;
use std::collections::BTreeMap;

/// Request-level highlight configuration.
///
/// Global options apply to every highlighted field unless the per-field
/// [`HighlightField`] overrides them. Adding a field that already exists
/// replaces its options.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Highlight {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    fields: BTreeMap<String, HighlightField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pre_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fragment_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number_of_fragments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    require_field_match: Option<bool>,
}

impl Highlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight `field` with the global options.
    pub fn field(self, field: impl Into<String>) -> Self {
        self.field_options(field, HighlightField::default())
    }

    /// Highlight `field` with per-field overrides.
    pub fn field_options(mut self, field: impl Into<String>, options: HighlightField) -> Self {
        self.fields.insert(field.into(), options);
        self
    }

    pub fn pre_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.pre_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn post_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.post_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn fragment_size(mut self, size: u32) -> Self {
        self.fragment_size = Some(size);
        self
    }

    pub fn number_of_fragments(mut self, count: u32) -> Self {
        self.number_of_fragments = Some(count);
        self
    }

    pub fn encoder(mut self, encoder: impl Into<String>) -> Self {
        self.encoder = Some(encoder.into());
        self
    }

    pub fn require_field_match(mut self, require: bool) -> Self {
        self.require_field_match = Some(require);
        self
    }
}

/// Per-field highlight overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HighlightField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pre_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fragment_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number_of_fragments: Option<u32>,
}

impl HighlightField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pre_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.pre_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn post_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.post_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn fragment_size(mut self, size: u32) -> Self {
        self.fragment_size = Some(size);
        self
    }

    pub fn number_of_fragments(mut self, count: u32) -> Self {
        self.number_of_fragments = Some(count);
        self
    }
}
