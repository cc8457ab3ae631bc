//! Sort clauses and ordering directions

use crate::error::{Error, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Ordering direction.
///
/// Parsed case-insensitively; always lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(Error::InvalidArgument(format!(
                "sort direction must be `asc` or `desc`, got `{other}`"
            ))),
        }
    }
}

/// How multi-valued fields collapse into a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Min,
    Max,
    Sum,
    Avg,
    Median,
}

/// One entry of the request-level `sort` array.
///
/// Serializes as the shortest legal wire form: a bare field string, a
/// `{field: "asc"}` pair, or a `{field: {options}}` object when anything
/// beyond the direction is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    field: String,
    order: Option<SortOrder>,
    mode: Option<SortMode>,
    missing: Option<Value>,
    unmapped_type: Option<String>,
}

impl Sort {
    pub fn field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: None,
            mode: None,
            missing: None,
            unmapped_type: None,
        }
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Like [`Sort::order`], but parses the direction from a string,
    /// case-insensitively. Anything but `asc`/`desc` is rejected.
    pub fn try_order(self, direction: &str) -> Result<Self> {
        let order = direction.parse()?;
        Ok(self.order(order))
    }

    pub fn mode(mut self, mode: SortMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Substitute sort value for documents that lack the field.
    pub fn missing(mut self, value: impl Into<Value>) -> Self {
        self.missing = Some(value.into());
        self
    }

    pub fn unmapped_type(mut self, field_type: impl Into<String>) -> Self {
        self.unmapped_type = Some(field_type.into());
        self
    }
}

impl From<&str> for Sort {
    fn from(field: &str) -> Self {
        Sort::field(field)
    }
}

impl From<String> for Sort {
    fn from(field: String) -> Self {
        Sort::field(field)
    }
}

impl Serialize for Sort {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Options<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            order: Option<SortOrder>,
            #[serde(skip_serializing_if = "Option::is_none")]
            mode: Option<SortMode>,
            #[serde(skip_serializing_if = "Option::is_none")]
            missing: Option<&'a Value>,
            #[serde(skip_serializing_if = "Option::is_none")]
            unmapped_type: Option<&'a str>,
        }

        let has_options =
            self.mode.is_some() || self.missing.is_some() || self.unmapped_type.is_some();

        if has_options {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry(
                &self.field,
                &Options {
                    order: self.order,
                    mode: self.mode,
                    missing: self.missing.as_ref(),
                    unmapped_type: self.unmapped_type.as_deref(),
                },
            )?;
            map.end()
        } else if let Some(order) = self.order {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry(&self.field, order.as_str())?;
            map.end()
        } else {
            serializer.serialize_str(&self.field)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn test_sort_order_parses_any_casing() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("Desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!("dEsC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
    }

    #[test]
    fn test_sort_order_rejects_everything_else() {
        for bad in ["up", "", "ASCENDING", "descending", "asc "] {
            let err = bad.parse::<SortOrder>().unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "input: {bad:?}");
        }
    }

    #[test]
    fn test_sort_order_normalizes_to_lowercase() {
        let order = "DESC".parse::<SortOrder>().unwrap();
        assert_eq!(order.to_string(), "desc");
        assert_eq!(serde_json::to_value(order).unwrap(), json!("desc"));
    }

    #[test]
    fn test_sort_bare_field() {
        let sort = Sort::field("_score");
        assert_eq!(serde_json::to_value(&sort).unwrap(), json!("_score"));
    }

    #[test]
    fn test_sort_field_with_direction() {
        let sort = Sort::field("year").order(SortOrder::Desc);
        assert_eq!(
            serde_json::to_value(&sort).unwrap(),
            json!({"year": "desc"})
        );
    }

    #[test]
    fn test_sort_with_options_uses_object_form() {
        let sort = Sort::field("price")
            .order(SortOrder::Asc)
            .mode(SortMode::Avg)
            .missing("_last")
            .unmapped_type("long");
        assert_eq!(
            serde_json::to_value(&sort).unwrap(),
            json!({"price": {
                "order": "asc",
                "mode": "avg",
                "missing": "_last",
                "unmapped_type": "long"
            }})
        );
    }

    #[test]
    fn test_try_order_parses_direction() {
        let sort = Sort::field("year").try_order("DESC").unwrap();
        assert_eq!(
            serde_json::to_value(&sort).unwrap(),
            json!({"year": "desc"})
        );
        assert!(Sort::field("year").try_order("sideways").is_err());
    }
}
