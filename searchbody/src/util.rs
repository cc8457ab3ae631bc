//! Console helpers for inspecting built bodies

use crate::error::Result;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Render any serializable body as indented JSON for inspection.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Serialize `value` as a single-entry map keyed by `key`.
///
/// The DSL nests most per-field options under the field name
/// (`{"term": {"status": {…}}}`); this is the shared impl for those shapes.
pub(crate) fn keyed_map<S, T>(
    key: &str,
    value: &T,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(key, value)?;
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_json_is_indented() {
        let rendered = to_pretty_json(&json!({"query": {"match_all": {}}})).unwrap();
        assert!(rendered.contains('\n'));
        assert!(rendered.contains("match_all"));
    }
}
