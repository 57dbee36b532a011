use crate::error::{PoiError, Result};
use serde_json::{Map, Value as JsonValue};

/// Category of the spot a fleet sorties from
const START_CATEGORY: &str = "start";

/// Marker written in place of a reference to the start spot
const START_MARKER: &str = "Start";

/// Normalize the `route` mapping of one aggregated cell record
///
/// For every route entry:
/// - entries whose first element is null or missing are dropped
/// - the first element is otherwise an index into `spots`; when that spot's
///   third field is `"start"` it is replaced with the string `"Start"`
/// - every other element is kept unchanged
///
/// # Arguments
/// * `key` - Composite key of the record, used in error messages
/// * `record` - The aggregated record (`{"route": {...}, "spots": [...]}`)
///
/// # Returns
/// * `Ok(Map)` - Route id to normalized route entry
/// * `Err(PoiError)` - If the record is malformed or a route references a
///   spot that does not exist
///
/// # Examples
/// ```
/// use poi2kc3::normalize::normalize_record;
/// use serde_json::json;
///
/// let record = json!({
///     "route": {"a": [0, 1], "b": [null]},
///     "spots": [[0, 0, "start"], [1, 1, "normal"]]
/// });
/// let routes = normalize_record("1-2", &record).unwrap();
/// assert_eq!(serde_json::Value::Object(routes), json!({"a": ["Start", 1]}));
/// ```
pub fn normalize_record(key: &str, record: &JsonValue) -> Result<Map<String, JsonValue>> {
    let malformed = |reason: &str| PoiError::MalformedRecord {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    let record = record
        .as_object()
        .ok_or_else(|| malformed("record is not an object"))?;
    let route = record
        .get("route")
        .and_then(JsonValue::as_object)
        .ok_or_else(|| malformed("missing \"route\" object"))?;
    let spots: &[JsonValue] = match record.get("spots") {
        None | Some(JsonValue::Null) => &[],
        Some(JsonValue::Array(spots)) => spots,
        Some(_) => return Err(malformed("\"spots\" is not an array")),
    };

    let mut routes = Map::new();
    for (id, entry) in route {
        let Some(head) = route_head(entry) else {
            continue;
        };

        let mut entry = entry.clone();
        if is_start_spot(key, id, head, spots)? {
            entry[0] = JsonValue::String(START_MARKER.to_string());
        }
        routes.insert(id.clone(), entry);
    }

    Ok(routes)
}

/// First element of a route entry, if it is present and not null
fn route_head(entry: &JsonValue) -> Option<&JsonValue> {
    entry.as_array()?.first().filter(|head| !head.is_null())
}

/// Whether a route's spot reference points at the start spot
fn is_start_spot(key: &str, id: &str, head: &JsonValue, spots: &[JsonValue]) -> Result<bool> {
    let index = head
        .as_u64()
        .and_then(|index| usize::try_from(index).ok())
        .ok_or_else(|| PoiError::InvalidSpotReference {
            key: key.to_string(),
            route: id.to_string(),
            value: head.to_string(),
        })?;

    let spot = spots.get(index).ok_or_else(|| PoiError::SpotIndexOutOfRange {
        key: key.to_string(),
        route: id.to_string(),
        index,
        len: spots.len(),
    })?;

    Ok(spot.get(2).and_then(JsonValue::as_str) == Some(START_CATEGORY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(record: JsonValue) -> Result<JsonValue> {
        normalize_record("1-2", &record).map(JsonValue::Object)
    }

    #[test]
    fn test_start_reference_replaced() {
        let routes = normalize(json!({
            "route": {"a": [0, 1], "b": [null]},
            "spots": [[0, 0, "start"], [1, 1, "normal"]]
        }))
        .unwrap();

        assert_eq!(routes, json!({"a": ["Start", 1]}));
    }

    #[test]
    fn test_other_references_unchanged() {
        let routes = normalize(json!({
            "route": {"1": [0, 1], "2": [1, 2, "A"], "3": [2, 3, "B", {"extra": true}]},
            "spots": [[0, 0, "start"], [10, 20, "normal"], [30, 40, "boss"]]
        }))
        .unwrap();

        assert_eq!(
            routes,
            json!({
                "1": ["Start", 1],
                "2": [1, 2, "A"],
                "3": [2, 3, "B", {"extra": true}]
            })
        );
    }

    #[test]
    fn test_route_order_follows_source() {
        let routes = normalize_record(
            "1-2",
            &json!({
                "route": {"2": [1], "10": [0, 1], "1": [null], "b": [1], "a": [0]},
                "spots": [[0, 0, "start"], [1, 1, "normal"]]
            }),
        )
        .unwrap();

        let ids: Vec<&str> = routes.keys().map(String::as_str).collect();
        assert_eq!(ids, ["2", "10", "b", "a"]);
    }

    #[test]
    fn test_category_match_is_exact() {
        let routes = normalize(json!({
            "route": {"a": [0], "b": [1], "c": [2]},
            "spots": [[0, 0, "Start"], [0, 0, "start "], [0, 0, "start"]]
        }))
        .unwrap();

        assert_eq!(routes, json!({"a": [0], "b": [1], "c": ["Start"]}));
    }

    #[test]
    fn test_null_and_missing_heads_dropped() {
        let routes = normalize(json!({
            "route": {"a": [null, 1], "b": [], "c": {}, "d": null, "e": [0]},
            "spots": [[0, 0, "normal"]]
        }))
        .unwrap();

        assert_eq!(routes, json!({"e": [0]}));
    }

    #[test]
    fn test_short_or_odd_spots_are_not_start() {
        let routes = normalize(json!({
            "route": {"a": [0], "b": [1], "c": [2]},
            "spots": [[0, 0], "start", [0, 0, 7]]
        }))
        .unwrap();

        assert_eq!(routes, json!({"a": [0], "b": [1], "c": [2]}));
    }

    #[test]
    fn test_missing_spots_with_only_null_routes() {
        let routes = normalize(json!({"route": {"a": [null]}})).unwrap();
        assert_eq!(routes, json!({}));
    }

    #[test]
    fn test_out_of_range_index() {
        let err = normalize(json!({
            "route": {"a": [3, 1]},
            "spots": [[0, 0, "start"]]
        }))
        .unwrap_err();

        match err {
            PoiError::SpotIndexOutOfRange { key, route, index, len } => {
                assert_eq!(key, "1-2");
                assert_eq!(route, "a");
                assert_eq!(index, 3);
                assert_eq!(len, 1);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_invalid_spot_reference() {
        for head in [json!("Start"), json!(-1), json!(1.5), json!([0])] {
            let err = normalize(json!({
                "route": {"a": [head.clone()]},
                "spots": [[0, 0, "start"], [1, 1, "normal"]]
            }))
            .unwrap_err();
            assert!(
                matches!(err, PoiError::InvalidSpotReference { ref value, .. } if *value == head.to_string()),
                "unexpected error for {}: {}",
                head,
                err
            );
        }
    }

    #[test]
    fn test_malformed_records() {
        assert!(matches!(
            normalize(json!([1, 2])).unwrap_err(),
            PoiError::MalformedRecord { .. }
        ));
        assert!(matches!(
            normalize(json!({"spots": []})).unwrap_err(),
            PoiError::MalformedRecord { .. }
        ));
        assert!(matches!(
            normalize(json!({"route": {}, "spots": {}})).unwrap_err(),
            PoiError::MalformedRecord { .. }
        ));
    }
}
