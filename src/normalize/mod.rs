//! Regroup an aggregated document under world labels
pub mod routes;

pub use routes::normalize_record;

use crate::error::Result;
use crate::output::{read_json_object, write_json, JsonStyle};
use crate::types::CellKey;
use serde_json::{Map, Value as JsonValue};
use std::path::Path;
use tracing::{debug, info};

/// Normalize every cell of an aggregated document
///
/// Each composite key `"{area}-{cell}"` becomes the label
/// `"World {area}-{cell}"`, holding that cell's normalized routes.
///
/// # Returns
/// * `Ok(Map)` - World label to route mapping
/// * `Err(PoiError)` - If a key is not a composite cell key or a record
///   cannot be normalized
///
/// # Examples
/// ```
/// use poi2kc3::normalize::normalize;
/// use serde_json::json;
///
/// let aggregated = json!({"3-5": {"route": {}, "spots": []}});
/// let worlds = normalize(aggregated.as_object().unwrap()).unwrap();
/// assert_eq!(serde_json::Value::Object(worlds), json!({"World 3-5": {}}));
/// ```
pub fn normalize(aggregated: &Map<String, JsonValue>) -> Result<Map<String, JsonValue>> {
    let mut worlds = Map::new();

    for (key, record) in aggregated {
        let cell: CellKey = key.parse()?;
        let routes = normalize_record(key, record)?;
        debug!("Cell {}: kept {} route(s)", cell, routes.len());
        worlds.insert(cell.world_label(), JsonValue::Object(routes));
    }

    Ok(worlds)
}

/// Read an aggregated document from `input` and write the normalized
/// document to `output`, indented with tabs
pub fn normalize_file(input: &Path, output: &Path) -> Result<Map<String, JsonValue>> {
    let aggregated = read_json_object(input)?;
    let worlds = normalize(&aggregated)?;
    write_json(output, &worlds, JsonStyle::Tabs)?;
    info!("Wrote {} world(s) to {}", worlds.len(), output.display());
    Ok(worlds)
}
