use crate::error::{PoiError, Result};
use crate::output::read_json;
use crate::types::{CellFile, CellKey};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// What to do when two scanned files encode the same cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The file scanned last replaces the earlier one
    #[default]
    Overwrite,
    /// Abort the aggregation with [`PoiError::DuplicateCell`]
    Reject,
}

/// A cell whose record was replaced by a later file under [`DuplicatePolicy::Overwrite`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overwrite {
    pub key: CellKey,
    /// File whose record was discarded
    pub replaced: PathBuf,
    /// File whose record was kept
    pub kept: PathBuf,
}

/// Result of merging the per-cell source files
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Composite key (`"{area}-{cell}"`) to the verbatim source record
    pub document: Map<String, JsonValue>,
    /// Number of source files read
    pub files_read: usize,
    /// Duplicates resolved by overwriting, in scan order
    pub overwritten: Vec<Overwrite>,
}

/// Read each file and merge its record into one document
///
/// Files are merged in the given order. Records are not inspected, only
/// parsed as JSON.
///
/// # Returns
/// * `Ok(Aggregation)` - The merged document
/// * `Err(PoiError)` - If a file cannot be read or parsed, or a duplicate cell
///   is found under [`DuplicatePolicy::Reject`]
pub fn merge_cell_files(files: &[CellFile], policy: DuplicatePolicy) -> Result<Aggregation> {
    let mut aggregation = Aggregation::default();
    let mut sources: HashMap<CellKey, &PathBuf> = HashMap::new();

    for file in files {
        debug!("Reading {} as cell {}", file.path.display(), file.key);
        let record = read_json(&file.path)?;

        if let Some(previous) = sources.insert(file.key, &file.path) {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(PoiError::DuplicateCell {
                        key: file.key.to_string(),
                        first: previous.clone(),
                        second: file.path.clone(),
                    });
                }
                DuplicatePolicy::Overwrite => {
                    warn!(
                        "Cell {} in {} replaces {}",
                        file.key,
                        file.path.display(),
                        previous.display()
                    );
                    aggregation.overwritten.push(Overwrite {
                        key: file.key,
                        replaced: previous.clone(),
                        kept: file.path.clone(),
                    });
                }
            }
        }

        aggregation.document.insert(file.key.to_string(), record);
        aggregation.files_read += 1;
    }

    Ok(aggregation)
}
