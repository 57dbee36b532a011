//! Merge per-cell POI files into one document
//!
//! - `scan`: find `<area>_<cell>.json` files under a directory tree
//! - `merge`: parse them and key each record by its composite cell key
pub mod merge;
pub mod scan;

pub use merge::{merge_cell_files, Aggregation, DuplicatePolicy, Overwrite};
pub use scan::{parse_cell_file_name, scan_cell_files};

use crate::error::Result;
use crate::output::{write_json, JsonStyle};
use std::path::Path;
use tracing::info;

/// Scan `root` recursively and merge every per-cell file found
///
/// # Examples
/// ```no_run
/// use poi2kc3::aggregate::{aggregate, DuplicatePolicy};
/// use std::path::Path;
///
/// let aggregation = aggregate(Path::new("./poi"), DuplicatePolicy::Overwrite).unwrap();
/// println!("{} cells", aggregation.document.len());
/// ```
pub fn aggregate(root: &Path, policy: DuplicatePolicy) -> Result<Aggregation> {
    let files = scan_cell_files(root)?;
    info!("Found {} cell file(s) under {}", files.len(), root.display());
    merge_cell_files(&files, policy)
}

/// Aggregate `root` and write the merged document to `output` as compact JSON
///
/// Nothing is written unless the whole aggregation succeeds.
pub fn aggregate_to_file(root: &Path, output: &Path, policy: DuplicatePolicy) -> Result<Aggregation> {
    let aggregation = aggregate(root, policy)?;
    write_json(output, &aggregation.document, JsonStyle::Compact)?;
    info!(
        "Wrote {} cell(s) to {}",
        aggregation.document.len(),
        output.display()
    );
    Ok(aggregation)
}
