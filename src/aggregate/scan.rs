use crate::error::{PoiError, Result};
use crate::types::{CellFile, CellKey};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::trace;
use walkdir::WalkDir;

/// Base name of a per-cell source file: `<area>_<cell>.json`
static CELL_FILE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)_([0-9]+)\.json$").expect("Invalid cell file name pattern"));

/// Extract the cell encoded in a file's base name
///
/// # Arguments
/// * `path` - Path of the candidate file (only the base name is inspected)
///
/// # Returns
/// * `None` - The base name does not look like `<area>_<cell>.json` with
///   ASCII digits
/// * `Some(Ok(CellKey))` - The cell encoded in the name
/// * `Some(Err(PoiError::InvalidCellNumber))` - The name matched but a digit
///   group does not fit a `u64`
///
/// # Examples
/// ```
/// use poi2kc3::aggregate::parse_cell_file_name;
/// use poi2kc3::CellKey;
/// use std::path::Path;
///
/// let key = parse_cell_file_name(Path::new("poi/1_2.json")).unwrap().unwrap();
/// assert_eq!(key, CellKey::new(1, 2));
/// assert!(parse_cell_file_name(Path::new("poi/final.json")).is_none());
/// ```
pub fn parse_cell_file_name(path: &Path) -> Option<Result<CellKey>> {
    let name = path.file_name()?.to_str()?;
    let captures = CELL_FILE_NAME.captures(name)?;

    Some(cell_key_from_digits(&captures[1], &captures[2], path))
}

fn cell_key_from_digits(area: &str, cell: &str, path: &Path) -> Result<CellKey> {
    Ok(CellKey::new(
        parse_cell_number(area, path)?,
        parse_cell_number(cell, path)?,
    ))
}

fn parse_cell_number(digits: &str, path: &Path) -> Result<u64> {
    digits.parse().map_err(|_| PoiError::InvalidCellNumber {
        value: digits.to_string(),
        file: path.to_path_buf(),
    })
}

/// Recursively find all per-cell source files under a directory
///
/// Entries are visited in file name order so that the scan, and with it the
/// resolution of duplicate cells, is deterministic.
///
/// # Returns
/// * `Ok(Vec<CellFile>)` - Matching files in scan order
/// * `Err(PoiError)` - If the directory cannot be traversed or a matching
///   file name carries an invalid number
pub fn scan_cell_files(root: &Path) -> Result<Vec<CellFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        match parse_cell_file_name(entry.path()) {
            Some(key) => files.push(CellFile {
                key: key?,
                path: entry.into_path(),
            }),
            None => trace!("Skipping {}", entry.path().display()),
        }
    }

    Ok(files)
}
