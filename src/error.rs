use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoiError {
    #[error("Invalid cell number {value:?} in file name: {}", .file.display())]
    InvalidCellNumber { value: String, file: PathBuf },

    #[error("Invalid cell key: expected '<area>-<cell>', found {0:?}")]
    InvalidCellKey(String),

    #[error("Duplicate cell {key}: {} and {}", .first.display(), .second.display())]
    DuplicateCell {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Malformed record for cell {key}: {reason}")]
    MalformedRecord { key: String, reason: String },

    #[error("Route {route:?} of cell {key} references a spot with an invalid index: {value}")]
    InvalidSpotReference {
        key: String,
        route: String,
        value: String,
    },

    #[error("Route {route:?} of cell {key} references spot {index}, but only {len} spots exist")]
    SpotIndexOutOfRange {
        key: String,
        route: String,
        index: usize,
        len: usize,
    },

    #[error("Expected a JSON object at the top level of {}", .0.display())]
    NotAnObject(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Directory traversal failed: {0}")]
    WalkError(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, PoiError>;
