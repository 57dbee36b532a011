//! # poi2kc3
//!
//! A library for merging per-cell POI route files and converting the result
//! to the kc3kai world layout.
//!
//! ## Example
//!
//! ```no_run
//! use poi2kc3::aggregate::{aggregate_to_file, DuplicatePolicy};
//! use poi2kc3::normalize::normalize_file;
//! use std::path::Path;
//!
//! // ./poi/<area>_<cell>.json -> ./poi/final.json
//! let aggregation = aggregate_to_file(
//!     Path::new("./poi"),
//!     Path::new("./poi/final.json"),
//!     DuplicatePolicy::Overwrite,
//! ).unwrap();
//! println!("Merged {} file(s)", aggregation.files_read);
//!
//! // ./poi/final.json -> ./kc3kai.json
//! let worlds = normalize_file(Path::new("./poi/final.json"), Path::new("./kc3kai.json")).unwrap();
//! println!("Wrote {} world(s)", worlds.len());
//! ```

pub mod aggregate;
pub mod error;
pub mod normalize;
pub mod output;
pub mod types;

// Re-export commonly used items
pub use error::{PoiError, Result};
pub use output::JsonStyle;
pub use types::{CellFile, CellKey};

/// Default directory holding the per-cell source files
pub const DEFAULT_POI_DIR: &str = "./poi";

/// Default path of the aggregated document
pub const DEFAULT_AGGREGATED_PATH: &str = "./poi/final.json";

/// Default path of the normalized document
pub const DEFAULT_NORMALIZED_PATH: &str = "./kc3kai.json";
