use crate::error::PoiError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Identifies one map cell: the `area` (world) and the `cell` within it
///
/// Renders as the composite key `"{area}-{cell}"` used by the aggregated
/// document, and as `"World {area}-{cell}"` for the normalized document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub area: u64,
    pub cell: u64,
}

impl CellKey {
    /// Create a new CellKey
    pub fn new(area: u64, cell: u64) -> Self {
        Self { area, cell }
    }

    /// Human-readable label used as the top-level key of the normalized document
    ///
    /// # Examples
    /// ```
    /// use poi2kc3::CellKey;
    ///
    /// assert_eq!(CellKey::new(3, 5).world_label(), "World 3-5");
    /// ```
    pub fn world_label(&self) -> String {
        format!("World {}", self)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.area, self.cell)
    }
}

impl FromStr for CellKey {
    type Err = PoiError;

    /// Parse a composite key of the form `"<area>-<cell>"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PoiError::InvalidCellKey(s.to_string());

        let (area, cell) = s.split_once('-').ok_or_else(invalid)?;
        let area = area.parse().map_err(|_| invalid())?;
        let cell = cell.parse().map_err(|_| invalid())?;

        Ok(Self { area, cell })
    }
}

/// A per-cell source file found while scanning the input directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFile {
    /// Cell encoded in the file name
    pub key: CellKey,
    /// Full path to the file
    pub path: PathBuf,
}
