//! Coordinate reference system codes.
//!
//! Codes use Arc<str> for cheap cloning and minimal memory overhead.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The canonical geographic reference system all engine traffic uses.
pub const GEOGRAPHIC_CRS: &str = "EPSG:4326";

/// A coordinate reference system code, e.g. `"EPSG:4326"`.
#[derive(Clone, Debug)]
pub struct CrsCode(Arc<str>);

impl CrsCode {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().into())
    }

    /// The canonical geographic reference system (`EPSG:4326`).
    pub fn geographic() -> Self {
        Self::new(GEOGRAPHIC_CRS)
    }

    pub fn is_geographic(&self) -> bool {
        &*self.0 == GEOGRAPHIC_CRS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for CrsCode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for CrsCode {}

impl Hash for CrsCode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CrsCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for CrsCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
