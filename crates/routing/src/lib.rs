//! # waymark-routing
//!
//! Routing domain model: waypoints, travel modes, isochrone intervals.
//!
//! ## Features
//!
//! - **Invariant-checked waypoint list**: endpoints are anchored, length never drops below two
//! - **Per-mode settings**: independent, persistent settings records per travel profile
//! - **Interval text handling**: grammar validation and numeric-ascending parsing
//!
//! ## Example
//!
//! ```
//! use waymark_routing::prelude::*;
//! use geo::Point;
//!
//! let mut waypoints = WaypointList::new();
//! waypoints
//!     .resolve(0, "Bern", Point::new(7.4474, 46.9480), Some(CrsCode::geographic()))
//!     .unwrap();
//! waypoints
//!     .resolve(1, "Zürich", Point::new(8.5417, 47.3769), Some(CrsCode::geographic()))
//!     .unwrap();
//!
//! assert_eq!(waypoints.resolved_count(), 2);
//!
//! // Endpoints cannot be removed.
//! assert!(waypoints.remove(0).is_err());
//!
//! // Reversal swaps origin and destination.
//! waypoints.reverse();
//! assert_eq!(waypoints.get(0).unwrap().text, "Zürich");
//! ```

pub mod crs;
pub mod intervals;
pub mod modes;
pub mod waypoint;

// Re-exports for convenience
pub mod prelude {
    pub use crate::crs::{CrsCode, GEOGRAPHIC_CRS};
    pub use crate::intervals::{intervals_valid, parse_intervals};
    pub use crate::modes::{ModeSettings, ModeSettingsMap, SettingsPatch, TravelMode};
    pub use crate::waypoint::{Waypoint, WaypointError, WaypointList};
}

pub use prelude::*;
