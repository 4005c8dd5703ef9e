//! Host interface seams.
//!
//! The hosting map client implements these to receive the orchestrator's
//! side effects (geometry display, viewport fits, exports) and to supply
//! it with reprojection and the device location.

use std::sync::Arc;

use geo::{Point, Rect};
use geojson::Feature;
use waymark_routing::crs::CrsCode;

/// A geocode/search widget's selection for a waypoint slot.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchSelection {
    pub text: String,
    pub position: Point,
    pub crs: Option<CrsCode>,
}

/// RGBA color, alpha in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub f32);

/// Which bucket of the host's layer tree a layer belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerRole {
    Background,
    UserLayer,
    Selection,
}

/// Stroke/fill styling for a geometry layer.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleOptions {
    pub stroke_color: Rgba,
    pub fill_color: Option<Rgba>,
    pub stroke_width: f64,
    pub stroke_dash: Vec<f64>,
}

/// Everything the host needs to create or replace a geometry layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerDescriptor {
    pub id: &'static str,
    pub role: LayerRole,
    pub crs: CrsCode,
    pub style: StyleOptions,
}

/// The map's geometry layer sink. Single shared resource; the
/// orchestrator is its only writer.
pub trait MapLayerSink: Send + Sync {
    fn remove_layer(&self, layer_id: &str);

    fn add_features(&self, layer: &LayerDescriptor, features: Vec<Feature>, replace: bool);
}

/// Map viewport control.
pub trait ViewportControl: Send + Sync {
    fn fit_to_extent(&self, bounds: Rect, crs: &CrsCode, zoom_bias: i32);
}

/// Coordinate reprojection, supplied by the host's projection machinery.
pub trait CrsTransform: Send + Sync {
    fn reproject(&self, position: Point, from: &CrsCode, to: &CrsCode) -> Point;
}

/// Pass-through transform for hosts that already work in the geographic
/// reference system.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityTransform;

impl CrsTransform for IdentityTransform {
    fn reproject(&self, position: Point, _from: &CrsCode, _to: &CrsCode) -> Point {
        position
    }
}

/// Persists an export payload for the user, outside this system.
pub trait ExportSink: Send + Sync {
    fn save(&self, filename: &str, payload: String);
}

/// The device's located position, if any, in the geographic CRS.
pub trait LocationProvider: Send + Sync {
    fn current_position(&self) -> Option<Point>;
}

/// Bundle of host-side collaborators handed to the orchestrator at
/// construction.
#[derive(Clone)]
pub struct HostInterfaces {
    pub map: Arc<dyn MapLayerSink>,
    pub viewport: Arc<dyn ViewportControl>,
    pub transform: Arc<dyn CrsTransform>,
    pub export: Arc<dyn ExportSink>,
    pub locate: Arc<dyn LocationProvider>,
}
