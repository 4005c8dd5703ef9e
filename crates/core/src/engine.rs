//! The routing engine seam.
//!
//! The computation engine is a black-box network service; hosts implement
//! this trait to wire one in. Calls complete asynchronously and are
//! fire-and-forget from the orchestrator's perspective.

use std::future::Future;
use std::pin::Pin;

use geo::{Coord, Point, Rect};
use waymark_routing::modes::{ModeSettings, TravelMode};

use crate::config::ReachabilityMode;

/// Boxed completion of an engine call.
pub type EngineFuture<T> = Pin<Box<dyn Future<Output = Result<T, EngineFailure>> + Send + 'static>>;

/// Why an engine call produced no result.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineFailure {
    /// Raw error text from the service.
    #[error("{0}")]
    Message(String),

    /// A localization key the presenter resolves for display.
    #[error("{0}")]
    MessageId(String),
}

/// One leg of a computed route, in response coordinate order.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteLeg {
    pub coordinates: Vec<Coord>,
}

/// Route totals returned by the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteSummary {
    /// Travel time in seconds.
    pub time: f64,
    /// Route length in kilometers.
    pub length_km: f64,
    /// Bounding extent of the route, geographic CRS.
    pub bounds: Rect,
}

/// Successful route computation payload.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteOutcome {
    pub legs: Vec<RouteLeg>,
    pub summary: RouteSummary,
}

/// Reachability contour options for an isochrone call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IsochroneOptions {
    pub mode: ReachabilityMode,
    /// Ascending interval values (minutes or kilometers per `mode`).
    pub intervals: Vec<u32>,
}

/// Successful isochrone computation payload.
#[derive(Clone, Debug, PartialEq)]
pub struct IsochroneOutcome {
    /// One polygon ring per reachability area.
    pub areas: Vec<Vec<Coord>>,
    /// Bounding extent of all areas, geographic CRS.
    pub bounds: Rect,
}

/// External routing/isochrone computation service.
///
/// All positions handed to the engine are in the geographic CRS.
pub trait RoutingEngine: Send + Sync {
    fn compute_route(
        &self,
        mode: TravelMode,
        points: Vec<Point>,
        settings: ModeSettings,
    ) -> EngineFuture<RouteOutcome>;

    fn compute_isochrone(
        &self,
        mode: TravelMode,
        point: Point,
        options: IsochroneOptions,
        settings: ModeSettings,
    ) -> EngineFuture<IsochroneOutcome>;
}
