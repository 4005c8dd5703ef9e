//! Request configurations for the two computation kinds.
//!
//! A config owns everything one computation needs plus its lifecycle
//! state: the optional last result, the busy flag while a request is in
//! flight, and the recompute-on-edit gate. Hosts read configs through
//! shared references; all mutation goes through the orchestrator.

use waymark_routing::intervals::{intervals_valid, parse_intervals};
use waymark_routing::waypoint::{Waypoint, WaypointList};

use crate::engine::{EngineFailure, IsochroneOutcome, RouteOutcome};

/// Outcome of a completed request: the success payload or the engine's
/// failure notice. Exists only as the result of a finished request.
pub type ComputationResult<T> = Result<T, EngineFailure>;

/// Reachability contour measure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ReachabilityMode {
    #[default]
    Time,
    Distance,
}

/// State of the route computation tab.
#[derive(Debug)]
pub struct RouteConfig {
    waypoints: WaypointList,
    result: Option<ComputationResult<RouteOutcome>>,
    busy: bool,
    computed_once: bool,
}

impl RouteConfig {
    pub fn new() -> Self {
        Self {
            waypoints: WaypointList::new(),
            result: None,
            busy: false,
            computed_once: false,
        }
    }

    pub fn waypoints(&self) -> &WaypointList {
        &self.waypoints
    }

    pub(crate) fn waypoints_mut(&mut self) -> &mut WaypointList {
        &mut self.waypoints
    }

    pub fn result(&self) -> Option<&ComputationResult<RouteOutcome>> {
        self.result.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether a computation has ever been issued for this config. This,
    /// not result presence, gates recompute-on-edit: a result may have
    /// been cleared by an edit while the gate stays open.
    pub fn has_computed(&self) -> bool {
        self.computed_once
    }

    /// A route needs at least two resolved waypoints.
    pub fn can_compute(&self) -> bool {
        self.waypoints.resolved_count() >= 2
    }

    /// An edit invalidated whatever result was on display.
    pub(crate) fn invalidate(&mut self) {
        self.result = None;
    }

    /// A request is being issued: the stale result goes away before the
    /// busy flag is raised so it can never be displayed during
    /// recomputation.
    pub(crate) fn begin_request(&mut self) {
        self.result = None;
        self.busy = true;
        self.computed_once = true;
    }

    pub(crate) fn finish_request(&mut self, result: ComputationResult<RouteOutcome>) {
        self.result = Some(result);
        self.busy = false;
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// State of the reachability (isochrone) tab.
#[derive(Debug)]
pub struct IsochroneConfig {
    point: Waypoint,
    mode: ReachabilityMode,
    intervals: String,
    result: Option<ComputationResult<IsochroneOutcome>>,
    busy: bool,
    computed_once: bool,
}

impl IsochroneConfig {
    pub fn new() -> Self {
        Self {
            point: Waypoint::placeholder(),
            mode: ReachabilityMode::default(),
            intervals: String::new(),
            result: None,
            busy: false,
            computed_once: false,
        }
    }

    pub fn point(&self) -> &Waypoint {
        &self.point
    }

    pub(crate) fn set_point(&mut self, point: Waypoint) {
        self.point = point;
    }

    pub fn mode(&self) -> ReachabilityMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: ReachabilityMode) {
        self.mode = mode;
    }

    /// The raw interval text as typed. Stored verbatim, validated at
    /// compute time, never auto-corrected.
    pub fn intervals(&self) -> &str {
        &self.intervals
    }

    pub(crate) fn set_intervals(&mut self, text: String) {
        self.intervals = text;
    }

    pub fn intervals_valid(&self) -> bool {
        intervals_valid(&self.intervals)
    }

    pub(crate) fn parsed_intervals(&self) -> Option<Vec<u32>> {
        parse_intervals(&self.intervals)
    }

    pub fn result(&self) -> Option<&ComputationResult<IsochroneOutcome>> {
        self.result.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn has_computed(&self) -> bool {
        self.computed_once
    }

    /// An isochrone needs a resolved point and well-formed intervals.
    pub fn can_compute(&self) -> bool {
        self.point.is_resolved() && self.intervals_valid()
    }

    pub(crate) fn invalidate(&mut self) {
        self.result = None;
    }

    pub(crate) fn begin_request(&mut self) {
        self.result = None;
        self.busy = true;
        self.computed_once = true;
    }

    pub(crate) fn finish_request(&mut self, result: ComputationResult<IsochroneOutcome>) {
        self.result = Some(result);
        self.busy = false;
    }
}

impl Default for IsochroneConfig {
    fn default() -> Self {
        Self::new()
    }
}
