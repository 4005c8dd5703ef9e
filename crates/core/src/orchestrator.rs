//! The computation orchestrator.
//!
//! Owns the request configs, the session context and the debounce slot;
//! issues engine calls and applies their completions. Mutations are
//! synchronous calls applied in call order; timer fires and engine
//! completions arrive as events on one queue and are applied one at a
//! time, so every state transition is a discrete, non-preemptible step.
//!
//! Responses are fenced by a per-config sequence number: only the
//! completion of the most recently issued request is applied, everything
//! older is discarded, so response arrival order cannot resurrect stale
//! output.

use std::sync::Arc;

use geo::Point;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use waymark_routing::crs::CrsCode;
use waymark_routing::modes::{ModeSettingsMap, SettingsPatch, TravelMode};
use waymark_routing::waypoint::Waypoint;

use crate::config::{ComputationResult, IsochroneConfig, ReachabilityMode, RouteConfig};
use crate::debounce::DebounceScheduler;
use crate::engine::{IsochroneOptions, IsochroneOutcome, RouteOutcome, RoutingEngine};
use crate::features::{self, ROUTE_EXPORT_FILENAME, ROUTE_LAYER_ID};
use crate::host::{HostInterfaces, SearchSelection};
use crate::session::SessionContext;

// Zoom one level out of the exact fit when framing results.
const FIT_ZOOM_BIAS: i32 = -1;

/// Which computation view is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Route,
    Reachability,
}

/// Deferred work arriving on the orchestrator's event queue.
#[derive(Debug)]
pub enum OrchestratorEvent {
    /// The debounce quiet period elapsed since the last edit.
    RecomputeTick,
    /// A route engine call completed.
    RouteResponse {
        seq: u64,
        outcome: ComputationResult<RouteOutcome>,
    },
    /// An isochrone engine call completed.
    IsochroneResponse {
        seq: u64,
        outcome: ComputationResult<IsochroneOutcome>,
    },
}

/// Drives the routing widget's computations against the external engine.
pub struct Orchestrator {
    engine: Arc<dyn RoutingEngine>,
    host: HostInterfaces,
    session: SessionContext,
    route: RouteConfig,
    isochrone: IsochroneConfig,
    scheduler: DebounceScheduler,
    tab: Tab,
    route_seq: u64,
    iso_seq: u64,
    events_tx: UnboundedSender<OrchestratorEvent>,
    events: UnboundedReceiver<OrchestratorEvent>,
}

impl Orchestrator {
    pub fn new(
        engine: Arc<dyn RoutingEngine>,
        host: HostInterfaces,
        session: SessionContext,
    ) -> Self {
        let (events_tx, events) = mpsc::unbounded_channel();
        Self {
            engine,
            host,
            session,
            route: RouteConfig::new(),
            isochrone: IsochroneConfig::new(),
            scheduler: DebounceScheduler::new(),
            tab: Tab::default(),
            route_seq: 0,
            iso_seq: 0,
            events_tx,
            events,
        }
    }

    // ---- Reads ----

    pub fn route(&self) -> &RouteConfig {
        &self.route
    }

    pub fn isochrone(&self) -> &IsochroneConfig {
        &self.isochrone
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn mode(&self) -> TravelMode {
        self.session.mode
    }

    pub fn settings(&self) -> &ModeSettingsMap {
        &self.session.settings
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Whether a debounced recomputation is waiting for its quiet period.
    pub fn recompute_pending(&self) -> bool {
        self.scheduler.is_armed()
    }

    // ---- Event queue ----

    /// Wait for the next deferred event (timer fire or engine completion)
    /// and apply it.
    pub async fn process_next(&mut self) {
        let event = self.events.recv().await;
        if let Some(event) = event {
            self.apply(event);
        }
    }

    /// Apply one queued event if any is ready. Never waits.
    pub fn try_process(&mut self) -> bool {
        match self.events.try_recv() {
            Ok(event) => {
                self.apply(event);
                true
            }
            Err(_) => false,
        }
    }

    fn apply(&mut self, event: OrchestratorEvent) {
        match event {
            OrchestratorEvent::RecomputeTick => self.recompute_if_needed(),
            OrchestratorEvent::RouteResponse { seq, outcome } => {
                self.apply_route_response(seq, outcome);
            }
            OrchestratorEvent::IsochroneResponse { seq, outcome } => {
                self.apply_isochrone_response(seq, outcome);
            }
        }
    }

    // ---- Waypoint edits ----

    /// Insert a new empty waypoint before the destination slot. Returns
    /// the new slot's index.
    pub fn add_route_waypoint(&mut self) -> usize {
        let index = self.route.waypoints_mut().insert_before_last();
        self.touched_route();
        index
    }

    /// Remove an interior waypoint. Endpoint and out-of-range indices are
    /// silent no-ops.
    pub fn remove_route_waypoint(&mut self, index: usize) {
        if self.route.waypoints_mut().remove(index).is_ok() {
            self.touched_route();
        }
    }

    /// Reverse the route direction.
    pub fn reverse_route_waypoints(&mut self) {
        self.route.waypoints_mut().reverse();
        self.touched_route();
    }

    /// A search widget resolved (or cleared) a waypoint slot.
    pub fn route_search_selected(&mut self, index: usize, selection: Option<SearchSelection>) {
        let updated = match selection {
            Some(sel) => self
                .route
                .waypoints_mut()
                .resolve(index, sel.text, sel.position, sel.crs)
                .is_ok(),
            None => self.route.waypoints_mut().clear(index).is_ok(),
        };
        if updated {
            self.touched_route();
        }
    }

    /// Fill the origin slot from the device location, if available.
    pub fn use_current_location_for_route(&mut self) -> bool {
        let Some((text, position)) = self.located_waypoint() else {
            return false;
        };
        let _ = self
            .route
            .waypoints_mut()
            .resolve(0, text, position, Some(CrsCode::geographic()));
        self.touched_route();
        true
    }

    // ---- Isochrone edits ----

    /// A search widget resolved (or cleared) the isochrone point.
    pub fn iso_search_selected(&mut self, selection: Option<SearchSelection>) {
        let point = match selection {
            Some(sel) => Waypoint::resolved(sel.text, sel.position, sel.crs),
            None => Waypoint::placeholder(),
        };
        self.isochrone.set_point(point);
        self.touched_isochrone();
    }

    /// Fill the isochrone point from the device location, if available.
    pub fn use_current_location_for_point(&mut self) -> bool {
        let Some((text, position)) = self.located_waypoint() else {
            return false;
        };
        self.isochrone
            .set_point(Waypoint::resolved(text, position, Some(CrsCode::geographic())));
        self.touched_isochrone();
        true
    }

    pub fn set_reachability_mode(&mut self, mode: ReachabilityMode) {
        if self.isochrone.mode() == mode {
            return;
        }
        self.isochrone.set_mode(mode);
        self.touched_isochrone();
    }

    /// Store the interval text as typed; validity is checked at compute
    /// time, never corrected here.
    pub fn set_intervals(&mut self, text: impl Into<String>) {
        self.isochrone.set_intervals(text.into());
        self.touched_isochrone();
    }

    // ---- Mode & settings ----

    /// Switch the active travel mode. Settings of all modes are kept.
    pub fn set_mode(&mut self, mode: TravelMode) {
        if self.session.mode == mode {
            return;
        }
        self.session.mode = mode;
        self.route.invalidate();
        self.isochrone.invalidate();
        if self.active_has_computed() {
            self.arm_recompute();
        }
    }

    /// Merge a settings patch into one mode's record. Edits to a mode
    /// other than the active one change no displayed result and trigger
    /// no recomputation.
    pub fn update_mode_setting(&mut self, mode: TravelMode, patch: SettingsPatch) {
        self.session.settings.update(mode, patch);
        if mode != self.session.mode {
            return;
        }
        self.route.invalidate();
        self.isochrone.invalidate();
        if self.active_has_computed() {
            self.arm_recompute();
        }
    }

    // ---- Tabs ----

    /// Switch between the route and reachability views. Drawn geometry is
    /// removed and the route result cleared; the isochrone result
    /// persists across switches.
    pub fn switch_tab(&mut self, tab: Tab) {
        if self.tab == tab {
            return;
        }
        self.host.map.remove_layer(ROUTE_LAYER_ID);
        self.route.invalidate();
        self.tab = tab;
    }

    // ---- Computation ----

    pub fn can_compute_route(&self) -> bool {
        self.route.can_compute()
    }

    /// Issue a route computation. Refused (returning false) while fewer
    /// than two waypoints are resolved; hosts present that as a disabled
    /// action.
    pub fn compute_route(&mut self) -> bool {
        if !self.route.can_compute() {
            return false;
        }
        self.issue_route_request();
        true
    }

    pub fn can_compute_isochrone(&self) -> bool {
        self.isochrone.can_compute()
    }

    /// Issue an isochrone computation. Refused without a resolved point
    /// and well-formed interval text.
    pub fn compute_isochrone(&mut self) -> bool {
        if !self.isochrone.can_compute() {
            return false;
        }
        self.issue_isochrone_request();
        true
    }

    // ---- Export ----

    /// Hand the current route legs to the export sink as a GeoJSON
    /// feature collection. Only available on a success result.
    pub fn export_route(&self) -> bool {
        let Some(Ok(route)) = self.route.result() else {
            return false;
        };
        self.host
            .export
            .save(ROUTE_EXPORT_FILENAME, features::route_export_payload(&route.legs));
        true
    }

    // ---- Lifecycle ----

    /// Close the widget: cancel any pending recomputation, remove drawn
    /// geometry, and hand the session context back for the next opening.
    pub fn close(mut self) -> SessionContext {
        self.scheduler.cancel();
        self.host.map.remove_layer(ROUTE_LAYER_ID);
        self.session
    }

    // ---- Internals ----

    fn located_waypoint(&self) -> Option<(String, Point)> {
        let position = self.host.locate.current_position()?;
        let text = format!("{:.4}, {:.4}", position.x(), position.y());
        Some((text, position))
    }

    fn touched_route(&mut self) {
        self.route.invalidate();
        if self.route.has_computed() {
            self.arm_recompute();
        }
    }

    fn touched_isochrone(&mut self) {
        self.isochrone.invalidate();
        if self.isochrone.has_computed() {
            self.arm_recompute();
        }
    }

    fn active_has_computed(&self) -> bool {
        match self.tab {
            Tab::Route => self.route.has_computed(),
            Tab::Reachability => self.isochrone.has_computed(),
        }
    }

    fn arm_recompute(&mut self) {
        let events = self.events_tx.clone();
        self.scheduler.arm(move || {
            let _ = events.send(OrchestratorEvent::RecomputeTick);
        });
    }

    /// The quiet period elapsed: recompute whatever the active view has
    /// computed before, if its preconditions still hold.
    fn recompute_if_needed(&mut self) {
        match self.tab {
            Tab::Route if self.route.has_computed() && self.route.can_compute() => {
                self.issue_route_request();
            }
            Tab::Reachability if self.isochrone.has_computed() && self.isochrone.can_compute() => {
                self.issue_isochrone_request();
            }
            _ => {}
        }
    }

    fn to_geographic(&self, position: Point, crs: Option<&CrsCode>) -> Point {
        match crs {
            Some(code) if !code.is_geographic() => {
                self.host
                    .transform
                    .reproject(position, code, &CrsCode::geographic())
            }
            _ => position,
        }
    }

    fn issue_route_request(&mut self) {
        let points: Vec<Point> = self
            .route
            .waypoints()
            .resolved()
            .into_iter()
            .map(|(position, crs)| self.to_geographic(position, crs.as_ref()))
            .collect();

        self.host.map.remove_layer(ROUTE_LAYER_ID);
        self.route.begin_request();
        self.route_seq += 1;
        let seq = self.route_seq;

        let settings = self.session.settings.get(self.session.mode);
        let call = self.engine.compute_route(self.session.mode, points, settings);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = call.await;
            let _ = events.send(OrchestratorEvent::RouteResponse { seq, outcome });
        });
        tracing::debug!(seq, mode = %self.session.mode, "route computation issued");
    }

    fn issue_isochrone_request(&mut self) {
        let Some(intervals) = self.isochrone.parsed_intervals() else {
            return;
        };
        let Some(position) = self.isochrone.point().position else {
            return;
        };
        let point = self.to_geographic(position, self.isochrone.point().crs.as_ref());

        self.host.map.remove_layer(ROUTE_LAYER_ID);
        self.isochrone.begin_request();
        self.iso_seq += 1;
        let seq = self.iso_seq;

        let options = IsochroneOptions {
            mode: self.isochrone.mode(),
            intervals,
        };
        let settings = self.session.settings.get(self.session.mode);
        let call = self
            .engine
            .compute_isochrone(self.session.mode, point, options, settings);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = call.await;
            let _ = events.send(OrchestratorEvent::IsochroneResponse { seq, outcome });
        });
        tracing::debug!(seq, mode = %self.session.mode, "isochrone computation issued");
    }

    fn apply_route_response(&mut self, seq: u64, outcome: ComputationResult<RouteOutcome>) {
        if seq != self.route_seq {
            tracing::debug!(seq, latest = self.route_seq, "superseded route response discarded");
            return;
        }
        match &outcome {
            Ok(route) => {
                self.host.map.add_features(
                    &features::route_layer(),
                    features::leg_features(&route.legs),
                    true,
                );
                self.host.viewport.fit_to_extent(
                    route.summary.bounds,
                    &CrsCode::geographic(),
                    FIT_ZOOM_BIAS,
                );
            }
            Err(failure) => {
                tracing::warn!(%failure, "route computation failed");
            }
        }
        self.route.finish_request(outcome);
    }

    fn apply_isochrone_response(&mut self, seq: u64, outcome: ComputationResult<IsochroneOutcome>) {
        if seq != self.iso_seq {
            tracing::debug!(seq, latest = self.iso_seq, "superseded isochrone response discarded");
            return;
        }
        match &outcome {
            Ok(iso) => {
                self.host.map.add_features(
                    &features::isochrone_layer(),
                    features::area_features(&iso.areas),
                    true,
                );
                self.host
                    .viewport
                    .fit_to_extent(iso.bounds, &CrsCode::geographic(), FIT_ZOOM_BIAS);
            }
            Err(failure) => {
                tracing::warn!(%failure, "isochrone computation failed");
            }
        }
        self.isochrone.finish_request(outcome);
    }
}
