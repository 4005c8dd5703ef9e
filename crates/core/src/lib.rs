//! # waymark-core
//!
//! Orchestration shell for a map client's routing widget: owns the
//! route/isochrone request configs, debounces recompute-on-edit, drives
//! the external computation engine, and applies only the freshest
//! request's outcome. Rendering, reprojection, geocoding and the engine
//! itself plug in through the traits in [`engine`] and [`host`].

pub mod config;
pub mod debounce;
pub mod engine;
pub mod features;
pub mod format;
pub mod host;
pub mod orchestrator;
pub mod session;

pub use config::{ComputationResult, IsochroneConfig, ReachabilityMode, RouteConfig};
pub use debounce::{DebounceScheduler, QUIET_PERIOD};
pub use engine::{
    EngineFailure, EngineFuture, IsochroneOptions, IsochroneOutcome, RouteLeg, RouteOutcome,
    RouteSummary, RoutingEngine,
};
pub use host::{
    CrsTransform, ExportSink, HostInterfaces, IdentityTransform, LayerDescriptor, LayerRole,
    LocationProvider, MapLayerSink, SearchSelection, StyleOptions, ViewportControl,
};
pub use orchestrator::{Orchestrator, OrchestratorEvent, Tab};
pub use session::SessionContext;
