//! Widget session context.
//!
//! Mode settings outlive a single widget activation: the host creates the
//! context when the widget first opens, hands it to the orchestrator, and
//! gets it back from `Orchestrator::close` to reuse on the next opening.

use waymark_routing::modes::{ModeSettingsMap, TravelMode};

/// Session-scoped state shared by both computation tabs.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    pub mode: TravelMode,
    pub settings: ModeSettingsMap,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }
}
