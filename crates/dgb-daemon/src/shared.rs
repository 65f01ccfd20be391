// crates/dgb-daemon/src/shared.rs
//
// DaemonSharedState: the state shared between the daemon and its RPC server.
//
// Constructed once in main.rs after the schedule has been validated, then
// injected into the RPC server.

use std::sync::Arc;
use std::time::Instant;

use dgb_core::Network;
use dgb_economics::{EmissionSchedule, RewardResolver};
use dgb_store::InMemoryChain;

/// Shared state for the daemon. The resolver is immutable and needs no lock;
/// the chain guards itself.
#[derive(Clone)]
pub struct DaemonSharedState {
    /// Reward resolver over the validated schedule.
    pub resolver: Arc<RewardResolver>,
    /// Best chain, starting at genesis.
    pub chain: Arc<InMemoryChain>,
    /// Daemon start time for uptime calculation.
    pub start_time: Instant,
}

impl DaemonSharedState {
    /// Create the shared state for `network` from an already validated schedule.
    pub fn new(network: Network, schedule: EmissionSchedule) -> Self {
        let resolver = Arc::new(RewardResolver::new(schedule));
        let chain = Arc::new(InMemoryChain::new(network, &resolver));
        Self {
            resolver,
            chain,
            start_time: Instant::now(),
        }
    }
}
