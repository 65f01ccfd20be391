// crates/dgb-daemon/src/state.rs
//
// Node state machine for the DGB daemon.
//
// Valid transitions:
//   Initializing -> LoadingSchedule -> Ready
//   Any state -> ShuttingDown

use std::fmt;

/// Lifecycle states of the daemon node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeState {
    /// Node is starting up and loading configuration.
    Initializing,
    /// Node is building and validating the emission schedule.
    LoadingSchedule,
    /// Node is serving RPC requests.
    Ready,
    /// Node is shutting down gracefully.
    ShuttingDown,
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeState::Initializing => write!(f, "Initializing"),
            NodeState::LoadingSchedule => write!(f, "LoadingSchedule"),
            NodeState::Ready => write!(f, "Ready"),
            NodeState::ShuttingDown => write!(f, "ShuttingDown"),
        }
    }
}

/// State machine for managing node lifecycle transitions.
pub struct NodeStateMachine {
    pub current: NodeState,
}

impl NodeStateMachine {
    /// Create a new state machine starting in the Initializing state.
    pub fn new() -> Self {
        Self {
            current: NodeState::Initializing,
        }
    }

    /// Attempt to transition to a new state.
    ///
    /// Returns an error if the transition is not valid.
    pub fn transition(&mut self, new_state: NodeState) -> Result<(), String> {
        let valid = matches!(
            (&self.current, &new_state),
            (_, NodeState::ShuttingDown)
                | (NodeState::Initializing, NodeState::LoadingSchedule)
                | (NodeState::LoadingSchedule, NodeState::Ready)
        );

        if valid {
            tracing::info!("State transition: {} -> {}", self.current, new_state);
            self.current = new_state;
            Ok(())
        } else {
            Err(format!(
                "Invalid state transition: {} -> {}",
                self.current, new_state
            ))
        }
    }
}

impl Default for NodeStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_sequence() {
        let mut sm = NodeStateMachine::new();
        sm.transition(NodeState::LoadingSchedule).unwrap();
        sm.transition(NodeState::Ready).unwrap();
        sm.transition(NodeState::ShuttingDown).unwrap();
        assert_eq!(sm.current, NodeState::ShuttingDown);
    }

    #[test]
    fn test_cannot_skip_schedule_loading() {
        let mut sm = NodeStateMachine::new();
        assert!(sm.transition(NodeState::Ready).is_err());
        assert_eq!(sm.current, NodeState::Initializing);
    }

    #[test]
    fn test_shutdown_from_any_state() {
        let mut sm = NodeStateMachine::new();
        sm.transition(NodeState::LoadingSchedule).unwrap();
        sm.transition(NodeState::ShuttingDown).unwrap();
        assert!(sm.transition(NodeState::Ready).is_err());
    }
}
