//! Integration of the transition tables with rule-based reachability.

mod gate;

pub use gate::TransitionGate;
