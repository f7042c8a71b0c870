//! State module for tracking what a harvest run has already seen
//!
//! # Components
//!
//! - `VisitedState`: the visited-URL set and the visited-content fingerprint set

mod visited;

// Re-export main types
pub use visited::VisitedState;
