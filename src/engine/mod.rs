//! Interaction engine and document services.
//!
//! This module turns caller-supplied pointer events into drawing
//! operations. It maintains the tool state machine, the reversible
//! operation history, selection and hit-testing, and coordinate
//! transforms across canvas resizes.

pub mod history;
pub mod hit_test;
pub mod state;
pub mod tool;
pub mod transform;

// Re-export commonly used types at module level
pub use history::{History, HistoryEntry};
pub use hit_test::{HIT_TOLERANCE, hit_test};
pub use state::{CanvasEngine, DrawingState, SelectionObserver, StyleState, TEXT_PLACEHOLDER};
pub use tool::Tool;
