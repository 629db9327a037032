//! Visualizer boundary.
//!
//! Rendering is an external collaborator: the referee pushes immutable
//! snapshots and a terminal notification, fire-and-forget. Neither method
//! returns a value, so a failing renderer can never abort a match; real
//! implementations are expected to swallow their own errors and to hand
//! state off to another thread or process rather than block the engine.

use crate::universe::Universe;

/// Consumer of match snapshots.
pub trait Visualizer: Send {
    /// Push a new state snapshot for rendering.
    fn update_state(&mut self, state: &Universe);

    /// Terminal notification with absolute winner seat indices
    /// (empty slice = draw).
    fn game_over(&mut self, winners: &[usize]);
}

/// Discards everything. The default when a match runs headless.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullVisualizer;

impl Visualizer for NullVisualizer {
    fn update_state(&mut self, _state: &Universe) {}

    fn game_over(&mut self, _winners: &[usize]) {}
}
