//! Card review
//!
//! Interactive flashcard review in the terminal:
//! - **cards**: decoding the session's card payload
//! - **navigation** / **flip**: pure state transitions
//! - **render**: projection of state to what the learner sees
//! - **events**: single dispatch point for pointer and keyboard input
//! - **engine**: one review session tying the above together
//! - **app**: crossterm/ratatui front end

mod app;
mod layout;
mod theme;

pub mod cards;
pub mod engine;
pub mod events;
pub mod flip;
pub mod navigation;
pub mod render;
pub mod state;
pub mod surface;

#[cfg(test)]
mod tests;

// Re-exports
pub use app::{AppAction, ReviewApp, run_review};
pub use cards::{Card, CardSet, CardSource, load_cards};
pub use engine::{Dispatch, ReviewEngine};
pub use events::{Channel, FocusTarget, InputEvent, PointerTarget, ReviewAction, Routed};
pub use layout::ReviewLayout;
pub use render::DisplayState;
pub use state::ReviewState;
pub use surface::Surface;
