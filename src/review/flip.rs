//! Reveal toggling for the current card

use super::state::ReviewState;

/// Flip the current card. The position is left alone.
pub fn toggle(state: ReviewState) -> ReviewState {
    ReviewState {
        flipped: !state.flipped,
        ..state
    }
}
