//! Card-to-card navigation
//!
//! Moves through the deck with wraparound at both ends. Every move lands on
//! an unflipped card.

use super::cards::CardSet;
use super::state::ReviewState;

/// Advance one card, wrapping from the last card back to the first
pub fn next(cards: &CardSet, state: ReviewState) -> ReviewState {
    let index = if state.index + 1 < cards.size() {
        state.index + 1
    } else {
        0
    };

    ReviewState {
        index,
        flipped: false,
    }
}

/// Step back one card, wrapping from the first card to the last
pub fn prev(cards: &CardSet, state: ReviewState) -> ReviewState {
    let index = if state.index > 0 {
        state.index - 1
    } else {
        cards.size().saturating_sub(1)
    };

    ReviewState {
        index,
        flipped: false,
    }
}
