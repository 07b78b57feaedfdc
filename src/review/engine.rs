//! Review engine
//!
//! Owns the card set, the review state and the resolved surface for one
//! review session. Inputs are routed once, at most one action is applied, and
//! each applied action is followed by exactly one projection.

use std::sync::Arc;

use crate::log_debug;

use super::cards::CardSet;
use super::events::{FocusTarget, InputEvent, ReviewAction, Routed, route};
use super::render::{DisplayState, project};
use super::state::ReviewState;
use super::surface::Surface;
use super::{flip, navigation};

/// Result of dispatching one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// How the input was classified
    pub routed: Routed,
    /// Whether a render pass ran
    pub rendered: bool,
}

/// One independent review session
#[derive(Debug, Clone)]
pub struct ReviewEngine {
    cards: Arc<CardSet>,
    surface: Surface,
    state: ReviewState,
    display: DisplayState,
    render_count: usize,
}

impl ReviewEngine {
    /// Start a session and perform the initial render.
    ///
    /// Returns `None` when the card panel, term or definition area is
    /// missing from `surface`; the engine never runs partially.
    pub fn new(cards: Arc<CardSet>, surface: Surface) -> Option<Self> {
        if !surface.is_complete() {
            log_debug!("Review surface incomplete, engine not started: {:?}", surface);
            return None;
        }

        let mut engine = Self {
            cards,
            surface,
            state: ReviewState::new(),
            display: DisplayState::default(),
            render_count: 0,
        };
        engine.render();
        Some(engine)
    }

    /// Route one input and apply the resulting action, if any
    pub fn dispatch(&mut self, focus: FocusTarget, event: InputEvent) -> Dispatch {
        let routed = route(&self.surface, focus, event);
        let rendered = match routed.action {
            Some(action) => {
                log_debug!("{:?} via {:?} -> {:?}", event, routed.channel, action);
                self.apply(action);
                true
            }
            None => false,
        };

        Dispatch { routed, rendered }
    }

    /// Apply an action and render the result
    pub fn apply(&mut self, action: ReviewAction) -> &DisplayState {
        self.state = match action {
            ReviewAction::Next => navigation::next(&self.cards, self.state),
            ReviewAction::Prev => navigation::prev(&self.cards, self.state),
            ReviewAction::Toggle => flip::toggle(self.state),
        };
        self.render();
        &self.display
    }

    pub fn next(&mut self) -> &DisplayState {
        self.apply(ReviewAction::Next)
    }

    pub fn prev(&mut self) -> &DisplayState {
        self.apply(ReviewAction::Prev)
    }

    /// Flip the current card, returning the new flipped value
    pub fn toggle(&mut self) -> bool {
        self.apply(ReviewAction::Toggle).flipped
    }

    fn render(&mut self) {
        self.display = project(&self.cards, &self.state);
        self.render_count += 1;
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn cards(&self) -> &CardSet {
        &self.cards
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Number of render passes so far, including the initial one
    pub fn render_count(&self) -> usize {
        self.render_count
    }
}
