//! Input routing for card review
//!
//! Every pointer click and key press goes through [`route`], which decides
//! which channel claims it and which single action (if any) it triggers.
//! Card-local keyboard handling is tried first; the page-wide keyboard
//! channel only sees keys the card did not claim, so a key press never
//! produces two transitions.

use crossterm::event::KeyCode;

use super::surface::Surface;

// ═══════════════════════════════════════════════════════════════════════════════
// Input Types
// ═══════════════════════════════════════════════════════════════════════════════

/// Element that currently holds input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    /// The card panel itself
    #[default]
    Card,
    FlipButton,
    PrevButton,
    NextButton,
    /// Free text line for typed answers
    AnswerInput,
    /// Nothing focused
    None,
}

impl FocusTarget {
    /// Whether keystrokes here are text being typed
    pub fn is_text_entry(self) -> bool {
        matches!(self, Self::AnswerInput)
    }

    /// Clickable element behind this focus target, if any
    pub fn pointer(self) -> Option<PointerTarget> {
        match self {
            Self::Card => Some(PointerTarget::Card),
            Self::FlipButton => Some(PointerTarget::FlipButton),
            Self::PrevButton => Some(PointerTarget::PrevButton),
            Self::NextButton => Some(PointerTarget::NextButton),
            Self::AnswerInput | Self::None => None,
        }
    }
}

/// Clickable review element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Card,
    FlipButton,
    PrevButton,
    NextButton,
}

/// Raw input as seen by the review engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer activation on an element
    Click(PointerTarget),
    /// A single key press
    Key(KeyCode),
}

/// State transition requested by an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Next,
    Prev,
    Toggle,
}

/// Input channel that claimed an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Pointer,
    CardKeyboard,
    PageKeyboard,
}

/// Outcome of routing one input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Routed {
    /// Action to apply, at most one per input
    pub action: Option<ReviewAction>,
    /// Channel that claimed the input
    pub channel: Option<Channel>,
    /// Whether the element's default behavior (scrolling, activation) is suppressed
    pub prevent_default: bool,
}

impl Routed {
    fn ignored() -> Self {
        Self::default()
    }

    fn claimed(channel: Channel, action: ReviewAction, prevent_default: bool) -> Self {
        Self {
            action: Some(action),
            channel: Some(channel),
            prevent_default,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Routing
// ═══════════════════════════════════════════════════════════════════════════════

/// Classify one input event into at most one review action
pub fn route(surface: &Surface, focus: FocusTarget, event: InputEvent) -> Routed {
    match event {
        InputEvent::Click(target) => route_pointer(surface, target),
        InputEvent::Key(code) => {
            if let Some(routed) = route_card_key(surface, focus, code) {
                return routed;
            }
            if let Some(target) = focus.pointer()
                && target != PointerTarget::Card
                && is_activation_key(code)
            {
                // A focused button is activated by Enter/Space like a click
                return route_pointer(surface, target);
            }
            route_page_key(focus, code)
        }
    }
}

fn route_pointer(surface: &Surface, target: PointerTarget) -> Routed {
    match target {
        PointerTarget::Card if surface.card => {
            Routed::claimed(Channel::Pointer, ReviewAction::Toggle, false)
        }
        PointerTarget::FlipButton if surface.flip_button => {
            Routed::claimed(Channel::Pointer, ReviewAction::Toggle, true)
        }
        PointerTarget::NextButton if surface.next_button => {
            Routed::claimed(Channel::Pointer, ReviewAction::Next, true)
        }
        PointerTarget::PrevButton if surface.prev_button => {
            Routed::claimed(Channel::Pointer, ReviewAction::Prev, true)
        }
        _ => Routed::ignored(),
    }
}

/// Keys handled while the card panel holds focus
fn route_card_key(surface: &Surface, focus: FocusTarget, code: KeyCode) -> Option<Routed> {
    if focus != FocusTarget::Card || !surface.card {
        return None;
    }

    let action = match code {
        KeyCode::Enter | KeyCode::Char(' ') => ReviewAction::Toggle,
        KeyCode::Right => ReviewAction::Next,
        KeyCode::Left => ReviewAction::Prev,
        _ => return None,
    };

    Some(Routed::claimed(Channel::CardKeyboard, action, true))
}

/// Keys handled anywhere on the page
fn route_page_key(focus: FocusTarget, code: KeyCode) -> Routed {
    if focus.is_text_entry() {
        return Routed::ignored();
    }

    match code {
        KeyCode::Right => Routed::claimed(Channel::PageKeyboard, ReviewAction::Next, false),
        KeyCode::Left => Routed::claimed(Channel::PageKeyboard, ReviewAction::Prev, false),
        KeyCode::Enter | KeyCode::Char(' ') if focus == FocusTarget::Card => {
            Routed::claimed(Channel::PageKeyboard, ReviewAction::Toggle, false)
        }
        _ => Routed::ignored(),
    }
}

fn is_activation_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Enter | KeyCode::Char(' '))
}
