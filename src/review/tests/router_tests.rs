//! Tests for input routing

use crossterm::event::KeyCode;

use crate::review::events::{
    Channel, FocusTarget, InputEvent, PointerTarget, ReviewAction, route,
};
use crate::review::surface::Surface;

fn key(code: KeyCode) -> InputEvent {
    InputEvent::Key(code)
}

#[test]
fn test_card_click_toggles_without_suppressing_default() {
    let routed = route(
        &Surface::full(),
        FocusTarget::None,
        InputEvent::Click(PointerTarget::Card),
    );
    assert_eq!(routed.action, Some(ReviewAction::Toggle));
    assert_eq!(routed.channel, Some(Channel::Pointer));
    assert!(!routed.prevent_default);
}

#[test]
fn test_control_clicks_suppress_default() {
    let surface = Surface::full();
    let cases = [
        (PointerTarget::FlipButton, ReviewAction::Toggle),
        (PointerTarget::NextButton, ReviewAction::Next),
        (PointerTarget::PrevButton, ReviewAction::Prev),
    ];
    for (target, action) in cases {
        let routed = route(&surface, FocusTarget::None, InputEvent::Click(target));
        assert_eq!(routed.action, Some(action));
        assert!(routed.prevent_default);
    }
}

#[test]
fn test_absent_controls_are_unbound() {
    let surface = Surface::minimal();
    for target in [
        PointerTarget::FlipButton,
        PointerTarget::NextButton,
        PointerTarget::PrevButton,
    ] {
        let routed = route(&surface, FocusTarget::Card, InputEvent::Click(target));
        assert!(routed.action.is_none());
        assert!(routed.channel.is_none());
    }
}

#[test]
fn test_card_focus_claims_keys_once() {
    let surface = Surface::full();
    let cases = [
        (KeyCode::Enter, ReviewAction::Toggle),
        (KeyCode::Char(' '), ReviewAction::Toggle),
        (KeyCode::Right, ReviewAction::Next),
        (KeyCode::Left, ReviewAction::Prev),
    ];
    for (code, action) in cases {
        let routed = route(&surface, FocusTarget::Card, key(code));
        assert_eq!(routed.action, Some(action));
        assert_eq!(routed.channel, Some(Channel::CardKeyboard));
        assert!(routed.prevent_default);
    }
}

#[test]
fn test_page_arrows_work_without_card_focus() {
    let routed = route(&Surface::full(), FocusTarget::None, key(KeyCode::Right));
    assert_eq!(routed.action, Some(ReviewAction::Next));
    assert_eq!(routed.channel, Some(Channel::PageKeyboard));
    assert!(!routed.prevent_default);

    let routed = route(&Surface::full(), FocusTarget::None, key(KeyCode::Left));
    assert_eq!(routed.action, Some(ReviewAction::Prev));
}

#[test]
fn test_page_space_needs_card_focus() {
    let routed = route(&Surface::full(), FocusTarget::None, key(KeyCode::Char(' ')));
    assert!(routed.action.is_none());

    let routed = route(&Surface::full(), FocusTarget::None, key(KeyCode::Enter));
    assert!(routed.action.is_none());
}

#[test]
fn test_text_entry_suppresses_page_keys() {
    for code in [
        KeyCode::Right,
        KeyCode::Left,
        KeyCode::Char(' '),
        KeyCode::Enter,
    ] {
        let routed = route(&Surface::full(), FocusTarget::AnswerInput, key(code));
        assert!(routed.action.is_none(), "{code:?} leaked out of answer line");
    }
}

#[test]
fn test_focused_button_activates_on_enter() {
    let routed = route(&Surface::full(), FocusTarget::NextButton, key(KeyCode::Enter));
    assert_eq!(routed.action, Some(ReviewAction::Next));
    assert_eq!(routed.channel, Some(Channel::Pointer));

    let routed = route(&Surface::full(), FocusTarget::FlipButton, key(KeyCode::Char(' ')));
    assert_eq!(routed.action, Some(ReviewAction::Toggle));
}

#[test]
fn test_arrows_with_button_focus_use_page_channel() {
    let routed = route(&Surface::full(), FocusTarget::FlipButton, key(KeyCode::Right));
    assert_eq!(routed.action, Some(ReviewAction::Next));
    assert_eq!(routed.channel, Some(Channel::PageKeyboard));
}

#[test]
fn test_unrelated_keys_are_ignored() {
    for focus in [FocusTarget::Card, FocusTarget::None, FocusTarget::NextButton] {
        let routed = route(&Surface::full(), focus, key(KeyCode::Char('x')));
        assert!(routed.action.is_none());
    }
}
