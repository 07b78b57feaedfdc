//! Terminal front end for card review
//!
//! Event loop and rendering coordination. Crossterm events are translated
//! into review inputs; everything that changes review state goes through
//! [`ReviewEngine::dispatch`].

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::sync::Arc;

use crate::{log_debug, logger};

use super::cards::CardSet;
use super::engine::ReviewEngine;
use super::events::{FocusTarget, InputEvent};
use super::layout::ReviewLayout;
use super::render::{ReviewView, render_review};
use super::surface::Surface;

/// What the event loop should do after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Nothing changed
    None,
    /// Request redraw
    Redraw,
    /// Leave the review
    Quit,
}

/// Review screen with focus and answer-line state
pub struct ReviewApp {
    engine: ReviewEngine,
    focus: FocusTarget,
    answer: String,
    layout: ReviewLayout,
    status: Option<String>,
}

impl ReviewApp {
    pub fn new(engine: ReviewEngine) -> Self {
        let status = engine
            .cards()
            .is_empty()
            .then(|| "No cards to review".to_string());

        Self {
            engine,
            focus: FocusTarget::Card,
            answer: String::new(),
            layout: ReviewLayout::default(),
            status,
        }
    }

    pub fn engine(&self) -> &ReviewEngine {
        &self.engine
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Recompute hit regions for a terminal of the given size
    pub fn resize(&mut self, area: ratatui::layout::Rect) {
        self.layout = ReviewLayout::calculate(area, self.engine.surface());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return AppAction::Quit;
        }

        match key.code {
            KeyCode::Tab => {
                self.cycle_focus(true);
                return AppAction::Redraw;
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                return AppAction::Redraw;
            }
            _ => {}
        }

        if self.focus.is_text_entry() {
            match key.code {
                KeyCode::Esc => {
                    self.focus = FocusTarget::Card;
                    return AppAction::Redraw;
                }
                KeyCode::Char(c) if !has_command_modifier(key.modifiers) => {
                    self.answer.push(c);
                    return AppAction::Redraw;
                }
                KeyCode::Char(_) => return AppAction::None,
                KeyCode::Backspace => {
                    self.answer.pop();
                    return AppAction::Redraw;
                }
                _ => {}
            }
        } else if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            return AppAction::Quit;
        }

        self.dispatch(InputEvent::Key(key.code))
    }

    /// Handle one mouse event; only left clicks matter
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> AppAction {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return AppAction::None;
        }

        let Some(target) = self.layout.hit_test(mouse.column, mouse.row) else {
            return AppAction::None;
        };

        self.focus = target;
        match target.pointer() {
            Some(pointer) => {
                self.dispatch(InputEvent::Click(pointer));
                AppAction::Redraw
            }
            None => AppAction::Redraw,
        }
    }

    fn dispatch(&mut self, event: InputEvent) -> AppAction {
        let dispatch = self.engine.dispatch(self.focus, event);
        if dispatch.rendered {
            AppAction::Redraw
        } else {
            AppAction::None
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = self.engine.surface().focus_order();
        if order.is_empty() {
            return;
        }

        let current = order.iter().position(|t| *t == self.focus);
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % order.len(),
            (Some(i), false) => (i + order.len() - 1) % order.len(),
            (None, _) => 0,
        };
        if let Some(target) = order.get(next) {
            self.focus = *target;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Terminal
    // ─────────────────────────────────────────────────────────────────────────

    /// Run the TUI until the user quits
    pub fn run(&mut self) -> Result<()> {
        // Console log lines would corrupt the alternate screen
        let console_level = logger::set_console_level(log::LevelFilter::Off);

        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        logger::set_console_level(console_level);

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut dirty = true;

        loop {
            if dirty {
                terminal.draw(|frame| self.render(frame))?;
            }

            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(..) => AppAction::Redraw,
                _ => AppAction::None,
            };

            match action {
                AppAction::Quit => {
                    log_debug!("Review closed at {:?}", self.engine.state());
                    return Ok(());
                }
                AppAction::Redraw => dirty = true,
                AppAction::None => dirty = false,
            }
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        self.resize(frame.area());
        let view = ReviewView {
            display: self.engine.display(),
            surface: self.engine.surface(),
            layout: &self.layout,
            focus: self.focus,
            answer: &self.answer,
            status: self.status.as_deref(),
        };
        render_review(frame, &view);
    }
}

/// Ctrl/Alt chords are shortcuts, never text
fn has_command_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Public Entry Point
// ═══════════════════════════════════════════════════════════════════════════════

/// Start a review of `cards` on a terminal with the given surface
pub fn run_review(cards: Arc<CardSet>, surface: Surface) -> Result<()> {
    let engine = ReviewEngine::new(cards, surface)
        .context("Review surface is missing the card, term or definition area")?;
    ReviewApp::new(engine).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::cards::Card;
    use ratatui::layout::Rect;

    fn app(surface: Surface) -> ReviewApp {
        let cards = Arc::new(CardSet::from_cards(vec![
            Card::new("A", "1"),
            Card::new("B", "2"),
            Card::new("C", "3"),
        ]));
        let engine = ReviewEngine::new(cards, surface).expect("complete surface");
        let mut app = ReviewApp::new(engine);
        app.resize(Rect::new(0, 0, 80, 24));
        app
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_space_on_card_flips_once() {
        let mut app = app(Surface::full());
        assert_eq!(app.handle_key(press(KeyCode::Char(' '))), AppAction::Redraw);
        assert!(app.engine().state().flipped);
        assert_eq!(app.engine().render_count(), 2);
    }

    #[test]
    fn test_typing_in_answer_line_does_not_navigate() {
        let mut app = app(Surface::full());
        app.handle_key(press(KeyCode::BackTab));
        assert_eq!(app.focus(), FocusTarget::AnswerInput);

        app.handle_key(press(KeyCode::Char('q')));
        app.handle_key(press(KeyCode::Char(' ')));
        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.answer(), "q ");
        assert_eq!(app.engine().state().index, 0);
        assert!(!app.engine().state().flipped);

        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.answer(), "q");
        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.focus(), FocusTarget::Card);
    }

    #[test]
    fn test_modified_chars_are_not_typed_into_answer_line() {
        let mut app = app(Surface::full());
        app.handle_key(press(KeyCode::BackTab));
        assert_eq!(app.focus(), FocusTarget::AnswerInput);

        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        let alt_b = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT);
        assert_eq!(app.handle_key(ctrl_a), AppAction::None);
        assert_eq!(app.handle_key(alt_b), AppAction::None);

        let shift_c = KeyEvent::new(KeyCode::Char('C'), KeyModifiers::SHIFT);
        assert_eq!(app.handle_key(shift_c), AppAction::Redraw);
        assert_eq!(app.answer(), "C");
        assert_eq!(app.engine().render_count(), 1);
    }

    #[test]
    fn test_q_quits_outside_answer_line() {
        let mut app = app(Surface::full());
        assert_eq!(app.handle_key(press(KeyCode::Char('q'))), AppAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), AppAction::Quit);
    }

    #[test]
    fn test_tab_cycles_present_targets() {
        let mut app = app(Surface::minimal());
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.focus(), FocusTarget::Card);

        let mut app = self::app(Surface::full());
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.focus(), FocusTarget::PrevButton);
    }

    #[test]
    fn test_click_next_button_moves_and_focuses() {
        let mut app = app(Surface::full());
        app.handle_key(press(KeyCode::Char(' ')));
        let next = app.layout.next.unwrap_or_default();

        assert_eq!(app.handle_mouse(click(next.x + 1, next.y + 1)), AppAction::Redraw);
        assert_eq!(app.focus(), FocusTarget::NextButton);
        assert_eq!(app.engine().display().term, "B");
        assert!(!app.engine().display().flipped);
    }

    #[test]
    fn test_click_card_flips() {
        let mut app = app(Surface::full());
        let card = app.layout.card;
        app.handle_mouse(click(card.x + 2, card.y + 2));
        assert!(app.engine().state().flipped);
    }

    #[test]
    fn test_click_outside_elements_is_ignored() {
        let mut app = app(Surface::minimal());
        assert_eq!(app.handle_mouse(click(0, 0)), AppAction::None);
        assert_eq!(app.engine().render_count(), 1);
    }

    #[test]
    fn test_enter_on_focused_button_activates_it() {
        let mut app = app(Surface::full());
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.focus(), FocusTarget::PrevButton);
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.engine().display().term, "C");
    }

    #[test]
    fn test_empty_deck_shows_status() {
        let engine =
            ReviewEngine::new(Arc::new(CardSet::default()), Surface::full()).expect("complete");
        let app = ReviewApp::new(engine);
        assert_eq!(app.status.as_deref(), Some("No cards to review"));
    }
}
