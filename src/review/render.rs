//! Projection of review state onto the screen
//!
//! [`project`] turns the card set and review state into the values the
//! learner sees. It is pure: the same inputs always give the same
//! [`DisplayState`]. The `render_*` functions draw a projected state with
//! ratatui and never touch review state.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::cards::CardSet;
use super::events::FocusTarget;
use super::layout::ReviewLayout;
use super::state::ReviewState;
use super::surface::Surface;
use super::theme;

// ═══════════════════════════════════════════════════════════════════════════════
// Projection
// ═══════════════════════════════════════════════════════════════════════════════

/// Observable output of one render pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayState {
    pub term: String,
    pub definition: String,
    /// `"<position>/<total>"`, one-based
    pub progress_label: String,
    /// Pressed/revealed indicator for the card
    pub flipped: bool,
}

/// Project the current card and state into display values
pub fn project(cards: &CardSet, state: &ReviewState) -> DisplayState {
    let card = cards.get(state.index);
    DisplayState {
        definition: card.resolved_definition().to_string(),
        term: card.term,
        progress_label: format!("{}/{}", state.position(), cards.effective_total()),
        flipped: state.flipped,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Drawing
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything needed to draw one frame
pub struct ReviewView<'a> {
    pub display: &'a DisplayState,
    pub surface: &'a Surface,
    pub layout: &'a ReviewLayout,
    pub focus: FocusTarget,
    pub answer: &'a str,
    pub status: Option<&'a str>,
}

/// Draw the whole review screen
pub fn render_review(frame: &mut Frame, view: &ReviewView<'_>) {
    render_header(frame, view.layout.header, view);
    render_card(frame, view.layout.card, view);
    render_controls(frame, view);
    if let Some(area) = view.layout.answer {
        render_answer(frame, area, view);
    }
    render_status(frame, view.layout.status, view);
}

fn render_header(frame: &mut Frame, area: Rect, view: &ReviewView<'_>) {
    let mut spans = vec![Span::styled(theme::review_title(), theme::term())];
    if view.surface.progress {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            view.display.progress_label.as_str(),
            theme::progress(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_card(frame: &mut Frame, area: Rect, view: &ReviewView<'_>) {
    let display = view.display;
    let focused = view.focus == FocusTarget::Card;

    let side = if display.flipped { " definition " } else { " term " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if display.flipped {
            BorderType::Double
        } else {
            BorderType::Rounded
        })
        .border_style(theme::card_border(focused, display.flipped))
        .title(Span::styled(side, theme::dimmed()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = usize::from(inner.width.saturating_sub(2)).max(1);
    let mut lines: Vec<Line> = wrap_lines(&display.term, width)
        .into_iter()
        .map(|l| Line::styled(l, theme::term()))
        .collect();

    if display.flipped {
        lines.push(Line::raw(""));
        lines.extend(
            wrap_lines(&display.definition, width)
                .into_iter()
                .map(|l| Line::styled(l, theme::definition())),
        );
    }

    let padding = usize::from(inner.height).saturating_sub(lines.len()) / 2;
    let mut centered = vec![Line::raw(""); padding];
    centered.extend(lines);

    frame.render_widget(
        Paragraph::new(centered).alignment(Alignment::Center),
        inner,
    );
}

fn render_controls(frame: &mut Frame, view: &ReviewView<'_>) {
    let buttons = [
        (view.layout.prev, "◀ prev", FocusTarget::PrevButton),
        (view.layout.flip, "flip", FocusTarget::FlipButton),
        (view.layout.next, "next ▶", FocusTarget::NextButton),
    ];

    for (area, label, target) in buttons {
        let Some(area) = area else { continue };
        let focused = view.focus == target;
        let block = Block::default().borders(Borders::ALL).border_style(if focused {
            theme::focused_border()
        } else {
            theme::unfocused_border()
        });
        frame.render_widget(
            Paragraph::new(Span::styled(label, theme::button(focused)))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }
}

fn render_answer(frame: &mut Frame, area: Rect, view: &ReviewView<'_>) {
    let focused = view.focus == FocusTarget::AnswerInput;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" answer ", theme::dimmed()))
        .border_style(if focused {
            theme::focused_border()
        } else {
            theme::unfocused_border()
        });
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(view.answer).block(block), area);

    if focused {
        let offset = u16::try_from(view.answer.width()).unwrap_or(u16::MAX);
        let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}

fn render_status(frame: &mut Frame, area: Rect, view: &ReviewView<'_>) {
    let line = match view.status {
        Some(message) => Line::styled(message, theme::error()),
        None => Line::styled(
            "space/enter flip · ←/→ move · tab focus · q quit",
            theme::dimmed(),
        ),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::cards::Card;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(display: &DisplayState, surface: &Surface) -> String {
        let area = Rect::new(0, 0, 60, 20);
        let layout = ReviewLayout::calculate(area, surface);
        let view = ReviewView {
            display,
            surface,
            layout: &layout,
            focus: FocusTarget::Card,
            answer: "",
            status: None,
        };

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).expect("test terminal");
        terminal
            .draw(|frame| render_review(frame, &view))
            .expect("draw succeeds");
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_projection_of_first_card() {
        let cards = CardSet::from_cards(vec![Card::new("A", "1"), Card::new("B", "2")]);
        let display = project(&cards, &ReviewState::new());
        assert_eq!(display.term, "A");
        assert_eq!(display.definition, "1");
        assert_eq!(display.progress_label, "1/2");
        assert!(!display.flipped);
    }

    #[test]
    fn test_projection_of_empty_deck() {
        let display = project(&CardSet::parse("not-json"), &ReviewState::new());
        assert_eq!(display, DisplayState {
            term: String::new(),
            definition: String::new(),
            progress_label: "1/1".to_string(),
            flipped: false,
        });
    }

    #[test]
    fn test_projection_is_idempotent() {
        let cards = CardSet::from_cards(vec![Card::new("A", "1")]);
        let state = ReviewState {
            index: 0,
            flipped: true,
        };
        assert_eq!(project(&cards, &state), project(&cards, &state));
    }

    #[test]
    fn test_progress_label_matches_position() {
        let cards = CardSet::from_cards((0..5).map(|i| Card::new(i.to_string(), "")).collect());
        for index in 0..5 {
            let display = project(&cards, &ReviewState::at(index, 5));
            assert_eq!(display.progress_label, format!("{}/5", index + 1));
        }
    }

    #[test]
    fn test_definition_hidden_until_flipped() {
        let cards = CardSet::from_cards(vec![Card::new("Hola", "Hello"), Card::new("B", "2")]);
        let surface = Surface::full();

        let front = draw(&project(&cards, &ReviewState::new()), &surface);
        assert!(front.contains("Hola"));
        assert!(!front.contains("Hello"));
        assert!(front.contains("1/2"));

        let flipped = ReviewState {
            index: 0,
            flipped: true,
        };
        let back = draw(&project(&cards, &flipped), &surface);
        assert!(back.contains("Hola"));
        assert!(back.contains("Hello"));
    }

    #[test]
    fn test_minimal_surface_draws_no_buttons() {
        let cards = CardSet::from_cards(vec![Card::new("A", "1")]);
        let screen = draw(&project(&cards, &ReviewState::new()), &Surface::minimal());
        assert!(!screen.contains("◀ prev"));
        assert!(!screen.contains("next ▶"));
        assert!(!screen.contains("answer"));
        assert!(!screen.contains("1/1"));
    }

    #[test]
    fn test_wrap_lines_respects_width() {
        let lines = wrap_lines("one two three four", 9);
        assert!(lines.iter().all(|l| l.width() <= 9));
        assert!(lines.len() > 1);
    }
}
