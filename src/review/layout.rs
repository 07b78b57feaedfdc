//! Screen layout for the review surface
//!
//! Splits the terminal into header, card, controls, answer line and status
//! bar, and maps mouse positions back to the element under them.

use ratatui::layout::{Constraint, Layout, Position, Rect};

use super::events::FocusTarget;
use super::surface::Surface;

const BUTTON_WIDTH: u16 = 12;
const CONTROLS_HEIGHT: u16 = 3;
const ANSWER_HEIGHT: u16 = 3;

/// Computed areas for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReviewLayout {
    pub header: Rect,
    pub card: Rect,
    pub prev: Option<Rect>,
    pub flip: Option<Rect>,
    pub next: Option<Rect>,
    pub answer: Option<Rect>,
    pub status: Rect,
}

impl ReviewLayout {
    /// Lay out `area` for the elements present on `surface`
    pub fn calculate(area: Rect, surface: &Surface) -> Self {
        let controls_height = if surface.has_controls() {
            CONTROLS_HEIGHT
        } else {
            0
        };
        let answer_height = if surface.answer_input {
            ANSWER_HEIGHT
        } else {
            0
        };

        let [header, card, controls, answer, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(controls_height),
            Constraint::Length(answer_height),
            Constraint::Length(1),
        ])
        .areas(area);

        let [_, prev, flip, next, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Fill(1),
        ])
        .areas(controls);

        Self {
            header,
            card,
            prev: surface.prev_button.then_some(prev),
            flip: surface.flip_button.then_some(flip),
            next: surface.next_button.then_some(next),
            answer: surface.answer_input.then_some(answer),
            status,
        }
    }

    /// Element under the given terminal cell
    pub fn hit_test(&self, column: u16, row: u16) -> Option<FocusTarget> {
        let position = Position::new(column, row);
        let hits = [
            (Some(self.card), FocusTarget::Card),
            (self.prev, FocusTarget::PrevButton),
            (self.flip, FocusTarget::FlipButton),
            (self.next, FocusTarget::NextButton),
            (self.answer, FocusTarget::AnswerInput),
        ];

        hits.into_iter()
            .find(|(area, _)| area.is_some_and(|a| a.contains(position)))
            .map(|(_, target)| target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    #[test]
    fn test_full_surface_has_all_areas() {
        let layout = ReviewLayout::calculate(screen(), &Surface::full());
        assert!(layout.prev.is_some());
        assert!(layout.flip.is_some());
        assert!(layout.next.is_some());
        assert!(layout.answer.is_some());
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.status.y, 23);
    }

    #[test]
    fn test_minimal_surface_gives_card_the_space() {
        let layout = ReviewLayout::calculate(screen(), &Surface::minimal());
        assert!(layout.flip.is_none());
        assert!(layout.answer.is_none());
        assert_eq!(layout.card.height, 22);
    }

    #[test]
    fn test_hit_test_finds_elements() {
        let layout = ReviewLayout::calculate(screen(), &Surface::full());
        let card = layout.card;
        assert_eq!(
            layout.hit_test(card.x + 1, card.y + 1),
            Some(FocusTarget::Card)
        );

        let next = layout.next.unwrap_or_default();
        assert_eq!(
            layout.hit_test(next.x + 1, next.y + 1),
            Some(FocusTarget::NextButton)
        );

        assert_eq!(layout.hit_test(0, 0), None);
    }

    #[test]
    fn test_hit_test_skips_absent_button() {
        let surface = Surface {
            next_button: false,
            ..Surface::full()
        };
        let full = ReviewLayout::calculate(screen(), &Surface::full());
        let layout = ReviewLayout::calculate(screen(), &surface);
        let where_next_would_be = full.next.unwrap_or_default();
        assert_eq!(
            layout.hit_test(where_next_would_be.x + 1, where_next_would_be.y + 1),
            None
        );
    }
}
