//! Which review elements exist on screen
//!
//! Resolved once when a review starts. The card panel and its term and
//! definition areas are required; the control buttons, progress label and
//! answer line are optional.

use crate::config::ReviewConfig;

use super::events::FocusTarget;

/// Presence of each review element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Surface {
    pub card: bool,
    pub term: bool,
    pub definition: bool,
    pub progress: bool,
    pub flip_button: bool,
    pub prev_button: bool,
    pub next_button: bool,
    pub answer_input: bool,
}

impl Surface {
    /// Every element present
    pub fn full() -> Self {
        Self {
            card: true,
            term: true,
            definition: true,
            progress: true,
            flip_button: true,
            prev_button: true,
            next_button: true,
            answer_input: true,
        }
    }

    /// Only the required card elements
    pub fn minimal() -> Self {
        Self {
            card: true,
            term: true,
            definition: true,
            progress: false,
            flip_button: false,
            prev_button: false,
            next_button: false,
            answer_input: false,
        }
    }

    pub fn from_config(config: &ReviewConfig) -> Self {
        Self {
            progress: config.show_progress,
            flip_button: config.show_controls,
            prev_button: config.show_controls,
            next_button: config.show_controls,
            answer_input: config.answer_line,
            ..Self::minimal()
        }
    }

    /// Whether the required elements are all present
    pub fn is_complete(&self) -> bool {
        self.card && self.term && self.definition
    }

    /// Whether any of the control buttons is present
    pub fn has_controls(&self) -> bool {
        self.flip_button || self.prev_button || self.next_button
    }

    /// Whether `target` can hold focus on this surface
    pub fn has(&self, target: FocusTarget) -> bool {
        match target {
            FocusTarget::Card => self.card,
            FocusTarget::FlipButton => self.flip_button,
            FocusTarget::PrevButton => self.prev_button,
            FocusTarget::NextButton => self.next_button,
            FocusTarget::AnswerInput => self.answer_input,
            FocusTarget::None => true,
        }
    }

    /// Focusable targets in tab order
    pub fn focus_order(&self) -> Vec<FocusTarget> {
        [
            FocusTarget::Card,
            FocusTarget::PrevButton,
            FocusTarget::FlipButton,
            FocusTarget::NextButton,
            FocusTarget::AnswerInput,
        ]
        .into_iter()
        .filter(|target| self.has(*target))
        .collect()
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_is_complete() {
        assert!(Surface::minimal().is_complete());
        assert!(!Surface::minimal().has_controls());
    }

    #[test]
    fn test_missing_definition_is_incomplete() {
        let surface = Surface {
            definition: false,
            ..Surface::full()
        };
        assert!(!surface.is_complete());
    }

    #[test]
    fn test_focus_order_skips_absent_targets() {
        let surface = Surface {
            prev_button: false,
            answer_input: false,
            ..Surface::full()
        };
        assert_eq!(
            surface.focus_order(),
            vec![
                FocusTarget::Card,
                FocusTarget::FlipButton,
                FocusTarget::NextButton
            ]
        );
    }

    #[test]
    fn test_from_config_follows_flags() {
        let config = ReviewConfig {
            show_controls: false,
            answer_line: true,
            show_progress: true,
        };
        let surface = Surface::from_config(&config);
        assert!(surface.is_complete());
        assert!(!surface.has_controls());
        assert!(surface.answer_input);
        assert!(surface.progress);
    }
}
