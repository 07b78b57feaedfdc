//! Review position and reveal state

/// What is currently shown: which card, and whether its back is revealed.
///
/// `index` stays inside `0..max(size, 1)` and `flipped` is cleared whenever
/// `index` changes. Only the navigation and flip controllers produce new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReviewState {
    /// Zero-based position in the card set
    pub index: usize,
    /// Whether the definition side is revealed
    pub flipped: bool,
}

impl ReviewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State at `index`, clamped into range for a deck of `size` cards
    pub fn at(index: usize, size: usize) -> Self {
        Self {
            index: index.min(size.max(1) - 1),
            flipped: false,
        }
    }

    /// One-based position shown to the learner
    pub fn position(&self) -> usize {
        self.index + 1
    }
}
