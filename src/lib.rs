//! flashdeck - flashcard review in the terminal
//!
//! The [`review`] module holds the card review engine: a deck, a position,
//! and the input routing that turns clicks and key presses into navigation
//! and flips. [`client`] covers the server-side forms for module creation,
//! login and registration.

#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::return_self_not_must_use)] // Builder pattern is clear enough
#![allow(clippy::items_after_statements)] // Locally-scoped use statements are fine
#![allow(clippy::too_many_arguments)] // Some functions legitimately need many params

pub mod cli;
pub mod client;
pub mod config;
pub mod logger;
pub mod review;
pub mod ui;

// Re-export important structs and functions for easier testing
pub use config::Config;
pub use review::{CardSet, ReviewEngine, ReviewState, Surface};
