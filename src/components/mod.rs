//! Reusable UI components.

pub mod user_card;
