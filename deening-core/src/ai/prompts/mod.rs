//! AI prompt templates.
//!
//! Each module exposes a `*_PROMPT_NAME` used in logs, the system persona,
//! and `render_*` functions for the user instruction (and image prompt,
//! where the content is illustrated).

pub mod chat;
pub mod cooking_step;
pub mod detect;
pub mod ingredient;
pub mod ingredient_info;
pub mod rearrange;
pub mod recipe;
pub mod substitution;

/// Persona for free-form completions.
pub const GENERIC_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

pub const GENERIC_PROMPT_NAME: &str = "generate";
