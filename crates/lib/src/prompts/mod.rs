//! # Prompt Template Modules
//!
//! This module organizes the prompt templates used by the generation pipeline.
//! `core` holds the typed template machinery; `tasks` holds the default text
//! for each output target.

pub mod core;
pub mod tasks;

pub use self::core::{PromptSlots, PromptTemplate, Slot};
