//! Prompt templates and placeholder expansion

mod injector;
mod template;

pub use injector::{inject, render, unresolved_placeholders, RenderedPrompt, INPUT_PLACEHOLDER};
pub use template::{PromptParameter, PromptTemplate};
