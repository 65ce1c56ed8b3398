//! Content domain module.
//!
//! Prompt construction and output parsing for AI-generated listing copy.

mod prompt;

pub use prompt::{
    description_prompt, parse_title_suggestions, title_prompt, type_label, PropertyAttributes,
    COPYWRITER_SYSTEM_PROMPT, MAX_TITLE_SUGGESTIONS,
};
