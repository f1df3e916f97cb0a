//! Prompt construction, backend invocation and response parsing.
//!
//! This module turns a scored, band-matched employee into a prompt, sends it
//! to the text-generation backend through [`RecommendationEngine`], and
//! decodes the reply into a validated [`crate::models::RecommendationOutcome`].

mod engine;
mod parser;
mod prompt;

pub use engine::RecommendationEngine;
pub use parser::{
    MAX_TRAINING_COURSES, MIN_TRAINING_COURSES, interpret_response, parse_recommendation,
    strip_json_fences, validate_recommendation,
};
pub use prompt::{
    NOT_PROVIDED, PromptContext, RECOMMENDATION_PROMPT_TEMPLATE, build_prompt, render_template,
};
