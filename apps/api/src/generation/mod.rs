// Generation API: validation, prompt composition, orchestration, normalization.
// All provider calls go through `providers` — no direct HTTP calls here.

pub mod handlers;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
pub mod validation;
