//! Interactive prompts.

use console::Term;
use dialoguer::Confirm;

use crate::error::{Result, SweError};

use super::Prompt;

/// Convert dialoguer errors to SweError.
fn map_dialoguer_err(e: dialoguer::Error) -> SweError {
    SweError::Io(e.into())
}

/// Ask a yes/no question on `term`.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<bool> {
    Confirm::new()
        .with_prompt(&prompt.question)
        .default(prompt.default)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}
