//! Shared test helpers.
//!
//! Compiled for unit tests and, via the `test-utils` feature, for the
//! integration tests under `tests/`.

use std::collections::VecDeque;

use anyhow::Result;

use crate::prompt::Prompt;

/// A [`Prompt`] that replays canned answers and records every question asked.
///
/// Text questions pop from `answers` (falling back to the prompt's default,
/// then to an empty string); confirms pop from `confirms` (falling back to the
/// offered default). `log` keeps each input question with the default it was
/// shown with, in order.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    /// Remaining text answers
    pub answers: VecDeque<String>,
    /// Remaining confirm answers
    pub confirms: VecDeque<bool>,
    /// Every input question asked, with its default
    pub log: Vec<(String, Option<String>)>,
}

impl ScriptedPrompt {
    /// Scripted text answers, in the order they will be consumed.
    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { answers: answers.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    /// Scripted confirm answers, in the order they will be consumed.
    pub fn with_confirms<I>(confirms: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        Self { confirms: confirms.into_iter().collect(), ..Self::default() }
    }
}

impl Prompt for ScriptedPrompt {
    fn input(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        self.log.push((message.to_string(), default.map(str::to_string)));
        Ok(self
            .answers
            .pop_front()
            .or_else(|| default.map(str::to_string))
            .unwrap_or_default())
    }

    fn confirm(&mut self, _message: &str, default: bool) -> Result<bool> {
        Ok(self.confirms.pop_front().unwrap_or(default))
    }
}
