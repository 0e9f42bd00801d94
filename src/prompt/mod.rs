//! Interactive parameter collection.
//!
//! Registry descriptors declare what a server needs (environment variables,
//! an optional runtime argument); this module asks the user for those values.
//! The terminal interaction sits behind the [`Prompt`] trait so the collection
//! logic is testable with a scripted implementation.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use serde_json::{Map, Value};

use crate::registry::{FILESYSTEM_SERVER_ID, ServerDescriptor};
use crate::utils::current_username;

/// Interactive question source. One method per question shape.
pub trait Prompt {
    /// Asks for a line of text, optionally pre-filled with a default.
    fn input(&mut self, message: &str, default: Option<&str>) -> Result<String>;

    /// Asks a yes/no question.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;
}

/// [`Prompt`] backed by the terminal via `dialoguer`.
#[derive(Default)]
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl Prompt for TerminalPrompt {
    fn input(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(Into::into)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(Into::into)
    }
}

/// Values collected for one install: the full argument list (static args plus
/// any runtime-resolved values) and the environment map in prompt order.
#[derive(Debug)]
pub struct ResolvedParameters {
    /// Complete argument list to register
    pub args: Vec<String>,
    /// Collected environment variables; optional vars left empty are omitted
    pub env: Map<String, Value>,
}

/// Collects the descriptor's parameters from the user.
pub fn collect_parameters(
    descriptor: &ServerDescriptor,
    prompt: &mut dyn Prompt,
) -> Result<ResolvedParameters> {
    collect_parameters_with_username(descriptor, prompt, &current_username())
}

/// [`collect_parameters`] with the username passed explicitly.
///
/// The filesystem reference server's default paths carry a `username`
/// placeholder that is substituted with the real account name before the
/// prompt is shown.
pub fn collect_parameters_with_username(
    descriptor: &ServerDescriptor,
    prompt: &mut dyn Prompt,
    username: &str,
) -> Result<ResolvedParameters> {
    let mut args = descriptor.args.clone();

    if let Some(runtime_arg) = &descriptor.runtime_arg {
        let defaults: Vec<String> = if descriptor.id == FILESYSTEM_SERVER_ID {
            runtime_arg.default.iter().map(|d| d.replace("username", username)).collect()
        } else {
            runtime_arg.default.clone()
        };
        let prefill = defaults.join(", ");

        if runtime_arg.multiple {
            let first = prompt.input(&runtime_arg.description, Some(&prefill))?;
            args.extend(first.split(',').map(|part| part.trim().to_string()));
            loop {
                let more = prompt
                    .input("Add another allowed directory path? (press Enter to finish)", None)?;
                let more = more.trim();
                if more.is_empty() {
                    break;
                }
                args.push(more.to_string());
            }
        } else {
            args.push(prompt.input(&runtime_arg.description, Some(&prefill))?);
        }
    }

    let mut env = Map::new();
    for (key, var) in &descriptor.env {
        let answer = loop {
            let answer = prompt.input(&var.description, None)?;
            if var.required && answer.trim().is_empty() {
                eprintln!("{}", format!("{key} is required").red());
                continue;
            }
            break answer;
        };
        if !answer.trim().is_empty() {
            env.insert(key.clone(), Value::String(answer));
        }
    }

    Ok(ResolvedParameters { args, env })
}
