//! Terminal prompter backed by `dialoguer`.
//!
//! Replies are handed to the core as text, exactly as a typed answer would
//! be: the selected option's label, or `yes`/`no`.

use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use kindle_core::{
    application::{ApplicationError, ports::Prompter},
    domain::{Question, QuestionKind},
    error::{KindleError, KindleResult},
};

#[derive(Default)]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&mut self, question: &Question) -> KindleResult<String> {
        match &question.kind {
            QuestionKind::Text { default } => {
                let input = Input::<String>::with_theme(&self.theme)
                    .with_prompt(question.prompt)
                    .allow_empty(true);
                let input = if default.is_empty() {
                    input
                } else {
                    input.default(default.clone())
                };
                input.interact_text().map_err(prompt_failed)
            }
            QuestionKind::Choice { options, default } => {
                let start = options.iter().position(|o| o == default).unwrap_or(0);
                let picked = Select::with_theme(&self.theme)
                    .with_prompt(question.prompt)
                    .items(options.as_slice())
                    .default(start)
                    .interact()
                    .map_err(prompt_failed)?;
                Ok(options.get(picked).copied().unwrap_or_default().to_string())
            }
            QuestionKind::YesNo { default } => Confirm::with_theme(&self.theme)
                .with_prompt(question.prompt)
                .default(*default)
                .interact()
                .map(|yes| if yes { "yes" } else { "no" }.to_string())
                .map_err(prompt_failed),
        }
    }
}

fn prompt_failed(e: dialoguer::Error) -> KindleError {
    match &e {
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
            ApplicationError::Cancelled.into()
        }
        _ => ApplicationError::PromptFailed {
            reason: e.to_string(),
        }
        .into(),
    }
}
