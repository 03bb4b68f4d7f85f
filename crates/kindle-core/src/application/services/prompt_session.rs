//! Interactive answer collection.

use tracing::{debug, instrument};

use crate::{
    application::ports::Prompter,
    domain::{
        AnswerKey, AnswerOrigin, QuestionKind, RawAnswers, normalize::resolve_yes_no,
        question_for,
    },
    error::KindleResult,
};

/// Asks the questions in their fixed order, one at a time.
///
/// Questions made irrelevant by earlier answers are skipped. Raw text is
/// stored as typed; yes/no answers are stored as flags.
pub struct PromptSession<'p> {
    prompter: &'p mut dyn Prompter,
}

impl<'p> PromptSession<'p> {
    pub fn new(prompter: &'p mut dyn Prompter) -> Self {
        Self { prompter }
    }

    #[instrument(skip_all)]
    pub fn collect(&mut self) -> KindleResult<RawAnswers> {
        let mut answers = RawAnswers::new(AnswerOrigin::Prompts);

        for key in AnswerKey::ALL {
            let Some(question) = question_for(key, &answers) else {
                debug!(question = key.as_str(), "skipped");
                continue;
            };

            let raw = self.prompter.ask(&question)?;
            match question.kind {
                QuestionKind::YesNo { default } => {
                    answers.set_flag(key, resolve_yes_no(&raw, default));
                }
                QuestionKind::Text { .. } | QuestionKind::Choice { .. } => {
                    answers.set_text(key, raw);
                }
            }
        }

        debug!(answered = answers.len(), "prompt sequence finished");
        Ok(answers)
    }
}
