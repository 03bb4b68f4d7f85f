//! Non-interactive prompter.

use std::collections::{HashMap, VecDeque};

use kindle_core::{
    application::ports::Prompter,
    domain::{AnswerKey, Question},
    error::KindleResult,
};

/// Answers questions from a script.
///
/// Replies keyed by question come first, then the positional queue; when
/// both are exhausted the empty string accepts the default.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    by_key: HashMap<AnswerKey, String>,
    queue: VecDeque<String>,
    asked: Vec<AnswerKey>,
}

impl ScriptedPrompter {
    /// Accept every default.
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Reply in order, one entry per question asked.
    pub fn replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: replies.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Reply to one specific question.
    pub fn answer(mut self, key: AnswerKey, reply: impl Into<String>) -> Self {
        self.by_key.insert(key, reply.into());
        self
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> &[AnswerKey] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &Question) -> KindleResult<String> {
        self.asked.push(question.key);
        let reply = self
            .by_key
            .remove(&question.key)
            .or_else(|| self.queue.pop_front())
            .unwrap_or_default();
        Ok(reply)
    }
}
