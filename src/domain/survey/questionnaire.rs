//! Linear questionnaire: one question at a time, forward only.

use bevy::log::info;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionnaireError {
    #[error("questionnaire has no questions")]
    Empty,
    #[error("multiple-choice question {index} has no options")]
    NoOptions { index: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice { options: Vec<String> },
    OpenEnded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    kind: QuestionKind,
}

impl Question {
    pub fn multiple_choice<I, S>(prompt: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompt: prompt.into(),
            kind: QuestionKind::MultipleChoice {
                options: options.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn open_ended(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            kind: QuestionKind::OpenEnded,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    pub fn is_open_ended(&self) -> bool {
        matches!(self.kind, QuestionKind::OpenEnded)
    }
}

/// Where the questionnaire currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Question(usize),
    Completed,
}

/// Result of one [`Questionnaire::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at `index`.
    Next { index: usize },
    /// The last question was just answered.
    Completed,
    /// Already completed; nothing changed.
    Finished,
}

impl Advance {
    /// Only moving to another question drops a domino.
    pub fn spawns(&self) -> bool {
        matches!(self, Advance::Next { .. })
    }
}

#[derive(Clone, Debug)]
pub struct Questionnaire {
    questions: Vec<Question>,
    current: usize,
    answers: BTreeMap<usize, String>,
}

impl Questionnaire {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionnaireError> {
        if questions.is_empty() {
            return Err(QuestionnaireError::Empty);
        }
        for (index, question) in questions.iter().enumerate() {
            if let QuestionKind::MultipleChoice { options } = question.kind() {
                if options.is_empty() {
                    return Err(QuestionnaireError::NoOptions { index });
                }
            }
        }
        Ok(Self {
            questions,
            current: 0,
            answers: BTreeMap::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn step(&self) -> Step {
        if self.is_completed() {
            Step::Completed
        } else {
            Step::Question(self.current)
        }
    }

    pub fn is_completed(&self) -> bool {
        self.current == self.questions.len()
    }

    /// Captured free-text answers, keyed by question index.
    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    /// Move past the current question.
    ///
    /// `input` is the free-text field's content; it is stored verbatim (empty
    /// included) when the current question is open-ended and ignored otherwise.
    /// Multiple-choice selections are not checked.
    pub fn advance(&mut self, input: &str) -> Advance {
        let Some(question) = self.questions.get(self.current) else {
            return Advance::Finished;
        };

        if question.is_open_ended() {
            let index = self.current;
            self.answers
                .entry(index)
                .or_insert_with(|| input.to_owned());
            info!(question = index + 1, answer = input, "open-ended answer");
        }

        self.current += 1;
        if self.current < self.questions.len() {
            Advance::Next {
                index: self.current,
            }
        } else {
            Advance::Completed
        }
    }
}
