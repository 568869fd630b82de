use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, QuestionKind},
        dto::response::{QuestionView, QuizAnswerDto, QuizQuestionDto, QuizSummaryDto},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizResponse {
    /// Option index. True/false uses 0 for "True" and 1 for "False".
    Choice(usize),
    Text(String),
}

/// Grades one response against a question.
pub fn grade(kind: &QuestionKind, response: &QuizResponse) -> AppResult<bool> {
    match (kind, response) {
        (
            QuestionKind::MultipleChoice {
                options,
                correct_option_index,
            },
            QuizResponse::Choice(selected),
        ) => {
            if *selected >= options.len() {
                return Err(AppError::ValidationError(format!(
                    "Option {} does not exist",
                    selected
                )));
            }
            Ok(selected == correct_option_index)
        }
        (
            QuestionKind::TrueFalse {
                correct_answer_text,
            },
            QuizResponse::Choice(selected),
        ) => match selected {
            0 => Ok(correct_answer_text == "true"),
            1 => Ok(correct_answer_text == "false"),
            other => Err(AppError::ValidationError(format!(
                "Option {} does not exist",
                other
            ))),
        },
        (
            QuestionKind::ShortAnswer {
                correct_answer_text,
            },
            QuizResponse::Text(text),
        ) => Ok(text.trim().to_lowercase() == correct_answer_text.trim().to_lowercase()),
        (kind, _) => Err(AppError::ValidationError(format!(
            "Wrong kind of answer for a {} question",
            kind.type_name()
        ))),
    }
}

/// Runs a list of questions in order: each one `unanswered → answered`, then
/// advance; the whole quiz `in progress → complete`.
///
/// `answered` is tracked on its own. A short answer records no selection.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    questions: Vec<Question>,
    current: usize,
    answered: bool,
    selected: Option<usize>,
    score: usize,
    complete: bool,
}

impl QuizEngine {
    pub fn new(questions: Vec<Question>) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(AppError::ValidationError(
                "This lesson has no quiz questions".to_string(),
            ));
        }
        Ok(QuizEngine {
            questions,
            current: 0,
            answered: false,
            selected: None,
            score: 0,
            complete: false,
        })
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    fn current_question(&self) -> AppResult<&Question> {
        if self.complete {
            return Err(AppError::ValidationError("Quiz is already complete".to_string()));
        }
        self.questions
            .get(self.current)
            .ok_or_else(|| AppError::InternalError("Quiz question out of range".to_string()))
    }

    pub fn current_view(&self) -> AppResult<QuizQuestionDto> {
        let question = self.current_question()?;
        Ok(QuizQuestionDto {
            question_index: self.current,
            total_questions: self.questions.len(),
            question: QuestionView::from(question),
            answered: self.answered,
        })
    }

    pub fn answer(&mut self, response: QuizResponse) -> AppResult<QuizAnswerDto> {
        let question = self.current_question()?;
        if self.answered {
            return Err(AppError::ValidationError(
                "This question has already been answered".to_string(),
            ));
        }

        let correct = grade(&question.kind, &response)?;
        let correct_answer = question.kind.correct_answer_label();
        let explanation = question.explanation.clone();
        let is_last = self.current + 1 == self.questions.len();

        self.answered = true;
        self.selected = match response {
            QuizResponse::Choice(index) => Some(index),
            QuizResponse::Text(_) => None,
        };
        if correct {
            self.score += 1;
        }

        Ok(QuizAnswerDto {
            correct,
            correct_answer,
            explanation,
            score: self.score,
            is_last,
        })
    }

    /// Moves to the next question, or finishes the quiz and returns the tally.
    pub fn advance(&mut self) -> AppResult<Option<QuizSummaryDto>> {
        self.current_question()?;
        if !self.answered {
            return Err(AppError::ValidationError(
                "Answer the question before moving on".to_string(),
            ));
        }

        self.answered = false;
        self.selected = None;
        self.current += 1;

        if self.current == self.questions.len() {
            self.complete = true;
            return Ok(Some(QuizSummaryDto {
                score: self.score,
                total: self.questions.len(),
            }));
        }
        Ok(None)
    }
}
