use std::sync::Arc;

use serde::Serialize;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::QuestionScope,
        dto::{
            request::QuizAnswerRequest,
            response::{QuizAnswerDto, QuizQuestionDto, QuizSummaryDto},
        },
    },
    repositories::QuestionRepository,
    services::{
        quiz_engine::{QuizEngine, QuizResponse},
        session_store::SessionStore,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QuizAdvanceDto {
    Next(QuizQuestionDto),
    Finished(QuizSummaryDto),
}

/// Lesson quizzes. The tally is handed back to the caller and not stored.
pub struct QuizService {
    questions: Arc<dyn QuestionRepository>,
    sessions: SessionStore<QuizEngine>,
}

impl QuizService {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            questions,
            sessions: SessionStore::new(),
        }
    }

    fn no_quiz() -> AppError {
        AppError::NotFound("No quiz in progress".to_string())
    }

    pub async fn start(&self, user_id: &str, lesson_id: &str) -> AppResult<QuizQuestionDto> {
        let questions = self
            .questions
            .list_by_scope(&QuestionScope::Lesson {
                lesson_id: lesson_id.to_string(),
            })
            .await?;

        let engine = QuizEngine::new(questions)?;
        let view = engine.current_view()?;
        self.sessions.insert(user_id, engine).await;
        Ok(view)
    }

    pub async fn current(&self, user_id: &str) -> AppResult<QuizQuestionDto> {
        self.sessions
            .get(user_id)
            .await
            .ok_or_else(Self::no_quiz)?
            .current_view()
    }

    pub async fn answer(&self, user_id: &str, request: QuizAnswerRequest) -> AppResult<QuizAnswerDto> {
        let response = match (request.selected_index, request.text) {
            (Some(index), None) => QuizResponse::Choice(index),
            (None, Some(text)) => QuizResponse::Text(text),
            _ => {
                return Err(AppError::ValidationError(
                    "Send either selected_index or text".to_string(),
                ))
            }
        };

        self.sessions
            .update(user_id, |engine| engine.answer(response))
            .await
            .ok_or_else(Self::no_quiz)?
    }

    pub async fn advance(&self, user_id: &str) -> AppResult<QuizAdvanceDto> {
        let outcome = self
            .sessions
            .update(user_id, |engine| -> AppResult<_> {
                match engine.advance()? {
                    Some(summary) => Ok(QuizAdvanceDto::Finished(summary)),
                    None => Ok(QuizAdvanceDto::Next(engine.current_view()?)),
                }
            })
            .await
            .ok_or_else(Self::no_quiz)??;

        if let QuizAdvanceDto::Finished(summary) = &outcome {
            self.sessions.remove(user_id).await;
            log::info!(
                "User {} finished a quiz with {}/{}",
                user_id,
                summary.score,
                summary.total
            );
        }
        Ok(outcome)
    }
}
