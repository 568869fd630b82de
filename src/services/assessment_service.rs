use std::sync::Arc;

use serde::Serialize;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{AssessmentResult, LearningPathState},
        dto::{
            request::ValidSaveAssessment,
            response::{AssessmentCompleteDto, AssessmentFeedbackDto, AssessmentStepDto},
        },
    },
    repositories::{AssessmentRepository, StudentRepository},
    services::{assessment_flow::AssessmentFlow, session_store::SessionStore},
};

/// Delay the client waits on the completion screen before going back to the
/// dashboard.
pub const PROCEED_AFTER_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssessmentAdvanceDto {
    Next(AssessmentStepDto),
    Finished(AssessmentCompleteDto),
}

pub struct AssessmentService {
    assessments: Arc<dyn AssessmentRepository>,
    students: Arc<dyn StudentRepository>,
    sessions: SessionStore<AssessmentFlow>,
}

impl AssessmentService {
    pub fn new(
        assessments: Arc<dyn AssessmentRepository>,
        students: Arc<dyn StudentRepository>,
    ) -> Self {
        Self {
            assessments,
            students,
            sessions: SessionStore::new(),
        }
    }

    pub async fn has_completed_initial(&self, student_id: &str) -> AppResult<bool> {
        self.assessments.has_completed_initial(student_id).await
    }

    /// Opens the flow at `intro`. Starting again while a flow is in progress
    /// throws the old one away.
    pub async fn start(&self, student_id: &str) -> AppResult<AssessmentStepDto> {
        if self.assessments.has_completed_initial(student_id).await? {
            return Err(AppError::AlreadyExists(
                "Initial assessment already completed".to_string(),
            ));
        }

        let student = self
            .students
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student '{}' not found", student_id)))?;

        let flow = AssessmentFlow::new(student_id, &student.grade);
        let step = flow.step();
        self.sessions.insert(student_id, flow).await;

        log::info!(
            "Started initial assessment for student {} (grade {})",
            student_id,
            student.grade
        );
        Ok(step)
    }

    fn no_flow() -> AppError {
        AppError::NotFound("No assessment in progress".to_string())
    }

    pub async fn current(&self, student_id: &str) -> AppResult<AssessmentStepDto> {
        self.sessions
            .get(student_id)
            .await
            .map(|flow| flow.step())
            .ok_or_else(Self::no_flow)
    }

    pub async fn begin(&self, student_id: &str) -> AppResult<AssessmentStepDto> {
        self.sessions
            .update(student_id, |flow| flow.begin().map(|_| flow.step()))
            .await
            .ok_or_else(Self::no_flow)?
    }

    pub async fn submit_answer(
        &self,
        student_id: &str,
        selected_index: usize,
    ) -> AppResult<AssessmentFeedbackDto> {
        self.sessions
            .update(student_id, |flow| flow.submit(selected_index))
            .await
            .ok_or_else(Self::no_flow)?
    }

    /// Moves to the next question. After the last one the attempt is
    /// persisted; a failed write is logged and the flow completes regardless.
    pub async fn advance(&self, student_id: &str) -> AppResult<AssessmentAdvanceDto> {
        let (outcome, assessment, step) = self
            .sessions
            .update(student_id, |flow| -> AppResult<_> {
                let outcome = flow.advance()?;
                Ok((outcome, flow.to_assessment(), flow.step()))
            })
            .await
            .ok_or_else(Self::no_flow)??;

        let Some(outcome) = outcome else {
            return Ok(AssessmentAdvanceDto::Next(step));
        };

        self.sessions.remove(student_id).await;

        let saved = match assessment {
            Some(assessment) => match self.assessments.create(assessment).await {
                Ok(_) => true,
                Err(e) => {
                    log::error!(
                        "Failed to save initial assessment for student {}: {}",
                        student_id,
                        e
                    );
                    false
                }
            },
            None => false,
        };

        log::info!(
            "Student {} finished the initial assessment with {}%",
            student_id,
            outcome.percentage
        );

        Ok(AssessmentAdvanceDto::Finished(AssessmentCompleteDto {
            score: outcome.correct,
            total: outcome.total,
            percentage: outcome.percentage,
            saved,
            proceed_after_ms: PROCEED_AFTER_MS,
        }))
    }

    /// Stores one graded answer and moves the student's path position.
    pub async fn save_result(&self, request: ValidSaveAssessment) -> AppResult<()> {
        let result = AssessmentResult::new(
            &request.student_id,
            &request.question_id,
            request.score,
            request.feedback,
        );
        self.assessments.create_result(result).await?;

        let state = LearningPathState::new(
            &request.student_id,
            &request.current_topic,
            request.progress,
        );
        self.assessments.upsert_path_state(state).await?;

        Ok(())
    }
}
