use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::AppResult,
    models::{
        domain::LearningSession,
        dto::{request::RecordActivityRequest, response::ActivityDto},
    },
    repositories::SessionRepository,
};

pub const RECENT_ACTIVITY_LIMIT: i64 = 5;

/// Study sessions shown as recent activity to students and their parents.
pub struct ActivityService {
    sessions: Arc<dyn SessionRepository>,
}

impl ActivityService {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn record(
        &self,
        student_id: &str,
        request: RecordActivityRequest,
    ) -> AppResult<ActivityDto> {
        request.validate()?;

        let mut session = LearningSession::new(
            student_id,
            request.subject.trim(),
            request.activity_type.trim(),
        );
        session.duration_minutes = request.duration_minutes;
        session.points_earned = request.points_earned;
        session.accuracy = request.accuracy;

        let session = self.sessions.create(session).await?;
        log::debug!(
            "Recorded {} activity for student {}",
            session.activity_type,
            student_id
        );
        Ok(session.into())
    }

    /// The latest sessions, newest first.
    pub async fn recent(&self, student_id: &str) -> AppResult<Vec<ActivityDto>> {
        let sessions = self
            .sessions
            .list_recent(student_id, RECENT_ACTIVITY_LIMIT)
            .await?;
        Ok(sessions.into_iter().map(ActivityDto::from).collect())
    }
}
