use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Lesson, Question, Subject, Topic},
        dto::request::{LessonRequest, QuestionListQuery, QuestionRequest, SubjectRequest, TopicRequest},
    },
    repositories::{CurriculumRepository, QuestionRepository},
};

/// Admin-side management of subjects, topics, lessons and questions.
pub struct ContentService {
    curriculum: Arc<dyn CurriculumRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl ContentService {
    pub fn new(
        curriculum: Arc<dyn CurriculumRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            curriculum,
            questions,
        }
    }

    pub async fn list_subjects(&self) -> AppResult<Vec<Subject>> {
        self.curriculum.list_subjects().await
    }

    pub async fn create_subject(&self, request: SubjectRequest) -> AppResult<Subject> {
        request.validate()?;
        let subject = Subject::new(&request.name, request.description.as_deref());
        self.curriculum.create_subject(subject).await
    }

    pub async fn update_subject(&self, id: &str, request: SubjectRequest) -> AppResult<Subject> {
        request.validate()?;
        let mut subject = self
            .curriculum
            .find_subject(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Subject '{}' not found", id)))?;
        subject.name = request.name;
        subject.description = request.description;
        self.curriculum.update_subject(subject).await
    }

    pub async fn delete_subject(&self, id: &str) -> AppResult<()> {
        self.curriculum.delete_subject(id).await
    }

    pub async fn list_topics(&self, subject_id: &str) -> AppResult<Vec<Topic>> {
        self.curriculum.list_topics(Some(subject_id)).await
    }

    async fn require_subject(&self, subject_id: &str) -> AppResult<()> {
        match self.curriculum.find_subject(subject_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::ValidationError(format!(
                "Subject '{}' does not exist",
                subject_id
            ))),
        }
    }

    pub async fn create_topic(&self, request: TopicRequest) -> AppResult<Topic> {
        request.validate()?;
        self.require_subject(&request.subject_id).await?;
        let topic = Topic::new(
            &request.subject_id,
            &request.name,
            request.description.as_deref(),
            request.order,
        );
        self.curriculum.create_topic(topic).await
    }

    pub async fn update_topic(&self, id: &str, request: TopicRequest) -> AppResult<Topic> {
        request.validate()?;
        let mut topic = self
            .curriculum
            .find_topic(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Topic '{}' not found", id)))?;
        if topic.subject_id != request.subject_id {
            self.require_subject(&request.subject_id).await?;
        }
        topic.subject_id = request.subject_id;
        topic.name = request.name;
        topic.description = request.description;
        topic.order = request.order;
        self.curriculum.update_topic(topic).await
    }

    pub async fn delete_topic(&self, id: &str) -> AppResult<()> {
        self.curriculum.delete_topic(id).await
    }

    pub async fn list_lessons(&self, topic_id: &str) -> AppResult<Vec<Lesson>> {
        self.curriculum.list_lessons(Some(topic_id)).await
    }

    /// Lesson order is unique within a topic. `own_id` is the lesson being
    /// updated, which may keep its own slot.
    async fn check_order_free(
        &self,
        topic_id: &str,
        order: i32,
        own_id: Option<&str>,
    ) -> AppResult<()> {
        match self.curriculum.find_lesson_by_order(topic_id, order).await? {
            Some(existing) if Some(existing.id.as_str()) != own_id => Err(AppError::AlreadyExists(
                format!("Topic '{}' already has a lesson at position {}", topic_id, order),
            )),
            _ => Ok(()),
        }
    }

    pub async fn create_lesson(&self, request: LessonRequest) -> AppResult<Lesson> {
        request.validate()?;
        let content = request.content()?;
        if self.curriculum.find_topic(&request.topic_id).await?.is_none() {
            return Err(AppError::ValidationError(format!(
                "Topic '{}' does not exist",
                request.topic_id
            )));
        }
        self.check_order_free(&request.topic_id, request.order, None)
            .await?;

        let lesson = Lesson::new(
            &request.topic_id,
            &request.title,
            content,
            request.order,
            request.estimated_duration_minutes,
        );
        self.curriculum.create_lesson(lesson).await
    }

    pub async fn update_lesson(&self, id: &str, request: LessonRequest) -> AppResult<Lesson> {
        request.validate()?;
        let content = request.content()?;
        let mut lesson = self
            .curriculum
            .find_lesson(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lesson '{}' not found", id)))?;
        if lesson.topic_id != request.topic_id
            && self.curriculum.find_topic(&request.topic_id).await?.is_none()
        {
            return Err(AppError::ValidationError(format!(
                "Topic '{}' does not exist",
                request.topic_id
            )));
        }
        self.check_order_free(&request.topic_id, request.order, Some(id))
            .await?;

        lesson.topic_id = request.topic_id;
        lesson.title = request.title;
        lesson.content = content;
        lesson.order = request.order;
        lesson.estimated_duration_minutes = request.estimated_duration_minutes;
        self.curriculum.update_lesson(lesson).await
    }

    pub async fn delete_lesson(&self, id: &str) -> AppResult<()> {
        self.curriculum.delete_lesson(id).await
    }

    pub async fn list_questions(&self, query: &QuestionListQuery) -> AppResult<Vec<Question>> {
        let scope = query.scope().ok_or_else(|| {
            AppError::ValidationError(
                "Pass a subject_id, topic_id or lesson_id to list questions".to_string(),
            )
        })?;
        self.questions.list_by_scope(&scope).await
    }

    fn build_question(request: &QuestionRequest) -> AppResult<Question> {
        request.validate()?;
        let mut question = Question::new(
            request.scope()?,
            request.question_text.trim(),
            request.kind()?,
            request.difficulty,
        );
        question.grade_level = request.grade_level.clone();
        question.explanation = request
            .explanation
            .clone()
            .filter(|e| !e.trim().is_empty());
        question.standard_codes = request.standard_codes.clone();
        Ok(question)
    }

    pub async fn create_question(&self, request: QuestionRequest) -> AppResult<Question> {
        let question = Self::build_question(&request)?;
        self.questions.create(question).await
    }

    pub async fn update_question(&self, id: &str, request: QuestionRequest) -> AppResult<Question> {
        let existing = self
            .questions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question '{}' not found", id)))?;

        let mut question = Self::build_question(&request)?;
        question.id = existing.id;
        question.created_at = existing.created_at;
        self.questions.update(question).await
    }

    pub async fn delete_question(&self, id: &str) -> AppResult<()> {
        self.questions.delete(id).await
    }
}
