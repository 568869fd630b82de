use std::{collections::HashMap, sync::Arc};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Lesson, QuestionScope, Subject, Topic},
        dto::response::{
            LearningPathDto, LessonDetailDto, LessonDto, LessonSummaryDto, ProgressDto,
            QuestionView, SubjectPathDto, TopicPathDto,
        },
    },
    repositories::{AssessmentRepository, CurriculumRepository, ProgressRepository, QuestionRepository},
};

/// Completed and total lesson counts plus the mean score of completed lessons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSummary {
    pub completed_lessons: usize,
    pub total_lessons: usize,
    pub average_score: f64,
}

pub struct LearningPathService {
    curriculum: Arc<dyn CurriculumRepository>,
    progress: Arc<dyn ProgressRepository>,
    questions: Arc<dyn QuestionRepository>,
    assessments: Arc<dyn AssessmentRepository>,
}

impl LearningPathService {
    pub fn new(
        curriculum: Arc<dyn CurriculumRepository>,
        progress: Arc<dyn ProgressRepository>,
        questions: Arc<dyn QuestionRepository>,
        assessments: Arc<dyn AssessmentRepository>,
    ) -> Self {
        Self {
            curriculum,
            progress,
            questions,
            assessments,
        }
    }

    /// The path is withheld until the initial assessment is done.
    pub async fn learning_path(&self, student_id: &str) -> AppResult<LearningPathDto> {
        if !self.assessments.has_completed_initial(student_id).await? {
            return Ok(LearningPathDto {
                assessment_required: true,
                subjects: Vec::new(),
            });
        }

        Ok(LearningPathDto {
            assessment_required: false,
            subjects: self.build_tree(student_id).await?,
        })
    }

    /// Same as [`learning_path`](Self::learning_path), but a storage failure
    /// is logged and yields an empty path.
    pub async fn learning_path_or_empty(&self, student_id: &str) -> LearningPathDto {
        match self.learning_path(student_id).await {
            Ok(path) => path,
            Err(e) => {
                log::error!("Failed to load learning path for student {}: {}", student_id, e);
                LearningPathDto::default()
            }
        }
    }

    async fn build_tree(&self, student_id: &str) -> AppResult<Vec<SubjectPathDto>> {
        let (subjects, topics, lessons, progress) = tokio::try_join!(
            self.curriculum.list_subjects(),
            self.curriculum.list_topics(None),
            self.curriculum.list_lessons(None),
            self.progress.find_for_student(student_id),
        )?;

        let progress: HashMap<String, ProgressDto> = progress
            .into_iter()
            .map(|p| (p.lesson_id.clone(), p.snapshot().into()))
            .collect();

        Ok(assemble(subjects, topics, lessons, &progress))
    }

    /// Fetches the lesson and its questions side by side. Failing to load the
    /// questions leaves the set empty; a missing lesson is an error.
    pub async fn open_lesson(&self, lesson_id: &str) -> AppResult<LessonDetailDto> {
        let scope = QuestionScope::Lesson {
            lesson_id: lesson_id.to_string(),
        };
        let (lesson, questions) = tokio::join!(
            self.curriculum.find_lesson(lesson_id),
            self.questions.list_by_scope(&scope),
        );

        let lesson = lesson?
            .ok_or_else(|| AppError::NotFound(format!("Lesson '{}' not found", lesson_id)))?;

        let questions = questions.unwrap_or_else(|e| {
            log::error!("Failed to load questions for lesson {}: {}", lesson_id, e);
            Vec::new()
        });

        Ok(LessonDetailDto {
            lesson: LessonDto::from(lesson),
            questions: questions.iter().map(QuestionView::from).collect(),
        })
    }

    /// Idempotent. Returns the freshly loaded path.
    pub async fn mark_complete(
        &self,
        student_id: &str,
        lesson_id: &str,
    ) -> AppResult<LearningPathDto> {
        if self.curriculum.find_lesson(lesson_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Lesson '{}' not found", lesson_id)));
        }

        self.progress.mark_completed(student_id, lesson_id).await?;
        log::info!("Student {} completed lesson {}", student_id, lesson_id);

        Ok(self.learning_path_or_empty(student_id).await)
    }

    /// Summary over the whole curriculum, independent of the assessment gate.
    pub async fn summary(&self, student_id: &str) -> AppResult<PathSummary> {
        let subjects = self.build_tree(student_id).await?;
        let path = LearningPathDto {
            assessment_required: false,
            subjects,
        };

        let total_lessons = path.lessons().count();
        let completed: Vec<f64> = path
            .lessons()
            .filter(|l| l.progress.completed)
            .map(|l| l.progress.score)
            .collect();
        let average_score = if completed.is_empty() {
            0.0
        } else {
            completed.iter().sum::<f64>() / completed.len() as f64
        };

        Ok(PathSummary {
            completed_lessons: completed.len(),
            total_lessons,
            average_score,
        })
    }
}

/// Groups flat curriculum lists into the subject → topic → lesson tree. Lists
/// keep the order they were fetched in. Lessons with no progress row get the
/// default entry.
fn assemble(
    subjects: Vec<Subject>,
    topics: Vec<Topic>,
    lessons: Vec<Lesson>,
    progress: &HashMap<String, ProgressDto>,
) -> Vec<SubjectPathDto> {
    let mut lessons_by_topic: HashMap<String, Vec<LessonSummaryDto>> = HashMap::new();
    for lesson in lessons {
        let summary = LessonSummaryDto {
            progress: progress.get(&lesson.id).copied().unwrap_or_default(),
            content_type: lesson.content.content_type().to_string(),
            id: lesson.id,
            title: lesson.title,
            order: lesson.order,
            estimated_duration_minutes: lesson.estimated_duration_minutes,
        };
        lessons_by_topic
            .entry(lesson.topic_id)
            .or_default()
            .push(summary);
    }

    let mut topics_by_subject: HashMap<String, Vec<TopicPathDto>> = HashMap::new();
    for topic in topics {
        let lessons = lessons_by_topic.remove(&topic.id).unwrap_or_default();
        topics_by_subject
            .entry(topic.subject_id)
            .or_default()
            .push(TopicPathDto {
                id: topic.id,
                name: topic.name,
                description: topic.description,
                order: topic.order,
                lessons,
            });
    }

    subjects
        .into_iter()
        .map(|subject| SubjectPathDto {
            topics: topics_by_subject.remove(&subject.id).unwrap_or_default(),
            id: subject.id,
            name: subject.name,
            description: subject.description,
        })
        .collect()
}
