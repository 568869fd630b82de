use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{Database, LESSONS, SUBJECTS, TOPICS},
    errors::{AppError, AppResult},
    models::domain::{Lesson, Subject, Topic},
};

/// Subjects, topics and lessons. Subjects list by name, topics and lessons by
/// their `order` field.
#[async_trait]
pub trait CurriculumRepository: Send + Sync {
    async fn list_subjects(&self) -> AppResult<Vec<Subject>>;
    async fn find_subject(&self, id: &str) -> AppResult<Option<Subject>>;
    async fn create_subject(&self, subject: Subject) -> AppResult<Subject>;
    async fn update_subject(&self, subject: Subject) -> AppResult<Subject>;
    async fn delete_subject(&self, id: &str) -> AppResult<()>;

    /// All topics when `subject_id` is `None`.
    async fn list_topics(&self, subject_id: Option<&str>) -> AppResult<Vec<Topic>>;
    async fn find_topic(&self, id: &str) -> AppResult<Option<Topic>>;
    async fn create_topic(&self, topic: Topic) -> AppResult<Topic>;
    async fn update_topic(&self, topic: Topic) -> AppResult<Topic>;
    async fn delete_topic(&self, id: &str) -> AppResult<()>;

    /// All lessons when `topic_id` is `None`.
    async fn list_lessons(&self, topic_id: Option<&str>) -> AppResult<Vec<Lesson>>;
    async fn find_lesson(&self, id: &str) -> AppResult<Option<Lesson>>;
    async fn find_lesson_by_order(&self, topic_id: &str, order: i32)
        -> AppResult<Option<Lesson>>;
    async fn create_lesson(&self, lesson: Lesson) -> AppResult<Lesson>;
    async fn update_lesson(&self, lesson: Lesson) -> AppResult<Lesson>;
    async fn delete_lesson(&self, id: &str) -> AppResult<()>;
}

pub struct MongoCurriculumRepository {
    subjects: Collection<Subject>,
    topics: Collection<Topic>,
    lessons: Collection<Lesson>,
}

fn parent_filter(field: &str, id: Option<&str>) -> Document {
    match id {
        Some(id) => doc! { field: id },
        None => doc! {},
    }
}

impl MongoCurriculumRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            subjects: db.get_collection(SUBJECTS),
            topics: db.get_collection(TOPICS),
            lessons: db.get_collection(LESSONS),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let id_unique = || {
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("id_unique".to_string())
                        .build(),
                )
                .build()
        };

        let topic_order = IndexModel::builder()
            .keys(doc! { "topic_id": 1, "order": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("topic_order_unique".to_string())
                    .build(),
            )
            .build();
        let subject_order = IndexModel::builder()
            .keys(doc! { "subject_id": 1, "order": 1 })
            .options(IndexOptions::builder().name("subject_order".to_string()).build())
            .build();

        self.subjects.create_index(id_unique()).await?;
        self.topics.create_index(id_unique()).await?;
        self.topics.create_index(subject_order).await?;
        self.lessons.create_index(id_unique()).await?;
        self.lessons.create_index(topic_order).await?;
        log::info!("Created indexes for curriculum collections");

        Ok(())
    }
}

fn not_found(kind: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} '{}' not found", kind, id))
}

#[async_trait]
impl CurriculumRepository for MongoCurriculumRepository {
    async fn list_subjects(&self) -> AppResult<Vec<Subject>> {
        let cursor = self.subjects.find(doc! {}).sort(doc! { "name": 1 }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_subject(&self, id: &str) -> AppResult<Option<Subject>> {
        Ok(self.subjects.find_one(doc! { "id": id }).await?)
    }

    async fn create_subject(&self, subject: Subject) -> AppResult<Subject> {
        self.subjects.insert_one(&subject).await?;
        Ok(subject)
    }

    async fn update_subject(&self, subject: Subject) -> AppResult<Subject> {
        let result = self
            .subjects
            .replace_one(doc! { "id": subject.id.as_str() }, &subject)
            .await?;
        if result.matched_count == 0 {
            return Err(not_found("Subject", &subject.id));
        }
        Ok(subject)
    }

    async fn delete_subject(&self, id: &str) -> AppResult<()> {
        let result = self.subjects.delete_one(doc! { "id": id }).await?;
        if result.deleted_count == 0 {
            return Err(not_found("Subject", id));
        }
        Ok(())
    }

    async fn list_topics(&self, subject_id: Option<&str>) -> AppResult<Vec<Topic>> {
        let cursor = self
            .topics
            .find(parent_filter("subject_id", subject_id))
            .sort(doc! { "order": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_topic(&self, id: &str) -> AppResult<Option<Topic>> {
        Ok(self.topics.find_one(doc! { "id": id }).await?)
    }

    async fn create_topic(&self, topic: Topic) -> AppResult<Topic> {
        self.topics.insert_one(&topic).await?;
        Ok(topic)
    }

    async fn update_topic(&self, topic: Topic) -> AppResult<Topic> {
        let result = self
            .topics
            .replace_one(doc! { "id": topic.id.as_str() }, &topic)
            .await?;
        if result.matched_count == 0 {
            return Err(not_found("Topic", &topic.id));
        }
        Ok(topic)
    }

    async fn delete_topic(&self, id: &str) -> AppResult<()> {
        let result = self.topics.delete_one(doc! { "id": id }).await?;
        if result.deleted_count == 0 {
            return Err(not_found("Topic", id));
        }
        Ok(())
    }

    async fn list_lessons(&self, topic_id: Option<&str>) -> AppResult<Vec<Lesson>> {
        let cursor = self
            .lessons
            .find(parent_filter("topic_id", topic_id))
            .sort(doc! { "order": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_lesson(&self, id: &str) -> AppResult<Option<Lesson>> {
        Ok(self.lessons.find_one(doc! { "id": id }).await?)
    }

    async fn find_lesson_by_order(
        &self,
        topic_id: &str,
        order: i32,
    ) -> AppResult<Option<Lesson>> {
        Ok(self
            .lessons
            .find_one(doc! { "topic_id": topic_id, "order": order })
            .await?)
    }

    async fn create_lesson(&self, lesson: Lesson) -> AppResult<Lesson> {
        self.lessons.insert_one(&lesson).await?;
        Ok(lesson)
    }

    async fn update_lesson(&self, lesson: Lesson) -> AppResult<Lesson> {
        let result = self
            .lessons
            .replace_one(doc! { "id": lesson.id.as_str() }, &lesson)
            .await?;
        if result.matched_count == 0 {
            return Err(not_found("Lesson", &lesson.id));
        }
        Ok(lesson)
    }

    async fn delete_lesson(&self, id: &str) -> AppResult<()> {
        let result = self.lessons.delete_one(doc! { "id": id }).await?;
        if result.deleted_count == 0 {
            return Err(not_found("Lesson", id));
        }
        Ok(())
    }
}
