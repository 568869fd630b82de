use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{Database, ASSESSMENTS, ASSESSMENT_RESULTS, LEARNING_PATHS},
    errors::AppResult,
    models::domain::{Assessment, AssessmentResult, AssessmentType, LearningPathState},
};

/// Completed assessments, per-question results and each student's current
/// position on the learning path.
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    async fn create(&self, assessment: Assessment) -> AppResult<Assessment>;
    async fn has_completed_initial(&self, student_id: &str) -> AppResult<bool>;
    async fn create_result(&self, result: AssessmentResult) -> AppResult<AssessmentResult>;
    /// Upsert keyed by student.
    async fn upsert_path_state(&self, state: LearningPathState) -> AppResult<()>;
    async fn find_path_state(&self, student_id: &str) -> AppResult<Option<LearningPathState>>;
}

pub struct MongoAssessmentRepository {
    assessments: Collection<Assessment>,
    results: Collection<AssessmentResult>,
    path_states: Collection<LearningPathState>,
}

impl MongoAssessmentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            assessments: db.get_collection(ASSESSMENTS),
            results: db.get_collection(ASSESSMENT_RESULTS),
            path_states: db.get_collection(LEARNING_PATHS),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let student_type = IndexModel::builder()
            .keys(doc! { "student_id": 1, "assessment_type": 1 })
            .options(
                IndexOptions::builder()
                    .name("student_type".to_string())
                    .build(),
            )
            .build();
        let result_student = IndexModel::builder()
            .keys(doc! { "student_id": 1 })
            .options(IndexOptions::builder().name("student_id".to_string()).build())
            .build();
        let path_student = IndexModel::builder()
            .keys(doc! { "student_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("student_unique".to_string())
                    .build(),
            )
            .build();

        self.assessments.create_index(student_type).await?;
        self.results.create_index(result_student).await?;
        self.path_states.create_index(path_student).await?;
        log::info!("Created indexes for assessment collections");

        Ok(())
    }
}

#[async_trait]
impl AssessmentRepository for MongoAssessmentRepository {
    async fn create(&self, assessment: Assessment) -> AppResult<Assessment> {
        self.assessments.insert_one(&assessment).await?;
        Ok(assessment)
    }

    async fn has_completed_initial(&self, student_id: &str) -> AppResult<bool> {
        let count = self
            .assessments
            .count_documents(doc! {
                "student_id": student_id,
                "assessment_type": to_bson(&AssessmentType::Initial)?,
                "completed": true,
            })
            .await?;
        Ok(count > 0)
    }

    async fn create_result(&self, result: AssessmentResult) -> AppResult<AssessmentResult> {
        self.results.insert_one(&result).await?;
        Ok(result)
    }

    async fn upsert_path_state(&self, state: LearningPathState) -> AppResult<()> {
        self.path_states
            .replace_one(doc! { "student_id": state.student_id.as_str() }, &state)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn find_path_state(&self, student_id: &str) -> AppResult<Option<LearningPathState>> {
        Ok(self
            .path_states
            .find_one(doc! { "student_id": student_id })
            .await?)
    }
}
