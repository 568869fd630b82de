use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, STUDENTS},
    errors::AppResult,
    models::domain::Student,
};

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn create(&self, student: Student) -> AppResult<Student>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Student>>;
    /// Returned in no particular order; ids without a record are skipped.
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Student>>;
}

pub struct MongoStudentRepository {
    collection: Collection<Student>,
}

impl MongoStudentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(STUDENTS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        let parent_index = IndexModel::builder()
            .keys(doc! { "parent_id": 1 })
            .options(IndexOptions::builder().name("parent_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(parent_index).await?;
        log::info!("Created indexes for students collection");

        Ok(())
    }
}

#[async_trait]
impl StudentRepository for MongoStudentRepository {
    async fn create(&self, student: Student) -> AppResult<Student> {
        self.collection.insert_one(&student).await?;
        Ok(student)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Student>> {
        let student = self.collection.find_one(doc! { "id": id }).await?;
        Ok(student)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Student>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self.collection.find(doc! { "id": { "$in": ids.to_vec() } }).await?;
        let students: Vec<Student> = cursor.try_collect().await?;
        Ok(students)
    }
}
