use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::time::Duration;

use crate::{config::Config, errors::AppResult};

pub const USERS: &str = "users";
pub const STUDENTS: &str = "students";
pub const PARENTS: &str = "parents";
pub const SUBJECTS: &str = "subjects";
pub const TOPICS: &str = "topics";
pub const LESSONS: &str = "lessons";
pub const QUESTIONS: &str = "questions";
pub const LEARNING_PROGRESS: &str = "learning_progress";
pub const ASSESSMENTS: &str = "assessments";
pub const ASSESSMENT_RESULTS: &str = "assessment_results";
pub const LEARNING_PATHS: &str = "learning_paths";
pub const ACHIEVEMENTS: &str = "achievements";
pub const MESSAGES: &str = "messages";
pub const SUBSCRIPTIONS: &str = "subscriptions";
pub const LEARNING_SESSIONS: &str = "learning_sessions";

#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.mongo_conn_string).await?;

        let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
        client_options.server_api = Some(server_api);
        client_options.max_pool_size = Some(10);
        client_options.min_pool_size = Some(2);
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));
        client_options.app_name = Some("learnsmart-server".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        log::info!("Connected to MongoDB database '{}'", config.mongo_db_name);

        Ok(Self {
            client,
            db_name: config.mongo_db_name.clone(),
        })
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client
            .database(&self.db_name)
            .collection(collection_name)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}
