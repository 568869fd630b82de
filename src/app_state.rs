use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AchievementRepository, AssessmentRepository, CurriculumRepository, MessageRepository,
        MongoAchievementRepository, MongoAssessmentRepository, MongoCurriculumRepository,
        MongoMessageRepository, MongoParentRepository, MongoProgressRepository,
        MongoQuestionRepository, MongoSessionRepository, MongoStudentRepository,
        MongoSubscriptionRepository, MongoUserRepository, ParentRepository, ProgressRepository, QuestionRepository,
        SessionRepository, StudentRepository, SubscriptionRepository, UserRepository,
    },
    services::{
        activity_service::ActivityService,
        assessment_service::AssessmentService,
        billing_service::{BillingProvider, BillingService, LemonSqueezyClient},
        content_service::ContentService,
        grading_service::GradingService,
        learning_path_service::LearningPathService,
        message_feed::MessageFeed,
        messaging_service::MessagingService,
        model_service::{CompletionModel, OpenAiCompletionModel},
        parent_service::ParentService,
        quiz_service::QuizService,
        tutor_service::TutorService,
        user_service::UserService,
    },
};

const MESSAGE_FEED_CAPACITY: usize = 256;

/// Storage the services are built on.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub parents: Arc<dyn ParentRepository>,
    pub curriculum: Arc<dyn CurriculumRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub assessments: Arc<dyn AssessmentRepository>,
    pub achievements: Arc<dyn AchievementRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

/// Third-party backends: the AI model and the payment provider.
#[derive(Clone)]
pub struct Integrations {
    pub model: Arc<dyn CompletionModel>,
    pub billing: Arc<dyn BillingProvider>,
}

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub content_service: Arc<ContentService>,
    pub learning_path_service: Arc<LearningPathService>,
    pub assessment_service: Arc<AssessmentService>,
    pub quiz_service: Arc<QuizService>,
    pub parent_service: Arc<ParentService>,
    pub activity_service: Arc<ActivityService>,
    pub tutor_service: Arc<TutorService>,
    pub grading_service: Arc<GradingService>,
    pub billing_service: Arc<BillingService>,
    pub messaging_service: Arc<MessagingService>,
    pub jwt_service: Arc<JwtService>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let users = Arc::new(MongoUserRepository::new(&db));
        users.ensure_indexes().await?;
        let students = Arc::new(MongoStudentRepository::new(&db));
        students.ensure_indexes().await?;
        let parents = Arc::new(MongoParentRepository::new(&db));
        parents.ensure_indexes().await?;
        let curriculum = Arc::new(MongoCurriculumRepository::new(&db));
        curriculum.ensure_indexes().await?;
        let questions = Arc::new(MongoQuestionRepository::new(&db));
        questions.ensure_indexes().await?;
        let progress = Arc::new(MongoProgressRepository::new(&db));
        progress.ensure_indexes().await?;
        let assessments = Arc::new(MongoAssessmentRepository::new(&db));
        assessments.ensure_indexes().await?;
        let achievements = Arc::new(MongoAchievementRepository::new(&db));
        achievements.ensure_indexes().await?;
        let messages = Arc::new(MongoMessageRepository::new(&db));
        messages.ensure_indexes().await?;
        let subscriptions = Arc::new(MongoSubscriptionRepository::new(&db));
        subscriptions.ensure_indexes().await?;
        let sessions = Arc::new(MongoSessionRepository::new(&db));
        sessions.ensure_indexes().await?;
        log::info!("Indexes ensured on database '{}'", db.db_name());

        let repositories = Repositories {
            users,
            students,
            parents,
            curriculum,
            questions,
            progress,
            assessments,
            achievements,
            messages,
            subscriptions,
            sessions,
        };
        let integrations = Integrations {
            model: Arc::new(OpenAiCompletionModel::new(&config)),
            billing: Arc::new(LemonSqueezyClient::new(&config)?),
        };

        let mut state = Self::with_repositories(config, repositories, integrations);
        state.db = Some(db);
        Ok(state)
    }

    /// Wires the services over the given backends. No database handle is
    /// attached, so readiness checks report it as missing.
    pub fn with_repositories(
        config: Config,
        repositories: Repositories,
        integrations: Integrations,
    ) -> Self {
        let Repositories {
            users,
            students,
            parents,
            curriculum,
            questions,
            progress,
            assessments,
            achievements,
            messages,
            subscriptions,
            sessions,
        } = repositories;

        let learning_path_service = Arc::new(LearningPathService::new(
            curriculum.clone(),
            progress,
            questions.clone(),
            assessments.clone(),
        ));

        let activity_service = Arc::new(ActivityService::new(sessions));

        Self {
            user_service: Arc::new(UserService::new(
                users,
                students.clone(),
                parents.clone(),
                achievements.clone(),
            )),
            content_service: Arc::new(ContentService::new(curriculum, questions.clone())),
            assessment_service: Arc::new(AssessmentService::new(assessments, students.clone())),
            quiz_service: Arc::new(QuizService::new(questions)),
            parent_service: Arc::new(ParentService::new(
                parents.clone(),
                students,
                achievements,
                learning_path_service.clone(),
                activity_service.clone(),
            )),
            activity_service,
            learning_path_service,
            tutor_service: Arc::new(TutorService::new(integrations.model.clone())),
            grading_service: Arc::new(GradingService::new(integrations.model)),
            billing_service: Arc::new(BillingService::new(
                integrations.billing,
                parents,
                subscriptions,
            )),
            messaging_service: Arc::new(MessagingService::new(
                messages,
                MessageFeed::new(MESSAGE_FEED_CAPACITY),
            )),
            jwt_service: Arc::new(JwtService::new(
                &config.jwt_secret,
                config.jwt_expiration_hours,
            )),
            db: None,
            config: Arc::new(config),
        }
    }
}
