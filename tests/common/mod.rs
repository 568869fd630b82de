#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use learnsmart_server::{
    app_state::{AppState, Integrations, Repositories},
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        Achievement, Assessment, AssessmentResult, AssessmentSnapshot, AssessmentType, LearningPathState,
        LearningProgress, LearningSession, Lesson, LessonContent, Message, Parent, Question, QuestionKind,
        QuestionOption, QuestionScope, Student, Subject, Subscription, SubscriptionStatus, Topic,
        User, UserRole,
    },
    repositories::{
        AchievementRepository, AssessmentRepository, CurriculumRepository, MessageRepository,
        ParentRepository, ProgressRepository, QuestionRepository, SessionRepository,
        StudentRepository, SubscriptionRepository, UserRepository,
    },
    services::{
        billing_service::BillingProvider,
        model_service::{CompletionModel, CompletionRequest},
    },
};

fn unavailable() -> AppError {
    AppError::DatabaseError("storage unavailable".to_string())
}

// ---------------------------------------------------------------------------
// In-memory repositories
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id == user.id || u.email == user.email) {
            return Err(AppError::AlreadyExists(format!(
                "User '{}' already exists",
                user.id
            )));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users = self.users.read().await.clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update_role(&self, id: &str, role: UserRole) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", id)))?;
        user.role = role;
        user.updated_at = Some(Utc::now());
        Ok(user.clone())
    }
}

#[derive(Default)]
pub struct InMemoryStudentRepository {
    students: RwLock<HashMap<String, Student>>,
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn create(&self, student: Student) -> AppResult<Student> {
        self.students
            .write()
            .await
            .insert(student.id.clone(), student.clone());
        Ok(student)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Student>> {
        Ok(self.students.read().await.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Student>> {
        let students = self.students.read().await;
        // reversed so callers cannot rely on storage order
        Ok(ids.iter().rev().filter_map(|id| students.get(id).cloned()).collect())
    }
}

#[derive(Default)]
pub struct InMemoryParentRepository {
    parents: RwLock<HashMap<String, Parent>>,
}

#[async_trait]
impl ParentRepository for InMemoryParentRepository {
    async fn create(&self, parent: Parent) -> AppResult<Parent> {
        self.parents
            .write()
            .await
            .insert(parent.id.clone(), parent.clone());
        Ok(parent)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Parent>> {
        Ok(self.parents.read().await.get(id).cloned())
    }

    async fn add_child(&self, parent_id: &str, student_id: &str) -> AppResult<Parent> {
        let mut parents = self.parents.write().await;
        let parent = parents
            .get_mut(parent_id)
            .ok_or_else(|| AppError::NotFound(format!("Parent '{}' not found", parent_id)))?;
        if !parent.has_child(student_id) {
            parent.children.push(student_id.to_string());
        }
        Ok(parent.clone())
    }

    async fn set_subscription_status(
        &self,
        parent_id: &str,
        status: SubscriptionStatus,
    ) -> AppResult<bool> {
        match self.parents.write().await.get_mut(parent_id) {
            Some(parent) => {
                parent.subscription_status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Reads fail once `fail_reads` is set.
#[derive(Default)]
pub struct InMemoryCurriculumRepository {
    subjects: RwLock<Vec<Subject>>,
    topics: RwLock<Vec<Topic>>,
    lessons: RwLock<Vec<Lesson>>,
    pub fail_reads: AtomicBool,
}

impl InMemoryCurriculumRepository {
    fn check_reads(&self) -> AppResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

fn not_found(kind: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} '{}' not found", kind, id))
}

#[async_trait]
impl CurriculumRepository for InMemoryCurriculumRepository {
    async fn list_subjects(&self) -> AppResult<Vec<Subject>> {
        self.check_reads()?;
        let mut subjects = self.subjects.read().await.clone();
        subjects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subjects)
    }

    async fn find_subject(&self, id: &str) -> AppResult<Option<Subject>> {
        self.check_reads()?;
        Ok(self.subjects.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn create_subject(&self, subject: Subject) -> AppResult<Subject> {
        self.subjects.write().await.push(subject.clone());
        Ok(subject)
    }

    async fn update_subject(&self, subject: Subject) -> AppResult<Subject> {
        let mut subjects = self.subjects.write().await;
        let slot = subjects
            .iter_mut()
            .find(|s| s.id == subject.id)
            .ok_or_else(|| not_found("Subject", &subject.id))?;
        *slot = subject.clone();
        Ok(subject)
    }

    async fn delete_subject(&self, id: &str) -> AppResult<()> {
        let mut subjects = self.subjects.write().await;
        let before = subjects.len();
        subjects.retain(|s| s.id != id);
        if subjects.len() == before {
            return Err(not_found("Subject", id));
        }
        Ok(())
    }

    async fn list_topics(&self, subject_id: Option<&str>) -> AppResult<Vec<Topic>> {
        self.check_reads()?;
        let mut topics: Vec<Topic> = self
            .topics
            .read()
            .await
            .iter()
            .filter(|t| subject_id.map_or(true, |s| t.subject_id == s))
            .cloned()
            .collect();
        topics.sort_by_key(|t| t.order);
        Ok(topics)
    }

    async fn find_topic(&self, id: &str) -> AppResult<Option<Topic>> {
        self.check_reads()?;
        Ok(self.topics.read().await.iter().find(|t| t.id == id).cloned())
    }

    async fn create_topic(&self, topic: Topic) -> AppResult<Topic> {
        self.topics.write().await.push(topic.clone());
        Ok(topic)
    }

    async fn update_topic(&self, topic: Topic) -> AppResult<Topic> {
        let mut topics = self.topics.write().await;
        let slot = topics
            .iter_mut()
            .find(|t| t.id == topic.id)
            .ok_or_else(|| not_found("Topic", &topic.id))?;
        *slot = topic.clone();
        Ok(topic)
    }

    async fn delete_topic(&self, id: &str) -> AppResult<()> {
        let mut topics = self.topics.write().await;
        let before = topics.len();
        topics.retain(|t| t.id != id);
        if topics.len() == before {
            return Err(not_found("Topic", id));
        }
        Ok(())
    }

    async fn list_lessons(&self, topic_id: Option<&str>) -> AppResult<Vec<Lesson>> {
        self.check_reads()?;
        let mut lessons: Vec<Lesson> = self
            .lessons
            .read()
            .await
            .iter()
            .filter(|l| topic_id.map_or(true, |t| l.topic_id == t))
            .cloned()
            .collect();
        lessons.sort_by_key(|l| l.order);
        Ok(lessons)
    }

    async fn find_lesson(&self, id: &str) -> AppResult<Option<Lesson>> {
        self.check_reads()?;
        Ok(self.lessons.read().await.iter().find(|l| l.id == id).cloned())
    }

    async fn find_lesson_by_order(&self, topic_id: &str, order: i32) -> AppResult<Option<Lesson>> {
        self.check_reads()?;
        Ok(self
            .lessons
            .read()
            .await
            .iter()
            .find(|l| l.topic_id == topic_id && l.order == order)
            .cloned())
    }

    async fn create_lesson(&self, lesson: Lesson) -> AppResult<Lesson> {
        let mut lessons = self.lessons.write().await;
        if lessons
            .iter()
            .any(|l| l.topic_id == lesson.topic_id && l.order == lesson.order)
        {
            return Err(AppError::DatabaseError(
                "E11000 duplicate key error (topic_id, order)".to_string(),
            ));
        }
        lessons.push(lesson.clone());
        Ok(lesson)
    }

    async fn update_lesson(&self, lesson: Lesson) -> AppResult<Lesson> {
        let mut lessons = self.lessons.write().await;
        let slot = lessons
            .iter_mut()
            .find(|l| l.id == lesson.id)
            .ok_or_else(|| not_found("Lesson", &lesson.id))?;
        *slot = lesson.clone();
        Ok(lesson)
    }

    async fn delete_lesson(&self, id: &str) -> AppResult<()> {
        let mut lessons = self.lessons.write().await;
        let before = lessons.len();
        lessons.retain(|l| l.id != id);
        if lessons.len() == before {
            return Err(not_found("Lesson", id));
        }
        Ok(())
    }
}

/// Reads fail once `fail_reads` is set.
#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<Vec<Question>>,
    pub fail_reads: AtomicBool,
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn list_by_scope(&self, scope: &QuestionScope) -> AppResult<Vec<Question>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut questions: Vec<Question> = self
            .questions
            .read()
            .await
            .iter()
            .filter(|q| q.scope == *scope)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.difficulty);
        Ok(questions)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>> {
        Ok(self.questions.read().await.iter().find(|q| q.id == id).cloned())
    }

    async fn create(&self, question: Question) -> AppResult<Question> {
        self.questions.write().await.push(question.clone());
        Ok(question)
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        let mut questions = self.questions.write().await;
        let slot = questions
            .iter_mut()
            .find(|q| q.id == question.id)
            .ok_or_else(|| not_found("Question", &question.id))?;
        *slot = question.clone();
        Ok(question)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut questions = self.questions.write().await;
        let before = questions.len();
        questions.retain(|q| q.id != id);
        if questions.len() == before {
            return Err(not_found("Question", id));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryProgressRepository {
    rows: RwLock<HashMap<(String, String), LearningProgress>>,
}

impl InMemoryProgressRepository {
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn insert(&self, progress: LearningProgress) {
        self.rows.write().await.insert(
            (progress.student_id.clone(), progress.lesson_id.clone()),
            progress,
        );
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn find_for_student(&self, student_id: &str) -> AppResult<Vec<LearningProgress>> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|p| p.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn mark_completed(&self, student_id: &str, lesson_id: &str) -> AppResult<LearningProgress> {
        let mut rows = self.rows.write().await;
        let row = rows
            .entry((student_id.to_string(), lesson_id.to_string()))
            .or_insert_with(|| LearningProgress::completed_now(student_id, lesson_id));
        let now = Utc::now();
        row.completed = true;
        row.completed_at = Some(now);
        row.updated_at = Some(now);
        Ok(row.clone())
    }
}

/// `create` fails once `fail_writes` is set.
#[derive(Default)]
pub struct InMemoryAssessmentRepository {
    pub assessments: RwLock<Vec<Assessment>>,
    pub results: RwLock<Vec<AssessmentResult>>,
    pub path_states: RwLock<HashMap<String, LearningPathState>>,
    pub fail_writes: AtomicBool,
}

#[async_trait]
impl AssessmentRepository for InMemoryAssessmentRepository {
    async fn create(&self, assessment: Assessment) -> AppResult<Assessment> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.assessments.write().await.push(assessment.clone());
        Ok(assessment)
    }

    async fn has_completed_initial(&self, student_id: &str) -> AppResult<bool> {
        Ok(self.assessments.read().await.iter().any(|a| {
            a.student_id == student_id && a.assessment_type == AssessmentType::Initial && a.completed
        }))
    }

    async fn create_result(&self, result: AssessmentResult) -> AppResult<AssessmentResult> {
        self.results.write().await.push(result.clone());
        Ok(result)
    }

    async fn upsert_path_state(&self, state: LearningPathState) -> AppResult<()> {
        self.path_states
            .write()
            .await
            .insert(state.student_id.clone(), state);
        Ok(())
    }

    async fn find_path_state(&self, student_id: &str) -> AppResult<Option<LearningPathState>> {
        Ok(self.path_states.read().await.get(student_id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryAchievementRepository {
    achievements: RwLock<Vec<Achievement>>,
}

#[async_trait]
impl AchievementRepository for InMemoryAchievementRepository {
    async fn list_for_student(&self, student_id: &str) -> AppResult<Vec<Achievement>> {
        let mut achievements: Vec<Achievement> = self
            .achievements
            .read()
            .await
            .iter()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect();
        achievements.sort_by(|a, b| b.achieved_at.cmp(&a.achieved_at));
        Ok(achievements)
    }

    async fn create(&self, achievement: Achievement) -> AppResult<Achievement> {
        self.achievements.write().await.push(achievement.clone());
        Ok(achievement)
    }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<Vec<LearningSession>>,
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: LearningSession) -> AppResult<LearningSession> {
        self.sessions.write().await.push(session.clone());
        Ok(session)
    }

    async fn list_recent(&self, student_id: &str, limit: i64) -> AppResult<Vec<LearningSession>> {
        let mut sessions: Vec<LearningSession> = self
            .sessions
            .read()
            .await
            .iter()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        sessions.truncate(limit.max(0) as usize);
        Ok(sessions)
    }
}

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: RwLock<Vec<Message>>,
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(&self, message: Message) -> AppResult<Message> {
        self.messages.write().await.push(message.clone());
        Ok(message)
    }

    async fn list_conversation(&self, parent_id: &str, teacher_id: &str) -> AppResult<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .messages
            .read()
            .await
            .iter()
            .filter(|m| m.belongs_to(parent_id, teacher_id))
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }
}

#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: RwLock<HashMap<String, Subscription>>,
}

impl InMemorySubscriptionRepository {
    pub async fn count(&self) -> usize {
        self.subscriptions.read().await.len()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn upsert(&self, subscription: Subscription) -> AppResult<()> {
        self.subscriptions
            .write()
            .await
            .insert(subscription.subscription_id.clone(), subscription);
        Ok(())
    }

    async fn deactivate(&self, subscription_id: &str) -> AppResult<bool> {
        match self.subscriptions.write().await.get_mut(subscription_id) {
            Some(subscription) => {
                subscription.is_active = false;
                subscription.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id(&self, subscription_id: &str) -> AppResult<Option<Subscription>> {
        Ok(self.subscriptions.read().await.get(subscription_id).cloned())
    }
}

// ---------------------------------------------------------------------------
// External backends
// ---------------------------------------------------------------------------

/// Replies with a fixed outcome and records every request.
pub struct ScriptedModel {
    reply: Mutex<Result<Option<String>, String>>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Mutex::new(Ok(Some(text.to_string()))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: Result<Option<String>, String>) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    async fn complete(&self, request: CompletionRequest) -> AppResult<Option<String>> {
        self.requests.lock().unwrap().push(request);
        self.reply.lock().unwrap().clone().map_err(AppError::Upstream)
    }
}

pub struct StubBillingProvider {
    reply: Mutex<Result<String, String>>,
    pub customers: Mutex<Vec<String>>,
}

impl StubBillingProvider {
    pub fn new(url: &str) -> Self {
        Self {
            reply: Mutex::new(Ok(url.to_string())),
            customers: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: Result<String, String>) {
        *self.reply.lock().unwrap() = reply;
    }
}

#[async_trait]
impl BillingProvider for StubBillingProvider {
    async fn customer_portal_url(&self, customer_id: &str) -> AppResult<String> {
        self.customers.lock().unwrap().push(customer_id.to_string());
        self.reply.lock().unwrap().clone().map_err(AppError::Upstream)
    }
}

// ---------------------------------------------------------------------------
// Test context
// ---------------------------------------------------------------------------

pub const PORTAL_URL: &str = "https://billing.example.com/portal/abc";

pub struct TestContext {
    pub state: AppState,
    pub users: Arc<InMemoryUserRepository>,
    pub students: Arc<InMemoryStudentRepository>,
    pub parents: Arc<InMemoryParentRepository>,
    pub curriculum: Arc<InMemoryCurriculumRepository>,
    pub questions: Arc<InMemoryQuestionRepository>,
    pub progress: Arc<InMemoryProgressRepository>,
    pub assessments: Arc<InMemoryAssessmentRepository>,
    pub achievements: Arc<InMemoryAchievementRepository>,
    pub messages: Arc<InMemoryMessageRepository>,
    pub subscriptions: Arc<InMemorySubscriptionRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub model: Arc<ScriptedModel>,
    pub billing: Arc<StubBillingProvider>,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let students = Arc::new(InMemoryStudentRepository::default());
        let parents = Arc::new(InMemoryParentRepository::default());
        let curriculum = Arc::new(InMemoryCurriculumRepository::default());
        let questions = Arc::new(InMemoryQuestionRepository::default());
        let progress = Arc::new(InMemoryProgressRepository::default());
        let assessments = Arc::new(InMemoryAssessmentRepository::default());
        let achievements = Arc::new(InMemoryAchievementRepository::default());
        let messages = Arc::new(InMemoryMessageRepository::default());
        let subscriptions = Arc::new(InMemorySubscriptionRepository::default());
        let sessions = Arc::new(InMemorySessionRepository::default());
        let model = Arc::new(ScriptedModel::replying("Let's work through it together."));
        let billing = Arc::new(StubBillingProvider::new(PORTAL_URL));

        let state = AppState::with_repositories(
            Config::test_config(),
            Repositories {
                users: users.clone(),
                students: students.clone(),
                parents: parents.clone(),
                curriculum: curriculum.clone(),
                questions: questions.clone(),
                progress: progress.clone(),
                assessments: assessments.clone(),
                achievements: achievements.clone(),
                messages: messages.clone(),
                subscriptions: subscriptions.clone(),
                sessions: sessions.clone(),
            },
            Integrations {
                model: model.clone(),
                billing: billing.clone(),
            },
        );

        Self {
            state,
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
            model,
            billing,
        }
    }

    pub fn token(&self, user_id: &str, role: UserRole) -> String {
        self.state
            .jwt_service
            .create_token(user_id, &format!("{}@example.com", user_id), role)
            .unwrap()
    }

    pub fn bearer(&self, user_id: &str, role: UserRole) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", self.token(user_id, role)),
        )
    }

    /// A student record (and account) for `user_id` in `grade`.
    pub async fn seed_student(&self, user_id: &str, grade: &str) -> Student {
        self.students
            .create(Student::for_account(user_id, Some(grade)))
            .await
            .unwrap()
    }

    pub async fn seed_parent(&self, user_id: &str) -> Parent {
        self.parents.create(Parent::new(user_id)).await.unwrap()
    }

    /// Marks the initial assessment as done so the learning path opens.
    pub async fn seed_completed_assessment(&self, student_id: &str) {
        let snapshot = AssessmentSnapshot {
            answers: Vec::new(),
            grade: "3".to_string(),
            subjects_tested: vec!["Math".to_string()],
        };
        self.assessments
            .create(Assessment::initial(student_id, 100, 3, 3, snapshot))
            .await
            .unwrap();
    }

    /// Math → Fractions → two markdown lessons ordered 1 and 2.
    pub async fn seed_curriculum(&self) -> SeededCurriculum {
        let subject = self
            .curriculum
            .create_subject(Subject::new("Math", Some("Numbers and shapes")))
            .await
            .unwrap();
        let topic = self
            .curriculum
            .create_topic(Topic::new(&subject.id, "Fractions", None, 1))
            .await
            .unwrap();
        let first = self
            .curriculum
            .create_lesson(Lesson::new(
                &topic.id,
                "Halves",
                LessonContent::Markdown {
                    content_markdown: "# Halves".to_string(),
                },
                1,
                Some(10),
            ))
            .await
            .unwrap();
        let second = self
            .curriculum
            .create_lesson(Lesson::new(
                &topic.id,
                "Quarters video",
                LessonContent::Video {
                    content_url: "https://videos.example.com/quarters".to_string(),
                },
                2,
                None,
            ))
            .await
            .unwrap();

        SeededCurriculum {
            subject,
            topic,
            lessons: vec![first, second],
        }
    }

    /// One question of each type on the lesson, easiest first.
    pub async fn seed_quiz(&self, lesson_id: &str) -> Vec<Question> {
        let scope = QuestionScope::Lesson {
            lesson_id: lesson_id.to_string(),
        };
        let questions = vec![
            Question::new(
                scope.clone(),
                "Which is half of 8?",
                QuestionKind::MultipleChoice {
                    options: ["2", "4", "6"]
                        .iter()
                        .map(|t| QuestionOption {
                            text: t.to_string(),
                        })
                        .collect(),
                    correct_option_index: 1,
                },
                1,
            )
            .with_explanation("8 split into two equal parts is 4."),
            Question::new(
                scope.clone(),
                "A quarter is smaller than a half.",
                QuestionKind::TrueFalse {
                    correct_answer_text: "true".to_string(),
                },
                2,
            ),
            Question::new(
                scope,
                "What do we call the bottom number of a fraction?",
                QuestionKind::ShortAnswer {
                    correct_answer_text: "Denominator".to_string(),
                },
                3,
            )
            .with_explanation("The numerator sits on top."),
        ];

        for question in &questions {
            self.questions.create(question.clone()).await.unwrap();
        }
        questions
    }
}

pub struct SeededCurriculum {
    pub subject: Subject,
    pub topic: Topic,
    pub lessons: Vec<Lesson>,
}

/// Builds the full HTTP app over a [`TestContext`].
#[macro_export]
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.state.clone()))
                .app_data(actix_web::web::Data::new(
                    learnsmart_server::graphql::create_schema($ctx.state.clone()),
                ))
                .wrap(learnsmart_server::middleware::RequestIdMiddleware)
                .wrap(learnsmart_server::middleware::cors())
                .configure(learnsmart_server::handlers::configure),
        )
        .await
    };
}

/// Sends a [`actix_web::test::TestRequest`] and returns the status with the
/// decoded JSON body.
#[macro_export]
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}
