use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Parent, Student, SubscriptionStatus},
        dto::{
            request::AddChildRequest,
            response::{AchievementDto, ChildOverviewDto},
        },
    },
    repositories::{AchievementRepository, ParentRepository, StudentRepository},
    services::{activity_service::ActivityService, learning_path_service::LearningPathService},
};

pub struct ParentService {
    parents: Arc<dyn ParentRepository>,
    students: Arc<dyn StudentRepository>,
    achievements: Arc<dyn AchievementRepository>,
    learning_paths: Arc<LearningPathService>,
    activity: Arc<ActivityService>,
}

impl ParentService {
    pub fn new(
        parents: Arc<dyn ParentRepository>,
        students: Arc<dyn StudentRepository>,
        achievements: Arc<dyn AchievementRepository>,
        learning_paths: Arc<LearningPathService>,
        activity: Arc<ActivityService>,
    ) -> Self {
        Self {
            parents,
            students,
            achievements,
            learning_paths,
            activity,
        }
    }

    async fn get_parent(&self, parent_id: &str) -> AppResult<Parent> {
        self.parents
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Parent '{}' not found", parent_id)))
    }

    pub async fn add_child(&self, parent_id: &str, request: AddChildRequest) -> AppResult<Student> {
        request.validate()?;
        self.get_parent(parent_id).await?;

        let child = Student::new_child(
            parent_id,
            request.first_name.trim(),
            request.last_name.trim(),
            &request.grade,
            request.date_of_birth,
        );
        let child = self.students.create(child).await?;
        self.parents.add_child(parent_id, &child.id).await?;

        log::info!("Parent {} added child {}", parent_id, child.id);
        Ok(child)
    }

    /// In the order the children were added.
    pub async fn list_children(&self, parent_id: &str) -> AppResult<Vec<Student>> {
        let parent = self.get_parent(parent_id).await?;
        let mut students = self.students.find_by_ids(&parent.children).await?;
        students.sort_by_key(|s| {
            parent
                .children
                .iter()
                .position(|c| *c == s.id)
                .unwrap_or(usize::MAX)
        });
        Ok(students)
    }

    pub async fn child_overview(
        &self,
        parent_id: &str,
        child_id: &str,
    ) -> AppResult<ChildOverviewDto> {
        let parent = self.get_parent(parent_id).await?;
        if !parent.has_child(child_id) {
            return Err(AppError::Forbidden(format!(
                "Student '{}' is not your child",
                child_id
            )));
        }

        let student = self
            .students
            .find_by_id(child_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student '{}' not found", child_id)))?;

        let (summary, achievements, recent_activity) = tokio::try_join!(
            self.learning_paths.summary(child_id),
            self.achievements.list_for_student(child_id),
            self.activity.recent(child_id),
        )?;

        Ok(ChildOverviewDto {
            student,
            completed_lessons: summary.completed_lessons,
            total_lessons: summary.total_lessons,
            average_score: summary.average_score,
            achievements: achievements.into_iter().map(AchievementDto::from).collect(),
            recent_activity,
        })
    }

    pub async fn is_premium(&self, parent_id: &str) -> AppResult<bool> {
        let parent = self.get_parent(parent_id).await?;
        Ok(parent.subscription_status == SubscriptionStatus::Paid)
    }
}
