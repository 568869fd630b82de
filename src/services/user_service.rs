use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::Session,
    errors::{AppError, AppResult},
    models::{
        domain::{Parent, Student, User, UserRole},
        dto::{
            request::CreateProfileRequest,
            response::{AchievementDto, ProfileDto},
        },
    },
    repositories::{AchievementRepository, ParentRepository, StudentRepository, UserRepository},
};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    students: Arc<dyn StudentRepository>,
    parents: Arc<dyn ParentRepository>,
    achievements: Arc<dyn AchievementRepository>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        students: Arc<dyn StudentRepository>,
        parents: Arc<dyn ParentRepository>,
        achievements: Arc<dyn AchievementRepository>,
    ) -> Self {
        Self {
            users,
            students,
            parents,
            achievements,
        }
    }

    /// Registers the profile for an authenticated account. Students get a
    /// student record, parents a parent record with no children. The role must
    /// match the one the account signed up with.
    pub async fn create_profile(
        &self,
        session: &Session,
        request: CreateProfileRequest,
    ) -> AppResult<ProfileDto> {
        request.validate()?;
        let user_id = session.user_id.as_str();

        if request.role == UserRole::Admin {
            return Err(AppError::Forbidden(
                "The admin role cannot be self-assigned".to_string(),
            ));
        }
        if request.role != session.role {
            return Err(AppError::Forbidden(format!(
                "This account cannot register as {}",
                request.role
            )));
        }
        if self.users.find_by_id(user_id).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Profile for user '{}' already exists",
                user_id
            )));
        }

        let user = User::new(
            user_id,
            &request.email,
            request.role,
            &request.first_name,
            &request.last_name,
            request.grade.as_deref(),
        );
        let user = self.users.create(user).await?;

        let (student, parent) = match user.role {
            UserRole::Student => {
                let student = Student::for_account(&user.id, user.grade.as_deref());
                (Some(self.students.create(student).await?), None)
            }
            UserRole::Parent => (None, Some(self.parents.create(Parent::new(&user.id)).await?)),
            UserRole::Admin => (None, None),
        };

        log::info!("Created {} profile for user {}", user.role, user.id);
        Ok(ProfileDto {
            user,
            student,
            parent,
        })
    }

    pub async fn find_user(&self, user_id: &str) -> AppResult<Option<User>> {
        self.users.find_by_id(user_id).await
    }

    pub async fn get_user(&self, user_id: &str) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile for user '{}' not found", user_id)))
    }

    pub async fn get_profile(&self, user_id: &str) -> AppResult<ProfileDto> {
        let user = self.get_user(user_id).await?;

        let (student, parent) = match user.role {
            UserRole::Student => (self.students.find_by_id(&user.id).await?, None),
            UserRole::Parent => (None, self.parents.find_by_id(&user.id).await?),
            UserRole::Admin => (None, None),
        };

        Ok(ProfileDto {
            user,
            student,
            parent,
        })
    }

    /// Newest first.
    pub async fn achievements(&self, student_id: &str) -> AppResult<Vec<AchievementDto>> {
        let achievements = self.achievements.list_for_student(student_id).await?;
        Ok(achievements.into_iter().map(AchievementDto::from).collect())
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }

    /// Admins change other users' roles. Nobody changes their own. The record
    /// the new role works on is created if the user has none yet.
    pub async fn change_role(
        &self,
        acting_user_id: &str,
        target_user_id: &str,
        role: UserRole,
    ) -> AppResult<User> {
        if acting_user_id == target_user_id {
            return Err(AppError::Forbidden(
                "You cannot change your own role".to_string(),
            ));
        }

        let user = self.users.update_role(target_user_id, role).await?;
        self.ensure_role_record(&user).await?;
        log::info!(
            "User {} changed role of {} to {}",
            acting_user_id,
            target_user_id,
            role
        );
        Ok(user)
    }

    async fn ensure_role_record(&self, user: &User) -> AppResult<()> {
        match user.role {
            UserRole::Student => {
                if self.students.find_by_id(&user.id).await?.is_none() {
                    let student = Student::for_account(&user.id, user.grade.as_deref());
                    self.students.create(student).await?;
                }
            }
            UserRole::Parent => {
                if self.parents.find_by_id(&user.id).await?.is_none() {
                    self.parents.create(Parent::new(&user.id)).await?;
                }
            }
            UserRole::Admin => {}
        }
        Ok(())
    }
}
