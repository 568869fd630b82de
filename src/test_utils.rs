use crate::{
    auth::Session,
    models::domain::{Lesson, LessonContent, Question, QuestionKind, QuestionOption, QuestionScope, UserRole},
};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A session for `user_id` with an `@example.com` email.
    pub fn session(user_id: &str, role: UserRole) -> Session {
        Session {
            user_id: user_id.to_string(),
            email: format!("{}@example.com", user_id),
            role,
        }
    }

    pub fn markdown_lesson(topic_id: &str, title: &str, order: i32) -> Lesson {
        Lesson::new(
            topic_id,
            title,
            LessonContent::Markdown {
                content_markdown: format!("# {}", title),
            },
            order,
            Some(10),
        )
    }

    /// Options `3`, `4`, `5` with `4` correct.
    pub fn multiple_choice_question(lesson_id: &str) -> Question {
        Question::new(
            QuestionScope::Lesson {
                lesson_id: lesson_id.to_string(),
            },
            "What is 2 + 2?",
            QuestionKind::MultipleChoice {
                options: ["3", "4", "5"]
                    .iter()
                    .map(|t| QuestionOption {
                        text: t.to_string(),
                    })
                    .collect(),
                correct_option_index: 1,
            },
            1,
        )
        .with_explanation("Two pairs make four.")
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::test_helpers::*;
    use crate::models::domain::UserRole;
    use actix_web::http::StatusCode;

    #[test]
    fn test_fixtures_session() {
        let session = session("kid", UserRole::Student);
        assert_eq!(session.email, "kid@example.com");
        assert!(!session.is_admin());
    }

    #[test]
    fn test_fixtures_question_is_answerable() {
        let question = multiple_choice_question("lesson-1");
        assert_eq!(question.kind.correct_answer_label().as_deref(), Some("4"));
        assert!(question.explanation.is_some());
    }

    #[test]
    fn test_fixtures_lesson_is_markdown() {
        let lesson = markdown_lesson("topic-1", "Halves", 1);
        assert_eq!(lesson.content.content_type(), "markdown");
        assert_eq!(lesson.order, 1);
    }

    #[test]
    fn test_status_helpers() {
        assert_success_status(StatusCode::CREATED);
        assert_error_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}
