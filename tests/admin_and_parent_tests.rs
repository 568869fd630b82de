mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use common::TestContext;
use learnsmart_server::{
    models::domain::{Achievement, LearningProgress, LearningSession, UserRole},
    repositories::{AchievementRepository, CurriculumRepository, SessionRepository},
};

fn send(method: &str, uri: &str, auth: (String, String), body: Value) -> test::TestRequest {
    let req = match method {
        "PUT" => test::TestRequest::put(),
        _ => test::TestRequest::post(),
    };
    req.uri(uri).insert_header(auth).set_json(body)
}

fn get(uri: &str, auth: (String, String)) -> test::TestRequest {
    test::TestRequest::get().uri(uri).insert_header(auth)
}

fn profile(role: &str, grade: Option<&str>) -> Value {
    json!({
        "email": "someone@example.com",
        "role": role,
        "first_name": "Sam",
        "last_name": "Lee",
        "grade": grade
    })
}

// ---------------------------------------------------------------------------
// Profiles and users
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn student_profile_gets_a_student_record() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let auth = || ctx.bearer("kid-1", UserRole::Student);

    let (status, created) = call_json!(
        app,
        send("POST", "/api/profile", auth(), profile("student", Some("4")))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user"]["id"], "kid-1");
    assert_eq!(created["user"]["role"], "student");
    assert_eq!(created["student"]["grade"], "4");
    assert!(created.get("parent").is_none());

    let (status, fetched) = call_json!(app, get("/api/profile", auth()));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["user"]["email"], "someone@example.com");
    assert_eq!(fetched["student"]["id"], "kid-1");
}

#[actix_web::test]
async fn parent_profile_starts_on_the_free_plan() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let (status, created) = call_json!(
        app,
        send(
            "POST",
            "/api/profile",
            ctx.bearer("mum-1", UserRole::Parent),
            profile("parent", None),
        )
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["parent"]["children"], json!([]));
    assert_eq!(created["parent"]["subscription_status"], "free");
}

#[actix_web::test]
async fn profiles_cannot_be_created_twice_or_as_admin() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let auth = || ctx.bearer("kid-1", UserRole::Student);

    let (status, _) = call_json!(
        app,
        send("POST", "/api/profile", auth(), profile("admin", None))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    call_json!(
        app,
        send("POST", "/api/profile", auth(), profile("student", Some("2")))
    );
    let (status, body) = call_json!(
        app,
        send("POST", "/api/profile", auth(), profile("student", Some("2")))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
}

#[actix_web::test]
async fn invalid_profile_email_is_rejected() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let mut body = profile("student", Some("2"));
    body["email"] = json!("not-an-email");
    let (status, _) = call_json!(
        app,
        send(
            "POST",
            "/api/profile",
            ctx.bearer("kid-1", UserRole::Student),
            body,
        )
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn missing_profile_is_404() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let (status, _) = call_json!(
        app,
        get("/api/profile", ctx.bearer("ghost", UserRole::Student))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn admins_change_other_users_roles_but_not_their_own() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    call_json!(
        app,
        send(
            "POST",
            "/api/profile",
            ctx.bearer("kid-1", UserRole::Student),
            profile("student", Some("3")),
        )
    );

    let (status, users) = call_json!(
        app,
        get("/api/admin/users", ctx.bearer("boss", UserRole::Admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().map(Vec::len), Some(1));

    let (status, user) = call_json!(
        app,
        send(
            "PUT",
            "/api/admin/users/kid-1/role",
            ctx.bearer("boss", UserRole::Admin),
            json!({ "role": "parent" }),
        )
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["role"], "parent");

    let (status, _) = call_json!(
        app,
        send(
            "PUT",
            "/api/admin/users/boss/role",
            ctx.bearer("boss", UserRole::Admin),
            json!({ "role": "student" }),
        )
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call_json!(
        app,
        send(
            "PUT",
            "/api/admin/users/nobody/role",
            ctx.bearer("boss", UserRole::Admin),
            json!({ "role": "student" }),
        )
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn role_change_takes_effect_on_the_next_request() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let kid = || ctx.bearer("kid-1", UserRole::Student);

    call_json!(
        app,
        send("POST", "/api/profile", kid(), profile("student", Some("3")))
    );
    let (status, _) = call_json!(app, get("/api/parent/children", kid()));
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call_json!(
        app,
        send(
            "PUT",
            "/api/admin/users/kid-1/role",
            ctx.bearer("boss", UserRole::Admin),
            json!({ "role": "parent" }),
        )
    );
    assert_eq!(status, StatusCode::OK);

    let (status, children) = call_json!(app, get("/api/parent/children", kid()));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(children, json!([]));

    let (status, _) = call_json!(
        app,
        send("POST", "/api/assessment/start", kid(), json!({}))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn profile_role_must_match_the_signed_up_role() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let kid = || ctx.bearer("kid-1", UserRole::Student);

    let (status, _) = call_json!(
        app,
        send("POST", "/api/profile", kid(), profile("parent", None))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call_json!(app, get("/api/profile", kid()));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn user_admin_is_closed_to_non_admins() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let (status, _) = call_json!(
        app,
        get("/api/admin/users", ctx.bearer("mum-1", UserRole::Parent))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn achievements_are_listed_newest_first() {
    let ctx = TestContext::new();
    let now = Utc::now();
    for (title, days_ago) in [("First lesson", 3), ("Perfect quiz", 0), ("Five day streak", 1)] {
        let mut achievement = Achievement::new("kid-1", "milestone", title);
        achievement.achieved_at = now - Duration::days(days_ago);
        ctx.achievements.create(achievement).await.unwrap();
    }
    let app = test_app!(ctx);

    let (status, body) = call_json!(
        app,
        get(
            "/api/students/me/achievements",
            ctx.bearer("kid-1", UserRole::Student),
        )
    );
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Perfect quiz", "Five day streak", "First lesson"]);
}

// ---------------------------------------------------------------------------
// Curriculum administration
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn admin_builds_a_curriculum() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let admin = || ctx.bearer("boss", UserRole::Admin);

    let (status, subject) = call_json!(
        app,
        send(
            "POST",
            "/api/admin/subjects",
            admin(),
            json!({ "name": "Science", "description": "The world around us" }),
        )
    );
    assert_eq!(status, StatusCode::CREATED);
    let subject_id = subject["id"].as_str().unwrap().to_string();

    let (status, topic) = call_json!(
        app,
        send(
            "POST",
            "/api/admin/topics",
            admin(),
            json!({ "subject_id": subject_id, "name": "Plants", "order": 1 }),
        )
    );
    assert_eq!(status, StatusCode::CREATED);
    let topic_id = topic["id"].as_str().unwrap().to_string();

    let lesson = |order: i32| {
        json!({
            "topic_id": topic_id,
            "title": format!("Lesson {}", order),
            "content_type": "markdown",
            "content_markdown": "# Roots and leaves",
            "order": order
        })
    };
    let (status, _) = call_json!(app, send("POST", "/api/admin/lessons", admin(), lesson(2)));
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = call_json!(app, send("POST", "/api/admin/lessons", admin(), lesson(1)));
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call_json!(app, send("POST", "/api/admin/lessons", admin(), lesson(1)));
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);

    let (status, lessons) = call_json!(
        app,
        get(&format!("/api/admin/lessons?topic_id={}", topic_id), admin())
    );
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = lessons
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|l| l["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Lesson 1", "Lesson 2"]);

    let (status, topics) = call_json!(
        app,
        get(&format!("/api/admin/topics?subject_id={}", subject_id), admin())
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(topics[0]["name"], "Plants");
}

#[actix_web::test]
async fn lessons_need_content_matching_their_type() {
    let ctx = TestContext::new();
    let seeded = ctx.seed_curriculum().await;
    let app = test_app!(ctx);

    let (status, _) = call_json!(
        app,
        send(
            "POST",
            "/api/admin/lessons",
            ctx.bearer("boss", UserRole::Admin),
            json!({
                "topic_id": seeded.topic.id,
                "title": "Thirds",
                "content_type": "video",
                "content_markdown": "# Thirds",
                "order": 3
            }),
        )
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn lesson_update_may_keep_its_own_position() {
    let ctx = TestContext::new();
    let seeded = ctx.seed_curriculum().await;
    let app = test_app!(ctx);
    let admin = || ctx.bearer("boss", UserRole::Admin);
    let first = &seeded.lessons[0];

    let body = |order: i32| {
        json!({
            "topic_id": seeded.topic.id,
            "title": "Halves, revised",
            "content_type": "markdown",
            "content_markdown": "# Halves again",
            "order": order
        })
    };

    let (status, updated) = call_json!(
        app,
        send("PUT", &format!("/api/admin/lessons/{}", first.id), admin(), body(1))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Halves, revised");

    let (status, _) = call_json!(
        app,
        send("PUT", &format!("/api/admin/lessons/{}", first.id), admin(), body(2))
    );
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn question_forms_are_validated() {
    let ctx = TestContext::new();
    let seeded = ctx.seed_curriculum().await;
    let app = test_app!(ctx);
    let admin = || ctx.bearer("boss", UserRole::Admin);
    let lesson_id = seeded.lessons[0].id.clone();

    let two_correct = json!({
        "lesson_id": lesson_id,
        "question_text": "Pick a half",
        "question_type": "multiple_choice",
        "options": [
            { "text": "1/2", "is_correct": true },
            { "text": "2/4", "is_correct": true }
        ],
        "difficulty": 2
    });
    let no_scope = json!({
        "question_text": "Is 1/2 bigger than 1/3?",
        "question_type": "true_false",
        "correct_answer_text": "true",
        "difficulty": 1
    });
    let bad_true_false = json!({
        "lesson_id": lesson_id,
        "question_text": "Is 1/2 bigger than 1/3?",
        "question_type": "true_false",
        "correct_answer_text": "maybe",
        "difficulty": 1
    });
    let too_hard = json!({
        "lesson_id": lesson_id,
        "question_text": "Name the top number",
        "question_type": "short_answer",
        "correct_answer_text": "numerator",
        "difficulty": 9
    });

    for body in [two_correct, no_scope, bad_true_false, too_hard] {
        let (status, _) = call_json!(app, send("POST", "/api/admin/questions", admin(), body));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, created) = call_json!(
        app,
        send(
            "POST",
            "/api/admin/questions",
            admin(),
            json!({
                "lesson_id": lesson_id,
                "question_text": "Is 1/2 bigger than 1/3?",
                "question_type": "true_false",
                "correct_answer_text": " True ",
                "difficulty": 1
            }),
        )
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["correct_answer_text"], "true");

    let (status, listed) = call_json!(
        app,
        get(&format!("/api/admin/questions?lesson_id={}", lesson_id), admin())
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn deleting_content_returns_no_content() {
    let ctx = TestContext::new();
    let seeded = ctx.seed_curriculum().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/lessons/{}", seeded.lessons[1].id))
        .insert_header(ctx.bearer("boss", UserRole::Admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/lessons/{}", seeded.lessons[1].id))
        .insert_header(ctx.bearer("boss", UserRole::Admin));
    let (status, _) = call_json!(app, req);
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn content_admin_is_closed_to_non_admins() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let (status, _) = call_json!(
        app,
        send(
            "POST",
            "/api/admin/subjects",
            ctx.bearer("kid-1", UserRole::Student),
            json!({ "name": "Art" }),
        )
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(ctx.curriculum.list_subjects().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Parents
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn parents_add_and_list_children_in_order() {
    let ctx = TestContext::new();
    ctx.seed_parent("mum-1").await;
    let app = test_app!(ctx);
    let auth = || ctx.bearer("mum-1", UserRole::Parent);

    for (first_name, grade) in [("Ada", "2"), ("Ben", "5"), ("Cy", "K")] {
        let (status, child) = call_json!(
            app,
            send(
                "POST",
                "/api/parent/children",
                auth(),
                json!({ "first_name": first_name, "last_name": "Lee", "grade": grade }),
            )
        );
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(child["parent_id"], "mum-1");
        assert_eq!(child["grade"], grade);
    }

    let (status, children) = call_json!(app, get("/api/parent/children", auth()));
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = children
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["first_name"].as_str())
        .collect();
    assert_eq!(names, vec!["Ada", "Ben", "Cy"]);
}

#[actix_web::test]
async fn child_overview_summarises_progress() {
    let ctx = TestContext::new();
    ctx.seed_parent("mum-1").await;
    let seeded = ctx.seed_curriculum().await;
    let app = test_app!(ctx);
    let auth = || ctx.bearer("mum-1", UserRole::Parent);

    let (_, child) = call_json!(
        app,
        send(
            "POST",
            "/api/parent/children",
            auth(),
            json!({ "first_name": "Ada", "last_name": "Lee", "grade": "2" }),
        )
    );
    let child_id = child["id"].as_str().unwrap().to_string();

    let mut progress = LearningProgress::completed_now(&child_id, &seeded.lessons[0].id);
    progress.score = 90.0;
    ctx.progress.insert(progress).await;

    for hours_ago in [3, 0, 6, 1, 5, 2, 4] {
        let mut session = LearningSession::new(&child_id, "Math", "quiz");
        session.points_earned = hours_ago;
        session.completed_at = Utc::now() - Duration::hours(hours_ago);
        ctx.sessions.create(session).await.unwrap();
    }

    let (status, overview) = call_json!(
        app,
        get(&format!("/api/parent/children/{}/overview", child_id), auth())
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["student"]["first_name"], "Ada");
    assert_eq!(overview["completed_lessons"], 1);
    assert_eq!(overview["total_lessons"], 2);
    assert_eq!(overview["average_score"], 90.0);
    assert_eq!(overview["achievements"], json!([]));

    let points: Vec<i64> = overview["recent_activity"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["points_earned"].as_i64())
        .collect();
    assert_eq!(points, vec![0, 1, 2, 3, 4]);
}

#[actix_web::test]
async fn students_record_and_read_their_recent_activity() {
    let ctx = TestContext::new();
    ctx.seed_student("kid-1", "4").await;
    let app = test_app!(ctx);
    let auth = || ctx.bearer("kid-1", UserRole::Student);

    let (status, recorded) = call_json!(
        app,
        send(
            "POST",
            "/api/students/me/activity",
            auth(),
            json!({
                "subject": " Science ",
                "activity_type": "lesson",
                "duration_minutes": 15,
                "points_earned": 20,
                "accuracy": 80.0
            }),
        )
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(recorded["subject"], "Science");

    let (status, _) = call_json!(
        app,
        send(
            "POST",
            "/api/students/me/activity",
            auth(),
            json!({
                "subject": "Science",
                "activity_type": "lesson",
                "duration_minutes": 15,
                "accuracy": 140.0
            }),
        )
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, activity) = call_json!(app, get("/api/students/me/activity", auth()));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(activity.as_array().map(Vec::len), Some(1));
    assert_eq!(activity[0]["duration_minutes"], 15);
    assert_eq!(activity[0]["accuracy"], 80.0);

    let (status, _) = call_json!(
        app,
        get("/api/students/me/activity", ctx.bearer("mum-1", UserRole::Parent))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn overview_of_someone_elses_child_is_forbidden() {
    let ctx = TestContext::new();
    ctx.seed_parent("mum-1").await;
    ctx.seed_parent("dad-2").await;
    ctx.seed_student("kid-9", "4").await;
    let app = test_app!(ctx);

    let (status, _) = call_json!(
        app,
        get(
            "/api/parent/children/kid-9/overview",
            ctx.bearer("dad-2", UserRole::Parent),
        )
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn subscription_status_follows_the_webhook() {
    let ctx = TestContext::new();
    ctx.seed_parent("mum-1").await;
    let app = test_app!(ctx);
    let auth = || ctx.bearer("mum-1", UserRole::Parent);

    let (_, before) = call_json!(app, get("/api/subscription", auth()));
    assert_eq!(before, json!({ "is_premium": false }));

    let req = test::TestRequest::post()
        .uri("/lemon-squeezy-webhook")
        .set_json(json!({
            "meta": {
                "event_name": "subscription_created",
                "custom_data": { "parent_id": "mum-1" }
            },
            "data": { "id": "sub-3", "attributes": { "status": "active" } }
        }));
    call_json!(app, req);

    let (_, after) = call_json!(app, get("/api/subscription", auth()));
    assert_eq!(after, json!({ "is_premium": true }));
}

#[actix_web::test]
async fn parent_routes_are_closed_to_students() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let (status, _) = call_json!(
        app,
        get("/api/parent/children", ctx.bearer("kid-1", UserRole::Student))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}
