use mobprog::app::App;
use mobprog::backend::Collaborators;
use mobprog::router::{NavEvent, Route};
use mobprog::screens::{LoginField, RegisterField, SubmitOutcome};
use mobprog::Supabase;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_body(email: &str) -> serde_json::Value {
    json!({
        "access_token": "user_access_token",
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "user_refresh_token",
        "user": { "id": Uuid::new_v4().to_string(), "email": email }
    })
}

fn app_for(server: &MockServer) -> App {
    App::new(Collaborators::supabase(Supabase::new(&server.uri(), "test_anon_key")))
}

#[tokio::test]
async fn login_reaches_homepage() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(body_json(json!({ "email": "a@b.com", "password": "secret1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("a@b.com")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    let form = app.login_form().unwrap();
    form.change(LoginField::Email, "a@b.com");
    form.change(LoginField::Password, "secret1");

    let submission = app.submit().await.unwrap();
    assert_eq!(submission.outcome, SubmitOutcome::Succeeded);
    assert!(submission.form_view.contains_text("Logged in successfully!"));
    assert_eq!(app.navigator().events(), &[NavEvent::Push(Route::Homepage)]);
    assert!(app.render().contains_text("THIS IS THE HOMEPAGE"));
}

#[tokio::test]
async fn homepage_without_session_redirects() {
    let mock_server = MockServer::start().await;

    let mut app = app_for(&mock_server);
    app.open("/homepage").await;

    assert_eq!(
        app.navigator().events(),
        &[
            NavEvent::Push(Route::Homepage),
            NavEvent::Replace(Route::Restricted)
        ]
    );
    let view = app.render();
    assert!(!view.contains_text("THIS IS THE HOMEPAGE"));
    assert!(view.contains_text("Unrestricted Access"));
}

#[tokio::test]
async fn bad_email_sends_nothing() {
    let mock_server = MockServer::start().await;

    let mut app = app_for(&mock_server);
    let form = app.login_form().unwrap();
    form.change(LoginField::Email, "nobody.example.com");
    form.change(LoginField::Password, "secret1");

    let submission = app.submit().await.unwrap();
    assert_eq!(submission.outcome, SubmitOutcome::Invalid);
    assert!(app.render().contains_text("Invalid email"));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

fn fill_registration(app: &mut App, email: &str) {
    let form = app.register_form().unwrap();
    form.change(RegisterField::Username, "alice");
    form.change(RegisterField::Email, email);
    form.change(RegisterField::Password, "secret1");
}

#[tokio::test]
async fn registration_writes_profile_as_new_user() {
    let mock_server = MockServer::start().await;
    let email = format!("test-{}@example.com", Uuid::new_v4());

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body(&email)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .and(header("apikey", "test_anon_key"))
        .and(header("Authorization", "Bearer user_access_token"))
        .and(header("Prefer", "return=minimal"))
        .and(body_json(json!([{ "username": "alice", "email": email }])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    app.open("/register").await;
    fill_registration(&mut app, &email);

    let submission = app.submit().await.unwrap();
    assert_eq!(submission.outcome, SubmitOutcome::Succeeded);
    assert_eq!(app.navigator().current(), &Route::Register);
    assert!(app.render().contains_text("Registration successful!"));
}

#[tokio::test]
async fn failed_sign_up_never_inserts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": 422,
            "error_code": "user_already_exists",
            "msg": "User already registered"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    app.open("/register").await;
    fill_registration(&mut app, "alice@example.com");

    let submission = app.submit().await.unwrap();
    assert_eq!(submission.outcome, SubmitOutcome::Failed);
    assert!(app.render().contains_text("User already registered"));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn failed_insert_keeps_credential_and_shows_insert_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pending_user",
            "email": "alice@example.com"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .and(header("Authorization", "Bearer test_anon_key"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "details": "Key (email)=(alice@example.com) already exists.",
            "hint": null,
            "message": "duplicate key value violates unique constraint \"users_email_key\""
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    app.open("/register").await;
    fill_registration(&mut app, "alice@example.com");

    let submission = app.submit().await.unwrap();
    assert_eq!(submission.outcome, SubmitOutcome::Failed);
    assert!(app
        .render()
        .contains_text("duplicate key value violates unique constraint"));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
    assert!(app.render().contains_text("[ REGISTER ]"));
}
