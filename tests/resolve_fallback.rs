// End-to-end resolution against real sockets: dead candidates that refuse
// connections and a live stub backend on an ephemeral port.
mod support;

use std::time::Duration;

use report_client::domain::environment::{Platform, RuntimeEnv};
use report_client::domain::errors::ClientError;
use report_client::domain::report::{Attachment, Category, ReportDraft, SignupForm};
use report_client::domain::resolution::AttemptError;
use report_client::interface_adapters::api::ApiClient;
use report_client::interface_adapters::http::ReqwestTransport;
use report_client::use_cases::resolve::Resolver;
use report_client::use_cases::{auth, browse_reports};

fn resolver() -> Resolver<ReqwestTransport> {
    Resolver::new(ReqwestTransport::new(), Duration::from_secs(2))
}

fn signup_form(username: &str) -> SignupForm {
    SignupForm {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        username: username.to_string(),
        email: "ada@example.org".to_string(),
        password: "secret123".to_string(),
        confirm_password: "secret123".to_string(),
        ..SignupForm::default()
    }
}

#[tokio::test]
async fn when_earlier_candidates_are_dead_then_the_live_backend_serves_reports() {
    let live = support::spawn_stub().await;
    let candidates = vec![support::dead_candidate(), support::dead_candidate(), live.clone()];

    let (base, page) = browse_reports::list_reports(&resolver(), &candidates, 1)
        .await
        .expect("expected the live backend to answer");

    assert_eq!(base, live);
    assert_eq!(page.count, 2);
    assert_eq!(page.results.len(), 2);
    assert!(page.next.is_some());
}

#[tokio::test]
async fn when_submission_is_rejected_then_no_later_candidate_is_tried() {
    let live = support::spawn_stub().await;
    let candidates = vec![live.clone(), support::dead_candidate()];

    let error = auth::signup(&resolver(), &candidates, &signup_form("taken"))
        .await
        .expect_err("expected a definitive rejection");

    match error {
        ClientError::Resolve(err) => {
            assert!(err.definitive);
            assert_eq!(err.attempted, vec![live]);
            assert_eq!(err.to_string(), "HTTP 400: username: already taken");
        }
        other => panic!("expected resolve error, got {other:?}"),
    }
}

#[tokio::test]
async fn when_every_candidate_is_dead_then_all_bases_are_reported_in_order() {
    let candidates = vec![
        support::dead_candidate(),
        support::dead_candidate(),
        support::dead_candidate(),
    ];

    let error = browse_reports::list_reports(&resolver(), &candidates, 1)
        .await
        .expect_err("expected exhaustion");

    match error {
        ClientError::Resolve(err) => {
            assert!(!err.definitive);
            assert_eq!(err.attempted, candidates);
            assert!(matches!(err.last_error, AttemptError::Connect(_)));
        }
        other => panic!("expected resolve error, got {other:?}"),
    }
}

#[tokio::test]
async fn when_report_is_missing_on_the_only_host_then_the_read_flow_exhausts_with_404() {
    let live = support::spawn_stub().await;
    let candidates = vec![live];

    let error = browse_reports::get_report(&resolver(), &candidates, 999)
        .await
        .expect_err("expected exhaustion");

    match error {
        ClientError::Resolve(err) => {
            assert!(!err.definitive);
            assert!(matches!(
                err.last_error,
                AttemptError::Status { status: 404, .. }
            ));
        }
        other => panic!("expected resolve error, got {other:?}"),
    }
}

// The override path exercises the whole facade: trailing slash stripping,
// candidate computation, and every flow against one live backend.
#[tokio::test]
async fn when_an_override_is_set_then_the_facade_runs_every_flow_against_it() {
    let live = support::spawn_stub().await;
    let client = ApiClient::new(RuntimeEnv {
        api_url_override: Some(format!("{live}/")),
        platform: Platform::Ios,
        dev_host: None,
    });

    assert_eq!(client.candidates(), vec![live.clone()]);

    let (_, detail) = client.seed_reports().await.expect("seed should succeed");
    assert_eq!(detail, "Seeded");

    let (_, session) = client
        .login("ada", "secret123")
        .await
        .expect("login should succeed");
    assert_eq!(session.token, "stub-login-token");

    let (_, report) = client.get_report(1).await.expect("detail should succeed");
    assert_eq!(report.title, "Pothole on Main Street");

    let (_, page_two) = client.list_reports(2).await.expect("page 2 should succeed");
    assert!(page_two.previous.is_some());
    assert!(page_two.results.is_empty());
}

#[tokio::test]
async fn when_a_draft_carries_attachments_then_the_multipart_submission_goes_through() {
    let live = support::spawn_stub().await;
    let client = ApiClient::new(RuntimeEnv {
        api_url_override: Some(live),
        platform: Platform::Android,
        dev_host: None,
    });

    let draft = ReportDraft {
        name: "guest".to_string(),
        category: Category::Garbage,
        description: "Overflowing bin at the park entrance".to_string(),
        location: "Central Park".to_string(),
        coords: Some((51.5074, -0.1278)),
        photo: Some(Attachment {
            file_name: "report.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        }),
        voice: Some(Attachment {
            file_name: "voice.m4a".to_string(),
            content_type: "audio/m4a".to_string(),
            bytes: vec![0u8; 32],
        }),
    };

    let (_, report) = client
        .submit_report(&draft)
        .await
        .expect("multipart submission should succeed");

    assert_eq!(report.id, 7);
}

#[tokio::test]
async fn when_login_is_rejected_then_the_error_carries_the_server_message() {
    let live = support::spawn_stub().await;
    let client = ApiClient::new(RuntimeEnv {
        api_url_override: Some(live),
        platform: Platform::Ios,
        dev_host: None,
    });

    let error = client
        .login("ada", "wrong")
        .await
        .expect_err("expected a definitive rejection");

    match error {
        ClientError::Resolve(err) => {
            assert!(err.definitive);
            assert_eq!(
                err.to_string(),
                "HTTP 400: non_field_errors: invalid credentials"
            );
        }
        other => panic!("expected resolve error, got {other:?}"),
    }
}
