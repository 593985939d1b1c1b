//! Integration tests for `PushoverNotifier` against a wiremock server.

use offerwatch_core::PushoverCredentials;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use offerwatch_notify::{Delivery, NotifyError, PushoverNotifier};

fn credentials() -> PushoverCredentials {
    PushoverCredentials {
        api_token: "app-token".to_string(),
        user_key: "user-key".to_string(),
    }
}

fn test_notifier(server: &MockServer) -> PushoverNotifier {
    let endpoint = format!("{}/1/messages.json", server.uri());
    PushoverNotifier::with_endpoint(Some(credentials()), 5, &endpoint)
        .expect("failed to build test notifier")
}

#[tokio::test]
async fn notify_offer_posts_expected_form_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1/messages.json"))
        .and(body_string_contains("token=app-token"))
        .and(body_string_contains("user=user-key"))
        .and(body_string_contains("title=New+offer+detected"))
        .and(body_string_contains("Mountain+Bike+Like+New"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"status\":1}"))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = test_notifier(&server);
    let delivery = notifier
        .notify_offer(
            "Mountain Bike Like New",
            "$45.000",
            "https://www.facebook.com/marketplace/item/12345678901/",
        )
        .await
        .expect("delivery");

    assert_eq!(delivery, Delivery::Sent);
}

#[tokio::test]
async fn notify_offer_surfaces_non_2xx_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1/messages.json"))
        .respond_with(ResponseTemplate::new(400).set_body_string("{\"status\":0}"))
        .mount(&server)
        .await;

    let notifier = test_notifier(&server);
    let result = notifier
        .notify_offer("Mountain Bike", "$45.000", "https://example.com/item/1")
        .await;

    match result {
        Err(NotifyError::UnexpectedStatus { status }) => assert_eq!(status, 400),
        other => panic!("expected UnexpectedStatus(400), got: {other:?}"),
    }
}

#[tokio::test]
async fn disabled_notifier_never_contacts_the_transport() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let endpoint = format!("{}/1/messages.json", server.uri());
    let notifier =
        PushoverNotifier::with_endpoint(None, 5, &endpoint).expect("disabled notifier");
    let delivery = notifier
        .notify_offer("Mountain Bike", "$45.000", "https://example.com/item/1")
        .await
        .expect("no-op");

    assert_eq!(delivery, Delivery::SkippedNoCredentials);
}
