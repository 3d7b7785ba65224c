use crate::helpers::spawn_app;
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

fn valid_enquiry() -> serde_json::Value {
    json!({
        "name": "Alice",
        "email": "alice@example.com",
        "message": "Hello"
    })
}

#[tokio::test]
async fn enquire_returns_a_200_for_valid_data() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_enquiry(valid_enquiry()).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Enquiry sent successfully!" }));
}

#[tokio::test]
async fn enquire_dispatches_exactly_two_emails() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    // Act
    app.post_enquiry(valid_enquiry()).await;

    // Assert
    // Mock asserts on drop
}

#[tokio::test]
async fn enquire_sends_the_acknowledgement_before_the_operator_notification() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    // Act
    app.post_enquiry(valid_enquiry()).await;

    // Assert
    let requests = app.email_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let acknowledgement: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(acknowledgement["To"], "alice@example.com");
    assert_eq!(acknowledgement["From"], "tickets.storestash@gmail.com");
    assert!(acknowledgement.get("ReplyTo").is_none());
    let ack_text = acknowledgement["TextBody"].as_str().unwrap();
    assert!(ack_text.contains("Alice"));
    assert!(ack_text.contains("Hello"));

    let notification: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(notification["To"], "hello@storestash.co.uk");
    assert_eq!(notification["ReplyTo"], "alice@example.com");
    assert_eq!(notification["Subject"], "StoreStash Enquiry");
    let note_text = notification["TextBody"].as_str().unwrap();
    assert!(note_text.contains("Alice"));
    assert!(note_text.contains("alice@example.com"));
    assert!(note_text.contains("Hello"));
}

#[tokio::test]
async fn enquire_returns_a_400_when_data_is_missing_and_sends_nothing() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (json!({}), "missing every field"),
        (
            json!({ "email": "alice@example.com", "message": "Hello" }),
            "missing name",
        ),
        (
            json!({ "name": "Alice", "message": "Hello" }),
            "missing email",
        ),
        (
            json!({ "name": "Alice", "email": "alice@example.com" }),
            "missing message",
        ),
        (
            json!({ "name": "", "email": "alice@example.com", "message": "Hello" }),
            "empty name",
        ),
        (
            json!({ "name": "Alice", "email": "", "message": "Hello" }),
            "empty email",
        ),
        (
            json!({ "name": "Alice", "email": "alice@example.com", "message": "" }),
            "empty message",
        ),
    ];

    for (invalid_body, description) in test_cases {
        // Act
        let response = app.post_enquiry(invalid_body).await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload was {}.",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "All fields are required." }));
    }
}

#[tokio::test]
async fn enquire_returns_a_400_for_a_malformed_email_and_sends_nothing() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        ("not-an-email", "no at symbol"),
        ("alice@domain", "no dot after the at symbol"),
        ("@example.com", "empty local part"),
        ("alice smith@example.com", "whitespace in the local part"),
        ("alice@exa mple.com", "whitespace in the domain"),
        ("alice@example.", "dot at the end of the domain"),
    ];

    for (email, description) in test_cases {
        // Act
        let response = app
            .post_enquiry(json!({
                "name": "Alice",
                "email": email,
                "message": "Hello"
            }))
            .await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the email had {}.",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Invalid email address." }));
    }
}

#[tokio::test]
async fn enquire_accepts_a_minimally_shaped_email() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app
        .post_enquiry(json!({
            "name": "Alice",
            "email": "a@b.c",
            "message": "Hello"
        }))
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn enquire_returns_a_500_when_the_relay_rejects_the_first_send() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_enquiry(valid_enquiry()).await;

    // Assert
    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Failed to send enquiry." }));
}

#[tokio::test]
async fn enquire_returns_a_500_when_the_operator_notification_fails() {
    // Arrange
    let app = spawn_app().await;

    // First send (the acknowledgement) succeeds, then the relay starts
    // failing.
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .mount(&app.email_server)
        .await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_enquiry(valid_enquiry()).await;

    // Assert
    // The acknowledgement already went out and cannot be recalled; the
    // operation still fails as a whole.
    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Failed to send enquiry." }));
    let requests = app.email_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn resubmitting_after_a_failure_sends_a_fresh_pair_of_emails() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&app.email_server)
        .await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    // Act
    let first = app.post_enquiry(valid_enquiry()).await;
    let second = app.post_enquiry(valid_enquiry()).await;

    // Assert
    // No deduplication: the retry goes through the full pipeline again.
    assert_eq!(500, first.status().as_u16());
    assert_eq!(200, second.status().as_u16());
}
