//! Delivery tests against a local [smtp4dev](https://github.com/rnwood/smtp4dev)
//! instance. Run with `SMTP4DEV_URL=http://127.0.0.1:5080/ cargo test -- --ignored`.

use std::time::Duration;

use folio_email_contracts::{Email, EmailService};
use folio_email_impl::EmailServiceImpl;
use serde::{de::DeserializeOwned, Deserialize};
use url::Url;
use uuid::Uuid;

const RELAY: &str = "Folio <relay@example.com>";

#[tokio::test]
#[ignore = "requires a running smtp4dev instance"]
async fn relay_account_as_sender() {
    // Arrange
    let smtp4dev = Smtp4Dev::connect().await;
    let email = relay().await;

    // Act
    let accepted = email
        .send(Email {
            sender: None,
            recipient: "owner@example.com".parse().unwrap(),
            subject: "Message from Jane Doe".into(),
            body: "Need a 5-page site".into(),
            reply_to: Some("Jane Doe <jane@example.com>".parse().unwrap()),
        })
        .await
        .unwrap();

    // Assert
    assert!(accepted);

    let received = smtp4dev.single_message().await;
    assert_eq!(received.from, "relay@example.com");
    assert_eq!(received.to, "owner@example.com");
    assert_eq!(received.subject, "Message from Jane Doe");

    let message = smtp4dev.message(received.id).await;
    assert!(message.has_plain_text_body);
    assert!(message
        .headers
        .iter()
        .any(|h| h.name == "Reply-To" && h.value.contains("jane@example.com")));
}

#[tokio::test]
#[ignore = "requires a running smtp4dev instance"]
async fn submitter_as_sender() {
    // Arrange
    let smtp4dev = Smtp4Dev::connect().await;
    let email = relay().await;

    // Act
    let accepted = email
        .send(Email {
            sender: Some("jane@example.com".parse().unwrap()),
            recipient: "owner@example.com".parse().unwrap(),
            subject: "Message from Jane Doe".into(),
            body: "Need a 5-page site".into(),
            reply_to: None,
        })
        .await
        .unwrap();

    // Assert
    assert!(accepted);

    let received = smtp4dev.single_message().await;
    assert_eq!(received.from, "jane@example.com");
    assert_eq!(received.to, "owner@example.com");
}

#[tokio::test]
#[ignore = "requires a running smtp4dev instance"]
async fn ping() {
    relay().await.ping().await.unwrap();
}

async fn relay() -> EmailServiceImpl {
    let url = std::env::var("SMTP_URL").unwrap_or_else(|_| "smtp://127.0.0.1:2525".into());
    EmailServiceImpl::new(&url, RELAY.parse().unwrap(), None, None)
        .await
        .unwrap()
}

/// Client for the smtp4dev web api.
struct Smtp4Dev {
    http: reqwest::Client,
    base: Url,
}

impl Smtp4Dev {
    /// Connects to the instance at `SMTP4DEV_URL` and empties its mailbox.
    async fn connect() -> Self {
        let base = std::env::var("SMTP4DEV_URL")
            .expect("SMTP4DEV_URL is not set")
            .parse()
            .expect("SMTP4DEV_URL is not a valid url");
        let smtp4dev = Self {
            http: reqwest::Client::new(),
            base,
        };

        smtp4dev
            .http
            .delete(smtp4dev.url("api/Messages/*"))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .unwrap();

        smtp4dev
    }

    fn url(&self, path: &str) -> Url {
        self.base.join(path).unwrap()
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> T {
        self.http
            .get(self.url(path))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    async fn single_message(&self) -> MessageSummary {
        for _ in 0..20 {
            let mut page = self.get::<Page<MessageSummary>>("api/Messages").await;
            if let Some(message) = page.results.pop() {
                assert!(page.results.is_empty(), "more than one message received");
                return message;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("no message received");
    }

    async fn message(&self, id: Uuid) -> Message {
        self.get(&format!("api/Messages/{id}")).await
    }
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct MessageSummary {
    id: Uuid,
    from: String,
    to: String,
    subject: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Message {
    headers: Vec<Header>,
    has_plain_text_body: bool,
}

#[derive(Debug, Deserialize)]
struct Header {
    name: String,
    value: String,
}
