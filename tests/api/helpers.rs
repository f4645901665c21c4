use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use optin::{
    domain::SubscriberEmail,
    email_client::EmailClient,
    store::InMemoryStore,
    telemetry::{get_subscriber, init_subscriber},
};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub email_server: MockServer,
    pub api_client: reqwest::Client,
}

pub struct ConfirmationLinks {
    pub confirm: reqwest::Url,
    pub unsubscribe: reqwest::Url,
}

impl TestApp {
    pub async fn post_subscribe(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/subscribe", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_confirm(&self, token: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}/subscribe/confirm", self.address))
            .query(&[("token", token)])
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_unsubscribe(&self, token: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}/subscribe/unsubscribe", self.address))
            .query(&[("token", token)])
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub fn get_confirmation_links(&self, email_request: &wiremock::Request) -> ConfirmationLinks {
        let body: serde_json::Value = serde_json::from_slice(&email_request.body).unwrap();
        let html = body["html"].as_str().unwrap();

        let get_link = |needle: &str| {
            let links: Vec<_> = linkify::LinkFinder::new()
                .links(html)
                .filter(|l| l.as_str().contains(needle))
                .collect();
            assert_eq!(links.len(), 1);
            reqwest::Url::parse(links[0].as_str()).unwrap()
        };

        ConfirmationLinks {
            confirm: get_link("/subscribe/confirm"),
            unsubscribe: get_link("/subscribe/unsubscribe"),
        }
    }
}

pub async fn mount_email_ok(app: &TestApp) {
    Mock::given(path("v1/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let email_client = EmailClient::new(
        email_server.uri(),
        SubscriberEmail::parse("updates@optin.dev".to_string()).unwrap(),
        SecretString::from("test-token"),
        Duration::from_millis(200),
    );

    let store = Arc::new(InMemoryStore::default());

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port.");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{port}");

    let server = optin::startup::run(listener, store.clone(), email_client, address.clone())
        .expect("Failed to bind address.");

    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        email_server,
        api_client: reqwest::Client::new(),
    }
}
