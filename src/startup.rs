use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::Request,
    response::Response,
    routing::{get, post},
    serve::Serve,
};
use tokio::net::TcpListener;
use tower_http::{services::ServeFile, trace::TraceLayer};
use tracing::{Span, info, info_span};
use uuid::Uuid;

use crate::{
    configuration::Settings,
    domain::EnquirerEmail,
    email_client::EmailClient,
    routes::{enquire, health_check, index},
};

pub struct AppState {
    pub email_client: EmailClient,
    pub operator_inbox: EnquirerEmail,
}

pub async fn run(
    listener: TcpListener,
    email_client: EmailClient,
    operator_inbox: EnquirerEmail,
) -> anyhow::Result<Serve<TcpListener, Router, Router>> {
    // Wrapped in an Arc pointer to allow cheap cloning of AppState across handlers.
    // This prevents unnecessary cloning of EmailClient, which holds the relay
    // credentials as String fields, since cloning an Arc is negligible.
    let app_state = Arc::new(AppState {
        email_client,
        operator_inbox,
    });
    let app = Router::new()
        .route("/", get(index))
        .route("/health_check", get(health_check))
        .route("/api/enquire", post(enquire))
        .nest_service("/site.css", ServeFile::new("static/site.css"))
        .with_state(app_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let request_id = Uuid::new_v4();
                    info_span!(
                        "http_request",
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        request_id = ?request_id,
                    )
                })
                .on_response(|response: &Response, latency: Duration, span: &Span| {
                    let status = response.status();
                    let headers = response.headers();
                    span.record("status", &status.as_u16());
                    info!(parent: span, ?status, ?headers, ?latency, "Response sent");
                }),
        );

    Ok(axum::serve(listener, app))
}

pub struct Application {
    port: u16,
    server: Serve<TcpListener, Router, Router>,
}

impl Application {
    // build is the one that invokes the `run()` function
    // then any fn invokes `run_until_stopped`
    pub async fn build(configuration: Settings) -> anyhow::Result<Self> {
        let sender_email = configuration
            .email_client
            .sender()
            .expect("Invalid sender email address.");
        let operator_inbox = configuration
            .email_client
            .operator()
            .expect("Invalid operator inbox address.");
        let timeout = configuration.email_client.timeout();
        let email_client = EmailClient::new(
            sender_email,
            configuration.email_client.base_url,
            configuration.email_client.username,
            configuration.email_client.password,
            timeout,
        );

        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        ))
        .await?;
        let port = listener.local_addr()?.port();

        let server = run(listener, email_client, operator_inbox).await.unwrap();

        Ok(Self { server, port })
    }

    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        Ok(self.server.await?)
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}
