use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::EnquirerEmail;

/// Long-lived handle to the mail relay. Built once at startup and shared
/// across request handlers; holds the connection pool, the fixed sender
/// address and the relay credentials.
#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: EnquirerEmail,
    username: String,
    password: SecretString,
}

impl EmailClient {
    pub fn new(
        sender: EnquirerEmail,
        base_url: String,
        username: String,
        password: SecretString,
        timeout: std::time::Duration,
    ) -> Self {
        let http_client = Client::builder().timeout(timeout).build().unwrap();
        Self {
            http_client,
            base_url,
            sender,
            username,
            password,
        }
    }

    pub async fn send_email(
        &self,
        recipient: &EnquirerEmail,
        reply_to: Option<&EnquirerEmail>,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/email", self.base_url);
        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: recipient.as_ref(),
            reply_to: reply_to.map(AsRef::as_ref),
            subject,
            html_body,
            text_body,
        };
        self.http_client
            .post(&url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}
