use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{EnquirerEmail, EnquirerName, EnquiryMessage, NewEnquiry},
    email_client::EmailClient,
    startup::AppState,
};

#[derive(Deserialize)]
pub struct EnquiryForm {
    // Absent fields deserialize to "" so that missing and empty take the
    // same failure path.
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    message: String,
}

impl TryFrom<EnquiryForm> for NewEnquiry {
    type Error = EnquiryError;

    fn try_from(value: EnquiryForm) -> Result<Self, Self::Error> {
        // Presence is checked for every field before the email shape is.
        let name = EnquirerName::parse(value.name).map_err(|_| EnquiryError::FieldsMissing)?;
        let message =
            EnquiryMessage::parse(value.message).map_err(|_| EnquiryError::FieldsMissing)?;
        if value.email.is_empty() {
            return Err(EnquiryError::FieldsMissing);
        }
        let email = EnquirerEmail::parse(value.email).map_err(EnquiryError::InvalidEmail)?;
        Ok(Self {
            name,
            email,
            message,
        })
    }
}

#[derive(Serialize)]
struct EnquiryReceipt {
    message: &'static str,
}

#[derive(Serialize)]
struct EnquiryFailure {
    error: &'static str,
}

#[tracing::instrument(
    name = "Submitting a new enquiry",
    skip(form, app_state),
    fields(
        enquirer_name = %form.name,
        enquirer_email = %form.email
    )
)]
pub async fn enquire(
    State(app_state): State<Arc<AppState>>,
    Json(form): Json<EnquiryForm>,
) -> Result<impl IntoResponse, EnquiryError> {
    let enquiry: NewEnquiry = form.try_into()?;

    // Acknowledgement goes out first; the operator copy is only attempted
    // once the submitter's copy has been handed to the transport. A failure
    // of the second send cannot recall the first.
    send_acknowledgement_email(&app_state.email_client, &enquiry).await?;
    send_operator_notification(&app_state.email_client, &app_state.operator_inbox, &enquiry)
        .await?;

    Ok(Json(EnquiryReceipt {
        message: "Enquiry sent successfully!",
    }))
}

#[tracing::instrument(
    name = "Send an acknowledgement email to the enquirer",
    skip(email_client, enquiry)
)]
pub async fn send_acknowledgement_email(
    email_client: &EmailClient,
    enquiry: &NewEnquiry,
) -> Result<(), reqwest::Error> {
    let plain_body = format!(
        "Hi {},\n\nThanks for getting in touch with StoreStash. We've received your enquiry and will reply as soon as we can.\n\nYour message:\n{}\n",
        enquiry.name.as_ref(),
        enquiry.message.as_ref()
    );
    let html_body = format!(
        "<p>Hi {},</p><p>Thanks for getting in touch with StoreStash. We've received your enquiry and will reply as soon as we can.</p><p>Your message:</p><p>{}</p>",
        enquiry.name.as_ref(),
        enquiry.message.as_ref()
    );
    email_client
        .send_email(
            &enquiry.email,
            None,
            "We've received your enquiry",
            &html_body,
            &plain_body,
        )
        .await
}

#[tracing::instrument(
    name = "Send an enquiry notification to the operator inbox",
    skip(email_client, operator_inbox, enquiry)
)]
pub async fn send_operator_notification(
    email_client: &EmailClient,
    operator_inbox: &EnquirerEmail,
    enquiry: &NewEnquiry,
) -> Result<(), reqwest::Error> {
    let plain_body = format!(
        "{}\n\nFrom: {} ({})",
        enquiry.message.as_ref(),
        enquiry.name.as_ref(),
        enquiry.email.as_ref()
    );
    let html_body = format!(
        "<p>{}</p><p>From: {} ({})</p>",
        enquiry.message.as_ref(),
        enquiry.name.as_ref(),
        enquiry.email.as_ref()
    );
    email_client
        .send_email(
            operator_inbox,
            Some(&enquiry.email),
            "StoreStash Enquiry",
            &html_body,
            &plain_body,
        )
        .await
}

#[derive(thiserror::Error, Debug)]
pub enum EnquiryError {
    #[error("a required enquiry field was empty or missing")]
    FieldsMissing,
    #[error("invalid enquirer email, {0}")]
    InvalidEmail(String),
    #[error("couldn't deliver enquiry email, reqwest error {0}")]
    Delivery(#[from] reqwest::Error),
}

impl IntoResponse for EnquiryError {
    fn into_response(self) -> Response {
        match self {
            EnquiryError::FieldsMissing => {
                tracing::warn!("{}", EnquiryError::FieldsMissing);
                (
                    StatusCode::BAD_REQUEST,
                    Json(EnquiryFailure {
                        error: "All fields are required.",
                    }),
                )
                    .into_response()
            }
            EnquiryError::InvalidEmail(e) => {
                tracing::warn!("{}", e);
                (
                    StatusCode::BAD_REQUEST,
                    Json(EnquiryFailure {
                        error: "Invalid email address.",
                    }),
                )
                    .into_response()
            }
            EnquiryError::Delivery(e) => {
                // The cause stays in the logs; the caller only sees the
                // generic message.
                tracing::error!("{}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(EnquiryFailure {
                        error: "Failed to send enquiry.",
                    }),
                )
                    .into_response()
            }
        }
    }
}
