use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use tracing::{debug, error};

use super::{failure, success};
use crate::models::contact::ApiContactSubmission;

pub const PATH: &str = "/api/contact";

pub const SENT_MESSAGE: &str = "Message sent successfully";
pub const FAILED_MESSAGE: &str = "Failed to send message";
pub const INVALID_MESSAGE: &str = "Invalid contact submission";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(PATH, routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactFeatureService>>,
    payload: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            debug!("rejected contact submission: {}", rejection.body_text());
            return failure(rejection.status(), INVALID_MESSAGE);
        }
    };

    match service.send_message(submission.into()).await {
        Ok(()) => success(SENT_MESSAGE),
        Err(ContactSendMessageError::Send) => {
            failure(StatusCode::INTERNAL_SERVER_ERROR, FAILED_MESSAGE)
        }
        Err(ContactSendMessageError::Other(err)) => {
            error!("Failed to send contact message: {err:#}");
            failure(StatusCode::INTERNAL_SERVER_ERROR, FAILED_MESSAGE)
        }
    }
}
