//! # Submission Service
//!
//! Backs `POST /api/forms/{kind}/create` and `POST /api/forms/{kind}/update`.
//!
//! The body is the coerced data built by the client, but it is never trusted:
//! it is converted back into raw field values and cleaned again with the same
//! schema the client used. Only then is it normalized through the typed record
//! and stored. Every answer carries a `SubmissionResult`, so the client can
//! show the error text whatever the status code.

use actix_web::{web, HttpResponse, Responder};
use common::forms::error::{FormError, ValidationErrors};
use common::forms::FormKind;
use common::model::submission::{FormMode, SubmissionResult};
use log::{info, warn};
use serde_json::{Map, Value};

use crate::store::records::StoreError;
use crate::store::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// First validation message, in field order.
    #[error("{0}")]
    Invalid(String),
    #[error("{0} form is not available")]
    Unavailable(FormKind),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub async fn process_create(
    state: web::Data<AppState>,
    kind: web::Path<FormKind>,
    body: web::Json<Map<String, Value>>,
) -> impl Responder {
    respond(submit(&state, kind.into_inner(), FormMode::Create, body.into_inner()).await)
}

pub async fn process_update(
    state: web::Data<AppState>,
    kind: web::Path<FormKind>,
    body: web::Json<Map<String, Value>>,
) -> impl Responder {
    respond(submit(&state, kind.into_inner(), FormMode::Update, body.into_inner()).await)
}

fn respond(outcome: Result<i64, SubmitError>) -> HttpResponse {
    match outcome {
        Ok(_) => HttpResponse::Ok().json(SubmissionResult::ok()),
        Err(e) => {
            let body = SubmissionResult::failure(e.to_string());
            match e {
                SubmitError::Store(StoreError::NotFound) => HttpResponse::NotFound().json(body),
                SubmitError::Unavailable(_) => HttpResponse::ServiceUnavailable().json(body),
                _ => HttpResponse::BadRequest().json(body),
            }
        }
    }
}

/// Validates `body` with `kind`'s schema and stores it. Returns the record id.
pub async fn submit(
    state: &AppState,
    kind: FormKind,
    mode: FormMode,
    body: Map<String, Value>,
) -> Result<i64, SubmitError> {
    let definition = state
        .definition(kind)
        .ok_or(SubmitError::Unavailable(kind))?;
    let schema = &definition.schema;

    let rejected = |errors: ValidationErrors| {
        let message = schema
            .first_error(&errors)
            .map(|(_, message)| message.to_string())
            .unwrap_or_else(|| "Invalid submission".to_string());
        warn!("Rejected {mode} {kind}: {message}");
        SubmitError::Invalid(message)
    };
    let input = schema.input_from_payload(&body).map_err(rejected)?;
    let cleaned = schema.clean(&input).map_err(rejected)?;

    let mut data = cleaned.to_json();
    if mode == FormMode::Create {
        data.remove("id");
    }
    let Value::Object(record) = kind.normalize(data)? else {
        return Err(FormError::Invalid(format!("{kind} record is not an object")).into());
    };

    let id = match mode {
        FormMode::Create => state.store.create(kind, record).await,
        FormMode::Update => state.store.update(kind, record).await?,
    };
    info!("{} #{} {}", kind, id, mode.past_tense());
    Ok(id)
}
