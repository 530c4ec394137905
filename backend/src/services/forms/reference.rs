use actix_web::{web, HttpResponse, Responder};
use common::forms::FormKind;

use crate::store::state::AppState;

/// `GET /api/forms/{kind}/reference`
///
/// Never fails: a form whose lookups are unknown gets an empty object, and
/// the client renders its "No ... available" placeholders.
pub async fn process(state: web::Data<AppState>, kind: web::Path<FormKind>) -> impl Responder {
    HttpResponse::Ok().json(state.reference_for(kind.into_inner()).await)
}
