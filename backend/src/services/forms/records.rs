use actix_web::{web, HttpResponse, Responder};
use common::forms::FormKind;

use crate::store::state::AppState;

/// `GET /api/forms/{kind}/records`
pub async fn process(state: web::Data<AppState>, kind: web::Path<FormKind>) -> impl Responder {
    HttpResponse::Ok().json(state.store.list(kind.into_inner()).await)
}
