//! Translate-only endpoints: every handler returns the generated statement
//! and never talks to a document store.

use std::{sync::Arc, time::Instant};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::{
    mango_query::{IndexRequest, MangoQuery},
    n1ql_query_generator::N1qlQueryGeneratorError,
};

use super::{
    models::{NormalizeRequest, NormalizeResponse, StatementResponse, TranslationError},
    AppState,
};

type HandlerResult<T> = Result<Json<T>, (StatusCode, Json<TranslationError>)>;

/// Map a body that failed to decode to the typed error response. Oversized
/// bodies keep 413; everything else is the caller's fault and gets 400.
fn rejected(kind: &str, rejection: JsonRejection) -> (StatusCode, Json<TranslationError>) {
    let reason = rejection.body_text();
    log::warn!("{} request rejected: {}", kind, reason);

    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(TranslationError::payload_too_large(reason)),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(TranslationError::malformed_request(reason)),
        )
    }
}

fn respond(
    kind: &str,
    start_time: Instant,
    result: Result<String, N1qlQueryGeneratorError>,
) -> HandlerResult<StatementResponse> {
    match result {
        Ok(statement) => {
            let elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0;
            log::debug!("{} translated in {:.3}ms", kind, elapsed_ms);
            Ok(Json(StatementResponse {
                statement,
                elapsed_ms,
            }))
        }
        Err(e) => {
            log::warn!("{} translation rejected: {}", kind, e);
            Err((StatusCode::BAD_REQUEST, Json(TranslationError::from(&e))))
        }
    }
}

/// Handler for POST /translate/find
pub async fn find_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<MangoQuery>, JsonRejection>,
) -> HandlerResult<StatementResponse> {
    let start_time = Instant::now();
    let Json(query) = body.map_err(|rejection| rejected("find", rejection))?;
    respond(
        "find",
        start_time,
        app_state.translator.build_find_statement(&query),
    )
}

/// Handler for POST /translate/count
pub async fn count_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<MangoQuery>, JsonRejection>,
) -> HandlerResult<StatementResponse> {
    let start_time = Instant::now();
    let Json(query) = body.map_err(|rejection| rejected("count", rejection))?;
    respond(
        "count",
        start_time,
        app_state.translator.build_count_statement(&query),
    )
}

/// Handler for POST /translate/where
pub async fn where_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<MangoQuery>, JsonRejection>,
) -> HandlerResult<StatementResponse> {
    let start_time = Instant::now();
    let Json(query) = body.map_err(|rejection| rejected("where", rejection))?;
    respond(
        "where",
        start_time,
        app_state.translator.build_where_clause(&query),
    )
}

/// Handler for POST /translate/index
pub async fn index_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<IndexRequest>, JsonRejection>,
) -> HandlerResult<StatementResponse> {
    let start_time = Instant::now();
    let Json(request) = body.map_err(|rejection| rejected("index", rejection))?;
    respond(
        "index",
        start_time,
        app_state.translator.build_index_statement(&request),
    )
}

/// Handler for POST /normalize
pub async fn normalize_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<NormalizeRequest>, JsonRejection>,
) -> HandlerResult<NormalizeResponse> {
    let Json(request) = body.map_err(|rejection| rejected("normalize", rejection))?;
    match app_state.translator.normalize_selector(&request.selector) {
        Ok(selector) => Ok(Json(NormalizeResponse {
            selector: selector.to_value(),
        })),
        Err(e) => {
            let err = N1qlQueryGeneratorError::from(e);
            log::warn!("normalize rejected: {}", err);
            Err((StatusCode::BAD_REQUEST, Json(TranslationError::from(&err))))
        }
    }
}
