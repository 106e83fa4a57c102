use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    error::ApiError,
    session::{session_cookie, session_from_jar, SessionId},
    state::AppState,
};

use super::dto::{
    CreateTransactionRequest, GetTransactionResponse, ListTransactionsResponse, Summary,
    SummaryResponse,
};
use super::model::NewTransaction;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_transaction).get(list_transactions))
        .route("/summary", get(get_summary))
        .route("/:id", get(get_transaction))
}

/// `POST /transactions`
///
/// Records a ledger entry for the caller's session, minting the session
/// cookie when the request does not carry one yet.
#[instrument(skip(state, jar, payload))]
pub async fn create_transaction(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<CreateTransactionRequest>,
) -> Result<(CookieJar, StatusCode), ApiError> {
    payload.validate()?;

    let (session_id, jar) = match session_from_jar(&jar) {
        Some(session_id) => (session_id, jar),
        None => {
            let session_id = Uuid::new_v4();
            (session_id, jar.add(session_cookie(session_id)))
        }
    };

    let transaction = state
        .store
        .insert(NewTransaction {
            id: Uuid::new_v4(),
            session_id,
            title: payload.title,
            amount: payload.transaction_type.signed_amount(payload.amount),
        })
        .await?;

    info!(transaction_id = %transaction.id, %session_id, "transaction recorded");
    Ok((jar, StatusCode::CREATED))
}

/// `GET /transactions`
#[instrument(skip(state))]
pub async fn list_transactions(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<ListTransactionsResponse>, ApiError> {
    let transactions = state.store.list_by_session(session_id).await?;
    Ok(Json(ListTransactionsResponse { transactions }))
}

/// `GET /transactions/:id`
///
/// A miss is reported as `transaction: null` rather than 404.
#[instrument(skip(state))]
pub async fn get_transaction(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<Uuid>,
) -> Result<Json<GetTransactionResponse>, ApiError> {
    let transaction = state.store.find_by_id(session_id, id).await?;
    Ok(Json(GetTransactionResponse { transaction }))
}

/// `GET /transactions/summary`
///
/// The sum is `null`, not zero, for a session without transactions.
#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<SummaryResponse>, ApiError> {
    let amount = state.store.sum_by_session(session_id).await?;
    Ok(Json(SummaryResponse {
        summary: Summary { amount },
    }))
}
