//! `/library` handlers: the borrow/return workflow and ledger reports.

use axum::{extract::State, http::StatusCode, Json};
use library_telemetry::{LOAN_OPERATIONS, OPEN_LOANS};
use lm_03_lending::{LendingError, LoanRequest};
use shared_types::{Transaction, TransactionDetails, UserId};

use crate::adapters::{ApiJson, ApiPath, CurrentCaller};
use crate::domain::ApiResult;
use crate::state::AppState;

fn record(operation: &str, outcome: &Result<Transaction, LendingError>) {
    let label = match outcome {
        Ok(_) => "ok",
        Err(err) => err.label(),
    };
    LOAN_OPERATIONS
        .with_label_values(&[operation, label])
        .inc();
}

/// `POST /library/borrow`
pub async fn borrow(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    ApiJson(request): ApiJson<LoanRequest>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let outcome = state.lending.borrow(&caller, request).await;
    record("borrow", &outcome);
    let transaction = outcome?;
    OPEN_LOANS.inc();
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// `POST /library/return`
pub async fn return_book(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    ApiJson(request): ApiJson<LoanRequest>,
) -> ApiResult<Json<Transaction>> {
    let outcome = state.lending.return_book(&caller, request).await;
    record("return", &outcome);
    let transaction = outcome?;
    OPEN_LOANS.dec();
    Ok(Json(transaction))
}

/// `GET /library/:userid`
pub async fn list_user_transactions(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<UserId>,
) -> ApiResult<Json<Vec<TransactionDetails>>> {
    Ok(Json(state.lending.list_user_transactions(user_id).await?))
}

/// `GET /library`
pub async fn list_all_transactions(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<TransactionDetails>>> {
    Ok(Json(state.lending.list_all_transactions().await?))
}
