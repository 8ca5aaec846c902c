//! HTTP request handlers for the Statutory Entitlement Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::aggregate;
use crate::error::EngineError;
use crate::models::{EmployeeFacts, StatutoryLimitEntry};

use super::request::{BatchClaimRequest, ClaimRequest};
use super::response::{ApiError, ApiErrorResponse, BatchClaimResponse, ClaimResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/calculate/batch", post(calculate_batch_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a single employee record and returns the aggregated claim.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClaimRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let facts = match request.employee.into_facts() {
        Ok(facts) => facts,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Employee record rejected"
            );
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let result = build_claim_response(&facts, state.limits());
    let duration = start_time.elapsed();
    info!(
        correlation_id = %correlation_id,
        employee_id = %result.employee_id,
        total_preferential = %result.claim.total_preferential_claim,
        total_unsecured = %result.claim.total_unsecured_claim,
        warnings = result.claim.audit_trace.warnings.len(),
        duration_us = duration.as_micros(),
        "Calculation completed successfully"
    );

    json_response(StatusCode::OK, result)
}

/// Handler for POST /calculate/batch endpoint.
///
/// Every record is validated before any is calculated; one invalid record
/// rejects the whole batch.
async fn calculate_batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchClaimRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let facts = match collect_facts(request) {
        Ok(facts) => facts,
        Err((index, err)) => {
            warn!(
                correlation_id = %correlation_id,
                record_index = index,
                error = %err,
                "Batch rejected because of an invalid employee record"
            );
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let results: Vec<ClaimResponse> = facts
        .iter()
        .map(|f| build_claim_response(f, state.limits()))
        .collect();
    let duration = start_time.elapsed();
    info!(
        correlation_id = %correlation_id,
        employees = results.len(),
        duration_us = duration.as_micros(),
        "Batch calculation completed successfully"
    );

    json_response(StatusCode::OK, BatchClaimResponse { results })
}

/// Converts every record, reporting the index of the first invalid one.
fn collect_facts(
    request: BatchClaimRequest,
) -> Result<Vec<EmployeeFacts>, (usize, EngineError)> {
    request
        .employees
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_facts().map_err(|err| (index, err)))
        .collect::<Result<Vec<_>, _>>()
}

/// Runs the aggregator and wraps the claim in the response envelope.
fn build_claim_response(facts: &EmployeeFacts, limits: &[StatutoryLimitEntry]) -> ClaimResponse {
    ClaimResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: facts.employee_id.clone(),
        claim: aggregate(facts, limits),
    }
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    error_response(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    })
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    api_error.into_response()
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::EmployeeRecordRequest;
    use crate::config::ConfigLoader;
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/rps").expect("Failed to load config");
        AppState::new(config)
    }

    fn wage_arrears_record() -> EmployeeRecordRequest {
        EmployeeRecordRequest {
            employee_id: Some("emp_001".to_string()),
            yearly_salary: Some(dec("26000")),
            work_days_per_week: Some(5),
            start_date: Some("2020-01-01".to_string()),
            end_date: Some("2024-01-15".to_string()),
            date_last_paid: Some("2024-01-01".to_string()),
            ..Default::default()
        }
    }

    async fn post(router: Router, uri: &str, body: String) -> Response {
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&ClaimRequest {
            employee: wage_arrears_record(),
        })
        .unwrap();

        let response = post(router, "/calculate", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: ClaimResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.employee_id, "emp_001");
        assert_eq!(result.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(result.claim.wage_arrears.amounts.total, dec("1400.00"));
        assert_eq!(result.claim.wage_arrears.amounts.preferential, dec("800.00"));
        assert_eq!(result.claim.wage_arrears.amounts.unsecured, dec("600.00"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = post(router, "/calculate", "{invalid json".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_employee_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = post(router, "/calculate", "{}".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_invalid_work_days_returns_400() {
        let router = create_router(create_test_state());
        let mut record = wage_arrears_record();
        record.work_days_per_week = Some(0);
        let body = serde_json::to_string(&ClaimRequest { employee: record }).unwrap();

        let response = post(router, "/calculate", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_EMPLOYEE");
    }

    #[tokio::test]
    async fn test_error_response_is_json() {
        let router = create_router(create_test_state());
        let mut record = wage_arrears_record();
        record.yearly_salary = Some(dec("-1"));
        let body = serde_json::to_string(&ClaimRequest { employee: record }).unwrap();

        let response = post(router, "/calculate", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_EMPLOYEE");
    }

    #[test]
    fn test_config_error_maps_to_500() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "missing.yaml".to_string(),
        }
        .into();
        let response = error_response(api_error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_batch_returns_results_in_order() {
        let router = create_router(create_test_state());
        let mut second = wage_arrears_record();
        second.employee_id = Some("emp_002".to_string());
        let body = serde_json::to_string(&BatchClaimRequest {
            employees: vec![wage_arrears_record(), second],
        })
        .unwrap();

        let response = post(router, "/calculate/batch", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let batch: BatchClaimResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(batch.results.len(), 2);
        assert_eq!(batch.results[0].employee_id, "emp_001");
        assert_eq!(batch.results[1].employee_id, "emp_002");
        assert_ne!(batch.results[0].calculation_id, batch.results[1].calculation_id);
        assert_eq!(batch.results[0].claim, batch.results[1].claim);
    }
}
