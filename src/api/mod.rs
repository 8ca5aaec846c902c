//! HTTP API module for the Statutory Entitlement Engine.
//!
//! This module provides the REST API endpoints for calculating the
//! statutory entitlements of one employee or a batch of employees.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BatchClaimRequest, ClaimRequest, EmployeeRecordRequest};
pub use response::{ApiError, BatchClaimResponse, ClaimResponse};
pub use state::AppState;
