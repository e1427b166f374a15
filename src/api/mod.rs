//! HTTP API for the business dashboard.
//!
//! This module exposes the calendar grid, deals and their pipeline, leads, tasks,
//! leave requests and payroll as JSON endpoints over an axum router.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CreateDealRequest, CreateLeadRequest, CreatePayrollRequest, CreateTaskRequest, LeaveFilter,
    LeaveRequest, MoveDealRequest, TaskStatusRequest, TitleSearch, UpdatePayrollRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
