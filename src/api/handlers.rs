//! HTTP request handlers for the dashboard API.
//!
//! Every handler tags its request with a correlation id, logs the outcome
//! with it, and answers in JSON: the payload on success, an [`ApiError`]
//! otherwise.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calendar::{GridOptions, YearMonth, load_month, render};
use crate::error::{DashboardError, DashboardResult};
use crate::records;

use super::request::{
    CreateDealRequest, CreateLeadRequest, CreatePayrollRequest, CreateTaskRequest, LeaveFilter,
    LeaveRequest, MoveDealRequest, TaskStatusRequest, TitleSearch, UpdatePayrollRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calendar/:year/:month", get(calendar_month_handler))
        .route("/calendar/:year/:month/days/:day", get(calendar_day_handler))
        .route("/pipeline", get(pipeline_handler))
        .route("/deals", get(list_deals_handler).post(create_deal_handler))
        .route("/deals/:id/stage", patch(move_deal_handler))
        .route("/leads", get(list_leads_handler).post(create_lead_handler))
        .route("/tasks", get(list_tasks_handler).post(create_task_handler))
        .route("/tasks/:id/status", patch(set_task_status_handler))
        .route("/leave", get(list_leave_handler).post(request_leave_handler))
        .route("/leave/:id/approve", put(approve_leave_handler))
        .route("/leave/:id/reject", put(reject_leave_handler))
        .route("/payroll", get(payroll_handler).post(create_payroll_handler))
        .route("/payroll/:id", patch(update_payroll_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Tracks one request from arrival to response.
struct RequestLog {
    correlation_id: Uuid,
    operation: &'static str,
    started: Instant,
}

impl RequestLog {
    fn start(operation: &'static str) -> Self {
        let correlation_id = Uuid::new_v4();
        info!(correlation_id = %correlation_id, operation, "Processing request");
        Self {
            correlation_id,
            operation,
            started: Instant::now(),
        }
    }

    fn finish<T: Serialize>(self, status: StatusCode, result: DashboardResult<T>) -> Response {
        match result {
            Ok(body) => {
                info!(
                    correlation_id = %self.correlation_id,
                    operation = self.operation,
                    status = status.as_u16(),
                    duration_us = self.started.elapsed().as_micros(),
                    "Request completed"
                );
                json_response(status, &body)
            }
            Err(error) => self.fail(error),
        }
    }

    fn fail(self, error: DashboardError) -> Response {
        warn!(
            correlation_id = %self.correlation_id,
            operation = self.operation,
            error = %error,
            "Request failed"
        );
        let api_error: ApiErrorResponse = error.into();
        json_response(api_error.status, &api_error.error)
    }

    fn reject_path(self, rejection: PathRejection) -> Response {
        warn!(
            correlation_id = %self.correlation_id,
            operation = self.operation,
            error = %rejection.body_text(),
            "Invalid path parameter"
        );
        json_response(
            StatusCode::BAD_REQUEST,
            &ApiError::new("INVALID_PATH", rejection.body_text()),
        )
    }

    fn reject_query(self, rejection: QueryRejection) -> Response {
        warn!(
            correlation_id = %self.correlation_id,
            operation = self.operation,
            error = %rejection.body_text(),
            "Invalid query string"
        );
        json_response(
            StatusCode::BAD_REQUEST,
            &ApiError::new("INVALID_QUERY", rejection.body_text()),
        )
    }

    fn reject_body(self, rejection: JsonRejection) -> Response {
        let error = match rejection {
            JsonRejection::JsonDataError(err) => {
                let body_text = err.body_text();
                warn!(
                    correlation_id = %self.correlation_id,
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
                    correlation_id = %self.correlation_id,
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
        json_response(StatusCode::BAD_REQUEST, &error)
    }
}

/// Handler for GET /calendar/:year/:month.
///
/// Fetches the month's events and returns the rendered grid.
async fn calendar_month_handler(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> Response {
    let log = RequestLog::start("calendar_month");
    let (year, month) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => return log.reject_path(rejection),
    };
    let month = match YearMonth::new(year, month) {
        Ok(month) => month,
        Err(error) => return log.fail(error),
    };

    let options = state.calendar();
    let calendar = load_month(state.source(), month, options.week_start).await;
    let grid = render(&calendar, &GridOptions::from(options));
    log.finish(StatusCode::OK, Ok(grid))
}

/// Handler for GET /calendar/:year/:month/days/:day.
///
/// Returns every event on the day, without truncation.
async fn calendar_day_handler(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32, u32)>, PathRejection>,
) -> Response {
    let log = RequestLog::start("calendar_day");
    let (year, month, day) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => return log.reject_path(rejection),
    };
    let month = match YearMonth::new(year, month) {
        Ok(month) => month,
        Err(error) => return log.fail(error),
    };

    let calendar = load_month(state.source(), month, state.calendar().week_start).await;
    log.finish(StatusCode::OK, calendar.day(day))
}

/// Handler for GET /pipeline.
async fn pipeline_handler(State(state): State<AppState>) -> Response {
    let log = RequestLog::start("pipeline");
    let result = records::pipeline(state.source()).await;
    log.finish(StatusCode::OK, result)
}

/// Handler for GET /deals.
async fn list_deals_handler(
    State(state): State<AppState>,
    Query(params): Query<TitleSearch>,
) -> Response {
    let log = RequestLog::start("list_deals");
    let result = records::list_deals(state.source(), params.search.as_deref()).await;
    log.finish(StatusCode::OK, result)
}

/// Handler for POST /deals.
async fn create_deal_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateDealRequest>, JsonRejection>,
) -> Response {
    let log = RequestLog::start("create_deal");
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return log.reject_body(rejection),
    };
    let result = records::create_deal(state.source(), request.into()).await;
    log.finish(StatusCode::CREATED, result)
}

/// Handler for PATCH /deals/:id/stage.
async fn move_deal_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<MoveDealRequest>, JsonRejection>,
) -> Response {
    let log = RequestLog::start("move_deal");
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return log.reject_path(rejection),
    };
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return log.reject_body(rejection),
    };
    let result = records::move_deal(state.source(), id, request.stage).await;
    log.finish(StatusCode::OK, result)
}

/// Handler for GET /leads.
async fn list_leads_handler(
    State(state): State<AppState>,
    Query(params): Query<TitleSearch>,
) -> Response {
    let log = RequestLog::start("list_leads");
    let result = records::list_leads(state.source(), params.search.as_deref()).await;
    log.finish(StatusCode::OK, result)
}

/// Handler for POST /leads.
async fn create_lead_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLeadRequest>, JsonRejection>,
) -> Response {
    let log = RequestLog::start("create_lead");
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return log.reject_body(rejection),
    };
    let result = records::create_lead(state.source(), request.into()).await;
    log.finish(StatusCode::CREATED, result)
}

/// Handler for GET /tasks.
async fn list_tasks_handler(
    State(state): State<AppState>,
    Query(params): Query<TitleSearch>,
) -> Response {
    let log = RequestLog::start("list_tasks");
    let result = records::list_tasks(state.source(), params.search.as_deref()).await;
    log.finish(StatusCode::OK, result)
}

/// Handler for POST /tasks.
async fn create_task_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Response {
    let log = RequestLog::start("create_task");
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return log.reject_body(rejection),
    };
    let result = records::create_task(state.source(), request.into()).await;
    log.finish(StatusCode::CREATED, result)
}

/// Handler for PATCH /tasks/:id/status.
async fn set_task_status_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<TaskStatusRequest>, JsonRejection>,
) -> Response {
    let log = RequestLog::start("set_task_status");
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return log.reject_path(rejection),
    };
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return log.reject_body(rejection),
    };
    let result = records::set_task_status(state.source(), id, request.status).await;
    log.finish(StatusCode::OK, result)
}

/// Handler for GET /leave?employee_id=.
///
/// Lists one employee's leave, latest start first.
async fn list_leave_handler(
    State(state): State<AppState>,
    query: Result<Query<LeaveFilter>, QueryRejection>,
) -> Response {
    let log = RequestLog::start("list_leave");
    let filter = match query {
        Ok(Query(filter)) => filter,
        Err(rejection) => return log.reject_query(rejection),
    };
    let result = records::leave_for_employee(state.source(), filter.employee_id).await;
    log.finish(StatusCode::OK, result)
}

/// Handler for POST /leave.
async fn request_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveRequest>, JsonRejection>,
) -> Response {
    let log = RequestLog::start("request_leave");
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return log.reject_body(rejection),
    };
    let result = records::request_leave(state.source(), request.into()).await;
    log.finish(StatusCode::CREATED, result)
}

/// Handler for PUT /leave/:id/approve.
async fn approve_leave_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let log = RequestLog::start("approve_leave");
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return log.reject_path(rejection),
    };
    let result = records::approve_leave(state.source(), id).await;
    log.finish(StatusCode::OK, result)
}

/// Handler for PUT /leave/:id/reject.
async fn reject_leave_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let log = RequestLog::start("reject_leave");
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return log.reject_path(rejection),
    };
    let result = records::reject_leave(state.source(), id).await;
    log.finish(StatusCode::OK, result)
}

/// Handler for GET /payroll.
///
/// Returns the records, newest month first, with column totals.
async fn payroll_handler(State(state): State<AppState>) -> Response {
    let log = RequestLog::start("payroll");
    let result = records::payroll_report(state.source()).await;
    log.finish(StatusCode::OK, result)
}

/// Handler for POST /payroll.
async fn create_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreatePayrollRequest>, JsonRejection>,
) -> Response {
    let log = RequestLog::start("create_payroll");
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return log.reject_body(rejection),
    };
    let result = records::create_payroll(state.source(), request.into()).await;
    log.finish(StatusCode::CREATED, result)
}

/// Handler for PATCH /payroll/:id.
async fn update_payroll_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdatePayrollRequest>, JsonRejection>,
) -> Response {
    let log = RequestLog::start("update_payroll");
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return log.reject_path(rejection),
    };
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return log.reject_body(rejection),
    };
    let result = records::update_payroll(state.source(), id, request.into()).await;
    log.finish(StatusCode::OK, result)
}
