//! Request types for the dashboard API.
//!
//! Bodies are deserialized into these types and converted into the record
//! payloads the operations accept.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    DealStage, LeadStatus, LeaveType, NewDeal, NewLead, NewLeaveSpan, NewPayroll, NewWorkItem,
    PayrollChanges, TaskPriority, TaskStatus,
};

/// Query parameters for `GET /leads`, `GET /deals` and `GET /tasks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleSearch {
    /// Case-insensitive title filter.
    #[serde(default)]
    pub search: Option<String>,
}

/// Query parameters for `GET /leave`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveFilter {
    /// The employee whose leave is listed.
    pub employee_id: Uuid,
}

/// Request body for `POST /leads`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeadRequest {
    /// Short title.
    pub title: String,
    /// Optional notes.
    #[serde(default)]
    pub description: Option<String>,
    /// Estimated value; zero when omitted.
    #[serde(default)]
    pub value: Option<Decimal>,
    /// Initial status; `new` when omitted.
    #[serde(default)]
    pub status: Option<LeadStatus>,
    /// Where the lead came from.
    #[serde(default)]
    pub source: Option<String>,
    /// The user capturing the lead.
    #[serde(default)]
    pub created_by: Option<Uuid>,
}

impl From<CreateLeadRequest> for NewLead {
    fn from(req: CreateLeadRequest) -> Self {
        NewLead {
            title: req.title,
            description: req.description,
            value: req.value.unwrap_or_default(),
            status: req.status.unwrap_or_default(),
            source: req.source,
            created_by: req.created_by,
        }
    }
}

/// Request body for `POST /deals`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDealRequest {
    /// Short title.
    pub title: String,
    /// Expected revenue; zero when omitted.
    #[serde(default)]
    pub value: Option<Decimal>,
    /// Starting stage; `prospecting` when omitted.
    #[serde(default)]
    pub stage: Option<DealStage>,
    /// The customer company.
    #[serde(default)]
    pub company_id: Option<Uuid>,
    /// The customer contact.
    #[serde(default)]
    pub contact_id: Option<Uuid>,
    /// When the deal is expected to close.
    #[serde(default)]
    pub expected_close_date: Option<NaiveDate>,
}

impl From<CreateDealRequest> for NewDeal {
    fn from(req: CreateDealRequest) -> Self {
        NewDeal {
            title: req.title,
            value: req.value.unwrap_or_default(),
            stage: req.stage.unwrap_or_default(),
            company_id: req.company_id,
            contact_id: req.contact_id,
            expected_close_date: req.expected_close_date,
        }
    }
}

/// Request body for `PATCH /deals/:id/stage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveDealRequest {
    /// The stage to move the deal to.
    pub stage: DealStage,
}

/// Request body for `PATCH /tasks/:id/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusRequest {
    /// The new status.
    pub status: TaskStatus,
}

/// Request body for `POST /tasks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Short title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Initial status; `todo` when omitted.
    #[serde(default)]
    pub status: Option<TaskStatus>,
    /// Urgency; `medium` when omitted.
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// The user creating the task.
    #[serde(default)]
    pub created_by: Option<Uuid>,
}

impl From<CreateTaskRequest> for NewWorkItem {
    fn from(req: CreateTaskRequest) -> Self {
        NewWorkItem {
            title: req.title,
            description: req.description,
            status: req.status.unwrap_or_default(),
            priority: req.priority.unwrap_or_default(),
            due_date: req.due_date,
            created_by: req.created_by,
        }
    }
}

/// Request body for `POST /leave`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The employee requesting leave.
    pub employee_id: Uuid,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Kind of leave; `annual` when omitted.
    #[serde(default)]
    pub leave_type: Option<LeaveType>,
    /// Optional free-text reason.
    #[serde(default)]
    pub reason: Option<String>,
}

impl From<LeaveRequest> for NewLeaveSpan {
    fn from(req: LeaveRequest) -> Self {
        NewLeaveSpan {
            employee_id: req.employee_id,
            start_date: req.start_date,
            end_date: req.end_date,
            leave_type: req.leave_type.unwrap_or_default(),
            reason: req.reason,
        }
    }
}

/// Request body for `POST /payroll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayrollRequest {
    /// The employee being paid.
    pub employee_id: Uuid,
    /// The pay month.
    pub month: NaiveDate,
    /// Contractual salary.
    pub base_salary: Decimal,
    /// Additional pay; zero when omitted.
    #[serde(default)]
    pub bonus: Option<Decimal>,
    /// Amounts withheld; zero when omitted.
    #[serde(default)]
    pub deductions: Option<Decimal>,
}

impl From<CreatePayrollRequest> for NewPayroll {
    fn from(req: CreatePayrollRequest) -> Self {
        NewPayroll {
            employee_id: req.employee_id,
            month: req.month,
            base_salary: req.base_salary,
            bonus: req.bonus.unwrap_or_default(),
            deductions: req.deductions.unwrap_or_default(),
        }
    }
}

/// Request body for `PATCH /payroll/:id`. Omitted amounts are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePayrollRequest {
    /// New base salary.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// New bonus.
    #[serde(default)]
    pub bonus: Option<Decimal>,
    /// New deductions.
    #[serde(default)]
    pub deductions: Option<Decimal>,
}

impl From<UpdatePayrollRequest> for PayrollChanges {
    fn from(req: UpdatePayrollRequest) -> Self {
        PayrollChanges {
            base_salary: req.base_salary,
            bonus: req.bonus,
            deductions: req.deductions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lead_request_defaults() {
        let req: CreateLeadRequest = serde_json::from_value(json!({"title": "Referral"})).unwrap();
        let lead: NewLead = req.into();

        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.value, Decimal::ZERO);
    }

    #[test]
    fn test_deal_request_defaults() {
        let req: CreateDealRequest = serde_json::from_value(json!({"title": "Acme"})).unwrap();
        let deal: NewDeal = req.into();

        assert_eq!(deal.stage, DealStage::Prospecting);
        assert_eq!(deal.value, Decimal::ZERO);
    }

    #[test]
    fn test_move_request_rejects_unknown_stage() {
        let result: Result<MoveDealRequest, _> =
            serde_json::from_value(json!({"stage": "won_eventually"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_leave_request_requires_dates() {
        let result: Result<LeaveRequest, _> = serde_json::from_value(json!({
            "employee_id": Uuid::from_u128(1),
            "start_date": "2024-03-05"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_payroll_request_defaults_amounts() {
        let req: CreatePayrollRequest = serde_json::from_value(json!({
            "employee_id": Uuid::from_u128(1),
            "month": "2026-01-01",
            "base_salary": "4000"
        }))
        .unwrap();
        let payroll: NewPayroll = req.into();

        assert_eq!(payroll.bonus, Decimal::ZERO);
        assert_eq!(payroll.deductions, Decimal::ZERO);
    }
}
