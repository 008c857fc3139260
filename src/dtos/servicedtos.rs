use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::servicemodel::{Issue, ServiceCategory};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveServiceDto {
    #[validate(length(min = 1, message = "Service name is required"))]
    pub service: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub icon_name: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveIssueDto {
    pub service_id: Uuid,

    #[validate(length(min = 1, message = "Issue name is required"))]
    pub issue_name: String,

    pub basic_cost: BigDecimal,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueDto {
    #[validate(length(min = 1, message = "Issue name is required"))]
    pub issue_name: String,

    pub basic_cost: BigDecimal,
}

#[derive(Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct IssueQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
    pub service_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceResponseDto {
    pub status: String,
    pub service: ServiceCategory,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceListResponseDto {
    pub status: String,
    pub services: Vec<ServiceCategory>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IssueResponseDto {
    pub status: String,
    pub issue: Issue,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IssueListResponseDto {
    pub status: String,
    pub issues: Vec<Issue>,
    pub results: i64,
}
