use serde::{Deserialize, Serialize};
use time::Date;
use validator::Validate;

use crate::dsr::repo::Dsr;

/// Request body for creating a report.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDsrRequest {
    pub content: String,
    pub hours: f64,
    #[serde(with = "crate::dsr::wire_date")]
    pub date: Date,
}

/// Request body for updating a report; the id rides in the body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDsrRequest {
    pub id: i64,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub hours: Option<f64>,
}

/// Query parameters for the report listing.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListDsrQuery {
    #[serde(default, with = "crate::dsr::wire_date::option")]
    pub start_date: Option<Date>,
    #[serde(default, with = "crate::dsr::wire_date::option")]
    pub end_date: Option<Date>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}
fn default_limit() -> i64 {
    10
}

impl ListDsrQuery {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

#[derive(Debug, Serialize)]
pub struct DsrResponse {
    pub message: String,
    pub dsr: Dsr,
}

#[derive(Debug, Serialize)]
pub struct DsrDetails {
    pub dsr: Dsr,
}

/// One page of reports plus the full matching count, so clients can compute
/// the page count themselves.
#[derive(Debug, Serialize)]
pub struct DsrListResponse {
    pub dsrs: Vec<Dsr>,
    pub total: i64,
}
