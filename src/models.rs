use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::datasets::EntityType;

/// Date format understood by the usage endpoint, and its chrono equivalent.
pub const USAGE_DATE_FORMAT: &str = "yyyy-MM-dd";
const CHRONO_DATE_FORMAT: &str = "%Y-%m-%d";

// ============ Lookup ============

/// Body of a people / companies lookup request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupRequest {
    #[serde(rename = "Datasets")]
    pub datasets: String,
    /// Query expression, `doc{<identifier>}`.
    pub q: String,
    #[serde(rename = "Limit")]
    pub limit: u32,
}

impl LookupRequest {
    pub fn new(document: &str, dataset: &str) -> Self {
        Self {
            datasets: dataset.to_string(),
            q: format!("doc{{{}}}", document),
            limit: 1,
        }
    }
}

// ============ Usage ============

/// Body of a usage-statistics request for one (api, dataset) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsageRequest {
    pub initial_reference_date: String,
    pub final_reference_date: String,
    pub date_format: String,
    pub api: String,
    pub datasets: String,
}

impl UsageRequest {
    pub fn new(
        initial_date: NaiveDate,
        final_date: NaiveDate,
        entity: EntityType,
        dataset: &str,
    ) -> Self {
        Self {
            initial_reference_date: initial_date.format(CHRONO_DATE_FORMAT).to_string(),
            final_reference_date: final_date.format(CHRONO_DATE_FORMAT).to_string(),
            date_format: USAGE_DATE_FORMAT.to_string(),
            api: entity.api_name().to_string(),
            datasets: dataset.to_string(),
        }
    }
}

/// `UsageData` envelope of a usage response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsageData {
    pub total_successful_requests: i64,
    pub total_requests_with_error: i64,
    pub total_queries_charged: i64,
    pub total_queries_not_charged: i64,
    pub total_estimated_price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsageResponse {
    #[serde(rename = "UsageData")]
    pub usage_data: UsageData,
}

/// Usage figures for one dataset over a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRecord {
    pub api_type: EntityType,
    pub end_point: String,
    pub successful_requests: i64,
    pub requests_with_error: i64,
    pub queries_charged: i64,
    pub queries_not_charged: i64,
    pub estimated_price: f64,
}

impl UsageRecord {
    pub fn from_usage(entity: EntityType, dataset: &str, data: UsageData) -> Self {
        Self {
            api_type: entity,
            end_point: dataset.to_string(),
            successful_requests: data.total_successful_requests,
            requests_with_error: data.total_requests_with_error,
            queries_charged: data.total_queries_charged,
            queries_not_charged: data.total_queries_not_charged,
            estimated_price: data.total_estimated_price,
        }
    }
}
