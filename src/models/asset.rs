// src/models/asset.rs

use crate::store::{Entity, timestamp::optional_calendar_date};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Assets ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    #[default]
    Available,
    Assigned,
    Maintenance,
    Retired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Asset {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub category: String,
    pub serial_number: Option<String>,
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub status: AssetStatus,
    #[serde(default, deserialize_with = "optional_calendar_date")]
    pub purchase_date: Option<NaiveDate>,
    pub purchase_cost: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Asset {
    const COLLECTION: &'static str = "assets";
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterAssetRequest {
    pub name: String,
    pub category: String,
    pub serial_number: Option<String>,
    pub assigned_to: Option<String>,
    pub status: Option<AssetStatus>,
    #[serde(default, deserialize_with = "optional_calendar_date")]
    pub purchase_date: Option<NaiveDate>,
    pub purchase_cost: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAssetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ─── Asset Requests ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetRequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Fulfilled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssetRequest {
    #[serde(default)]
    pub id: String,
    pub employee_id: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: AssetRequestStatus,
    pub asset_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for AssetRequest {
    const COLLECTION: &'static str = "asset_requests";
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitAssetRequest {
    pub employee_id: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAssetRequestRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetRequestStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
}
