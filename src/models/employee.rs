// src/models/employee.rs

use crate::store::{Entity, timestamp::optional_calendar_date};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Profile Sections ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PersonalInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "optional_calendar_date")]
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub national_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmailContact {
    pub address: String,
    pub label: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PhoneContact {
    pub number: String,
    pub label: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContactInfo {
    #[serde(default)]
    pub emails: Vec<EmailContact>,
    #[serde(default)]
    pub phones: Vec<PhoneContact>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Intern,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WorkInfo {
    pub position: Option<String>,
    pub department: Option<String>,
    pub employment_type: Option<EmploymentType>,
    #[serde(default, deserialize_with = "optional_calendar_date")]
    pub hire_date: Option<NaiveDate>,
    pub manager_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BankingInfo {
    pub bank_name: Option<String>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub branch_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeDocument {
    pub name: String,
    pub document_type: Option<String>,
    pub url: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfileStatus {
    /// Percentage of checklist fields filled in, 0–100
    pub completeness: u8,
    pub last_updated: DateTime<Utc>,
}

// ─── Employee Profile ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeProfile {
    #[serde(default)]
    pub id: String,
    pub personal_info: Option<PersonalInfo>,
    pub contact_info: Option<ContactInfo>,
    pub work_info: Option<WorkInfo>,
    pub banking_info: Option<BankingInfo>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,
    #[serde(default)]
    pub documents: Vec<EmployeeDocument>,
    pub profile_status: Option<ProfileStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for EmployeeProfile {
    const COLLECTION: &'static str = "employees";
}

impl EmployeeProfile {
    pub fn full_name(&self) -> String {
        let personal = self.personal_info.as_ref();
        [
            personal.and_then(|p| p.first_name.as_deref()),
            personal.and_then(|p| p.last_name.as_deref()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployeeRequest {
    pub personal_info: PersonalInfo,
    pub contact_info: Option<ContactInfo>,
    pub work_info: Option<WorkInfo>,
    pub banking_info: Option<BankingInfo>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,
    #[serde(default)]
    pub documents: Vec<EmployeeDocument>,
}

/// Sections present in the body replace the stored section wholesale.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateEmployeeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_info: Option<WorkInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banking_info: Option<BankingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contacts: Option<Vec<EmergencyContact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<EmployeeDocument>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompletenessResponse {
    pub employee_id: String,
    pub completeness: u8,
}
