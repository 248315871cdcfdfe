use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---- Prescriptions ----

/// A stored prescription record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    /// Record identifier
    #[serde(rename = "_id")]
    pub id: String,
    pub patient_name: String,
    pub drug_name: String,
    pub dosage: String,
}

/// Create prescription request
///
/// Missing fields deserialize to empty strings and are rejected by the
/// store's required-field check.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrescriptionRequest {
    /// Patient name (required)
    #[serde(default)]
    pub patient_name: String,
    /// Drug name (required)
    #[serde(default)]
    pub drug_name: String,
    /// Dosage, free text (required)
    #[serde(default)]
    pub dosage: String,
}

/// Delete-by-identifier request, shared by prescriptions and appointments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteRecordRequest {
    /// Record identifier
    #[serde(default)]
    pub id: String,
}

// ---- Appointments ----

/// A stored appointment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Record identifier
    #[serde(rename = "_id")]
    pub id: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub appointment_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Create appointment request
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    /// Patient name (required)
    #[serde(default)]
    pub patient_name: String,
    /// Doctor name (required)
    #[serde(default)]
    pub doctor_name: String,
    /// Appointment time (required). RFC 3339, `YYYY-MM-DDTHH:MM[:SS]`
    /// (read as UTC) or `YYYY-MM-DD`.
    #[serde(default)]
    pub appointment_date: String,
    /// Reason for the visit (optional)
    #[serde(default)]
    pub reason: Option<String>,
}

/// Full replacement of an appointment. Every field is written; an absent
/// `reason` clears the stored one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    /// Identifier of the appointment to replace
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub doctor_name: String,
    #[serde(default)]
    pub appointment_date: String,
    #[serde(default)]
    pub reason: Option<String>,
}

// ---- Users ----

/// A stored user account. Never serialized to clients.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub username: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            username: self.username.clone(),
            full_name: self.full_name.clone(),
        }
    }
}

/// Registration request
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    /// Plaintext password, hashed before storage
    #[serde(default)]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Username or email
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
}

/// Public profile fields returned on successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserProfile {
    pub username: String,
    pub full_name: String,
}

/// Login response. No session credential is issued; the client keeps the
/// logged-in state itself.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub status: String,
    pub user: UserProfile,
}
