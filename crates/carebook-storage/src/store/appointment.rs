use carebook_common::types::{Appointment, CreateAppointmentRequest, UpdateAppointmentRequest};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, QueryOrder};

use super::{require_fields, RecordStore};
use crate::entities::appointment::{self, Column, Entity};
use crate::error::{Result, StorageError};

const ENTITY: &str = "Appointment";

/// Naive formats produced by HTML date/time inputs; read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse an appointment date.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS[.fff]]` (UTC) and `YYYY-MM-DD`
/// (midnight UTC).
///
/// ```
/// use carebook_storage::store::parse_appointment_date;
///
/// let a = parse_appointment_date("2025-06-01T09:30").unwrap();
/// let b = parse_appointment_date("2025-06-01T11:30:00+02:00").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_appointment_date("next tuesday").is_err());
/// ```
pub fn parse_appointment_date(raw: &str) -> Result<DateTime<Utc>> {
    let value = raw.trim();
    let invalid = || StorageError::InvalidTimestamp {
        entity: ENTITY,
        field: "appointmentDate",
        value: value.to_owned(),
    };
    let parsed = parse_any_format(value).ok_or_else(invalid)?;
    // Four-digit years keep stored text order equal to time order.
    if !(0..=9999).contains(&parsed.year()) {
        return Err(invalid());
    }
    Ok(parsed)
}

fn parse_any_format(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::default()).and_utc())
}

/// Shared required-field and date checks for create and replace.
fn validate(
    patient_name: &str,
    doctor_name: &str,
    appointment_date: &str,
) -> Result<DateTime<Utc>> {
    require_fields(
        ENTITY,
        &[
            ("patientName", patient_name),
            ("doctorName", doctor_name),
            ("appointmentDate", appointment_date),
        ],
    )?;
    parse_appointment_date(appointment_date)
}

fn to_appointment(m: appointment::Model) -> Appointment {
    Appointment {
        id: m.id,
        patient_name: m.patient_name,
        doctor_name: m.doctor_name,
        appointment_date: m.appointment_date.with_timezone(&Utc),
        reason: m.reason,
    }
}

impl RecordStore {
    /// All appointments, earliest `appointment_date` first.
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        let rows = Entity::find()
            .order_by_asc(Column::AppointmentDate)
            .order_by_asc(Column::Id)
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(to_appointment).collect())
    }

    #[cfg(test)]
    pub(crate) async fn get_appointment_by_id(&self, id: &str) -> Result<Option<Appointment>> {
        Ok(Entity::find_by_id(id)
            .one(self.db())
            .await?
            .map(to_appointment))
    }

    pub async fn insert_appointment(&self, req: &CreateAppointmentRequest) -> Result<Appointment> {
        let date = validate(&req.patient_name, &req.doctor_name, &req.appointment_date)?;
        let am = appointment::ActiveModel {
            id: Set(carebook_common::id::next_id()),
            patient_name: Set(req.patient_name.clone()),
            doctor_name: Set(req.doctor_name.clone()),
            // Stored in UTC so text ordering matches time ordering.
            appointment_date: Set(date.fixed_offset()),
            reason: Set(req.reason.clone()),
        };
        let model = am.insert(self.db()).await?;
        Ok(to_appointment(model))
    }

    /// Replace every field of an existing appointment. `reason` is written
    /// even when `None`. Returns `None` when the id matches nothing.
    pub async fn replace_appointment(
        &self,
        req: &UpdateAppointmentRequest,
    ) -> Result<Option<Appointment>> {
        let date = validate(&req.patient_name, &req.doctor_name, &req.appointment_date)?;
        let Some(model) = Entity::find_by_id(req.id.as_str()).one(self.db()).await? else {
            return Ok(None);
        };
        let mut am: appointment::ActiveModel = model.into();
        am.patient_name = Set(req.patient_name.clone());
        am.doctor_name = Set(req.doctor_name.clone());
        am.appointment_date = Set(date.fixed_offset());
        am.reason = Set(req.reason.clone());
        let updated = am.update(self.db()).await?;
        Ok(Some(to_appointment(updated)))
    }

    /// Returns whether a record was actually removed.
    pub async fn delete_appointment(&self, id: &str) -> Result<bool> {
        let res = Entity::delete_by_id(id).exec(self.db()).await?;
        Ok(res.rows_affected > 0)
    }
}
