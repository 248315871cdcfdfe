use carebook_common::types::{CreatePrescriptionRequest, Prescription};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, QueryOrder};

use super::{require_fields, RecordStore};
use crate::entities::prescription::{self, Column, Entity};
use crate::error::Result;

const ENTITY: &str = "Prescription";

fn to_prescription(m: prescription::Model) -> Prescription {
    Prescription {
        id: m.id,
        patient_name: m.patient_name,
        drug_name: m.drug_name,
        dosage: m.dosage,
    }
}

impl RecordStore {
    /// All prescriptions, oldest first.
    pub async fn list_prescriptions(&self) -> Result<Vec<Prescription>> {
        // Snowflake ids sort in insertion order.
        let rows = Entity::find()
            .order_by_asc(Column::Id)
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(to_prescription).collect())
    }

    pub async fn insert_prescription(
        &self,
        req: &CreatePrescriptionRequest,
    ) -> Result<Prescription> {
        require_fields(
            ENTITY,
            &[
                ("patientName", req.patient_name.as_str()),
                ("drugName", req.drug_name.as_str()),
                ("dosage", req.dosage.as_str()),
            ],
        )?;
        let am = prescription::ActiveModel {
            id: Set(carebook_common::id::next_id()),
            patient_name: Set(req.patient_name.clone()),
            drug_name: Set(req.drug_name.clone()),
            dosage: Set(req.dosage.clone()),
        };
        let model = am.insert(self.db()).await?;
        Ok(to_prescription(model))
    }

    /// Returns whether a record was actually removed.
    pub async fn delete_prescription(&self, id: &str) -> Result<bool> {
        let res = Entity::delete_by_id(id).exec(self.db()).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
impl RecordStore {
    pub(crate) async fn get_prescription_by_id(&self, id: &str) -> Result<Option<Prescription>> {
        Ok(Entity::find_by_id(id)
            .one(self.db())
            .await?
            .map(to_prescription))
    }

    pub(crate) async fn count_prescriptions(&self) -> Result<u64> {
        use sea_orm::PaginatorTrait;
        Ok(Entity::find().count(self.db()).await?)
    }
}
