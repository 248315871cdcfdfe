use carebook_common::types::{RegisterRequest, User};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, SqlErr,
};

use super::{require_fields, RecordStore};
use crate::entities::user::{self, Column, Entity};
use crate::error::{Result, StorageError};

const ENTITY: &str = "User";

fn to_user(m: user::Model) -> User {
    User {
        id: m.id,
        full_name: m.full_name,
        email: m.email,
        username: m.username,
        password_hash: m.password_hash,
        created_at: m.created_at.with_timezone(&Utc),
    }
}

impl RecordStore {
    /// Any user whose email equals `email` or whose username equals `username`.
    pub async fn find_user_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>> {
        let model = Entity::find()
            .filter(
                Condition::any()
                    .add(Column::Email.eq(email))
                    .add(Column::Username.eq(username)),
            )
            .one(self.db())
            .await?;
        Ok(model.map(to_user))
    }

    /// Look up a login identifier against both username and email.
    pub async fn find_user_by_identifier(&self, identifier: &str) -> Result<Option<User>> {
        self.find_user_by_email_or_username(identifier, identifier)
            .await
    }

    /// Insert a new account. `password_hash` must already be hashed.
    ///
    /// Fails with [`StorageError::Duplicate`] when the email or username is
    /// taken.
    pub async fn create_user(&self, req: &RegisterRequest, password_hash: &str) -> Result<User> {
        require_fields(
            ENTITY,
            &[
                ("full_name", req.full_name.as_str()),
                ("email", req.email.as_str()),
                ("username", req.username.as_str()),
                ("password", password_hash),
            ],
        )?;
        let am = user::ActiveModel {
            id: Set(carebook_common::id::next_id()),
            full_name: Set(req.full_name.clone()),
            email: Set(req.email.clone()),
            username: Set(req.username.clone()),
            password_hash: Set(password_hash.to_owned()),
            created_at: Set(Utc::now().fixed_offset()),
        };
        match am.insert(self.db()).await {
            Ok(model) => Ok(to_user(model)),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(StorageError::Duplicate { entity: ENTITY })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn count_users(&self) -> Result<u64> {
        Ok(Entity::find().count(self.db()).await?)
    }
}
