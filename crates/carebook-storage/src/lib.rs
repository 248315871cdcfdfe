//! Persistence layer for prescriptions, appointments and user accounts.
//!
//! [`store::RecordStore`] owns a SeaORM connection to the records database
//! (SQLite by default) and exposes one async method per CRUD operation.
//! The three collections are independent; nothing here spans more than one
//! table or statement.

pub mod auth;
pub mod entities;
pub mod error;
pub mod store;


pub use error::StorageError;
pub use store::RecordStore;
