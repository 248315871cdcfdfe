use crate::config::ServerConfig;
use carebook_storage::RecordStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub start_time: DateTime<Utc>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<RecordStore>, config: ServerConfig) -> Self {
        Self {
            store,
            start_time: Utc::now(),
            config: Arc::new(config),
        }
    }
}
