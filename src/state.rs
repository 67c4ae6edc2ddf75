use crate::assistant::AssistantClient;
use crate::models::AppData;
use std::{env, path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@questlog.com";

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub admin_email: String,
    pub assistant: Option<AssistantClient>,
}

impl AppState {
    pub fn new(
        data_path: PathBuf,
        data: AppData,
        admin_email: String,
        assistant: Option<AssistantClient>,
    ) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            admin_email,
            assistant,
        }
    }
}

pub fn resolve_admin_email() -> String {
    env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string())
}
