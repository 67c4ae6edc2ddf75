use crate::errors::AppError;
use crate::models::AppData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("QUESTLOG_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/questlog.json"))
}

pub async fn load_data(path: &Path) -> AppData {
    let data = match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    };

    repair_task_counter(data)
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

// A hand-edited file can leave the id counter behind its highest task id,
// which would hand out duplicate ids and overwrite tasks.
fn repair_task_counter(mut data: AppData) -> AppData {
    let highest = data.tasks.keys().next_back().copied().unwrap_or(0);
    if data.next_task_id < highest {
        data.next_task_id = highest;
    }
    data
}
