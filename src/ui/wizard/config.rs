use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use log::warn;
use toolscout::ToolscoutError;

const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "toolscout";

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub(crate) struct AppConfig {
    /// Workbook reopened on the next launch.
    pub(crate) last_workbook: Option<PathBuf>,
    pub(crate) window_width: f32,
    pub(crate) window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            last_workbook: None,
            window_width: 960.,
            window_height: 720.,
        }
    }
}

impl AppConfig {
    pub(crate) fn from_local_file() -> Option<Self> {
        let config_path = dirs::config_dir()?.join(APP_DIR_NAME).join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let file = std::fs::File::open(&config_path).ok()?;
            match serde_json::from_reader(file) {
                Ok(config) => Some(config),
                Err(e) => {
                    // A corrupt config falls back to defaults instead of
                    // blocking startup
                    warn!("Could not parse config file {:?}: {}", config_path, e);
                    None
                }
            }
        } else {
            None
        }
    }

    pub(crate) fn save(&self) -> Result<(), ToolscoutError> {
        let config_path = dirs::config_dir()
            .ok_or(ToolscoutError::NoConfigDir)?
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ToolscoutError::ConfigIOError { source: e })?;
            }
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| ToolscoutError::ConfigIOError { source: e })?;
        serde_json::to_writer(file, self)
            .map_err(|e| ToolscoutError::ConfigSerializeError { source: e })
    }
}
