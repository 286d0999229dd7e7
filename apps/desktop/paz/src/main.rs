// Prevents additional console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use paz::commands;
use paz::error::PazError;
use paz::events;
use paz::logger::initialize as LoggerInitialize;

use pazcore::protocol::CORE_EVENT;
use pazcore::{Core, CoreConfig};

use common::ErrorLocation;

use std::fs::create_dir_all;

use log::{info, warn};
use tauri::{Emitter, Manager};

fn main() {
    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            commands::client::client_command,
            commands::client::client_query,
        ])
        .setup(|app| {
            let log_dir = app.path().app_log_dir().map_err(|e| PazError::Paz {
                message: format!("Failed to get log directory: {e}"),
                location: ErrorLocation::here(),
            })?;

            create_dir_all(&log_dir).map_err(|e| PazError::Paz {
                message: format!("Failed to create log directory: {e}"),
                location: ErrorLocation::here(),
            })?;

            // Logger first so config loading is visible
            LoggerInitialize(&log_dir)?;

            info!("Paz starting");
            info!("Log directory: {}", log_dir.display());

            let config = match app.path().app_config_dir() {
                Ok(config_dir) => CoreConfig::load(&config_dir).unwrap_or_else(|e| {
                    warn!("Falling back to default config: {e}");
                    CoreConfig::default()
                }),
                Err(e) => {
                    warn!("No config directory ({e}), using default config");
                    CoreConfig::default()
                }
            };

            let (core, controller) = Core::new(&config);
            tauri::async_runtime::spawn(core.run());

            let app_handle = app.handle().clone();
            tauri::async_runtime::spawn(events::forward(controller.events(), move |event| {
                app_handle.emit(CORE_EVENT, event)
            }));

            app.manage(controller);
            info!("Core engine running");

            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
