//! DART:Lens browser client: company search, a synchronized wishlist and
//! derived financial insights on top of the DART:Lens backend.

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod event_utils;
pub mod global_state;
pub mod infrastructure;
pub mod presentation;

#[cfg(not(feature = "logic-only"))]
use wasm_bindgen::prelude::*;

#[cfg(not(feature = "logic-only"))]
use crate::domain::logging::LogComponent;

/// Installs the logger and mounts the app
#[cfg(not(feature = "logic-only"))]
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = if cfg!(debug_assertions) {
        infrastructure::services::ConsoleLogger::new_development()
    } else {
        infrastructure::services::ConsoleLogger::new_production()
    };
    domain::logging::init_logger(Box::new(console_logger));
    domain::logging::init_time_provider(Box::new(
        infrastructure::services::BrowserTimeProvider::new(),
    ));

    log_info!(LogComponent::Presentation("Initialize"), "starting DART:Lens");

    leptos::mount_to_body(app::App);
}
