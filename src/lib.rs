pub mod app_config;
pub mod error;
pub mod model;
pub mod rocket;
pub mod services;
pub mod store;
pub mod time_util;
pub mod utils;
