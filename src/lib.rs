pub mod coach;
pub mod config;
pub mod constants;
pub mod logging;
pub mod services;
