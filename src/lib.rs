pub mod configuration;
pub mod connection;
pub mod location;
pub mod model;
pub mod prediction;
pub mod retrieve;
pub mod snowflake;
pub mod utilities;

lazy_static::lazy_static! {
    pub static ref DEFAULT_INTERVAL: chrono::Duration = chrono::Duration::seconds(5);
    pub static ref DATETIME_FORMAT: String = "%Y-%m-%d %H:%M:%S".to_string();
    pub static ref LOG_LEVEL: log::Level = log::Level::Debug;
}
