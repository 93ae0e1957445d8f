pub mod credentials;
pub mod db;
pub mod env;
pub mod log;
pub mod mission;
