pub mod app_error;

pub use app_error::{exit_code_of, MissionError, UNKNOWN_ERROR_EXIT_CODE};
