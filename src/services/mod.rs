pub mod mission_service;

pub use mission_service::{MissionReport, MissionService, ReconcileOutcome};
