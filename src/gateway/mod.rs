//! Gateway module - Try-on orchestration and prompt construction

pub mod orchestrator;
pub mod prompt;
