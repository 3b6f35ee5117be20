pub mod archiver;
pub mod discovery;
pub mod orchestrator;
