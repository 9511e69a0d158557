pub mod config_service;
pub mod in_memory_result_store;
pub mod json_persona_store;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::in_memory_result_store::InMemoryResultStore;
pub use crate::json_persona_store::JsonPersonaStore;
