pub mod api;
pub mod app_state;
pub mod config;
pub mod llm;
pub mod markdown;
pub mod page;
