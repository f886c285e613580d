pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod llm;
pub mod models;
pub mod observability;
pub mod prompts;
pub mod state;
pub mod store;
