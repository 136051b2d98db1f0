pub mod add;
pub mod clear;
pub mod config;
pub mod context;
pub mod list;
pub mod prompts;
pub mod remove;
pub mod search;
pub mod theme;

pub use context::AppContext;
