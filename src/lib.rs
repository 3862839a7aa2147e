pub mod catalog;
pub mod config;
pub mod pipeline;
pub mod progress;
pub mod provider;
pub mod textio;
pub mod textutil;
