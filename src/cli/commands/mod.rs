pub mod ask;
pub mod config;
pub mod content;
pub mod tip;
