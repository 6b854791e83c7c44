pub mod build;
pub mod config;
pub mod hook;
pub mod render;
pub mod write;
