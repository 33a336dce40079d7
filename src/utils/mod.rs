// Utility functions module
pub mod command_catalog;
pub mod config;
pub mod formatters;
pub mod islamic_content;
