pub mod commands;
pub mod config;
pub mod input;
pub mod logging;
pub mod process_command;
