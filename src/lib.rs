pub mod aas;
pub mod options;
pub mod definitions;
pub mod plugin;
pub mod config;
pub mod logging;
pub mod cli;
pub mod app;
