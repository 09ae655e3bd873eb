// Order-entry library - exposes all core modules for testing

pub mod app;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod error;
pub mod logging;
pub mod notes;
pub mod persistence;
pub mod printer;
pub mod register;
pub mod render;
pub mod search;
pub mod session;
pub mod ui;
