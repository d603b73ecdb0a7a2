pub mod animation;
pub mod app;
pub mod config;
pub mod dispatch;
pub mod focus;
pub mod input;
pub mod layout;
pub mod logging;
pub mod models;
pub mod roster;
pub mod selection;
pub mod store;
pub mod surface;
pub mod ui;
