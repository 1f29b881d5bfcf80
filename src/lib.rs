pub mod action;
pub mod channels;
pub mod config;
pub mod headless;
pub mod logging;
pub mod model;
pub mod ref_filter;
pub mod ref_view;
pub mod repo;
pub mod search;
pub mod tui;
pub mod window;
