pub mod actions;
pub mod app;
pub mod grid;
pub mod sheet_tabs;
pub mod status_bar;
pub mod toolbar;
