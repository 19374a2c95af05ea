pub mod history;
pub mod list;
pub mod setup;
pub mod ui;
