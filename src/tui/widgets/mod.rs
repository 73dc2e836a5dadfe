//! TUI widgets

pub mod bars;
pub mod categories;
pub mod help;
pub mod overview;
pub mod registered;
pub mod spinner;
pub mod tabs;
pub mod users;
