pub mod loader;
pub mod models;
pub mod open_data;
pub mod roster;
pub mod source;
