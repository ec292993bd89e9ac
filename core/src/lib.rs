pub mod models;
pub mod time;
