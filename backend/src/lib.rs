pub mod config;
pub mod error;
pub mod responses;
pub mod routes;
pub mod state;
pub mod trace;
