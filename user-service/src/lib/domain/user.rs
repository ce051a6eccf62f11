pub mod errors;
pub mod models;
pub mod ports;
pub mod requests;
pub mod service;
