pub mod ports;
pub mod requests;
pub mod service;
