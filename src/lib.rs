pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod layout;
pub mod maze;
pub mod rng;
pub mod server_protocol;
pub mod timer;
pub mod types;
