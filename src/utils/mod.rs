pub mod config;
pub mod mapper;
pub mod race_utils;
pub mod state;
