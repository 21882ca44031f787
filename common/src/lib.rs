#[cfg(feature = "config")]
pub mod config;
pub mod domain;
#[cfg(feature = "logging")]
pub mod logging;
#[cfg(feature = "persistence")]
pub mod persistence;
