pub mod analysis;
pub mod config;
pub mod currency;
pub mod data;
pub mod logging;
pub mod report;
