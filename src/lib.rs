pub mod agent;
pub mod config;
pub mod data;
pub mod market;
pub mod monitoring;
