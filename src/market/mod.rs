pub mod address;
pub mod models;
pub mod ranking;
pub mod report;
pub mod scanner;
