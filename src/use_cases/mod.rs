pub mod auth;
pub mod browse_reports;
pub mod resolve;
pub mod submit_report;
