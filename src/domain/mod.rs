pub mod candidates;
pub mod environment;
pub mod errors;
pub mod ports;
pub mod report;
pub mod resolution;
