pub mod config;
pub mod error;
pub mod merge;
pub mod names;
pub mod parser;
