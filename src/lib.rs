pub mod application;
pub mod chain;
pub mod domain;
pub mod http;
pub mod infrastructure;
