pub mod account;
pub mod error;
pub mod event;
pub mod store;
pub mod todo;
