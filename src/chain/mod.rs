pub mod factory;
pub mod runtime;
pub mod todo_list;

mod factory_tests;
mod todo_list_tests;
