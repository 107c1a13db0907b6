pub mod sqlite_event_store;
