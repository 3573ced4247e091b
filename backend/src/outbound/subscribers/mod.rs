//! File-backed subscriber persistence.

mod atomic_write;
mod json_file_store;

pub use json_file_store::JsonFileSubscriberStore;
