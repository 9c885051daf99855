#![allow(dead_code)]

pub mod memory_store;

pub use app_builder::{create_test_app, test_service, TEST_SECRET};
pub use memory_store::MemoryUserStore;
