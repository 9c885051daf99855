#![allow(dead_code)]

pub mod auth;

pub use app_builder::create_test_app;
pub use downstream::{refused_base_url, start_downstream, start_truncating_downstream, Downstream};
