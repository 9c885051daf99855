//! Shared test utilities for the gateway and the user service: one
//! logging initialisation, the JSON error contract assertion and unique
//! test data.

pub mod error_contract;
pub mod logging;
pub mod unique_helpers;
