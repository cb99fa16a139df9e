//! Cucumber step definitions for interface tests.

pub mod interceptor;
pub mod outcome;
pub mod wrapper_contract;
