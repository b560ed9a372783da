// Common test utilities

#![allow(dead_code)]

pub mod harness;
pub mod mocks;

pub use harness::*;
pub use mocks::*;
