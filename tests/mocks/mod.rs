//! Shared test doubles for integration tests

#![allow(dead_code)]

pub mod fake_stargate;
pub mod test_server;
