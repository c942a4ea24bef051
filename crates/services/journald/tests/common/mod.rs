#![allow(dead_code)]

pub mod api_client;
pub mod test_context;

pub const TEST_SECRET: &[u8] = b"journald-test-secret";
