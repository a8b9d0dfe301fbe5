//! Integration test binary. All integration tests are consolidated into a
//! single binary to keep link times down.

// Allow unwrap/expect in test code
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod helpers;

mod dashboard_flow;
mod http_contract;
