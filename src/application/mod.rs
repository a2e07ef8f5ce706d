//! Application layer driving the machine.
//!
//! This module defines the `Console`, the customer-facing command loop. It is
//! generic over tokio's async reader/writer traits so it runs against stdin and
//! stdout in the binary and against in-memory buffers in tests.

pub mod console;
