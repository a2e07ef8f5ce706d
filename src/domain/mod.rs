//! Domain layer: coins, products, change-making and the vending state machine.
//!
//! Everything here is synchronous and free of I/O.

pub mod change;
pub mod coin;
pub mod machine;
pub mod product;
