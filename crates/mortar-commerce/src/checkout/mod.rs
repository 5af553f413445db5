//! Checkout module.

mod order;

pub use order::{ContactInfo, Order, OrderLine, OrderStatus};
