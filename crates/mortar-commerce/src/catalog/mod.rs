//! Product catalog types.
//!
//! The catalog is the feed the cart consumes: it supplies the display
//! metadata and the stock ceiling captured when a line is first added.

mod product;

pub use product::{Product, ProductStatus};
