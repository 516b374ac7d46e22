//! Catalog references.
//!
//! The product catalog is an external collaborator; the cart only consumes
//! the snapshot fields it hands over.

mod product;

pub use product::ProductRef;
