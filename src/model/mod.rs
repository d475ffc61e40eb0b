//! Canonical question catalog model.
//!
//! Every loader converges on these types, and the validator and game
//! session only ever see them. A [`Catalog`] is plain data; a
//! [`ValidatedCatalog`] is the same data after every rule has passed.

mod catalog;
mod category;
mod question;

pub use catalog::{Catalog, CategoryView, ValidatedCatalog};
pub use category::Category;
pub use question::{OptionKey, Question};
