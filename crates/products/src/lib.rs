//! Catalog domain module.
//!
//! Products as the pricing policy sees them: a tagged union over simple, variable,
//! grouped and variation products, a read-only catalog lookup, and the shop's tax
//! display rules. Deterministic domain logic only (no IO, no HTTP, no storage).

pub mod catalog;
pub mod product;
pub mod tax;

pub use catalog::{Catalog, InMemoryCatalog};
pub use product::{Product, ProductKind, ProductStatus, ProductType};
pub use tax::{TaxDisplay, TaxSettings};
