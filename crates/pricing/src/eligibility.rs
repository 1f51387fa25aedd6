//! Reference prices and the free-product exemption.
//!
//! A product whose reference price is exactly zero is never discounted.

use sitewide_core::Price;
use sitewide_products::{Catalog, Product, ProductKind, TaxSettings};

/// The price that decides whether `product` counts as free.
///
/// - simple / variation: its own regular price
/// - variable: highest regular price among its visible variations
/// - grouped: highest display price (per `tax`) among visible children, computed from
///   each child's regular price
///
/// Missing prices and empty families count as zero.
pub fn reference_price<C>(product: &Product, catalog: &C, tax: &TaxSettings) -> Price
where
    C: Catalog + ?Sized,
{
    match product.kind() {
        ProductKind::Simple | ProductKind::Variation { .. } => {
            product.regular_price().unwrap_or(Price::ZERO)
        }
        ProductKind::Variable { variations } => catalog
            .get_many(variations)
            .iter()
            .filter(|variation| variation.is_visible())
            .filter_map(Product::regular_price)
            .fold(Price::ZERO, Price::max),
        ProductKind::Grouped { children } => catalog
            .get_many(children)
            .iter()
            .filter(|child| child.is_visible())
            .map(|child| {
                let regular = child.regular_price().unwrap_or(Price::ZERO);
                tax.display_price(regular, child.tax_rate())
            })
            .fold(Price::ZERO, Price::max),
    }
}

pub fn is_free<C>(product: &Product, catalog: &C, tax: &TaxSettings) -> bool
where
    C: Catalog + ?Sized,
{
    reference_price(product, catalog, tax).is_zero()
}
