//! Pricing pipeline: ordered filters per pricing stage.
//!
//! Each stage is an extension point of the host's price resolution. A filter receives
//! the value computed so far and returns a possibly replaced value; filters run in
//! ascending priority, ties in registration order.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use sitewide_core::Price;
use sitewide_products::Product;

/// Named points of the host's price resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceStage {
    /// Regular (list) price lookup.
    Regular,
    /// Current / effective price lookup.
    Current,
    /// Sale price lookup.
    Sale,
    /// Variation current price lookup.
    Variation,
    /// Variation sale price lookup.
    VariationSale,
    /// Variation price computed for the derived price cache.
    VariationCaching,
}

impl PriceStage {
    pub const ALL: [PriceStage; 6] = [
        PriceStage::Regular,
        PriceStage::Current,
        PriceStage::Sale,
        PriceStage::Variation,
        PriceStage::VariationSale,
        PriceStage::VariationCaching,
    ];

    /// Extension point name as the host knows it.
    pub fn hook_name(&self) -> &'static str {
        match self {
            PriceStage::Regular => "product_get_regular_price",
            PriceStage::Current => "product_get_price",
            PriceStage::Sale => "product_get_sale_price",
            PriceStage::Variation => "product_variation_get_price",
            PriceStage::VariationSale => "product_variation_get_sale_price",
            PriceStage::VariationCaching => "variation_prices_price",
        }
    }
}

/// How a stored value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// As the storefront sees it, after filters.
    View,
    /// Exactly as stored, bypassing every filter.
    Edit,
}

/// "The price of `product` at `stage`". Ephemeral.
#[derive(Debug, Clone, Copy)]
pub struct PriceQuery<'a> {
    pub product: &'a Product,
    pub stage: PriceStage,
}

/// Transform-or-pass-through price filter.
pub trait PriceFilter: Send + Sync {
    fn filter(&self, current: Price, query: &PriceQuery<'_>, pipeline: &PricingPipeline) -> Price;
}

struct FnPriceFilter<F>(F);

impl<F> PriceFilter for FnPriceFilter<F>
where
    F: Fn(Price, &PriceQuery<'_>, &PricingPipeline) -> Price + Send + Sync,
{
    fn filter(&self, current: Price, query: &PriceQuery<'_>, pipeline: &PricingPipeline) -> Price {
        (self.0)(current, query, pipeline)
    }
}

/// Transform-or-pass-through "is on sale" filter.
pub trait SaleFlagFilter: Send + Sync {
    fn filter(&self, current: bool, product: &Product) -> bool;
}

struct FnSaleFlagFilter<F>(F);

impl<F> SaleFlagFilter for FnSaleFlagFilter<F>
where
    F: Fn(bool, &Product) -> bool + Send + Sync,
{
    fn filter(&self, current: bool, product: &Product) -> bool {
        (self.0)(current, product)
    }
}

struct Registered<T: ?Sized> {
    priority: i32,
    filter: Arc<T>,
}

impl<T: ?Sized> Clone for Registered<T> {
    fn clone(&self) -> Self {
        Self {
            priority: self.priority,
            filter: Arc::clone(&self.filter),
        }
    }
}

/// Registry of price and sale-flag filters.
#[derive(Clone, Default)]
pub struct PricingPipeline {
    price_filters: HashMap<PriceStage, Vec<Registered<dyn PriceFilter>>>,
    sale_flag_filters: Vec<Registered<dyn SaleFlagFilter>>,
}

impl core::fmt::Debug for PricingPipeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let counts: HashMap<PriceStage, usize> = self
            .price_filters
            .iter()
            .map(|(stage, filters)| (*stage, filters.len()))
            .collect();
        f.debug_struct("PricingPipeline")
            .field("price_filters", &counts)
            .field("sale_flag_filters", &self.sale_flag_filters.len())
            .finish()
    }
}

impl PricingPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `filter` at `stage`. Lower priorities run first.
    pub fn add_price_filter(&mut self, stage: PriceStage, priority: i32, filter: Arc<dyn PriceFilter>) {
        let filters = self.price_filters.entry(stage).or_default();
        filters.push(Registered { priority, filter });
        // Stable: equal priorities keep registration order.
        filters.sort_by_key(|r| r.priority);
    }

    /// Register an "is on sale" filter. Lower priorities run first.
    pub fn add_sale_flag_filter(&mut self, priority: i32, filter: Arc<dyn SaleFlagFilter>) {
        self.sale_flag_filters.push(Registered { priority, filter });
        self.sale_flag_filters.sort_by_key(|r| r.priority);
    }

    /// Register a closure as a price filter.
    pub fn add_price_fn<F>(&mut self, stage: PriceStage, priority: i32, f: F)
    where
        F: Fn(Price, &PriceQuery<'_>, &PricingPipeline) -> Price + Send + Sync + 'static,
    {
        self.add_price_filter(stage, priority, Arc::new(FnPriceFilter(f)));
    }

    /// Register a closure as a sale-flag filter.
    pub fn add_sale_flag_fn<F>(&mut self, priority: i32, f: F)
    where
        F: Fn(bool, &Product) -> bool + Send + Sync + 'static,
    {
        self.add_sale_flag_filter(priority, Arc::new(FnSaleFlagFilter(f)));
    }

    pub fn price_filter_count(&self, stage: PriceStage) -> usize {
        self.price_filters.get(&stage).map_or(0, Vec::len)
    }

    pub fn sale_flag_filter_count(&self) -> usize {
        self.sale_flag_filters.len()
    }

    /// Fold `current` through every filter registered at `stage`.
    pub fn resolve(&self, stage: PriceStage, current: Price, product: &Product) -> Price {
        let query = PriceQuery { product, stage };
        let Some(filters) = self.price_filters.get(&stage) else {
            return current;
        };
        let resolved = filters
            .iter()
            .fold(current, |price, r| r.filter.filter(price, &query, self));
        trace!(
            hook = stage.hook_name(),
            product_id = %product.id_typed(),
            before = %current,
            after = %resolved,
            "price resolved"
        );
        resolved
    }

    /// Fold the stored "on sale" flag through every sale-flag filter.
    pub fn is_on_sale(&self, product: &Product) -> bool {
        let stored = stored_on_sale(product);
        self.sale_flag_filters
            .iter()
            .fold(stored, |flag, r| r.filter.filter(flag, product))
    }

    /// Regular price of `product`; `View` runs the `Regular` stage, `Edit` does not.
    pub fn regular_price(&self, product: &Product, mode: ReadMode) -> Price {
        let stored = product.regular_price().unwrap_or(Price::ZERO);
        match mode {
            ReadMode::Edit => stored,
            ReadMode::View => self.resolve(PriceStage::Regular, stored, product),
        }
    }

    /// Effective price of `product` before any filter: its sale price when it has a
    /// lower one, else its regular price.
    pub fn stored_price(product: &Product) -> Price {
        let regular = product.regular_price().unwrap_or(Price::ZERO);
        match product.sale_price() {
            Some(sale) if sale < regular => sale,
            _ => regular,
        }
    }
}

/// On sale by its own data: a sale price strictly below the regular price.
fn stored_on_sale(product: &Product) -> bool {
    match (product.sale_price(), product.regular_price()) {
        (Some(sale), Some(regular)) => sale < regular,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitewide_core::ProductId;

    fn p(amount: f64) -> Price {
        Price::saturating(amount)
    }

    fn mug() -> Product {
        Product::simple(ProductId::new(), "Mug", Some(p(10.0)))
    }

    #[test]
    fn empty_pipeline_passes_values_through() {
        let pipeline = PricingPipeline::new();
        let product = mug();
        for stage in PriceStage::ALL {
            assert_eq!(pipeline.resolve(stage, p(7.0), &product), p(7.0));
        }
        assert!(!pipeline.is_on_sale(&product));
    }

    #[test]
    fn filters_run_in_priority_then_registration_order() {
        let mut pipeline = PricingPipeline::new();
        pipeline.add_price_fn(PriceStage::Current, 20, |price, _, _| p(price.amount() * 2.0));
        pipeline.add_price_fn(PriceStage::Current, 10, |price, _, _| p(price.amount() + 1.0));
        pipeline.add_price_fn(PriceStage::Current, 20, |price, _, _| p(price.amount() - 3.0));

        // (5 + 1) * 2 - 3
        assert_eq!(pipeline.resolve(PriceStage::Current, p(5.0), &mug()), p(9.0));
        assert_eq!(pipeline.price_filter_count(PriceStage::Current), 3);
        assert_eq!(pipeline.price_filter_count(PriceStage::Sale), 0);
    }

    #[test]
    fn filters_only_apply_to_their_stage() {
        let mut pipeline = PricingPipeline::new();
        pipeline.add_price_fn(PriceStage::Sale, 10, |_, _, _| p(1.0));
        assert_eq!(pipeline.resolve(PriceStage::Current, p(5.0), &mug()), p(5.0));
        assert_eq!(pipeline.resolve(PriceStage::Sale, p(5.0), &mug()), p(1.0));
    }

    #[test]
    fn filters_see_stage_and_product() {
        let mut pipeline = PricingPipeline::new();
        pipeline.add_price_fn(PriceStage::Variation, 10, |price, q, _| {
            assert_eq!(q.stage, PriceStage::Variation);
            assert_eq!(q.product.name(), "Mug");
            price
        });
        pipeline.resolve(PriceStage::Variation, p(5.0), &mug());
    }

    #[test]
    fn regular_price_view_runs_filters_edit_does_not() {
        let mut pipeline = PricingPipeline::new();
        pipeline.add_price_fn(PriceStage::Regular, 10, |price, _, _| p(price.amount() * 3.0));
        let product = mug();
        assert_eq!(pipeline.regular_price(&product, ReadMode::View), p(30.0));
        assert_eq!(pipeline.regular_price(&product, ReadMode::Edit), p(10.0));
    }

    #[test]
    fn stored_sale_flag_requires_lower_sale_price() {
        let pipeline = PricingPipeline::new();
        let on_sale = mug().with_sale_price(Some(p(8.0)));
        let same = mug().with_sale_price(Some(p(10.0)));
        assert!(pipeline.is_on_sale(&on_sale));
        assert!(!pipeline.is_on_sale(&same));
    }

    #[test]
    fn sale_flag_filters_fold_in_order() {
        let mut pipeline = PricingPipeline::new();
        pipeline.add_sale_flag_fn(10, |_, _| true);
        pipeline.add_sale_flag_fn(20, |flag, _| !flag);
        assert!(!pipeline.is_on_sale(&mug()));
        assert_eq!(pipeline.sale_flag_filter_count(), 2);
    }

    #[test]
    fn stored_price_prefers_lower_sale_price() {
        assert_eq!(PricingPipeline::stored_price(&mug()), p(10.0));
        assert_eq!(
            PricingPipeline::stored_price(&mug().with_sale_price(Some(p(6.0)))),
            p(6.0)
        );
        assert_eq!(
            PricingPipeline::stored_price(&mug().with_sale_price(Some(p(12.0)))),
            p(10.0)
        );
    }
}
