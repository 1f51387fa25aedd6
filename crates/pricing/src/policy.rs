//! The global sale policy and its pricing interceptors.
//!
//! Every decision takes one fresh configuration snapshot, so a settings save is seen
//! by the very next price lookup. When the sale applies, prices are recomputed from
//! the regular price and the incoming value is discarded: individual sale prices are
//! overridden, never combined.

use std::sync::Arc;

use tracing::debug;

use sitewide_core::{Percentage, Price};
use sitewide_products::{Catalog, Product, TaxSettings};
use sitewide_settings::{GlobalSaleConfig, GlobalSaleSettings, SettingsStore};

use crate::calculator;
use crate::eligibility;
use crate::pipeline::{PriceFilter, PriceQuery, PriceStage, PricingPipeline, ReadMode, SaleFlagFilter};

/// Default priority the interceptors register at.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Stages answered from the regular price as the storefront sees it.
const RESOLUTION_STAGES: [PriceStage; 4] = [
    PriceStage::Current,
    PriceStage::Sale,
    PriceStage::Variation,
    PriceStage::VariationSale,
];

/// Store-wide percentage discount.
#[derive(Debug)]
pub struct GlobalSale<S, C> {
    settings: GlobalSaleSettings<S>,
    catalog: C,
    tax: TaxSettings,
}

impl<S, C> GlobalSale<S, C>
where
    S: SettingsStore,
    C: Catalog,
{
    pub fn new(store: S, catalog: C, tax: TaxSettings) -> Self {
        Self {
            settings: GlobalSaleSettings::new(store),
            catalog,
            tax,
        }
    }

    pub fn settings(&self) -> &GlobalSaleSettings<S> {
        &self.settings
    }

    pub fn discount_percentage(&self) -> Percentage {
        self.settings.discount_percentage()
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.is_enabled()
    }

    pub fn reference_price(&self, product: &Product) -> Price {
        eligibility::reference_price(product, &self.catalog, &self.tax)
    }

    pub fn is_free(&self, product: &Product) -> bool {
        eligibility::is_free(product, &self.catalog, &self.tax)
    }

    /// The sale is on and `product` is not free.
    pub fn applies_to(&self, product: &Product) -> bool {
        self.applies_with(&self.settings.config(), product)
    }

    /// `price` with the current percentage taken off.
    pub fn discounted_price(&self, price: Price) -> Price {
        calculator::discounted_price(price, self.discount_percentage())
    }

    /// "Is on sale": upgrades to `true` when the sale applies, otherwise passes through.
    pub fn on_sale_flag_check(&self, current: bool, product: &Product) -> bool {
        current || self.applies_to(product)
    }

    /// Price lookup: the discounted view-mode regular price (as `pipeline` presents it)
    /// when the sale applies, otherwise `current` untouched.
    pub fn on_price_resolution(
        &self,
        current: Price,
        product: &Product,
        pipeline: &PricingPipeline,
    ) -> Price {
        let regular = pipeline.regular_price(product, ReadMode::View);
        self.override_price(current, product, regular)
    }

    /// Same contract as [`Self::on_price_resolution`] for a variation whose price is
    /// about to be cached. Always driven by the raw regular price.
    pub fn on_variation_price_caching(&self, current: Price, variation: &Product) -> Price {
        let raw = variation.regular_price().unwrap_or(Price::ZERO);
        self.override_price(current, variation, raw)
    }

    fn applies_with(&self, config: &GlobalSaleConfig, product: &Product) -> bool {
        config.is_active() && !self.is_free(product)
    }

    fn override_price(&self, current: Price, product: &Product, regular: Price) -> Price {
        let config = self.settings.config();
        if !self.applies_with(&config, product) {
            return current;
        }
        let discounted = calculator::discounted_price(regular, config.percentage);
        debug!(
            product_id = %product.id_typed(),
            percentage = config.percentage.value(),
            regular = %regular,
            replaced = %current,
            discounted = %discounted,
            "global sale price applied"
        );
        discounted
    }
}

impl<S, C> GlobalSale<S, C>
where
    S: SettingsStore + 'static,
    C: Catalog + 'static,
{
    /// Hook the policy into every stage it answers, at [`DEFAULT_PRIORITY`].
    pub fn register(self: &Arc<Self>, pipeline: &mut PricingPipeline) {
        self.register_at(pipeline, DEFAULT_PRIORITY);
    }

    pub fn register_at(self: &Arc<Self>, pipeline: &mut PricingPipeline, priority: i32) {
        pipeline.add_sale_flag_filter(priority, Arc::clone(self) as Arc<dyn SaleFlagFilter>);
        for stage in RESOLUTION_STAGES {
            pipeline.add_price_filter(stage, priority, Arc::clone(self) as Arc<dyn PriceFilter>);
        }
        pipeline.add_price_filter(
            PriceStage::VariationCaching,
            priority,
            Arc::clone(self) as Arc<dyn PriceFilter>,
        );
    }
}

impl<S, C> PriceFilter for GlobalSale<S, C>
where
    S: SettingsStore,
    C: Catalog,
{
    fn filter(&self, current: Price, query: &PriceQuery<'_>, pipeline: &PricingPipeline) -> Price {
        match query.stage {
            // Reading the view-mode regular price from inside `Regular` would recurse.
            PriceStage::Regular => current,
            PriceStage::VariationCaching => self.on_variation_price_caching(current, query.product),
            _ => self.on_price_resolution(current, query.product, pipeline),
        }
    }
}

impl<S, C> SaleFlagFilter for GlobalSale<S, C>
where
    S: SettingsStore,
    C: Catalog,
{
    fn filter(&self, current: bool, product: &Product) -> bool {
        self.on_sale_flag_check(current, product)
    }
}
