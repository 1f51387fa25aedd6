//! Derived price cache.
//!
//! Variable and grouped products show a price range computed from their children.
//! Computing it means resolving every child, so the result is cached per parent
//! until something invalidates it (see `invalidation`).

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use sitewide_core::{DomainError, DomainResult, Price, ProductId};
use sitewide_events::CommandHandler;
use sitewide_products::{Catalog, Product, ProductKind};

use crate::invalidation::PurgeDerivedPrices;
use crate::pipeline::{PriceStage, PricingPipeline};

/// Resolved child prices of one parent product, keyed by child id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedPrices {
    pub prices: BTreeMap<ProductId, Price>,
}

impl DerivedPrices {
    /// Lowest and highest child price, if any child is priced.
    pub fn range(&self) -> Option<(Price, Price)> {
        let mut values = self.prices.values().copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), p| {
            (if p < lo { p } else { lo }, hi.max(p))
        }))
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Cache of [`DerivedPrices`] per variable / grouped product.
#[derive(Debug, Default)]
pub struct DerivedPriceCache {
    inner: RwLock<HashMap<ProductId, DerivedPrices>>,
}

impl DerivedPriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached prices for `product`, computing and storing them on a miss.
    ///
    /// Variations resolve through [`PriceStage::VariationCaching`]; grouped children
    /// through [`PriceStage::Current`]. Hidden or unknown children are skipped.
    /// Products without children yield an empty (uncached) result.
    pub fn prices_for<C>(&self, product: &Product, catalog: &C, pipeline: &PricingPipeline) -> DerivedPrices
    where
        C: Catalog + ?Sized,
    {
        let stage = match product.kind() {
            ProductKind::Variable { .. } => PriceStage::VariationCaching,
            ProductKind::Grouped { .. } => PriceStage::Current,
            ProductKind::Simple | ProductKind::Variation { .. } => return DerivedPrices::default(),
        };

        let id = product.id_typed();
        if let Some(hit) = self.get(id) {
            return hit;
        }

        let prices = catalog
            .get_many(product.child_ids())
            .iter()
            .filter(|child| child.is_visible())
            .map(|child| {
                let stored = PricingPipeline::stored_price(child);
                (child.id_typed(), pipeline.resolve(stage, stored, child))
            })
            .collect();
        let derived = DerivedPrices { prices };

        match self.inner.write() {
            Ok(mut map) => {
                map.insert(id, derived.clone());
            }
            Err(_) => warn!(product_id = %id, "derived price cache poisoned; result not cached"),
        }
        debug!(product_id = %id, children = derived.prices.len(), "derived prices cached");
        derived
    }

    /// Cached min/max price of `product`'s children.
    pub fn price_range<C>(&self, product: &Product, catalog: &C, pipeline: &PricingPipeline) -> Option<(Price, Price)>
    where
        C: Catalog + ?Sized,
    {
        self.prices_for(product, catalog, pipeline).range()
    }

    pub fn get(&self, id: ProductId) -> Option<DerivedPrices> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop cached data for one product. Returns whether anything was cached.
    pub fn delete_derived_prices(&self, id: ProductId) -> DomainResult<bool> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::unavailable("derived price cache lock poisoned"))?;
        Ok(map.remove(&id).is_some())
    }
}

impl CommandHandler for DerivedPriceCache {
    type Cmd = PurgeDerivedPrices;
    type Error = DomainError;

    fn handle(&self, command: Self::Cmd) -> Result<(), Self::Error> {
        self.delete_derived_prices(command.product_id).map(|_| ())
    }
}
