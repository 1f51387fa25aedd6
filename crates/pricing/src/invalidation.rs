//! Purging derived prices when the global sale settings are saved.
//!
//! Cached variation / grouped prices were computed under the old configuration, so
//! every variable and grouped product gets its cached data dropped.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use sitewide_core::{DomainError, DomainResult, ProductId};
use sitewide_events::{Command, CommandHandler, Subscription};
use sitewide_products::{Catalog, ProductType};
use sitewide_settings::SettingsEvent;

/// Command: drop cached derived prices of one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeDerivedPrices {
    pub product_id: ProductId,
}

impl Command for PurgeDerivedPrices {
    fn target_product_id(&self) -> ProductId {
        self.product_id
    }
}

/// Product types that keep derived prices.
const DERIVED_TYPES: [ProductType; 2] = [ProductType::Variable, ProductType::Grouped];

/// Reacts to settings saves by purging every derived price entry.
#[derive(Debug)]
pub struct PriceCacheInvalidator<C, H> {
    catalog: C,
    handler: H,
}

impl<C, H> PriceCacheInvalidator<C, H>
where
    C: Catalog,
    H: CommandHandler<Cmd = PurgeDerivedPrices>,
{
    pub fn new(catalog: C, handler: H) -> Self {
        Self { catalog, handler }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Handle one settings event. Returns how many purge commands were issued.
    pub fn on_event(&self, event: &SettingsEvent) -> DomainResult<usize> {
        match event {
            SettingsEvent::GlobalSaleSaved(_) => self.purge_all(),
        }
    }

    /// Issue a purge command for every variable and grouped product.
    pub fn purge_all(&self) -> DomainResult<usize> {
        let ids = self.catalog.ids_of_types(&DERIVED_TYPES);
        for product_id in &ids {
            self.handler
                .handle(PurgeDerivedPrices {
                    product_id: *product_id,
                })
                .map_err(|e| {
                    warn!(product_id = %product_id, error = ?e, "derived price purge failed");
                    DomainError::unavailable(format!("purge of {product_id} failed: {e:?}"))
                })?;
        }
        info!(products = ids.len(), "derived prices purged after settings save");
        Ok(ids.len())
    }

    /// Process every event already waiting on `subscription` without blocking.
    /// Returns the total number of purge commands issued.
    pub fn drain(&self, subscription: &Subscription<SettingsEvent>) -> DomainResult<usize> {
        let mut issued = 0;
        while let Ok(event) = subscription.try_recv() {
            issued += self.on_event(&event)?;
        }
        Ok(issued)
    }
}
