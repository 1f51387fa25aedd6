//! Sitewide sale pricing.
//!
//! The host pricing pipeline asks two questions at several extension points: "is this
//! product on sale?" and "what is this price?". [`GlobalSale`] answers both from the
//! current settings and the product alone; it holds no mutable state of its own.
//!
//! - `calculator`: percentage off a price
//! - `eligibility`: reference prices and the "free product" exemption
//! - `pipeline`: ordered filters per pricing stage
//! - `policy`: the global sale interceptors
//! - `cache`: derived (variation / grouped child) price cache
//! - `invalidation`: purging that cache when the settings are saved

pub mod cache;
pub mod calculator;
pub mod eligibility;
pub mod invalidation;
pub mod pipeline;
pub mod policy;

pub use cache::{DerivedPriceCache, DerivedPrices};
pub use calculator::discounted_price;
pub use eligibility::{is_free, reference_price};
pub use invalidation::{PriceCacheInvalidator, PurgeDerivedPrices};
pub use pipeline::{PriceFilter, PriceQuery, PriceStage, PricingPipeline, ReadMode, SaleFlagFilter};
pub use policy::GlobalSale;
