//! Tax display rules.
//!
//! Prices are entered either including or excluding tax, and the storefront shows
//! them either including or excluding tax. Converting between the two is explicit:
//! callers always say which display mode they want.

use serde::{Deserialize, Serialize};

use sitewide_core::Price;

/// Whether shop prices are displayed including or excluding tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxDisplay {
    Incl,
    #[default]
    Excl,
}

/// Shop-wide tax configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxSettings {
    /// Catalog prices were entered with tax already included.
    #[serde(default)]
    pub prices_include_tax: bool,
    /// How prices are shown in the shop.
    #[serde(default)]
    pub display: TaxDisplay,
}

impl TaxSettings {
    /// `price` with tax included, given the product's tax rate in percent.
    pub fn price_including_tax(&self, price: Price, tax_rate: f64) -> Price {
        if self.prices_include_tax || tax_rate <= 0.0 {
            return price;
        }
        Price::saturating(price.amount() * (1.0 + tax_rate / 100.0))
    }

    /// `price` with tax removed, given the product's tax rate in percent.
    pub fn price_excluding_tax(&self, price: Price, tax_rate: f64) -> Price {
        if !self.prices_include_tax || tax_rate <= 0.0 {
            return price;
        }
        Price::saturating(price.amount() / (1.0 + tax_rate / 100.0))
    }

    /// `price` adjusted for the shop's display mode.
    pub fn display_price(&self, price: Price, tax_rate: f64) -> Price {
        match self.display {
            TaxDisplay::Incl => self.price_including_tax(price, tax_rate),
            TaxDisplay::Excl => self.price_excluding_tax(price, tax_rate),
        }
    }
}
