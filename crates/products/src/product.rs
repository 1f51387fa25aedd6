use serde::{Deserialize, Serialize};

use sitewide_core::{Price, ProductId};

/// Product status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Active,
    Archived,
}

/// Product kind, with the structure each kind derives its prices from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProductKind {
    /// Sold as-is at its own regular price.
    Simple,
    /// A parent whose purchasable units are its variations.
    Variable { variations: Vec<ProductId> },
    /// A bundle listing of independently sold child products.
    Grouped { children: Vec<ProductId> },
    /// One purchasable combination of a variable product.
    Variation { parent: ProductId },
}

/// Field-less discriminant of [`ProductKind`], used to query the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Simple,
    Variable,
    Grouped,
    Variation,
}

impl ProductKind {
    pub fn product_type(&self) -> ProductType {
        match self {
            ProductKind::Simple => ProductType::Simple,
            ProductKind::Variable { .. } => ProductType::Variable,
            ProductKind::Grouped { .. } => ProductType::Grouped,
            ProductKind::Variation { .. } => ProductType::Variation,
        }
    }
}

/// A catalog product.
///
/// Prices are optional because the catalog may hold products with no price data at
/// all; pricing treats a missing price as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    status: ProductStatus,
    kind: ProductKind,
    regular_price: Option<Price>,
    sale_price: Option<Price>,
    /// Tax rate in percent (e.g. `20.0` for 20% VAT).
    #[serde(default)]
    tax_rate: f64,
}

impl Product {
    fn with_kind(id: ProductId, name: impl Into<String>, kind: ProductKind) -> Self {
        Self {
            id,
            name: name.into(),
            status: ProductStatus::Active,
            kind,
            regular_price: None,
            sale_price: None,
            tax_rate: 0.0,
        }
    }

    pub fn simple(id: ProductId, name: impl Into<String>, regular_price: Option<Price>) -> Self {
        Self::with_kind(id, name, ProductKind::Simple).with_regular_price(regular_price)
    }

    pub fn variable(id: ProductId, name: impl Into<String>, variations: Vec<ProductId>) -> Self {
        Self::with_kind(id, name, ProductKind::Variable { variations })
    }

    pub fn grouped(id: ProductId, name: impl Into<String>, children: Vec<ProductId>) -> Self {
        Self::with_kind(id, name, ProductKind::Grouped { children })
    }

    pub fn variation(
        id: ProductId,
        parent: ProductId,
        name: impl Into<String>,
        regular_price: Option<Price>,
    ) -> Self {
        Self::with_kind(id, name, ProductKind::Variation { parent }).with_regular_price(regular_price)
    }

    pub fn with_regular_price(mut self, price: Option<Price>) -> Self {
        self.regular_price = price;
        self
    }

    pub fn with_sale_price(mut self, price: Option<Price>) -> Self {
        self.sale_price = price;
        self
    }

    /// Negative or non-finite rates are stored as zero.
    pub fn with_tax_rate(mut self, rate: f64) -> Self {
        self.tax_rate = if rate.is_finite() && rate > 0.0 { rate } else { 0.0 };
        self
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    pub fn product_type(&self) -> ProductType {
        self.kind.product_type()
    }

    /// Stored regular price, exactly as entered (no pricing filters applied).
    pub fn regular_price(&self) -> Option<Price> {
        self.regular_price
    }

    /// Stored individual sale price, exactly as entered.
    pub fn sale_price(&self) -> Option<Price> {
        self.sale_price
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    /// Shown in the storefront (only active products are).
    pub fn is_visible(&self) -> bool {
        self.status == ProductStatus::Active
    }

    /// Child products whose prices this product derives from (variations or grouped
    /// children). Empty for simple products and variations.
    pub fn child_ids(&self) -> &[ProductId] {
        match &self.kind {
            ProductKind::Variable { variations } => variations,
            ProductKind::Grouped { children } => children,
            ProductKind::Simple | ProductKind::Variation { .. } => &[],
        }
    }
}
