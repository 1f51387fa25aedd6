//! Read-only catalog lookup.
//!
//! The catalog belongs to the host platform; pricing only ever reads from it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::warn;

use sitewide_core::ProductId;

use crate::product::{Product, ProductType};

/// Product lookup capability injected into pricing.
pub trait Catalog: Send + Sync {
    /// Fetch one product. `None` when unknown (or the store is unreadable).
    fn get(&self, id: ProductId) -> Option<Product>;

    /// Identifiers of every product whose type is one of `types`.
    fn ids_of_types(&self, types: &[ProductType]) -> Vec<ProductId>;

    /// Resolve a list of identifiers, silently skipping unknown ones.
    fn get_many(&self, ids: &[ProductId]) -> Vec<Product> {
        ids.iter().filter_map(|id| self.get(*id)).collect()
    }
}

impl<C> Catalog for Arc<C>
where
    C: Catalog + ?Sized,
{
    fn get(&self, id: ProductId) -> Option<Product> {
        (**self).get(id)
    }

    fn ids_of_types(&self, types: &[ProductType]) -> Vec<ProductId> {
        (**self).ids_of_types(types)
    }
}

/// In-memory catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product.
    pub fn upsert(&self, product: Product) {
        match self.inner.write() {
            Ok(mut map) => {
                map.insert(product.id_typed(), product);
            }
            Err(_) => warn!(product_id = %product.id_typed(), "catalog lock poisoned; upsert dropped"),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Product> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let catalog = Self::new();
        for product in iter {
            catalog.upsert(product);
        }
        catalog
    }
}

impl Catalog for InMemoryCatalog {
    fn get(&self, id: ProductId) -> Option<Product> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    fn ids_of_types(&self, types: &[ProductType]) -> Vec<ProductId> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut ids: Vec<ProductId> = map
            .values()
            .filter(|p| types.contains(&p.product_type()))
            .map(Product::id_typed)
            .collect();
        // Stable output regardless of hash order.
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitewide_core::Price;

    #[test]
    fn get_returns_inserted_product() {
        let id = ProductId::new();
        let catalog: InMemoryCatalog =
            [Product::simple(id, "Mug", Some(Price::saturating(9.0)))].into_iter().collect();

        let found = catalog.get(id).unwrap();
        assert_eq!(found.name(), "Mug");
        assert!(catalog.get(ProductId::new()).is_none());
    }

    #[test]
    fn upsert_replaces_existing() {
        let id = ProductId::new();
        let catalog = InMemoryCatalog::new();
        catalog.upsert(Product::simple(id, "Mug", None));
        catalog.upsert(Product::simple(id, "Big Mug", None));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(id).unwrap().name(), "Big Mug");
    }

    #[test]
    fn ids_of_types_filters_by_kind() {
        let simple = Product::simple(ProductId::new(), "Mug", None);
        let variable = Product::variable(ProductId::new(), "Shirt", vec![]);
        let grouped = Product::grouped(ProductId::new(), "Set", vec![]);
        let variation =
            Product::variation(ProductId::new(), variable.id_typed(), "Shirt / S", None);

        let catalog: InMemoryCatalog = [
            simple.clone(),
            variable.clone(),
            grouped.clone(),
            variation.clone(),
        ]
        .into_iter()
        .collect();

        let mut expected = vec![variable.id_typed(), grouped.id_typed()];
        expected.sort();
        assert_eq!(
            catalog.ids_of_types(&[ProductType::Variable, ProductType::Grouped]),
            expected
        );
        assert_eq!(
            catalog.ids_of_types(&[ProductType::Simple]),
            vec![simple.id_typed()]
        );
    }

    #[test]
    fn get_many_skips_unknown_ids() {
        let a = Product::simple(ProductId::new(), "A", None);
        let catalog: InMemoryCatalog = [a.clone()].into_iter().collect();

        let found = catalog.get_many(&[ProductId::new(), a.id_typed()]);
        assert_eq!(found, vec![a]);
    }
}
