use sitewide_core::ProductId;

/// A command targets a single product (command abstraction).
///
/// Commands represent **intent** - a request to do something to one product's state,
/// such as dropping its cached derived prices. They are transient and never persisted.
///
/// Commands must be cloneable and `'static` so they can be queued, logged and handed
/// across threads.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn target_product_id(&self) -> ProductId;
}
