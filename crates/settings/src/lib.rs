//! Store-manager settings for the sitewide sale.
//!
//! - `store`: key/value settings capability (injected, never a global)
//! - `global_sale`: the configuration accessor pricing reads on every decision
//! - `section`: field definitions for the products settings page
//! - `form`: saving a submission and announcing it on the event bus

pub mod form;
pub mod global_sale;
pub mod section;
pub mod store;

pub use form::{GlobalSaleSaved, GlobalSaleSubmission, SettingsEvent, SettingsForm};
pub use global_sale::{
    AFFIRMATIVE, ENABLED_KEY, GlobalSaleConfig, GlobalSaleSettings, PERCENTAGE_KEY,
    coerce_percentage,
};
pub use section::{FieldKind, SECTION_ID, SettingField, global_sale_section, install_defaults};
pub use store::{InMemorySettingsStore, SettingsStore};
