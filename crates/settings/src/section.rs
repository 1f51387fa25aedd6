//! Field definitions for the global sale section of the products settings page.
//!
//! The host platform renders and persists these; this module only describes them.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use sitewide_core::DomainResult;

use crate::global_sale::{ENABLED_KEY, PERCENTAGE_KEY};
use crate::store::SettingsStore;

/// Section identifier under the products settings tab.
pub const SECTION_ID: &str = "global_sale";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Descriptive header opening the section.
    Title,
    /// Numeric input.
    Number { min: u32, max: u32, step: u32 },
    /// Checkbox storing `"yes"` / `"no"`.
    Checkbox,
    /// Closes the section.
    SectionEnd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingField {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: FieldKind,
    /// Value used when nothing has been stored yet.
    pub default: Option<Value>,
}

impl SettingField {
    fn new(id: &str, title: &str, description: &str, kind: FieldKind) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            kind,
            default: None,
        }
    }

    fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Fields that actually hold a stored value.
    pub fn is_stored(&self) -> bool {
        matches!(self.kind, FieldKind::Number { .. } | FieldKind::Checkbox)
    }
}

/// The section's fields in display order.
pub fn global_sale_section() -> Vec<SettingField> {
    vec![
        SettingField::new(
            SECTION_ID,
            "Global sale",
            "Apply one percentage discount to every product, overriding individual sale prices.",
            FieldKind::Title,
        ),
        SettingField::new(
            PERCENTAGE_KEY,
            "Discount percentage",
            "Percentage taken off the regular price of every product (0-100).",
            FieldKind::Number {
                min: 0,
                max: 100,
                step: 1,
            },
        )
        .with_default(json!(0)),
        SettingField::new(
            ENABLED_KEY,
            "Enable global sale",
            "Put the whole catalog on sale at the percentage above.",
            FieldKind::Checkbox,
        )
        .with_default(json!("no")),
        SettingField::new(SECTION_ID, "", "", FieldKind::SectionEnd),
    ]
}

/// Store each field's default where no value exists yet. Returns how many were written.
pub fn install_defaults<S: SettingsStore>(store: &S) -> DomainResult<usize> {
    let mut written = 0;
    for field in global_sale_section().into_iter().filter(SettingField::is_stored) {
        let Some(default) = field.default else {
            continue;
        };
        if store.get(&field.id)?.is_none() {
            store.set(&field.id, default)?;
            written += 1;
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global_sale::GlobalSaleSettings;
    use crate::store::InMemorySettingsStore;

    #[test]
    fn section_lists_header_percentage_checkbox_in_order() {
        let fields = global_sale_section();
        let kinds: Vec<_> = fields.iter().map(|f| f.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                FieldKind::Title,
                FieldKind::Number {
                    min: 0,
                    max: 100,
                    step: 1
                },
                FieldKind::Checkbox,
                FieldKind::SectionEnd,
            ]
        );
        assert_eq!(fields[1].id, PERCENTAGE_KEY);
        assert_eq!(fields[2].id, ENABLED_KEY);
    }

    #[test]
    fn only_inputs_are_stored() {
        let stored: Vec<_> = global_sale_section()
            .into_iter()
            .filter(SettingField::is_stored)
            .map(|f| f.id)
            .collect();
        assert_eq!(stored, vec![PERCENTAGE_KEY.to_string(), ENABLED_KEY.to_string()]);
    }

    #[test]
    fn defaults_leave_sale_disabled() {
        let store = InMemorySettingsStore::new();
        assert_eq!(install_defaults(&store).unwrap(), 2);

        let settings = GlobalSaleSettings::new(store);
        assert!(settings.discount_percentage().is_zero());
        assert!(!settings.is_enabled());
    }

    #[test]
    fn defaults_do_not_overwrite_saved_values() {
        let store = InMemorySettingsStore::with_values([(PERCENTAGE_KEY, json!(15))]);
        assert_eq!(install_defaults(&store).unwrap(), 1);
        assert_eq!(store.get(PERCENTAGE_KEY).unwrap(), Some(json!(15)));
        assert_eq!(store.get(ENABLED_KEY).unwrap(), Some(json!("no")));
    }
}
