//! Saving the global sale section and announcing the change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use sitewide_core::{DomainError, DomainResult};
use sitewide_events::{Event, EventBus};

use crate::global_sale::{AFFIRMATIVE, ENABLED_KEY, GlobalSaleConfig, GlobalSaleSettings, PERCENTAGE_KEY};
use crate::store::SettingsStore;

/// What the store manager submitted.
///
/// `percentage` is kept raw; readers coerce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSaleSubmission {
    #[serde(default)]
    pub percentage: Value,
    #[serde(default)]
    pub enabled: bool,
}

/// Event: the global sale section was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSaleSaved {
    /// Effective configuration right after the save.
    pub config: GlobalSaleConfig,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsEvent {
    GlobalSaleSaved(GlobalSaleSaved),
}

impl Event for SettingsEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SettingsEvent::GlobalSaleSaved(_) => "settings.global_sale.saved",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SettingsEvent::GlobalSaleSaved(e) => e.occurred_at,
        }
    }
}

/// Persists submissions and publishes [`SettingsEvent::GlobalSaleSaved`].
#[derive(Debug)]
pub struct SettingsForm<S, B> {
    settings: GlobalSaleSettings<S>,
    bus: B,
}

impl<S, B> SettingsForm<S, B>
where
    S: SettingsStore,
    B: EventBus<SettingsEvent>,
{
    pub fn new(store: S, bus: B) -> Self {
        Self {
            settings: GlobalSaleSettings::new(store),
            bus,
        }
    }

    pub fn settings(&self) -> &GlobalSaleSettings<S> {
        &self.settings
    }

    /// Write both keys, then announce the save. Returns the effective configuration.
    pub fn save(
        &self,
        submission: GlobalSaleSubmission,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<GlobalSaleConfig> {
        let store = self.settings.store();
        store.set(PERCENTAGE_KEY, submission.percentage)?;
        let flag = if submission.enabled { AFFIRMATIVE } else { "no" };
        store.set(ENABLED_KEY, json!(flag))?;

        let config = self.settings.config();
        info!(
            enabled = config.enabled,
            percentage = config.percentage.value(),
            "global sale settings saved"
        );

        self.bus
            .publish(SettingsEvent::GlobalSaleSaved(GlobalSaleSaved {
                config,
                occurred_at,
            }))
            .map_err(|e| DomainError::unavailable(format!("settings event not published: {e:?}")))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemorySettingsStore;
    use sitewide_events::InMemoryEventBus;
    use std::sync::Arc;

    fn form() -> SettingsForm<Arc<InMemorySettingsStore>, Arc<InMemoryEventBus<SettingsEvent>>> {
        SettingsForm::new(
            Arc::new(InMemorySettingsStore::new()),
            Arc::new(InMemoryEventBus::new()),
        )
    }

    #[test]
    fn save_writes_both_keys() {
        let form = form();
        form.save(
            GlobalSaleSubmission {
                percentage: json!("25"),
                enabled: true,
            },
            Utc::now(),
        )
        .unwrap();

        let store = form.settings().store();
        assert_eq!(store.get(PERCENTAGE_KEY).unwrap(), Some(json!("25")));
        assert_eq!(store.get(ENABLED_KEY).unwrap(), Some(json!("yes")));
    }

    #[test]
    fn unticked_checkbox_stores_no() {
        let form = form();
        let config = form
            .save(
                GlobalSaleSubmission {
                    percentage: json!(40),
                    enabled: false,
                },
                Utc::now(),
            )
            .unwrap();

        assert!(!config.enabled);
        assert_eq!(config.percentage.value(), 40);
        assert_eq!(
            form.settings().store().get(ENABLED_KEY).unwrap(),
            Some(json!("no"))
        );
    }

    #[test]
    fn save_publishes_effective_config() {
        let form = form();
        let sub = form.bus.subscribe();
        let at = Utc::now();

        form.save(
            GlobalSaleSubmission {
                percentage: json!(150),
                enabled: true,
            },
            at,
        )
        .unwrap();

        let event = sub.try_recv().unwrap();
        assert_eq!(event.event_type(), "settings.global_sale.saved");
        assert_eq!(event.occurred_at(), at);
        let SettingsEvent::GlobalSaleSaved(saved) = event;
        assert!(saved.config.enabled);
        assert_eq!(saved.config.percentage.value(), 100);
    }

    #[test]
    fn submission_deserializes_from_form_json() {
        let sub: GlobalSaleSubmission =
            serde_json::from_str(r#"{"percentage":"12","enabled":true}"#).unwrap();
        assert_eq!(sub.percentage, json!("12"));
        assert!(sub.enabled);

        let empty: GlobalSaleSubmission = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.percentage, Value::Null);
        assert!(!empty.enabled);
    }
}
