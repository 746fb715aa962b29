use crate::app::Result;
use crate::content::{ContentStore, FetchOptions};
use crate::domain::{Entity, Settings};
use crate::transport::Method;

pub struct SettingsAccessor<'a> {
    store: &'a ContentStore,
}

impl<'a> SettingsAccessor<'a> {
    pub(crate) fn new(store: &'a ContentStore) -> Self {
        Self { store }
    }

    /// Current settings. When the resource does not exist, the built-in
    /// defaults are written once and returned. Other failures propagate.
    pub async fn get(&self) -> Result<Settings> {
        match self
            .store
            .fetch(Entity::Settings.endpoint(), FetchOptions::get())
            .await
        {
            Ok(data) => Ok(serde_json::from_value(data)?),
            Err(e) if e.is_not_found() => {
                tracing::warn!("Settings missing ({}), writing defaults", e);
                let defaults = Settings::default();
                Ok(self.save(defaults.clone()).await?.unwrap_or(defaults))
            }
            Err(e) => Err(e),
        }
    }

    /// Stamp `updated_at` and write the record. `None` if the write failed.
    pub async fn save(&self, mut settings: Settings) -> Result<Option<Settings>> {
        let _guard = self.store.lock(Entity::Settings).await;

        settings.updated_at = Some(self.store.now());
        let body = serde_json::to_value(&settings)?;

        let outcome = self
            .store
            .save(Entity::Settings.endpoint(), &body, Method::Put)
            .await;
        if let Some(e) = outcome.error() {
            tracing::warn!("Saving settings failed: {}", e);
            return Ok(None);
        }
        Ok(Some(settings))
    }
}
