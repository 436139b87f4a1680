// ── Inventory entry point ──
//
// Owns the API client and display settings and hands out page
// controllers. Cheap to clone; every page shares the same HTTP pool.

use tracing::debug;

use netequip_api::ApiClient;

use crate::config::{ConnectionConfig, DisplayOptions};
use crate::error::CoreError;
use crate::page::EntityPage;
use crate::schema::EntitySchema;

#[derive(Debug, Clone)]
pub struct Inventory {
    client: ApiClient,
    display: DisplayOptions,
}

impl Inventory {
    /// Build the HTTP client for `config`. No request is made.
    pub fn new(config: &ConnectionConfig, display: DisplayOptions) -> Result<Self, CoreError> {
        let client = ApiClient::new(&config.base_url, &config.transport())?;
        debug!(base_url = %client.base_url(), "inventory client ready");
        Ok(Self { client, display })
    }

    pub fn from_client(client: ApiClient, display: DisplayOptions) -> Self {
        Self { client, display }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn display(&self) -> &DisplayOptions {
        &self.display
    }

    /// An empty page controller for `S`.
    pub fn page<S: EntitySchema>(&self) -> EntityPage<S> {
        EntityPage::new(self.client.clone())
    }

    /// A page controller for `S` with its collections loaded.
    pub async fn open<S: EntitySchema>(&self) -> Result<EntityPage<S>, CoreError> {
        let mut page = self.page::<S>();
        page.load().await?;
        Ok(page)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_base_url() {
        let config = ConnectionConfig {
            base_url: "::not a url::".into(),
            ..ConnectionConfig::default()
        };
        let err = Inventory::new(&config, DisplayOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::Config { .. }));
    }

    #[test]
    fn default_points_at_local_api() {
        let inventory =
            Inventory::new(&ConnectionConfig::default(), DisplayOptions::default()).unwrap();
        assert_eq!(inventory.client().base_url().as_str(), "http://localhost:8080/api/");
    }
}
