//! Main application state

use crate::theme::{BrandingApplicator, Document};
use lms_admin_core::{
    ClientConfig, Location, PaletteClient, Result, Storage, TenantApi, TenantColors,
    TenantConfig, TenantState, TenantStore,
};
use parking_lot::RwLock;
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};

/// Composition root wiring storage, API clients, the tenant store and the document
pub struct AppState {
    pub config: ClientConfig,
    /// Persisted client storage
    pub storage: Arc<Storage>,
    /// Presentation surface branding is applied to
    pub document: Arc<RwLock<Document>>,
    pub branding: Arc<BrandingApplicator<Document>>,
    pub tenant_api: Arc<TenantApi>,
    pub tenant_store: Arc<TenantStore>,
    pub palettes: Arc<PaletteClient>,
}

impl AppState {
    /// Open on-disk storage under `config.data_dir` and wire everything up
    pub fn new(config: ClientConfig, location: Location) -> Result<Self> {
        let storage = Arc::new(Storage::new_with_path(&config.data_dir)?);
        Ok(Self::with_storage(config, storage, location))
    }

    pub fn with_storage(config: ClientConfig, storage: Arc<Storage>, location: Location) -> Self {
        Self::with_http_client(config, storage, location, Client::new())
    }

    /// Wire everything up around a single shared HTTP client
    pub fn with_http_client(
        config: ClientConfig,
        storage: Arc<Storage>,
        location: Location,
        client: Client,
    ) -> Self {
        let document = Arc::new(RwLock::new(Document::new()));
        let branding = Arc::new(BrandingApplicator::new(document.clone()));
        let tenant_api = Arc::new(TenantApi::with_client(config.clone(), client.clone()));
        let tenant_store = Arc::new(TenantStore::new(
            storage.clone(),
            tenant_api.clone(),
            branding.clone(),
            location,
        ));
        let palettes = Arc::new(PaletteClient::with_client(config.clone(), storage.clone(), client));

        Self {
            config,
            storage,
            document,
            branding,
            tenant_api,
            tenant_store,
            palettes,
        }
    }

    /// Rehydrate persisted state, then resolve and load the tenant.
    ///
    /// Never fails: load errors end up in the returned state's `error`.
    pub async fn bootstrap(&self) -> TenantState {
        match self.tenant_store.rehydrate() {
            Ok(true) => info!("Restored persisted tenant before network load"),
            Ok(false) => {}
            Err(e) => warn!("Failed to rehydrate tenant state: {}", e),
        }

        if let Err(e) = self.tenant_store.initialize_tenant().await {
            warn!("Tenant initialization failed: {}", e);
        }
        self.tenant_store.state()
    }

    /// Save a full tenant configuration and apply it
    pub async fn save_tenant(&self, tenant: &TenantConfig) -> Result<TenantConfig> {
        let saved = self.tenant_api.save_tenant(tenant).await?;
        self.tenant_store.set_tenant(saved.clone());
        Ok(saved)
    }

    /// Push edited palette colors, then reload the tenant so branding reflects them
    pub async fn update_colors(&self, colors: &TenantColors) -> Result<TenantConfig> {
        self.palettes.update_tenant_colors(colors).await?;
        self.tenant_store.refresh_tenant().await
    }

    /// The currently applied custom properties as CSS
    pub fn rendered_css(&self) -> String {
        self.document.read().to_css()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lms_admin_core::palette::AUTH_TOKEN_KEY;
    use lms_admin_core::DetectionMethod;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tenant_body(primary: &str) -> serde_json::Value {
        serde_json::json!({
            "tenant": {
                "id": "t-1",
                "name": "Acme",
                "domain": "acme",
                "settings": {
                    "branding": { "company_name": "Acme University" },
                    "theme_config": {
                        "mode": "light",
                        "colors": { "primary": primary },
                        "border_radius": { "default": "4px", "sm": "2px" }
                    }
                }
            }
        })
    }

    fn app(server: &MockServer, href: &str) -> AppState {
        let config = ClientConfig::default().with_api_base(server.uri());
        let storage = Arc::new(Storage::in_memory().unwrap());
        let client = Client::builder().no_proxy().build().unwrap();
        AppState::with_http_client(config, storage, Location::parse(href).unwrap(), client)
    }

    #[tokio::test]
    async fn test_bootstrap_applies_fetched_tenant() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/tenants/domain/acme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tenant_body("#ff0000")))
            .expect(1)
            .mount(&server)
            .await;

        let app = app(&server, "http://localhost:5173/tenant/acme/dashboard");
        let state = app.bootstrap().await;

        assert_eq!(state.detection_method, Some(DetectionMethod::Path));
        assert!(state.error.is_none());

        let css = app.rendered_css();
        assert!(css.contains("--primary: #ff0000;"));
        assert!(css.contains("--radius: 4px;"));
        assert!(css.contains("--radius-sm: 2px;"));
        assert_eq!(app.document.read().title(), "Acme University - LMS");
    }

    #[tokio::test]
    async fn test_bootstrap_failure_leaves_default_styling() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let app = app(&server, "https://ghost.lms.example.com/");
        let state = app.bootstrap().await;

        assert!(state.is_initialized);
        assert_eq!(state.error.as_deref(), Some("Tenant not found for domain: ghost"));
        assert!(app.document.read().properties().is_empty());
    }

    #[tokio::test]
    async fn test_update_colors_refreshes_branding() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/tenants/t-1/theme/colors"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/tenants/domain/acme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tenant_body("#00ff00")))
            .mount(&server)
            .await;

        let app = app(&server, "http://localhost/");
        app.storage.set_item(AUTH_TOKEN_KEY, "tok").unwrap();
        let initial: TenantConfig =
            serde_json::from_value(tenant_body("#ff0000")["tenant"].clone()).unwrap();
        app.tenant_store.set_tenant(initial);
        assert!(app.rendered_css().contains("--primary: #ff0000;"));

        let mut colors = TenantColors::default();
        colors.colors.insert("primary".to_string(), "#00ff00".to_string());
        app.update_colors(&colors).await.unwrap();

        assert!(app.rendered_css().contains("--primary: #00ff00;"));
    }
}
