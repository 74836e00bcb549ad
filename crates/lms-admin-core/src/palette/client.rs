//! Color palette REST client
//!
//! Every call carries a bearer token and the tenant id/domain pair, both read from persisted
//! storage. Missing context fails before any request is sent.

use super::generator;
use crate::config::ClientConfig;
use crate::error::{PaletteError, Result};
use crate::storage::Storage;
use crate::tenant::resolver;
use crate::types::{ColorPalette, DataEnvelope, TenantColors, TenantContext, ThemePreset, TokenMap};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Storage key holding the bearer token
pub const AUTH_TOKEN_KEY: &str = "auth_token";

const TENANT_ID_HEADER: &str = "X-Tenant-ID";
const TENANT_DOMAIN_HEADER: &str = "X-Tenant-Domain";

#[derive(Debug, Deserialize)]
struct PalettesData {
    palettes: Vec<ColorPalette>,
}

#[derive(Debug, Deserialize)]
struct PaletteData {
    palette: ColorPalette,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreviewData {
    css_variables: String,
}

#[derive(Debug, Deserialize)]
struct PresetsData {
    presets: Vec<ThemePreset>,
}

#[derive(Debug, Deserialize)]
struct PresetData {
    preset: ThemePreset,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    primary_color: &'a str,
}

#[derive(Debug, Serialize)]
struct PreviewRequest<'a> {
    colors: &'a TokenMap,
}

struct AuthContext {
    token: String,
    tenant: TenantContext,
}

/// Client for the theme and palette endpoints
pub struct PaletteClient {
    config: ClientConfig,
    client: Client,
    storage: Arc<Storage>,
}

impl PaletteClient {
    pub fn new(config: ClientConfig, storage: Arc<Storage>) -> Self {
        Self::with_client(config, storage, Client::new())
    }

    pub fn with_client(config: ClientConfig, storage: Arc<Storage>, client: Client) -> Self {
        Self {
            config,
            client,
            storage,
        }
    }

    fn auth_context(&self) -> Result<AuthContext> {
        let token = self
            .storage
            .get_item(AUTH_TOKEN_KEY)?
            .filter(|token| !token.is_empty())
            .ok_or(PaletteError::MissingAuthToken)?;

        let tenant = resolver::read_cached_tenant(&self.storage)
            .map(|tenant| TenantContext::from(&tenant))
            .filter(|ctx| !ctx.tenant_id.is_empty() && !ctx.tenant_domain.is_empty())
            .ok_or(PaletteError::MissingTenantContext)?;

        Ok(AuthContext { token, tenant })
    }

    fn authorized(&self, builder: RequestBuilder, auth: &AuthContext) -> RequestBuilder {
        builder
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", auth.token))
            .header(TENANT_ID_HEADER, &auth.tenant.tenant_id)
            .header(TENANT_DOMAIN_HEADER, &auth.tenant.tenant_domain)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(PaletteError::RequestFailed {
            status: status.as_u16(),
            body,
        }
        .into())
    }

    async fn read_data<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check(response).await?;
        let envelope: DataEnvelope<T> = response
            .json()
            .await
            .map_err(|e| PaletteError::InvalidResponse(e.to_string()))?;
        Ok(envelope.data)
    }

    async fn get_data<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let auth = self.auth_context()?;
        let url = self.config.endpoint(segments)?;
        debug!("GET {}", url);
        let response = self.authorized(self.client.get(url), &auth).send().await?;
        Self::read_data(response).await
    }

    async fn post_data<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let auth = self.auth_context()?;
        let url = self.config.endpoint(segments)?;
        debug!("POST {}", url);
        let response = self
            .authorized(self.client.post(url), &auth)
            .json(body)
            .send()
            .await?;
        Self::read_data(response).await
    }

    /// List the global palette catalogue
    pub async fn list_palettes(&self) -> Result<Vec<ColorPalette>> {
        let data: PalettesData = self.get_data(&["v1", "theme", "color-palettes"]).await?;
        Ok(data.palettes)
    }

    /// List palettes scoped to the current tenant
    pub async fn list_tenant_palettes(&self) -> Result<Vec<ColorPalette>> {
        let tenant_id = self.auth_context()?.tenant.tenant_id;
        let data: PalettesData = self
            .get_data(&["v1", "tenants", tenant_id.as_str(), "theme", "color-palettes"])
            .await?;
        Ok(data.palettes)
    }

    /// Fetch the tenant's color block
    pub async fn get_tenant_colors(&self) -> Result<TenantColors> {
        let tenant_id = self.auth_context()?.tenant.tenant_id;
        self.get_data(&["v1", "tenants", tenant_id.as_str(), "theme", "colors"])
            .await
    }

    /// Replace the tenant's color block. Only `colors` and `darkModeColors` are sent.
    pub async fn update_tenant_colors(&self, colors: &TenantColors) -> Result<()> {
        let auth = self.auth_context()?;
        let url = self.config.endpoint(&[
            "v1",
            "tenants",
            auth.tenant.tenant_id.as_str(),
            "theme",
            "colors",
        ])?;
        info!("Updating colors for tenant {}", auth.tenant.tenant_id);

        let response = self
            .authorized(self.client.patch(url), &auth)
            .json(colors)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Ask the server to generate a palette from a seed color
    pub async fn generate_palette(&self, primary_color: &str) -> Result<ColorPalette> {
        let primary_color = primary_color.trim();
        if !generator::is_color_token(primary_color) {
            return Err(PaletteError::InvalidSeedColor(primary_color.to_string()).into());
        }
        let data: PaletteData = self
            .post_data(
                &["v1", "theme", "generate-palette"],
                &GenerateRequest { primary_color },
            )
            .await?;
        Ok(data.palette)
    }

    /// Render a candidate palette to CSS variables without persisting it
    pub async fn preview_palette(&self, colors: &TokenMap) -> Result<String> {
        let data: PreviewData = self
            .post_data(
                &["v1", "tenant", "settings", "theme", "preview"],
                &PreviewRequest { colors },
            )
            .await?;
        Ok(data.css_variables)
    }

    /// List saved presets
    pub async fn list_presets(&self) -> Result<Vec<ThemePreset>> {
        let data: PresetsData = self.get_data(&["v1", "theme", "presets"]).await?;
        Ok(data.presets)
    }

    /// Save a named preset
    pub async fn save_preset(&self, preset: &ThemePreset) -> Result<ThemePreset> {
        info!("Saving theme preset {}", preset.name);
        let data: PresetData = self.post_data(&["v1", "theme", "presets"], preset).await?;
        Ok(data.preset)
    }
}
