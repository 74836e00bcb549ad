//! Tenant configuration REST client

use super::TenantSource;
use crate::config::ClientConfig;
use crate::error::{Result, TenantError};
use crate::types::TenantConfig;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Serialize, Deserialize)]
struct TenantEnvelope {
    tenant: TenantConfig,
}

/// Client for the `/v1/tenants` endpoints
#[derive(Debug, Clone)]
pub struct TenantApi {
    config: ClientConfig,
    client: Client,
}

impl TenantApi {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: ClientConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Fetch a tenant by domain; any failure is logged and reported as `None`
    pub async fn fetch(&self, domain: &str) -> Option<TenantConfig> {
        let url = match self.config.endpoint(&["v1", "tenants", "domain", domain]) {
            Ok(url) => url,
            Err(e) => {
                warn!("Refusing tenant lookup for {:?}: {}", domain, e);
                return None;
            }
        };
        debug!("Fetching tenant config from {}", url);

        let response = match self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Tenant request for {} failed: {}", domain, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Tenant lookup for {} returned {}", domain, status);
            return None;
        }

        match response.json::<TenantEnvelope>().await {
            Ok(envelope) => {
                info!("Loaded tenant {} ({})", envelope.tenant.name, envelope.tenant.id);
                Some(envelope.tenant)
            }
            Err(e) => {
                warn!("Tenant response for {} could not be decoded: {}", domain, e);
                None
            }
        }
    }

    /// Write a tenant back as a full replacement
    pub async fn save_tenant(&self, tenant: &TenantConfig) -> Result<TenantConfig> {
        if let Some(theme) = tenant.theme() {
            theme.validate()?;
        }

        let url = self.config.endpoint(&["v1", "tenants", tenant.id.as_str()])?;
        info!("Saving tenant {} to {}", tenant.id, url);

        let response = self
            .client
            .put(url)
            .header(ACCEPT, "application/json")
            .json(tenant)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TenantError::SaveFailed {
                id: tenant.id.clone(),
                reason: format!("{}: {}", status, body),
            }
            .into());
        }

        let envelope: TenantEnvelope = response.json().await?;
        Ok(envelope.tenant)
    }
}

#[async_trait]
impl TenantSource for TenantApi {
    async fn fetch_by_domain(&self, domain: &str) -> Option<TenantConfig> {
        self.fetch(domain).await
    }
}
