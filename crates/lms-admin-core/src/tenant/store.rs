//! Persisted tenant state container
//!
//! The store is constructed once at the composition root and shared by reference.
//! Persistence is an explicit `rehydrate`/`persist` pair against the `tenant-storage` key.
//!
//! Every loading operation takes a request generation. A response that resolves after a
//! newer operation started is dropped, so overlapping refreshes cannot clobber fresher state.

use super::resolver::{self, CURRENT_TENANT_KEY};
use super::{BrandingApplier, Location, TenantSource};
use crate::error::{Error, Result, TenantError};
use crate::storage::Storage;
use crate::types::{DetectionMethod, TenantConfig};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key for the persisted store state
pub const TENANT_STORAGE_KEY: &str = "tenant-storage";

const PERSIST_VERSION: u32 = 0;

/// Observable tenant state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TenantState {
    pub current_tenant: Option<TenantConfig>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub detection_method: Option<DetectionMethod>,
    pub is_initialized: bool,
}

/// The subset of state that survives a reload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTenantState {
    pub current_tenant: Option<TenantConfig>,
    pub detection_method: Option<DetectionMethod>,
    pub is_initialized: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistEnvelope {
    state: PersistedTenantState,
    version: u32,
}

impl From<&TenantState> for PersistedTenantState {
    fn from(state: &TenantState) -> Self {
        Self {
            current_tenant: state.current_tenant.clone(),
            detection_method: state.detection_method,
            is_initialized: state.is_initialized,
        }
    }
}

/// Tenant store
pub struct TenantStore {
    storage: Arc<Storage>,
    source: Arc<dyn TenantSource>,
    applier: Arc<dyn BrandingApplier>,
    location: Location,
    state: Mutex<TenantState>,
    generation: AtomicU64,
}

impl TenantStore {
    pub fn new(
        storage: Arc<Storage>,
        source: Arc<dyn TenantSource>,
        applier: Arc<dyn BrandingApplier>,
        location: Location,
    ) -> Self {
        Self {
            storage,
            source,
            applier,
            location,
            state: Mutex::new(TenantState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> TenantState {
        self.state.lock().clone()
    }

    pub fn current_tenant(&self) -> Option<TenantConfig> {
        self.state.lock().current_tenant.clone()
    }

    /// Restore persisted state and re-apply branding immediately.
    ///
    /// Returns `true` when a tenant was restored. A corrupt entry is purged.
    pub fn rehydrate(&self) -> Result<bool> {
        let envelope = match self.storage.get_json::<PersistEnvelope>(TENANT_STORAGE_KEY) {
            Ok(Some(envelope)) => envelope,
            Ok(None) => return Ok(false),
            Err(Error::Json(e)) => {
                warn!("Discarding malformed persisted tenant state: {}", e);
                self.storage.remove_item(TENANT_STORAGE_KEY)?;
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        if envelope.version != PERSIST_VERSION {
            debug!(
                "Persisted tenant state version {} differs from {}",
                envelope.version, PERSIST_VERSION
            );
        }

        let persisted = envelope.state;
        let mut state = self.state.lock();
        state.current_tenant = persisted.current_tenant;
        state.detection_method = persisted.detection_method;
        state.is_initialized = persisted.is_initialized;

        match &state.current_tenant {
            Some(tenant) => {
                info!("Rehydrated tenant {} ({})", tenant.name, tenant.id);
                self.applier.apply(tenant);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Write the persisted subset of state
    pub fn persist(&self) -> Result<()> {
        let state = self.state.lock();
        self.persist_state(&state)
    }

    fn persist_state(&self, state: &TenantState) -> Result<()> {
        let envelope = PersistEnvelope {
            state: PersistedTenantState::from(state),
            version: PERSIST_VERSION,
        };
        self.storage.set_json(TENANT_STORAGE_KEY, &envelope)
    }

    fn begin_request(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Resolve, fetch, store and apply the tenant for the current location.
    ///
    /// Failures are recorded in `error` and the store is still marked initialized.
    pub async fn initialize_tenant(&self) -> Result<TenantConfig> {
        let generation = self.begin_request();
        self.start_loading();

        let location = &self.location;
        let detection = resolver::detect(location, &self.storage);
        debug!("Tenant detection: {} (valid: {})", detection.method, detection.is_valid);

        let outcome = match detection.tenant {
            Some(tenant) => Ok(tenant),
            None if !detection.is_valid => Err(TenantError::NotResolved),
            None => {
                let domain = resolver::tenant_domain(location);
                self.source
                    .fetch_by_domain(&domain)
                    .await
                    .ok_or(TenantError::NotFound(domain))
            }
        };

        let mut state = self.state.lock();
        if !self.is_current(generation) {
            debug!("Discarding stale tenant initialization #{}", generation);
            return Err(TenantError::Superseded.into());
        }

        state.is_loading = false;
        state.is_initialized = true;
        state.detection_method = Some(detection.method);

        match outcome {
            Ok(tenant) => {
                info!("Tenant initialized: {} via {}", tenant.id, detection.method);
                state.error = None;
                state.current_tenant = Some(tenant.clone());
                self.commit(&state, &tenant);
                Ok(tenant)
            }
            Err(e) => {
                warn!("Tenant initialization failed: {}", e);
                state.error = Some(e.to_string());
                self.persist_logged(&state);
                Err(e.into())
            }
        }
    }

    /// Inject a tenant directly, e.g. after an admin saved the settings
    pub fn set_tenant(&self, tenant: TenantConfig) {
        self.begin_request();
        let mut state = self.state.lock();
        info!("Setting tenant {} ({})", tenant.name, tenant.id);

        state.current_tenant = Some(tenant.clone());
        state.is_initialized = true;
        state.is_loading = false;
        state.error = None;
        self.commit(&state, &tenant);
    }

    /// Reset all state and purge the persisted entries
    pub fn clear_tenant(&self) -> Result<()> {
        self.begin_request();
        let mut state = self.state.lock();
        *state = TenantState::default();

        resolver::clear_cached_tenant(&self.storage)?;
        self.storage.remove_item(TENANT_STORAGE_KEY)?;
        info!("Tenant state cleared");
        Ok(())
    }

    /// Re-fetch the current tenant.
    ///
    /// On failure the previous tenant stays in place and only `error` is set.
    pub async fn refresh_tenant(&self) -> Result<TenantConfig> {
        let generation = self.begin_request();
        let domain = self.refresh_domain();
        self.start_loading();

        debug!("Refreshing tenant {}", domain);
        let fetched = self.source.fetch_by_domain(&domain).await;

        let mut state = self.state.lock();
        if !self.is_current(generation) {
            debug!("Discarding stale tenant refresh #{}", generation);
            return Err(TenantError::Superseded.into());
        }
        state.is_loading = false;

        match fetched {
            Some(tenant) => {
                info!("Tenant refreshed: {}", tenant.id);
                state.error = None;
                state.current_tenant = Some(tenant.clone());
                self.commit(&state, &tenant);
                Ok(tenant)
            }
            None => {
                let e = TenantError::NotFound(domain);
                warn!("Tenant refresh failed: {}", e);
                state.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Domain for refreshes: the loaded tenant's, else the one in the URL
    fn refresh_domain(&self) -> String {
        self.state
            .lock()
            .current_tenant
            .as_ref()
            .map(|tenant| tenant.domain.clone())
            .unwrap_or_else(|| resolver::tenant_domain(&self.location))
    }

    fn start_loading(&self) {
        let mut state = self.state.lock();
        state.is_loading = true;
        state.error = None;
    }

    /// Cache, persist, then apply branding
    fn commit(&self, state: &TenantState, tenant: &TenantConfig) {
        if let Err(e) = resolver::cache_tenant(&self.storage, tenant) {
            warn!("Failed to write {}: {}", CURRENT_TENANT_KEY, e);
        }
        self.persist_logged(state);
        self.applier.apply(tenant);
    }

    fn persist_logged(&self, state: &TenantState) {
        if let Err(e) = self.persist_state(state) {
            warn!("Failed to persist tenant state: {}", e);
        }
    }
}
