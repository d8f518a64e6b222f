//! Gateway selection and process-lifetime caching
//!
//! The registry resolves exactly one [`Gateway`] and hands out shared
//! references to it. Resolution happens at most once: concurrent initializers
//! serialize on an async lock and the first one wins, readers afterwards only
//! do a lock-free load.

use crate::config::{Config, GatewayMode, RuntimeEnvironment};
use crate::core::traits::StorageGateway;
use crate::storage::gateway::{Gateway, GatewayKind, MockGateway, ProductionGateway};
use crate::utils::error::{GatewayError, Result};
use crate::utils::time::{SharedClock, SystemClock};
use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// What the configuration asks the registry to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPlan {
    /// Mock gateway, no origin contact
    Mock,
    /// Production gateway, optionally health-checked with mock fallback
    Production { fallback: bool },
}

impl SelectionPlan {
    /// Decide from mode and environment
    pub fn from_config(config: &Config) -> Self {
        let registry = &config.registry;
        match registry.mode {
            GatewayMode::Mock => SelectionPlan::Mock,
            GatewayMode::Production => SelectionPlan::Production {
                fallback: registry.fallback_enabled,
            },
            GatewayMode::Auto => match registry.environment {
                RuntimeEnvironment::Test => SelectionPlan::Mock,
                RuntimeEnvironment::Development if !registry.force_origin => SelectionPlan::Mock,
                _ => SelectionPlan::Production { fallback: true },
            },
        }
    }
}

/// Outcome of resolution, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySelection {
    /// Implementation in use
    pub kind: GatewayKind,
    /// Production was requested but the origin was unhealthy
    pub fell_back: bool,
}

#[derive(Debug)]
struct Resolved {
    gateway: Arc<Gateway>,
    selection: GatewaySelection,
}

/// Lazily resolved, cached gateway
#[derive(Debug)]
pub struct GatewayRegistry {
    config: Config,
    clock: SharedClock,
    resolved: ArcSwapOption<Resolved>,
    init_lock: Mutex<()>,
}

impl GatewayRegistry {
    /// Create an unresolved registry using the system clock
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, SystemClock::shared())
    }

    /// Create an unresolved registry with an explicit clock
    pub fn with_clock(config: Config, clock: SharedClock) -> Self {
        Self {
            config,
            clock,
            resolved: ArcSwapOption::empty(),
            init_lock: Mutex::new(()),
        }
    }

    /// Resolve the gateway if needed and return it.
    ///
    /// Calling this again returns the instance resolved first.
    pub async fn initialize(&self) -> Result<Arc<Gateway>> {
        if let Some(resolved) = self.resolved.load_full() {
            return Ok(resolved.gateway.clone());
        }

        let _guard = self.init_lock.lock().await;
        if let Some(resolved) = self.resolved.load_full() {
            return Ok(resolved.gateway.clone());
        }

        let (gateway, selection) = self.resolve().await?;
        info!(
            "Storage gateway resolved: {} (fell back: {})",
            selection.kind, selection.fell_back
        );

        let gateway = Arc::new(gateway);
        self.resolved.store(Some(Arc::new(Resolved {
            gateway: gateway.clone(),
            selection,
        })));
        Ok(gateway)
    }

    /// The resolved gateway, or `NotInitialized`
    pub fn gateway(&self) -> Result<Arc<Gateway>> {
        self.resolved
            .load_full()
            .map(|resolved| resolved.gateway.clone())
            .ok_or(GatewayError::NotInitialized)
    }

    /// How the gateway was chosen, once resolved
    pub fn selection(&self) -> Option<GatewaySelection> {
        self.resolved.load_full().map(|resolved| resolved.selection)
    }

    pub fn is_initialized(&self) -> bool {
        self.resolved.load().is_some()
    }

    /// Configuration the registry resolves from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Drop the cached gateway so the next `initialize` resolves again
    #[cfg(any(test, feature = "test-util"))]
    pub fn reset(&self) {
        self.resolved.store(None);
    }

    async fn resolve(&self) -> Result<(Gateway, GatewaySelection)> {
        match SelectionPlan::from_config(&self.config) {
            SelectionPlan::Mock => Ok((self.mock(), Self::selected(GatewayKind::Mock, false))),
            SelectionPlan::Production { fallback: false } => {
                let gateway = ProductionGateway::new(&self.config, self.clock.clone())?;
                Ok((
                    Gateway::Production(gateway),
                    Self::selected(GatewayKind::Production, false),
                ))
            }
            SelectionPlan::Production { fallback: true } => Ok(self.production_or_mock().await),
        }
    }

    async fn production_or_mock(&self) -> (Gateway, GatewaySelection) {
        let gateway = match ProductionGateway::new(&self.config, self.clock.clone()) {
            Ok(gateway) => gateway,
            Err(e) => {
                warn!("Production gateway unavailable, falling back to mock: {}", e);
                return (self.mock(), Self::selected(GatewayKind::Mock, true));
            }
        };

        let budget = self.config.registry.fallback_timeout();
        let healthy = tokio::time::timeout(budget, gateway.health_check())
            .await
            .unwrap_or(false);

        if healthy {
            (
                Gateway::Production(gateway),
                Self::selected(GatewayKind::Production, false),
            )
        } else {
            warn!(
                "Origin {} failed its health check within {:?}, falling back to mock gateway",
                gateway.base_url(),
                budget
            );
            (self.mock(), Self::selected(GatewayKind::Mock, true))
        }
    }

    fn mock(&self) -> Gateway {
        Gateway::Mock(MockGateway::from_config(&self.config, self.clock.clone()))
    }

    fn selected(kind: GatewayKind, fell_back: bool) -> GatewaySelection {
        GatewaySelection { kind, fell_back }
    }
}
