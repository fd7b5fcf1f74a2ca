//! Domain layer health check functionality
//! This module provides health check services for the application

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use provider_service_data::database::DatabasePool;
use tracing::warn;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Seconds since the health service was created
    pub uptime_seconds: u64,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the status of the database
    /// Returns true if the database answered promptly, false if it answered slowly
    /// Returns an error if the check could not be performed
    async fn check_database_status(&self) -> Result<bool, String>;
}

/// A database ping slower than this marks the database as degraded
pub const DEFAULT_SLOW_PING_THRESHOLD: Duration = Duration::from_secs(1);

/// Health service that pings the storage backend
#[derive(Debug, Clone)]
pub struct HealthService {
    /// `None` when running on in-memory storage
    pool: Option<DatabasePool>,
    slow_ping_threshold: Duration,
    started_at: Instant,
}

impl HealthService {
    /// Health service for the SQLite backend
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            pool: Some(pool),
            slow_ping_threshold: DEFAULT_SLOW_PING_THRESHOLD,
            started_at: Instant::now(),
        }
    }

    /// Health service for in-memory storage, which is always available
    pub fn in_memory() -> Self {
        Self {
            pool: None,
            slow_ping_threshold: DEFAULT_SLOW_PING_THRESHOLD,
            started_at: Instant::now(),
        }
    }

    /// Override how long a ping may take before the database counts as degraded
    pub fn with_slow_ping_threshold(mut self, threshold: Duration) -> Self {
        self.slow_ping_threshold = threshold;
        self
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let db_component = match self.check_database_status().await {
            Ok(true) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
            Ok(false) => HealthComponent {
                status: ComponentStatus::Degraded,
                details: Some(format!(
                    "Database responded slower than {} ms",
                    self.slow_ping_threshold.as_millis()
                )),
            },
            Err(e) => {
                warn!("Database health check failed: {}", e);
                HealthComponent {
                    status: ComponentStatus::Unhealthy,
                    details: Some(e),
                }
            }
        };

        let mut components = HashMap::new();
        components.insert("database".to_string(), db_component);

        SystemHealth {
            status: overall_status(&components),
            uptime_seconds: self.started_at.elapsed().as_secs(),
            components,
        }
    }

    async fn check_database_status(&self) -> Result<bool, String> {
        let Some(pool) = self.pool.clone() else {
            return Ok(true);
        };

        let started = Instant::now();
        match tokio::task::spawn_blocking(move || pool.ping()).await {
            Ok(Ok(())) => {
                let elapsed = started.elapsed();
                if elapsed > self.slow_ping_threshold {
                    warn!("Database ping took {:?}", elapsed);
                    return Ok(false);
                }
                Ok(true)
            }
            Ok(Err(e)) => Err(format!("Database connection error: {}", e)),
            Err(e) => Err(format!("Database check did not complete: {}", e)),
        }
    }
}

/// Worst component status wins
pub fn overall_status(components: &HashMap<String, HealthComponent>) -> SystemStatus {
    let statuses = components.values().map(|c| &c.status);

    if statuses.clone().any(|s| *s == ComponentStatus::Unhealthy) {
        SystemStatus::Unhealthy
    } else if statuses.clone().any(|s| *s == ComponentStatus::Degraded) {
        SystemStatus::Degraded
    } else {
        SystemStatus::Healthy
    }
}
