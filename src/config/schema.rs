//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! balancer. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

/// Root configuration for the load balancer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BalancerConfig {
    /// Listener configuration (bind address, connection cap).
    pub listener: ListenerConfig,

    /// Ordered backend pool. Selection ties break toward the lowest index.
    pub backends: Vec<BackendConfig>,

    /// Proxying settings shared by all connections.
    pub proxy: ProxySettings,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:7100").
    pub bind_address: String,

    /// Maximum concurrent in-flight connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:7100".to_string(),
            max_connections: 64,
        }
    }
}

/// The service class a backend specializes in.
///
/// Same-affinity traffic is cheapest for a backend; cross-affinity traffic
/// pays a transcoding penalty in the load estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceClass {
    Video,
    Music,
}

impl std::fmt::Display for ServiceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceClass::Video => write!(f, "video"),
            ServiceClass::Music => write!(f, "music"),
        }
    }
}

/// Backend server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Backend address (e.g., "192.168.0.101:80").
    pub address: String,

    /// Service class this backend specializes in.
    pub class: ServiceClass,
}

/// Settings for the per-connection proxy path.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxySettings {
    /// Read buffer size for client requests and backend responses, in bytes.
    pub read_buffer_size: usize,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            read_buffer_size: 1024,
        }
    }
}
