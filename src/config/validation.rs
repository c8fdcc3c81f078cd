//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that addresses parse and value ranges make sense
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: BalancerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::BalancerConfig;
use crate::protocol::MIN_REQUEST_LEN;

/// A single semantic problem found in a configuration.
#[derive(Debug)]
pub enum ValidationError {
    /// The listener bind address does not parse as host:port.
    InvalidBindAddress(String),
    /// A backend address does not parse as host:port.
    InvalidBackendAddress { index: usize, address: String },
    /// The backend pool is empty; the balancer cannot serve.
    NoBackends,
    /// max_connections must be at least 1.
    ZeroConnectionCap,
    /// The read buffer must at least fit a minimal request.
    ReadBufferTooSmall(usize),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address {:?} is not a valid socket address", addr)
            }
            ValidationError::InvalidBackendAddress { index, address } => {
                write!(f, "backends[{}].address {:?} is not a valid socket address", index, address)
            }
            ValidationError::NoBackends => write!(f, "at least one backend must be configured"),
            ValidationError::ZeroConnectionCap => {
                write!(f, "listener.max_connections must be at least 1")
            }
            ValidationError::ReadBufferTooSmall(size) => {
                write!(
                    f,
                    "proxy.read_buffer_size {} is smaller than the minimal request ({} bytes)",
                    size, MIN_REQUEST_LEN
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &BalancerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroConnectionCap);
    }

    if config.backends.is_empty() {
        errors.push(ValidationError::NoBackends);
    }

    for (index, backend) in config.backends.iter().enumerate() {
        if backend.address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidBackendAddress {
                index,
                address: backend.address.clone(),
            });
        }
    }

    if config.proxy.read_buffer_size < MIN_REQUEST_LEN {
        errors.push(ValidationError::ReadBufferTooSmall(config.proxy.read_buffer_size));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
