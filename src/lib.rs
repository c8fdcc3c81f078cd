//! Media request load balancer.
//!
//! Sits between clients of three media-service categories (music, video,
//! premium) and a fixed pool of class-affine backend servers, routing each
//! request to the backend with the smallest projected finish time.
//!
//! # Data Flow
//! ```text
//! Client connection
//!     → net (bounded listener)
//!     → proxy::acceptor (spawn one task per connection)
//!     → protocol (validate 2-byte request)
//!     → balancer (decay loads, weighted greedy selection)
//!     → upstream (forward over the backend's persistent transport,
//!                 reconnect-and-retry once on failure)
//!     → response relayed verbatim to the client
//! ```

// Core subsystems
pub mod config;
pub mod net;
pub mod protocol;
pub mod proxy;

// Traffic management
pub mod balancer;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;

pub use config::BalancerConfig;
pub use lifecycle::Shutdown;
