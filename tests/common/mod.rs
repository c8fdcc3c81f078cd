//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use media_balancer::config::{BackendConfig, ServiceClass};
use media_balancer::lifecycle::startup;
use media_balancer::net::Listener;
use media_balancer::proxy::Acceptor;
use media_balancer::{BalancerConfig, Shutdown};

/// Start a mock media backend that echoes each request prefixed with its
/// name, serving any number of requests per connection. Returns the bound
/// address and a counter of requests served.
#[allow(dead_code)]
pub async fn start_media_backend(name: &'static str) -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let served = Arc::new(AtomicUsize::new(0));
    let counter = served.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        loop {
                            let n = match socket.read(&mut buf).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => n,
                            };
                            counter.fetch_add(1, Ordering::SeqCst);
                            let mut reply = Vec::from(name.as_bytes());
                            reply.push(b':');
                            reply.extend_from_slice(&buf[..n]);
                            if socket.write_all(&reply).await.is_err() {
                                break;
                            }
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, served)
}

/// Like `start_media_backend`, but sleeps before each reply so requests
/// stay in flight long enough to race against shutdown.
#[allow(dead_code)]
pub async fn start_slow_backend(name: &'static str, delay: std::time::Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        loop {
                            let n = match socket.read(&mut buf).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => n,
                            };
                            tokio::time::sleep(delay).await;
                            let mut reply = Vec::from(name.as_bytes());
                            reply.push(b':');
                            reply.extend_from_slice(&buf[..n]);
                            if socket.write_all(&reply).await.is_err() {
                                break;
                            }
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a backend that drops its first accepted connection immediately and
/// echoes raw bytes on every later connection. Exercises the balancer's
/// reconnect-and-retry path.
#[allow(dead_code)]
pub async fn start_flaky_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let connections = Arc::new(AtomicUsize::new(0));

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    if connections.fetch_add(1, Ordering::SeqCst) == 0 {
                        // First connection (the balancer's startup connect)
                        // is dropped without a word.
                        drop(socket);
                        continue;
                    }
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        loop {
                            let n = match socket.read(&mut buf).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => n,
                            };
                            if socket.write_all(&buf[..n]).await.is_err() {
                                break;
                            }
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a backend that accepts, reads one request and hangs up without
/// replying, on every connection. Both the first exchange and the retry
/// against it fail.
#[allow(dead_code)]
pub async fn start_black_hole_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        let _ = socket.read(&mut buf).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Boot a full balancer over the given backend pool on an ephemeral port.
/// The returned `Shutdown` must be kept alive for the balancer's lifetime.
#[allow(dead_code)]
pub async fn start_balancer(backends: &[(SocketAddr, ServiceClass)]) -> (SocketAddr, Shutdown) {
    let mut config = BalancerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    for (addr, class) in backends {
        config.backends.push(BackendConfig {
            address: addr.to_string(),
            class: *class,
        });
    }

    let state = startup::init_backends(&config).await.unwrap();
    let listener = Listener::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = Acceptor::new(listener, state).run(rx).await;
    });

    (addr, shutdown)
}

/// Open a client connection, send one request and read the whole response
/// until the balancer closes the connection.
#[allow(dead_code)]
pub async fn send_request(balancer: SocketAddr, payload: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(balancer).await.unwrap();
    stream.write_all(payload).await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}
