//! HTTP lookup server
//!
//! Serves `GET <route>?name=<slug>` from an index loaded once at startup.
//! Worker threads share the immutable index; serialized bodies of found
//! slugs are kept in an LRU cache.

use crate::error::{Error, Result};
use crate::index::IndexReader;
use crate::server::protocol::{
    LookupResponse, NAME_PARAM, STATUS_NOT_FOUND, STATUS_OK, StatusResponse, lookup,
};
use crate::utils::ServerConfig;
use lru::LruCache;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tiny_http::{Header, Response, Server};
use tracing::{debug, error, info};

const STATUS_PATH: &str = "/status";

/// Lookup counters behind `/status`
#[derive(Default)]
struct LookupCounters {
    queries: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl LookupCounters {
    fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    fn record_cache(&self, hit: bool) {
        let counter = if hit { &self.cache_hits } else { &self.cache_misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Share of cached slug lookups answered from the cache (0.0 when none)
    fn hit_rate(&self) -> f32 {
        let hits = self.cache_hits.load(Ordering::Relaxed) as f32;
        let lookups = hits + self.cache_misses.load(Ordering::Relaxed) as f32;
        if lookups > 0.0 { hits / lookups } else { 0.0 }
    }
}

/// The lookup server
pub struct LookupServer {
    reader: IndexReader,
    route: String,
    body_cache: Mutex<LruCache<String, String>>,
    counters: LookupCounters,
    started: Instant,
    shutdown: AtomicBool,
}

impl LookupServer {
    /// Create a lookup server wrapped in Arc
    pub fn new(reader: IndexReader, config: &ServerConfig) -> Arc<Self> {
        let capacity = NonZeroUsize::new(config.cache_size).unwrap_or(NonZeroUsize::MIN);
        Arc::new(Self {
            reader,
            route: config.route.clone(),
            body_cache: Mutex::new(LruCache::new(capacity)),
            counters: LookupCounters::default(),
            started: Instant::now(),
            shutdown: AtomicBool::new(false),
        })
    }

    /// Bind `addr` and start `workers` threads
    pub fn start(self: &Arc<Self>, addr: &str, workers: usize) -> Result<ServerHandle> {
        let http = Server::http(addr).map_err(|e| Error::Server(format!("bind {}: {}", addr, e)))?;
        let http = Arc::new(http);
        let local_addr = http
            .server_addr()
            .to_ip()
            .ok_or_else(|| Error::Server(format!("{} is not an IP address", addr)))?;

        info!(
            addr = %local_addr,
            route = %self.route,
            entries = self.reader.len(),
            "lookup server listening"
        );

        let threads = (0..workers.max(1))
            .map(|_| {
                let server = Arc::clone(self);
                let http = Arc::clone(&http);
                thread::spawn(move || server.worker_loop(&http))
            })
            .collect();

        Ok(ServerHandle {
            addr: local_addr,
            http,
            server: Arc::clone(self),
            threads,
        })
    }

    fn worker_loop(&self, http: &Server) {
        loop {
            let request = match http.recv() {
                Ok(request) => request,
                Err(e) => {
                    if self.shutdown.load(Ordering::Relaxed) {
                        break;
                    }
                    error!(error = %e, "accept error");
                    continue;
                }
            };

            let reply = self.respond(request.url());
            debug!(url = %request.url(), status = reply.status, "lookup");

            let mut response = Response::from_string(reply.body).with_status_code(reply.status);
            if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
                response.add_header(header);
            }

            if let Err(e) = request.respond(response) {
                error!(error = %e, "failed to send response");
            }
        }
    }

    /// Answer a request URL (path plus query string)
    pub fn respond(&self, url: &str) -> LookupResponse {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));

        if path == self.route {
            let name = url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == NAME_PARAM)
                .map(|(_, value)| value.into_owned());
            return self.lookup_cached(name.as_deref());
        }

        if path == STATUS_PATH {
            let body = serde_json::to_string(&self.status()).unwrap_or_else(|_| "{}".to_string());
            return LookupResponse::new(STATUS_OK, body);
        }

        LookupResponse::new(STATUS_NOT_FOUND, r#"{"error":"not found"}"#.to_string())
    }

    fn lookup_cached(&self, name: Option<&str>) -> LookupResponse {
        self.counters.record_query();

        let Some(slug) = name else {
            return lookup(&self.reader, None);
        };

        let cached = self
            .body_cache
            .lock()
            .ok()
            .and_then(|mut cache| cache.get(slug).cloned());
        self.counters.record_cache(cached.is_some());
        if let Some(body) = cached {
            return LookupResponse::new(STATUS_OK, body);
        }

        let response = lookup(&self.reader, Some(slug));
        if !response.is_null() {
            if let Ok(mut cache) = self.body_cache.lock() {
                cache.put(slug.to_string(), response.body.clone());
            }
        }
        response
    }

    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            uptime_secs: self.started.elapsed().as_secs(),
            entries: self.reader.len(),
            queries_served: self.counters.queries.load(Ordering::Relaxed),
            cache_hit_rate: self.counters.hit_rate(),
        }
    }
}

/// A running lookup server
pub struct ServerHandle {
    addr: SocketAddr,
    http: Arc<Server>,
    server: Arc<LookupServer>,
    threads: Vec<JoinHandle<()>>,
}

impl ServerHandle {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Block until every worker exits
    pub fn wait(self) {
        for thread in self.threads {
            let _ = thread.join();
        }
    }

    /// Stop accepting requests and join the workers
    pub fn shutdown(self) {
        self.server.shutdown.store(true, Ordering::Relaxed);
        for _ in &self.threads {
            self.http.unblock();
        }
        self.wait();
    }
}

/// Load the index and serve it until the process exits
pub fn run_foreground(reader: IndexReader, config: &ServerConfig) -> Result<()> {
    let server = LookupServer::new(reader, config);
    let handle = server.start(&config.addr, config.effective_workers())?;
    handle.wait();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexArtifact, Projection};
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpStream;
    use std::path::PathBuf;

    fn server() -> Arc<LookupServer> {
        let mut ally = Projection::new();
        ally.insert("title".into(), json!("Ally"));
        ally.insert("html".into(), json!("<p>x</p>"));
        let mut artifact = IndexArtifact::new();
        artifact.insert("ally".into(), ally);
        artifact.insert("two words".into(), Projection::new());

        let reader = IndexReader::from_artifact(PathBuf::from("api.json"), artifact);
        LookupServer::new(reader, &ServerConfig::default())
    }

    #[test]
    fn test_respond_found_and_missing() {
        let server = server();

        let found = server.respond("/api?name=ally");
        assert_eq!(found.status, 200);
        assert_eq!(found.body, r#"{"title":"Ally","html":"<p>x</p>"}"#);

        let missing = server.respond("/api?name=nobody");
        assert_eq!(missing, LookupResponse::new(200, "null".into()));

        let no_param = server.respond("/api");
        assert_eq!(no_param.body, "null");
    }

    #[test]
    fn test_respond_decodes_query() {
        let server = server();
        assert_eq!(server.respond("/api?name=two+words").body, "{}");
        assert_eq!(server.respond("/api?other=1&name=two%20words").body, "{}");
    }

    #[test]
    fn test_unknown_path_is_404() {
        assert_eq!(server().respond("/nope?name=ally").status, 404);
    }

    #[test]
    fn test_status_path() {
        let server = server();
        server.respond("/api?name=ally");

        let reply = server.respond("/status");
        assert_eq!(reply.status, 200);
        let status: StatusResponse = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(status.entries, 2);
        assert_eq!(status.queries_served, 1);
        assert_eq!(status.cache_hit_rate, 0.0);
    }

    #[test]
    fn test_cache_hits_counted() {
        let server = server();
        server.respond("/api?name=ally");
        server.respond("/api?name=ally");
        server.respond("/api?name=nobody");

        let status = server.status();
        assert_eq!(status.queries_served, 3);
        assert_eq!(status.entries, 2);
        // ally: miss then hit; nobody: miss
        assert!((status.cache_hit_rate - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_serves_over_http() {
        let server = server();
        let handle = server.start("127.0.0.1:0", 2).unwrap();

        let mut stream = TcpStream::connect(handle.addr()).unwrap();
        stream
            .write_all(b"GET /api?name=ally HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).unwrap();

        assert!(raw.starts_with("HTTP/1.1 200"));
        assert!(raw.contains("application/json"));
        assert!(raw.ends_with(r#"{"title":"Ally","html":"<p>x</p>"}"#));

        handle.shutdown();
    }
}
