//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed responses keyed by request path, optionally gzip-encoded,
//! and counts every request it receives. Unknown paths get 404.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    /// Send the body with `Content-Encoding: gzip`.
    pub gzip: bool,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            gzip: false,
        }
    }

    pub fn gzip(body: impl Into<Vec<u8>>) -> Self {
        Self {
            gzip: true,
            ..Self::ok(body)
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: format!("status {}", status).into_bytes(),
            gzip: false,
        }
    }
}

pub struct StaticServer {
    /// Base URL ending in `/`, e.g. `http://127.0.0.1:12345/`.
    pub base: String,
    hits: Arc<AtomicUsize>,
    paths: Arc<Mutex<Vec<String>>>,
    heads: Arc<Mutex<Vec<String>>>,
}

impl StaticServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requested_paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }

    /// Raw request heads (request line plus headers), in arrival order.
    pub fn request_heads(&self) -> Vec<String> {
        self.heads.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> StaticServer {
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (format!("/{}", p.trim_start_matches('/')), r))
            .collect(),
    );
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let paths = Arc::new(Mutex::new(Vec::new()));
    let heads = Arc::new(Mutex::new(Vec::new()));
    {
        let hits = Arc::clone(&hits);
        let paths = Arc::clone(&paths);
        let heads = Arc::clone(&heads);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let hits = Arc::clone(&hits);
                let paths = Arc::clone(&paths);
                let heads = Arc::clone(&heads);
                thread::spawn(move || handle(stream, &routes, &hits, &paths, &heads));
            }
        });
    }
    StaticServer {
        base: format!("http://127.0.0.1:{}/", port),
        hits,
        paths,
        heads,
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    hits: &AtomicUsize,
    paths: &Mutex<Vec<String>>,
    heads: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let head = request.split("\r\n\r\n").next().unwrap_or(request).to_string();
    hits.fetch_add(1, Ordering::SeqCst);
    paths.lock().unwrap().push(path.clone());
    heads.lock().unwrap().push(head);

    let route = routes.get(&path).cloned().unwrap_or_else(|| Route::status(404));
    let (body, encoding) = if route.gzip {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(&route.body).unwrap();
        (enc.finish().unwrap(), "Content-Encoding: gzip\r\n")
    } else {
        (route.body, "")
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        route.status,
        reason(route.status),
        body.len(),
        encoding
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&body);
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
