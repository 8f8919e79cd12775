use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use highball::{App, AppBuilder, Middleware, Request, Response};

pub fn fixtures_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Builder pointed at the test fixtures
pub fn builder() -> AppBuilder {
    let mut builder = App::builder();
    builder
        .templates_dir(fixtures_dir("templates"))
        .static_dir(fixtures_dir("static"));
    builder
}

pub type Log = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Middleware that records its hook calls into a shared log
pub struct Recorder {
    pub name: &'static str,
    pub log: Log,
}

impl Middleware for Recorder {
    fn process_request(&self, req: &mut Request) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{} request {}", self.name, req.path()));
    }

    fn process_response(&self, _req: &Request, resp: &mut Response) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{} response {}", self.name, resp.status().as_u16()));
    }
}
