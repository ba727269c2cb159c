//! Listener loop and the state shared by every connection.

pub mod listener;

use crate::config::Config;
use crate::handlers::{self, Endpoint};
use crate::router::Router;
use crate::store::FileStore;

/// Read-only state shared by all connection tasks.
#[derive(Debug)]
pub struct AppState {
    pub router: Router<Endpoint>,
    pub store: FileStore,
}

impl AppState {
    pub fn new(cfg: &Config) -> Self {
        Self {
            router: handlers::routes(),
            store: FileStore::new(&cfg.directory),
        }
    }
}
