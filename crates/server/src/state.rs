use std::sync::Arc;

use configs::NotFoundPolicy;
use service::item::{repository::ItemRepository, service::ItemService};

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<ItemService>,
    pub not_found: NotFoundPolicy,
}

impl AppState {
    pub fn new(repo: Arc<dyn ItemRepository>, not_found: NotFoundPolicy) -> Self {
        Self { items: Arc::new(ItemService::new(repo)), not_found }
    }
}
