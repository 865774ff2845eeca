//! Category listing fetches for the browse grids.
//!
//! Each category is fetched at most once per session: the shared store's
//! `browse_lists` map is the cache and its `loading_browse_lists` set is
//! the in-flight guard, so two grids asking for the same category do not
//! race a duplicate request.

use std::sync::Arc;

use async_trait::async_trait;

use filmlog_core::movie::{BrowseCategory, Movie};

use crate::api::ClientError;
use crate::state::{Action, Store};

/// The fetch seam the controller is generic over.
#[async_trait]
pub trait BrowseBackend: Send + Sync + 'static {
    async fn category_listing(
        &self,
        category: BrowseCategory,
        page: u32,
    ) -> Result<Vec<Movie>, ClientError>;
}

/// Loads category listings into the shared store.
pub struct BrowseController<B: BrowseBackend> {
    store: Arc<Store>,
    backend: Arc<B>,
}

impl<B: BrowseBackend> BrowseController<B> {
    pub fn new(store: Arc<Store>, backend: Arc<B>) -> Self {
        Self { store, backend }
    }

    /// Fetch the first page of a category unless it is already loaded or
    /// loading.
    pub async fn load(&self, category: BrowseCategory) {
        let skip = self.store.read(|s| {
            s.browse_lists.contains_key(&category) || s.loading_browse_lists.contains(&category)
        });
        if skip {
            return;
        }

        self.store.dispatch(Action::SetLoadingBrowseList {
            category,
            is_loading: true,
        });

        match self.backend.category_listing(category, 1).await {
            Ok(movies) => {
                self.store.dispatch(Action::SetBrowseList { category, movies });
                self.store.dispatch(Action::SetLoadingBrowseList {
                    category,
                    is_loading: false,
                });
            }
            Err(err) => {
                tracing::error!(error = %err, %category, "Category listing failed");
                self.store.dispatch(Action::SetLoadingBrowseList {
                    category,
                    is_loading: false,
                });
            }
        }
    }

    /// Load every category, in dashboard order.
    pub async fn load_all(&self) {
        for category in BrowseCategory::all() {
            self.load(category).await;
        }
    }
}
