//! The store: owns the state, applies actions, caches derived views.

use tracing::{debug, warn};
use turbo_catalog::search::{derive_visible_products, FilterSpec};
use turbo_catalog::{selectors, Product, ProductId};

use crate::action::Action;
use crate::error::StorageError;
use crate::reducer::reduce;
use crate::state::{AppState, RequestId};
use crate::storage::FavoritesStorage;

/// Visible products cached for one (catalog revision, filter spec) pair.
#[derive(Debug)]
struct VisibleMemo {
    revision: u64,
    spec: FilterSpec,
    products: Vec<Product>,
}

/// Single owner of [`AppState`].
///
/// All mutation goes through [`Store::dispatch`]. Derived data is computed
/// from the state on demand and memoized until the catalog or filters change.
pub struct Store {
    state: AppState,
    next_request: u64,
    storage: Option<Box<dyn FavoritesStorage>>,
    visible: Option<VisibleMemo>,
}

impl Store {
    pub fn new() -> Self {
        Self::from_state(AppState::new())
    }

    pub fn from_state(state: AppState) -> Self {
        Self {
            state,
            next_request: 0,
            storage: None,
            visible: None,
        }
    }

    /// Attach favorites persistence, loading whatever was saved.
    ///
    /// A load failure is logged and the store starts with no favorites.
    pub fn with_storage(mut self, storage: impl FavoritesStorage + 'static) -> Self {
        match storage.load() {
            Ok(favorites) => {
                debug!(count = favorites.count(), "restored favorites");
                self.state.favorites = favorites;
            }
            Err(e) => warn!(error = %e, "could not load favorites, starting empty"),
        }
        self.storage = Some(Box::new(storage));
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Allocate a fresh id for a fetch about to be issued.
    pub fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId::new(self.next_request)
    }

    /// Apply an action; returns whether the state changed.
    ///
    /// A failed favorites save is logged and otherwise ignored. Callers that
    /// must know the change was persisted use [`Store::try_dispatch`].
    pub fn dispatch(&mut self, action: Action) -> bool {
        match self.try_dispatch(action) {
            Ok(changed) => changed,
            Err(e) => {
                warn!(error = %e, "could not save favorites");
                true
            }
        }
    }

    /// Apply an action, saving favorites if it changed them.
    ///
    /// The in-memory state is updated even when the save fails.
    pub fn try_dispatch(&mut self, action: Action) -> Result<bool, StorageError> {
        let name = action.name();
        let persist = action.touches_favorites();
        let changed = reduce(&mut self.state, action);
        debug!(action = name, changed, "dispatched");

        if changed && persist {
            self.save_favorites()?;
        }
        Ok(changed)
    }

    /// Write the current favorites to the attached storage, if any.
    pub fn save_favorites(&self) -> Result<(), StorageError> {
        match &self.storage {
            Some(storage) => storage.save(&self.state.favorites),
            None => Ok(()),
        }
    }

    /// Products after search, category and sort are applied.
    pub fn visible_products(&mut self) -> &[Product] {
        let revision = self.state.catalog.revision;
        let spec = &self.state.filters;
        let fresh = matches!(
            &self.visible,
            Some(memo) if memo.revision == revision && memo.spec == *spec
        );
        if !fresh {
            self.visible = Some(VisibleMemo {
                revision,
                spec: spec.clone(),
                products: derive_visible_products(&self.state.catalog.items, spec),
            });
        }
        match &self.visible {
            Some(memo) => &memo.products,
            None => &[],
        }
    }

    pub fn visible_count(&mut self) -> usize {
        self.visible_products().len()
    }

    pub fn has_active_filters(&self) -> bool {
        self.state.filters.has_active_filters()
    }

    pub fn is_favorite(&self, id: ProductId) -> bool {
        selectors::is_favorite(&self.state.favorites, id)
    }

    pub fn favorites_count(&self) -> usize {
        selectors::favorites_count(&self.state.favorites)
    }

    /// Look a product up in the loaded catalog.
    pub fn find_product(&self, id: ProductId) -> Option<&Product> {
        selectors::find_by_id(&self.state.catalog.items, id)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
