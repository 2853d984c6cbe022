//! store
//!
//! The client-side synchronization store for cities.
//!
//! # Architecture
//!
//! [`CitiesStore`] owns the only writable copy of [`CitiesState`] and is the
//! only component that talks to the [`CityCollection`]. Consumers receive a
//! [`StoreHandle`] at construction time and either read snapshots or
//! subscribe to changes; they mutate state only through the four
//! operations:
//!
//! - [`CitiesStore::load_all`] - fetch the full list (once per store)
//! - [`CitiesStore::get_city`] - fetch one city and make it current
//! - [`CitiesStore::create_city`] - store a draft, append it, make it current
//! - [`CitiesStore::delete_city`] - remove a city by id
//!
//! # Operation Cycle
//!
//! Each operation dispatches `loading`, awaits exactly one network call, and
//! dispatches exactly one terminal transition. Failures never escape an
//! operation: they become a `rejected` transition with a fixed message, and
//! the underlying cause is logged.
//!
//! # Concurrency
//!
//! Operations take `&self` and may run concurrently. Each transition is
//! applied inside a single `watch::Sender::send_modify`, so readers never see
//! a half-applied change. Transitions apply in completion order. With
//! [`SelectionOrdering::LatestRequest`], every selection (a `get_city`, even
//! one answered from the current city, or a `create_city`) starts a new
//! generation, and results of older selections no longer change the current
//! city.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use worldwise::remote::mock::MockCollection;
//! use worldwise::store::CitiesStore;
//! use worldwise::core::config::SelectionOrdering;
//!
//! # tokio_test::block_on(async {
//! let collection = Arc::new(MockCollection::new());
//! let store = CitiesStore::open(collection, SelectionOrdering::Completion).await;
//!
//! let state = store.snapshot();
//! assert!(state.cities.is_empty());
//! assert!(!state.is_loading());
//! # });
//! ```

mod action;
mod state;

pub use action::Action;
pub use state::{reduce, CitiesState};

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::core::config::SelectionOrdering;
use crate::core::types::{CityId, NewCity};
use crate::remote::{CityCollection, RemoteError};

/// Message shown when the initial list load fails.
pub const LOAD_CITIES_FAILED: &str = "There was an error loading data...";
/// Message shown when a single city cannot be loaded.
pub const LOAD_CITY_FAILED: &str = "There was an error loading the city...";
/// Message shown when a city cannot be created.
pub const CREATE_CITY_FAILED: &str = "There was an error creating the city...";
/// Message shown when a city cannot be deleted.
pub const DELETE_CITY_FAILED: &str = "There was an error deleting the city...";

/// Shared handle to a store.
///
/// Clones are cheap and all observe the same state.
pub type StoreHandle = Arc<CitiesStore>;

/// Owner of the cities state.
pub struct CitiesStore {
    /// The remote collection every operation calls
    collection: Arc<dyn CityCollection>,
    /// Current state, published to subscribers
    state: watch::Sender<CitiesState>,
    /// How concurrent `get_city` results are applied
    ordering: SelectionOrdering,
    /// Generation of the latest selection request
    selection_generation: AtomicU64,
    /// Set once the initial load has started
    initial_load_started: AtomicBool,
}

impl std::fmt::Debug for CitiesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CitiesStore")
            .field("collection", &self.collection.name())
            .field("ordering", &self.ordering)
            .field("state", &*self.state.borrow())
            .finish()
    }
}

impl CitiesStore {
    /// Create a store without loading anything.
    ///
    /// Call [`load_all`](CitiesStore::load_all) to run the initial load, or
    /// use [`open`](CitiesStore::open) to do both.
    pub fn new(collection: Arc<dyn CityCollection>, ordering: SelectionOrdering) -> StoreHandle {
        let (state, _) = watch::channel(CitiesState::default());

        Arc::new(Self {
            collection,
            state,
            ordering,
            selection_generation: AtomicU64::new(0),
            initial_load_started: AtomicBool::new(false),
        })
    }

    /// Create a store and run its initial load.
    ///
    /// A failed load leaves the store usable with an empty list and a
    /// showing error.
    pub async fn open(collection: Arc<dyn CityCollection>, ordering: SelectionOrdering) -> StoreHandle {
        let store = Self::new(collection, ordering);
        store.load_all().await;
        store
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> CitiesState {
        self.state.borrow().clone()
    }

    /// Receive every future state change.
    ///
    /// The receiver starts with the current state marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<CitiesState> {
        self.state.subscribe()
    }

    /// Whether any operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Ordering mode of this store.
    pub fn ordering(&self) -> SelectionOrdering {
        self.ordering
    }

    fn current_id(&self) -> Option<CityId> {
        self.state.borrow().current_id()
    }

    /// Apply one transition atomically and notify subscribers.
    fn dispatch(&self, action: Action) {
        log::debug!("transition: {}", action);
        self.state.send_modify(|state| state.apply(action));
    }

    /// Settle an operation as failed.
    fn reject(&self, message: &str, cause: &RemoteError) {
        log::warn!("{} ({})", message, cause);
        self.dispatch(Action::Rejected(message.to_string()));
    }

    /// Load the full city list.
    ///
    /// Runs once per store. Later calls return without touching the network
    /// or the loading flag.
    pub async fn load_all(&self) {
        if self.initial_load_started.swap(true, Ordering::SeqCst) {
            log::debug!("initial load already ran; skipping");
            return;
        }

        self.dispatch(Action::Loading);

        match self.collection.list_cities().await {
            Ok(cities) => self.dispatch(Action::CitiesLoaded(cities)),
            Err(e) => self.reject(LOAD_CITIES_FAILED, &e),
        }
    }

    /// Load one city and make it current.
    ///
    /// Does nothing when `id` is already the current city: no request is
    /// made and the loading flag does not change. It still counts as the
    /// newest selection, so with latest-request ordering an older fetch that
    /// is still in flight will not replace the current city.
    pub async fn get_city(&self, id: CityId) {
        if self.current_id() == Some(id) {
            log::debug!("city {} is already current", id);
            self.next_generation();
            return;
        }

        let generation = self.next_generation();
        self.dispatch(Action::Loading);

        let result = self.collection.get_city(id).await;

        if self.is_superseded(generation) {
            log::debug!("dropping result for city {} from superseded request", id);
            self.dispatch(Action::Discarded);
            return;
        }

        match result {
            Ok(city) => self.dispatch(Action::CityLoaded(city)),
            Err(e) => self.reject(LOAD_CITY_FAILED, &e),
        }
    }

    /// Start a new selection and return its generation.
    fn next_generation(&self) -> u64 {
        self.selection_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a newer selection has started since `generation`.
    fn is_superseded(&self, generation: u64) -> bool {
        match self.ordering {
            SelectionOrdering::Completion => false,
            SelectionOrdering::LatestRequest => {
                self.selection_generation.load(Ordering::SeqCst) != generation
            }
        }
    }

    /// Store a new city, append it to the list, and make it current.
    ///
    /// With latest-request ordering, a selection started while the create
    /// is in flight keeps its city current; the new city only joins the
    /// list.
    pub async fn create_city(&self, draft: NewCity) {
        let generation = self.next_generation();
        self.dispatch(Action::Loading);

        match self.collection.create_city(draft).await {
            Ok(city) if self.is_superseded(generation) => {
                log::debug!("city {} stored; a newer selection stays current", city.id);
                self.dispatch(Action::CityStored(city));
            }
            Ok(city) => self.dispatch(Action::CityCreated(city)),
            Err(e) => self.reject(CREATE_CITY_FAILED, &e),
        }
    }

    /// Delete a city and remove it from the list.
    ///
    /// The current city is left alone, even when it is the one deleted.
    pub async fn delete_city(&self, id: CityId) {
        self.dispatch(Action::Loading);

        match self.collection.delete_city(id).await {
            Ok(()) => self.dispatch(Action::CityDeleted(id)),
            Err(e) => self.reject(DELETE_CITY_FAILED, &e),
        }
    }
}
