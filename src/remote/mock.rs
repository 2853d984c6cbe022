//! remote::mock
//!
//! In-memory city collection for deterministic testing.
//!
//! # Design
//!
//! The mock stores cities in insertion order, assigns sequential ids, records
//! every call, and can be told to fail a given operation. Any call can also
//! be held at a [`Gate`] until released, which lets tests observe the store
//! mid-operation and choose the order in which concurrent requests complete.
//!
//! # Example
//!
//! ```
//! use worldwise::remote::mock::MockCollection;
//! use worldwise::remote::CityCollection;
//! use worldwise::core::types::{CityId, NewCity, Position};
//!
//! # tokio_test::block_on(async {
//! let collection = MockCollection::new();
//!
//! let city = collection.create_city(NewCity {
//!     city_name: "Lisbon".to_string(),
//!     country: "Portugal".to_string(),
//!     emoji: "🇵🇹".to_string(),
//!     date: chrono::Utc::now(),
//!     notes: String::new(),
//!     position: Position::new(38.72, -9.14),
//! }).await.unwrap();
//!
//! assert_eq!(city.id, CityId::new(1));
//! assert_eq!(collection.get_city(city.id).await.unwrap().city_name, "Lisbon");
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::traits::{CityCollection, RemoteError};
use crate::core::types::{City, CityId, NewCity};

/// Mock city collection for testing.
///
/// Clones share state, so a test can keep one clone for inspection while the
/// store owns another.
#[derive(Debug, Clone)]
pub struct MockCollection {
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Debug)]
struct MockInner {
    /// Stored cities in insertion order.
    cities: Vec<City>,
    /// Next id to assign.
    next_id: u64,
    /// Operation to fail (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
    /// Gates for held calls.
    holds: HashMap<Gate, Arc<Notify>>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail list_cities with the given error.
    ListCities(RemoteError),
    /// Fail get_city with the given error.
    GetCity(RemoteError),
    /// Fail create_city with the given error.
    CreateCity(RemoteError),
    /// Fail delete_city with the given error.
    DeleteCity(RemoteError),
}

/// A call that can be held until released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    ListCities,
    GetCity(CityId),
    CreateCity,
    DeleteCity(CityId),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq)]
pub enum MockOperation {
    ListCities,
    GetCity { id: CityId },
    CreateCity { city_name: String },
    DeleteCity { id: CityId },
}

impl MockCollection {
    /// Create an empty mock collection.
    pub fn new() -> Self {
        Self::with_cities(Vec::new())
    }

    /// Create a mock collection with pre-existing cities.
    ///
    /// New ids continue after the largest existing id.
    pub fn with_cities(cities: Vec<City>) -> Self {
        let max_id = cities.iter().map(|c| c.id.get()).max().unwrap_or(0);

        Self {
            inner: Arc::new(Mutex::new(MockInner {
                cities,
                next_id: max_id + 1,
                fail_on: None,
                operations: Vec::new(),
                holds: HashMap::new(),
            })),
        }
    }

    /// Configure the mock to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use worldwise::remote::mock::{FailOn, MockCollection};
    /// use worldwise::remote::RemoteError;
    ///
    /// let collection = MockCollection::new()
    ///     .fail_on(FailOn::ListCities(RemoteError::Network("offline".into())));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.set_fail_on(fail_on);
        self
    }

    /// Configure a failure on a shared clone.
    pub fn set_fail_on(&self, fail_on: FailOn) {
        self.lock().fail_on = Some(fail_on);
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        self.lock().fail_on = None;
    }

    /// Hold the next call matching `gate` until [`release`] is called.
    ///
    /// [`release`]: MockCollection::release
    pub fn hold(&self, gate: Gate) {
        self.lock().holds.insert(gate, Arc::new(Notify::new()));
    }

    /// Let the held call matching `gate` complete.
    ///
    /// Releasing before the call arrives is fine; the call then passes
    /// straight through.
    pub fn release(&self, gate: Gate) {
        if let Some(notify) = self.lock().holds.get(&gate) {
            notify.notify_one();
        }
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        self.lock().operations.clear();
    }

    /// Number of recorded `get_city` calls.
    pub fn get_count(&self) -> usize {
        self.lock()
            .operations
            .iter()
            .filter(|op| matches!(op, MockOperation::GetCity { .. }))
            .count()
    }

    /// Get all stored cities (for test verification).
    pub fn all_cities(&self) -> Vec<City> {
        self.lock().cities.clone()
    }

    /// Get the count of stored cities.
    pub fn city_count(&self) -> usize {
        self.lock().cities.len()
    }

    fn lock(&self) -> MutexGuard<'_, MockInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, op: MockOperation) {
        self.lock().operations.push(op);
    }

    /// Wait at `gate` if a test is holding it.
    async fn pass(&self, gate: Gate) {
        let notify = self.lock().holds.get(&gate).cloned();
        if let Some(notify) = notify {
            notify.notified().await;
            self.lock().holds.remove(&gate);
        }
    }

    /// Check if we should fail and return the error if so.
    fn check_fail(&self, expected: &str) -> Option<RemoteError> {
        match &self.lock().fail_on {
            Some(FailOn::ListCities(e)) if expected == "list_cities" => Some(e.clone()),
            Some(FailOn::GetCity(e)) if expected == "get_city" => Some(e.clone()),
            Some(FailOn::CreateCity(e)) if expected == "create_city" => Some(e.clone()),
            Some(FailOn::DeleteCity(e)) if expected == "delete_city" => Some(e.clone()),
            _ => None,
        }
    }
}

impl Default for MockCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CityCollection for MockCollection {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list_cities(&self) -> Result<Vec<City>, RemoteError> {
        self.record(MockOperation::ListCities);
        self.pass(Gate::ListCities).await;

        if let Some(e) = self.check_fail("list_cities") {
            return Err(e);
        }

        Ok(self.all_cities())
    }

    async fn get_city(&self, id: CityId) -> Result<City, RemoteError> {
        self.record(MockOperation::GetCity { id });
        self.pass(Gate::GetCity(id)).await;

        if let Some(e) = self.check_fail("get_city") {
            return Err(e);
        }

        self.lock()
            .cities
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(format!("city {}", id)))
    }

    async fn create_city(&self, draft: NewCity) -> Result<City, RemoteError> {
        self.record(MockOperation::CreateCity {
            city_name: draft.city_name.clone(),
        });
        self.pass(Gate::CreateCity).await;

        if let Some(e) = self.check_fail("create_city") {
            return Err(e);
        }

        let mut inner = self.lock();
        let id = CityId::new(inner.next_id);
        inner.next_id += 1;

        let city = City::from_draft(id, draft);
        inner.cities.push(city.clone());
        Ok(city)
    }

    async fn delete_city(&self, id: CityId) -> Result<(), RemoteError> {
        self.record(MockOperation::DeleteCity { id });
        self.pass(Gate::DeleteCity(id)).await;

        if let Some(e) = self.check_fail("delete_city") {
            return Err(e);
        }

        self.lock().cities.retain(|c| c.id != id);
        Ok(())
    }
}
