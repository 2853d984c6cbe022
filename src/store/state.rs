//! store::state
//!
//! The cities state and its reducer.
//!
//! # Invariants
//!
//! - `cities` never holds two records with the same id.
//! - The state is loading exactly while at least one operation has started
//!   and not yet settled.
//! - `error` is the message of the latest rejection, cleared by the next
//!   successful transition.
//!
//! Applying a terminal transition when nothing is pending breaks the
//! request/response pairing and panics.

use serde::Serialize;

use super::action::Action;
use crate::core::types::{countries_of, City, CityId, Country};

/// Snapshot of everything the store knows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitiesState {
    /// Every known city, without duplicate ids
    pub cities: Vec<City>,
    /// The last city loaded or created
    pub current_city: Option<City>,
    /// Message of the latest failure, empty when the last transition succeeded
    pub error: String,
    /// Operations started and not yet settled
    #[serde(skip)]
    pending: usize,
}

impl CitiesState {
    /// Whether any operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    /// Number of operations in flight.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Id of the current city.
    pub fn current_id(&self) -> Option<CityId> {
        self.current_city.as_ref().map(|c| c.id)
    }

    /// Whether a failure message is showing.
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Find a city in the list by id.
    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.iter().find(|c| c.id == id)
    }

    /// Distinct countries of the listed cities.
    pub fn countries(&self) -> Vec<Country> {
        countries_of(&self.cities)
    }

    /// Apply one transition in place.
    pub fn apply(&mut self, action: Action) {
        if action.is_terminal() {
            assert!(
                self.pending > 0,
                "transition '{}' applied with no operation pending",
                action.kind()
            );
            self.pending -= 1;
        }

        match action {
            Action::Loading => {
                self.pending += 1;
            }
            Action::CitiesLoaded(cities) => {
                self.cities = without_duplicates(cities);
                self.error.clear();
            }
            Action::CityLoaded(city) => {
                self.current_city = Some(city);
                self.error.clear();
            }
            Action::CityCreated(city) => {
                self.upsert(city.clone());
                self.current_city = Some(city);
                self.error.clear();
            }
            Action::CityStored(city) => {
                self.upsert(city);
                self.error.clear();
            }
            Action::CityDeleted(id) => {
                self.cities.retain(|c| c.id != id);
                self.error.clear();
            }
            Action::Rejected(message) => {
                self.error = message;
            }
            Action::Discarded => {}
        }
    }

    /// Replace the record with the same id, or append.
    fn upsert(&mut self, city: City) {
        match self.cities.iter().position(|c| c.id == city.id) {
            Some(index) => self.cities[index] = city,
            None => self.cities.push(city),
        }
    }
}

/// Apply one transition to a state, returning the next state.
///
/// # Example
///
/// ```
/// use worldwise::store::{reduce, Action, CitiesState};
///
/// let state = reduce(CitiesState::default(), Action::Loading);
/// assert!(state.is_loading());
///
/// let state = reduce(state, Action::Rejected("offline".into()));
/// assert!(!state.is_loading());
/// assert_eq!(state.error, "offline");
/// ```
pub fn reduce(mut state: CitiesState, action: Action) -> CitiesState {
    state.apply(action);
    state
}

/// Keep the first record for each id.
fn without_duplicates(cities: Vec<City>) -> Vec<City> {
    let mut unique: Vec<City> = Vec::with_capacity(cities.len());
    for city in cities {
        if unique.iter().all(|c| c.id != city.id) {
            unique.push(city);
        } else {
            log::warn!("dropping duplicate city id {} from list response", city.id);
        }
    }
    unique
}
