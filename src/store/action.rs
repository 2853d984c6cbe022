//! store::action
//!
//! Transitions applied to the cities state.
//!
//! The set of transitions is closed: the reducer matches [`Action`]
//! exhaustively, so a new variant cannot be added without deciding how the
//! state reacts to it.

use crate::core::types::{City, CityId};

/// A named, data-carrying change to the cities state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// An operation started its network call.
    Loading,
    /// The full list arrived.
    CitiesLoaded(Vec<City>),
    /// A single city arrived and becomes current.
    CityLoaded(City),
    /// A city was stored; it joins the list and becomes current.
    CityCreated(City),
    /// A city was stored after a newer selection started; it joins the list
    /// but the current city is left alone.
    CityStored(City),
    /// A city was removed from the collection.
    CityDeleted(CityId),
    /// An operation failed with a user-facing message.
    Rejected(String),
    /// An operation settled with a result that must not be applied.
    Discarded,
}

impl Action {
    /// Stable transition name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Loading => "loading",
            Action::CitiesLoaded(_) => "cities/loaded",
            Action::CityLoaded(_) => "city/loaded",
            Action::CityCreated(_) => "city/created",
            Action::CityStored(_) => "city/stored",
            Action::CityDeleted(_) => "city/deleted",
            Action::Rejected(_) => "rejected",
            Action::Discarded => "discarded",
        }
    }

    /// Whether this transition ends an operation.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Action::Loading)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Action::Loading.kind(), "loading");
        assert_eq!(Action::CitiesLoaded(vec![]).kind(), "cities/loaded");
        assert_eq!(Action::CityDeleted(CityId::new(1)).kind(), "city/deleted");
        assert_eq!(Action::Rejected("x".into()).kind(), "rejected");
        assert_eq!(format!("{}", Action::Discarded), "discarded");
    }

    #[test]
    fn only_loading_is_not_terminal() {
        assert!(!Action::Loading.is_terminal());
        assert!(Action::Discarded.is_terminal());
        assert!(Action::Rejected(String::new()).is_terminal());
    }
}
