//! Resource state as the host stores it, and how API results fold into it.

use serde::{Deserialize, Serialize};
use terratowns_core::{Home, HomeRecord, UpdatedHome};

use crate::error::ProviderError;

/// One `terratowns_home` instance. `id` is empty until create succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeState {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub domain_name: String,
    pub town: String,
    pub content_version: i64,
}

impl HomeState {
    pub fn from_value(value: serde_json::Value) -> Result<Self, ProviderError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, ProviderError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn id(&self) -> Result<&str, ProviderError> {
        if self.id.is_empty() {
            Err(ProviderError::MissingId)
        } else {
            Ok(&self.id)
        }
    }

    pub fn desired(&self) -> Home {
        Home {
            name: self.name.clone(),
            description: self.description.clone(),
            domain_name: self.domain_name.clone(),
            town: self.town.clone(),
            content_version: self.content_version,
        }
    }

    /// Refresh from a read. `town` and `id` are not returned by the
    /// service's read contract and keep their stored values.
    pub fn refresh(&mut self, record: HomeRecord) {
        self.name = record.name;
        self.description = record.description;
        self.domain_name = record.domain_name;
        self.content_version = record.content_version;
    }

    /// Fold in an update result. The id comes from the response.
    pub fn apply_update(&mut self, updated: UpdatedHome) {
        self.id = updated.id;
        self.name = updated.name;
        self.description = updated.description;
        self.content_version = updated.content_version;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn state() -> HomeState {
        HomeState {
            id: "abc-123".to_string(),
            name: "Oak House".to_string(),
            description: "cozy".to_string(),
            domain_name: "d1234.cloudfront.net".to_string(),
            town: "cooker-cove".to_string(),
            content_version: 1,
        }
    }

    #[test]
    fn planned_state_without_id_parses() {
        let state = HomeState::from_value(json!({
            "name": "Oak House",
            "description": "cozy",
            "domain_name": "d1234.cloudfront.net",
            "town": "cooker-cove",
            "content_version": 1
        }))
        .unwrap();
        assert!(matches!(state.id(), Err(ProviderError::MissingId)));
    }

    #[test]
    fn refresh_keeps_town_and_id() {
        let mut state = state();
        state.refresh(HomeRecord {
            name: "Oak Manor".to_string(),
            description: "bigger".to_string(),
            domain_name: "d9999.cloudfront.net".to_string(),
            content_version: 4,
        });
        assert_eq!(state.id, "abc-123");
        assert_eq!(state.town, "cooker-cove");
        assert_eq!(state.name, "Oak Manor");
        assert_eq!(state.domain_name, "d9999.cloudfront.net");
        assert_eq!(state.content_version, 4);
    }

    #[test]
    fn apply_update_adopts_returned_id() {
        let mut state = state();
        state.apply_update(UpdatedHome {
            id: "def-456".to_string(),
            name: "Oak House".to_string(),
            description: "cozier".to_string(),
            content_version: 2,
        });
        assert_eq!(state.id, "def-456");
        assert_eq!(state.description, "cozier");
        assert_eq!(state.domain_name, "d1234.cloudfront.net");
    }

    #[test]
    fn wrong_type_is_invalid_state() {
        let mut value = state().to_value().unwrap();
        value["content_version"] = json!("1");
        assert!(matches!(HomeState::from_value(value), Err(ProviderError::InvalidState(_))));
    }
}
