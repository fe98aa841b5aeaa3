//! Reference lists constraining the state and department selects.

use serde::{Deserialize, Serialize};

/// A US state as listed in the states resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsState {
    pub name: String,
    pub abbreviation: String,
}

/// A department as listed in the departments resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i32,
    pub name: String,
}

/// Allowed values for the enumerated form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    pub states: Vec<UsState>,
    pub departments: Vec<Department>,
}

impl ReferenceData {
    /// Whether `abbreviation` is a known state code.
    pub fn has_state(&self, abbreviation: &str) -> bool {
        self.states.iter().any(|s| s.abbreviation == abbreviation)
    }

    /// Whether `name` is a known department.
    pub fn has_department(&self, name: &str) -> bool {
        self.departments.iter().any(|d| d.name == name)
    }

    /// Display name of a state code.
    pub fn state_name(&self, abbreviation: &str) -> Option<&str> {
        self.states
            .iter()
            .find(|s| s.abbreviation == abbreviation)
            .map(|s| s.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ReferenceData {
        ReferenceData {
            states: vec![
                UsState {
                    name: "Alabama".to_string(),
                    abbreviation: "AL".to_string(),
                },
                UsState {
                    name: "Colorado".to_string(),
                    abbreviation: "CO".to_string(),
                },
            ],
            departments: vec![Department {
                id: 1,
                name: "Sales".to_string(),
            }],
        }
    }

    #[test]
    fn test_membership() {
        let data = reference();
        assert!(data.has_state("CO"));
        assert!(!data.has_state("Colorado"));
        assert!(data.has_department("Sales"));
        assert!(!data.has_department("Legal"));
        assert_eq!(data.state_name("AL"), Some("Alabama"));
    }

    #[test]
    fn test_empty_reference_allows_nothing() {
        let data = ReferenceData::default();
        assert!(!data.has_state("CO"));
        assert!(!data.has_department("Sales"));
    }

    #[test]
    fn test_parse_resource_shapes() {
        let states: Vec<UsState> =
            serde_json::from_str(r#"[{"name": "Alaska", "abbreviation": "AK"}]"#).unwrap();
        let departments: Vec<Department> = serde_json::from_str(r#"[{"id": 3, "name": "Engineering"}]"#).unwrap();
        assert_eq!(states[0].abbreviation, "AK");
        assert_eq!(departments[0].id, 3);
    }
}
