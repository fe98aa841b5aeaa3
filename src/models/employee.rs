//! Employee record and the creation payload.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, globally unique employee identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for EmployeeId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// A stored employee entry.
///
/// Dates hold ISO instants at UTC midnight (see [`crate::date`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub start_date: String,
    pub street: String,
    pub city: String,
    /// US state abbreviation.
    pub state: String,
    pub zip_code: String,
    /// Department name.
    pub department: String,
}

/// The nine submitted fields of a new employee, dates already encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub start_date: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub department: String,
}

impl EmployeeRecord {
    /// Assign a fresh identity and copy the fields verbatim.
    pub fn create(fields: NewEmployee) -> Self {
        Self::with_id(EmployeeId::generate(), fields)
    }

    /// Build a record with a known identity.
    pub fn with_id(id: EmployeeId, fields: NewEmployee) -> Self {
        let NewEmployee {
            first_name,
            last_name,
            birth_date,
            start_date,
            street,
            city,
            state,
            zip_code,
            department,
        } = fields;

        Self {
            id,
            first_name,
            last_name,
            birth_date,
            start_date,
            street,
            city,
            state,
            zip_code,
            department,
        }
    }

    /// "First Last" for notifications.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Required fields of the creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    BirthDate,
    StartDate,
    Street,
    City,
    State,
    ZipCode,
    Department,
}

impl FormField {
    /// All fields in form order.
    pub const ALL: [FormField; 9] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::BirthDate,
        FormField::StartDate,
        FormField::Street,
        FormField::City,
        FormField::State,
        FormField::ZipCode,
        FormField::Department,
    ];

    /// Form label.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
            FormField::BirthDate => "Date of birth",
            FormField::StartDate => "Start date",
            FormField::Street => "Street",
            FormField::City => "City",
            FormField::State => "State",
            FormField::ZipCode => "Zip code",
            FormField::Department => "Department",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewEmployee {
        NewEmployee {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            birth_date: "2000-05-24T00:00:00Z".to_string(),
            start_date: "2010-08-01T00:00:00Z".to_string(),
            street: "123 Test Bvd".to_string(),
            city: "Denver".to_string(),
            state: "CO".to_string(),
            zip_code: "80014".to_string(),
            department: "Sales".to_string(),
        }
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let a = EmployeeRecord::create(sample());
        let b = EmployeeRecord::create(sample());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_create_copies_fields_verbatim() {
        let record = EmployeeRecord::create(sample());
        assert_eq!(record.first_name, "John");
        assert_eq!(record.birth_date, "2000-05-24T00:00:00Z");
        assert_eq!(record.state, "CO");
        assert_eq!(record.department, "Sales");
        assert_eq!(record.full_name(), "John Doe");
    }

    #[test]
    fn test_serialized_field_names_are_camel_case() {
        let id: EmployeeId = Uuid::parse_str("0b06c5b7-7847-48e0-84a0-9be1baac3f14").unwrap().into();
        let record = EmployeeRecord::with_id(id, sample());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], "0b06c5b7-7847-48e0-84a0-9be1baac3f14");
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["zipCode"], "80014");
        assert_eq!(json["startDate"], "2010-08-01T00:00:00Z");
    }
}
