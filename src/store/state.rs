//! In-memory employee collection and its reducer.

use serde::{Deserialize, Serialize};

use crate::models::employee::EmployeeRecord;

/// Ordered collection of employee records, insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeStore {
    #[serde(default)]
    employees: Vec<EmployeeRecord>,
}

/// Store actions.
///
/// Serialized as `{"type": ..., "payload": ...}`. Any unrecognized type
/// decodes to [`Action::Unknown`], which the reducer ignores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Action {
    #[serde(rename = "employees/addEmployee")]
    AddEmployee(EmployeeRecord),
    #[serde(other)]
    Unknown,
}

/// Whether a dispatched action changed the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Changed,
    Unchanged,
}

impl EmployeeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `employees` in order.
    pub fn from_records(employees: Vec<EmployeeRecord>) -> Self {
        Self { employees }
    }

    /// Apply an action.
    pub fn dispatch(&mut self, action: Action) -> Mutation {
        match action {
            Action::AddEmployee(record) => {
                self.append(record);
                Mutation::Changed
            }
            Action::Unknown => Mutation::Unchanged,
        }
    }

    /// Add a record at the end. No identity-collision check is made.
    pub fn append(&mut self, record: EmployeeRecord) {
        self.employees.push(record);
    }

    /// All records in insertion order.
    pub fn select_all(&self) -> &[EmployeeRecord] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
