//! Data models for employee records and reference lists.

pub mod employee;
pub mod reference;

pub use employee::{EmployeeId, EmployeeRecord, FormField, NewEmployee};
pub use reference::{Department, ReferenceData, UsState};
