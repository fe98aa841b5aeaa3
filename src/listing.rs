//! Display projection of the employee list: rows, quick filter, sorting.

use std::cmp::Ordering;

use tracing::debug;

use crate::date;
use crate::models::employee::{EmployeeId, EmployeeRecord};

/// One table row with human-readable dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    /// `MM/DD/YYYY`.
    pub birth_date: String,
    /// `MM/DD/YYYY`.
    pub start_date: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub department: String,
}

impl DisplayRow {
    pub fn from_record(record: &EmployeeRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            birth_date: display_date(&record.birth_date),
            start_date: display_date(&record.start_date),
            street: record.street.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            zip_code: record.zip_code.clone(),
            department: record.department.clone(),
        }
    }

    /// Whether any displayed cell contains `needle` (already lowercased).
    fn matches(&self, needle: &str) -> bool {
        Column::ALL
            .iter()
            .any(|c| c.cell(self).to_lowercase().contains(needle))
    }
}

/// Stored dates that fail to decode are shown as stored.
fn display_date(stored: &str) -> String {
    date::decode(stored).unwrap_or_else(|e| {
        debug!("Showing raw date: {}", e);
        stored.to_string()
    })
}

/// Project records into display rows.
///
/// Lazy; clone the iterator to walk it again. Nothing is cached.
pub fn project(records: &[EmployeeRecord]) -> impl Iterator<Item = DisplayRow> + Clone + '_ {
    records.iter().map(DisplayRow::from_record)
}

/// Rows where any displayed cell contains `query`, ignoring case.
///
/// A blank query keeps every row. Order is preserved.
pub fn quick_filter(rows: impl IntoIterator<Item = DisplayRow>, query: &str) -> Vec<DisplayRow> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.into_iter().collect();
    }
    rows.into_iter().filter(|r| r.matches(&needle)).collect()
}

/// Table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
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

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 9] = [
        Column::FirstName,
        Column::LastName,
        Column::BirthDate,
        Column::StartDate,
        Column::Street,
        Column::City,
        Column::State,
        Column::ZipCode,
        Column::Department,
    ];

    /// Header label.
    pub fn header(&self) -> &'static str {
        match self {
            Column::FirstName => "First name",
            Column::LastName => "Last name",
            Column::BirthDate => "Date of birth",
            Column::StartDate => "Start date",
            Column::Street => "Street",
            Column::City => "City",
            Column::State => "State",
            Column::ZipCode => "Zip Code",
            Column::Department => "Department",
        }
    }

    /// Cell text of `row` in this column.
    pub fn cell<'a>(&self, row: &'a DisplayRow) -> &'a str {
        match self {
            Column::FirstName => &row.first_name,
            Column::LastName => &row.last_name,
            Column::BirthDate => &row.birth_date,
            Column::StartDate => &row.start_date,
            Column::Street => &row.street,
            Column::City => &row.city,
            Column::State => &row.state,
            Column::ZipCode => &row.zip_code,
            Column::Department => &row.department,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Column::BirthDate | Column::StartDate)
    }

    fn compare(&self, a: &DisplayRow, b: &DisplayRow) -> Ordering {
        let (x, y) = (self.cell(a), self.cell(b));
        if self.is_date() {
            // Unparseable dates sort first.
            date::parse_display(x).cmp(&date::parse_display(y))
        } else {
            x.to_lowercase().cmp(&y.to_lowercase())
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Active sort of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub column: Column,
    pub direction: SortDirection,
}

/// Stable sort of `rows` by `column`.
pub fn sort_rows(rows: &mut [DisplayRow], column: Column, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = column.compare(a, b);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// View state of the employee table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub filter: String,
    pub sort: Option<Sort>,
}

impl ListingQuery {
    /// Project, filter, then sort.
    pub fn apply(&self, records: &[EmployeeRecord]) -> Vec<DisplayRow> {
        let mut rows = quick_filter(project(records), &self.filter);
        if let Some(sort) = self.sort {
            sort_rows(&mut rows, sort.column, sort.direction);
        }
        rows
    }

    /// Header click: ascending, then descending, then unsorted.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort = match self.sort {
            Some(Sort {
                column: current,
                direction: SortDirection::Ascending,
            }) if current == column => Some(Sort {
                column,
                direction: SortDirection::Descending,
            }),
            Some(Sort {
                column: current,
                direction: SortDirection::Descending,
            }) if current == column => None,
            _ => Some(Sort {
                column,
                direction: SortDirection::Ascending,
            }),
        };
    }
}
