//! Employee creation: form working memory through to a stored record.

use std::ops::RangeInclusive;

use chrono::{Local, Months, NaiveDate};
use tracing::{info, warn};

use crate::date;
use crate::error::{AppError, Result};
use crate::models::employee::{EmployeeId, EmployeeRecord, FormField, NewEmployee};
use crate::models::reference::ReferenceData;
use crate::store::{PersistedStore, Storage};

/// Youngest allowed age at the date of birth, in years.
pub const MIN_AGE_YEARS: u32 = 10;
/// Oldest allowed age at the date of birth, in years.
pub const MAX_AGE_YEARS: u32 = 100;

/// Dates of birth accepted on `today`: between 100 and 10 years ago.
pub fn birth_date_range(today: NaiveDate) -> RangeInclusive<NaiveDate> {
    let years_ago = |years: u32| {
        today
            .checked_sub_months(Months::new(12 * years))
            .unwrap_or(NaiveDate::MIN)
    };
    years_ago(MAX_AGE_YEARS)..=years_ago(MIN_AGE_YEARS)
}

/// Form state for employee creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub first_name: String,
    pub last_name: String,
    /// `MM/DD/YYYY` entry text.
    pub birth_date: String,
    /// `MM/DD/YYYY` entry text.
    pub start_date: String,
    pub street: String,
    pub city: String,
    /// Selected state abbreviation.
    pub state: Option<String>,
    pub zip_code: String,
    /// Selected department name.
    pub department: Option<String>,
}

impl EmployeeForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current text of a field; empty for an unselected select.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::BirthDate => &self.birth_date,
            FormField::StartDate => &self.start_date,
            FormField::Street => &self.street,
            FormField::City => &self.city,
            FormField::State => self.state.as_deref().unwrap_or(""),
            FormField::ZipCode => &self.zip_code,
            FormField::Department => self.department.as_deref().unwrap_or(""),
        }
    }

    /// Fields that are still blank, in form order.
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| self.value(*f).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// True when the date of birth parses but falls outside [`birth_date_range`].
    pub fn birth_date_out_of_range(&self, today: NaiveDate) -> bool {
        date::parse_display(&self.birth_date).is_some_and(|d| !birth_date_range(today).contains(&d))
    }

    /// Whether the form can be submitted on `today`, reference checks aside.
    pub fn can_submit(&self, today: NaiveDate) -> bool {
        self.is_complete() && !self.birth_date_out_of_range(today)
    }
}

/// Pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Editing,
    Submitted,
}

/// Emitted after a successful submission.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub id: EmployeeId,
    pub full_name: String,
    /// Set when the record was added but the snapshot write failed.
    pub persist_error: Option<String>,
}

/// Turns form input into stored employee records.
#[derive(Debug, Default)]
pub struct CreationPipeline {
    form: EmployeeForm,
    state: PipelineState,
}

impl CreationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    /// Edit the working memory; returns the pipeline to `Editing`.
    pub fn form_mut(&mut self) -> &mut EmployeeForm {
        self.state = PipelineState::Editing;
        &mut self.form
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Submit the form.
    ///
    /// Blank fields, unparseable dates, a date of birth outside
    /// [`birth_date_range`], or selections outside the reference lists block
    /// the submission and nothing is appended. On success the
    /// record is appended to `store` and the form is cleared.
    pub fn submit<S: Storage>(
        &mut self,
        store: &mut PersistedStore<S>,
        reference: &ReferenceData,
    ) -> Result<Confirmation> {
        let fields = self.normalize(reference, Local::now().date_naive())?;
        let record = EmployeeRecord::create(fields);
        let id = record.id;
        let full_name = record.full_name();

        let persist_error = match store.append(record) {
            Ok(()) => None,
            Err(e) => {
                warn!("Employee {} added but not persisted: {}", id, e);
                Some(e.to_string())
            }
        };

        self.form.reset();
        self.state = PipelineState::Submitted;
        info!("Created employee {} ({})", full_name, id);

        Ok(Confirmation {
            id,
            full_name,
            persist_error,
        })
    }

    /// Check the form and convert it into record fields.
    fn normalize(&self, reference: &ReferenceData, today: NaiveDate) -> Result<NewEmployee> {
        let missing = self.form.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        let birth_date = date::encode(&self.form.birth_date)?;
        let start_date = date::encode(&self.form.start_date)?;

        if self.form.birth_date_out_of_range(today) {
            let range = birth_date_range(today);
            return Err(AppError::validation(format!(
                "Date of birth must be between {} and {}",
                range.start().format(date::DISPLAY_FORMAT),
                range.end().format(date::DISPLAY_FORMAT)
            )));
        }

        let state = self.form.value(FormField::State).trim();
        if !reference.has_state(state) {
            return Err(AppError::validation(format!("Unknown state '{state}'")));
        }
        let department = self.form.value(FormField::Department).trim();
        if !reference.has_department(department) {
            return Err(AppError::validation(format!("Unknown department '{department}'")));
        }

        Ok(NewEmployee {
            first_name: self.form.first_name.trim().to_string(),
            last_name: self.form.last_name.trim().to_string(),
            birth_date,
            start_date,
            street: self.form.street.trim().to_string(),
            city: self.form.city.trim().to_string(),
            state: state.to_string(),
            zip_code: self.form.zip_code.trim().to_string(),
            department: department.to_string(),
        })
    }
}
