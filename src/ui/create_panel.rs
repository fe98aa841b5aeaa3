//! Employee creation form.

use std::ops::RangeInclusive;

use chrono::{Datelike, Local, NaiveDate};
use eframe::egui::{self, ScrollArea, Ui};
use egui_extras::DatePickerButton;
use egui_phosphor::regular::FLOPPY_DISK;

use super::app::App;
use super::components::{colors, fieldset, panel_header, primary_button_with_icon};
use crate::date;
use crate::models::reference::ReferenceData;
use crate::pipeline::{EmployeeForm, birth_date_range};

/// Show the create employee panel.
///
/// The form is replaced by a spinner until the reference lists arrive.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Add a new employee");

    let Some(reference) = app.reference.as_ref() else {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.spinner();
            ui.add_space(10.0);
            ui.label("Loading states and departments...");
        });
        return;
    };

    let mut form = app.pipeline.form().clone();
    let mut submit = false;
    let today = Local::now().date_naive();
    let birth_range = birth_date_range(today);

    ScrollArea::vertical().id_salt("create_scroll").show(ui, |ui| {
        fieldset(ui, "Personal data", |ui| {
            egui::Grid::new("personal_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("First Name:");
                    ui.add(egui::TextEdit::singleline(&mut form.first_name).desired_width(250.0));
                    ui.end_row();

                    ui.label("Last Name:");
                    ui.add(egui::TextEdit::singleline(&mut form.last_name).desired_width(250.0));
                    ui.end_row();

                    ui.label("Date of birth:");
                    date_field(
                        ui,
                        &mut form.birth_date,
                        &mut app.date_pickers.birth,
                        "birth_date",
                        Some(&birth_range),
                    );
                    ui.end_row();

                    ui.label("Start date:");
                    date_field(ui, &mut form.start_date, &mut app.date_pickers.start, "start_date", None);
                    ui.end_row();
                });
        });

        fieldset(ui, "Address", |ui| {
            egui::Grid::new("address_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Street:");
                    ui.add(egui::TextEdit::singleline(&mut form.street).desired_width(250.0));
                    ui.end_row();

                    ui.label("City:");
                    ui.add(egui::TextEdit::singleline(&mut form.city).desired_width(250.0));
                    ui.end_row();

                    ui.label("State:");
                    state_select(ui, &mut form, reference);
                    ui.end_row();

                    ui.label("Zip code:");
                    let response = ui.add(egui::TextEdit::singleline(&mut form.zip_code).desired_width(120.0));
                    if response.changed() {
                        form.zip_code.retain(|c| c.is_ascii_digit());
                    }
                    ui.end_row();
                });
        });

        fieldset(ui, "Department", |ui| {
            egui::ComboBox::from_id_salt("department_select")
                .width(250.0)
                .selected_text(form.department.as_deref().unwrap_or("Select..."))
                .show_ui(ui, |ui| {
                    for dept in &reference.departments {
                        ui.selectable_value(&mut form.department, Some(dept.name.clone()), &dept.name);
                    }
                });
        });

        ui.add_space(30.0);

        ui.vertical_centered(|ui| {
            let clicked = ui
                .add_enabled_ui(form.can_submit(today), |ui| {
                    primary_button_with_icon(ui, FLOPPY_DISK, "Save")
                })
                .inner
                .clicked();
            if clicked {
                submit = true;
            }

            if !form.is_complete() {
                ui.add_space(6.0);
                let labels: Vec<_> = form.missing_fields().iter().map(|f| f.label()).collect();
                ui.weak(format!("Required: {}", labels.join(", ")));
            }
        });
    });

    if &form != app.pipeline.form() {
        *app.pipeline.form_mut() = form;
    }
    if submit {
        app.submit_employee();
    }
}

/// `MM/DD/YYYY` text entry with a calendar button that fills it.
///
/// With `range`, the calendar only offers those years and dates outside it
/// are flagged.
fn date_field(
    ui: &mut Ui,
    text: &mut String,
    picked: &mut NaiveDate,
    id: &str,
    range: Option<&RangeInclusive<NaiveDate>>,
) {
    ui.horizontal(|ui| {
        let parsed = date::parse_display(text);
        let in_range = match (parsed, range) {
            (Some(date), Some(range)) => range.contains(&date),
            _ => true,
        };
        let is_valid = text.is_empty() || (parsed.is_some() && in_range);

        // Red text for invalid input
        let text_color = if is_valid {
            ui.visuals().text_color()
        } else {
            colors::ERROR
        };

        ui.add(
            egui::TextEdit::singleline(text)
                .desired_width(120.0)
                .hint_text("MM/DD/YYYY")
                .text_color(text_color),
        );

        if let Some(date) = parsed
            && in_range
        {
            *picked = date;
        }
        let mut button = DatePickerButton::new(picked).id_salt(id);
        if let Some(range) = range {
            button = button.start_end_years(range.start().year()..=range.end().year());
        }
        if ui.add(button).changed() {
            *text = picked.format(date::DISPLAY_FORMAT).to_string();
        }

        if !is_valid {
            let message = match (parsed, range) {
                (Some(_), Some(range)) => format!(
                    "Must be between {} and {}",
                    range.start().format(date::DISPLAY_FORMAT),
                    range.end().format(date::DISPLAY_FORMAT)
                ),
                _ => "Invalid date".to_string(),
            };
            ui.colored_label(colors::ERROR, message);
        }
    });
}

fn state_select(ui: &mut Ui, form: &mut EmployeeForm, reference: &ReferenceData) {
    let selected = form
        .state
        .as_deref()
        .and_then(|abbr| reference.state_name(abbr))
        .unwrap_or("Select...")
        .to_string();

    egui::ComboBox::from_id_salt("state_select")
        .width(250.0)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for state in &reference.states {
                ui.selectable_value(&mut form.state, Some(state.abbreviation.clone()), &state.name);
            }
        });
}
