//! Employee listing table with quick filter, sortable headers and export.

use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};
use egui_phosphor::regular::{CARET_DOWN, CARET_UP, FILE_XLS, MAGNIFYING_GLASS};

use super::app::App;
use super::components::{panel_header, styled_button_with_icon};
use crate::listing::{Column, DisplayRow, ListingQuery, SortDirection};

/// Show the employee list panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Current employees");

    let mut export = false;

    // Toolbar: quick filter and export
    ui.horizontal(|ui| {
        ui.label(format!("{MAGNIFYING_GLASS} Search:"));
        ui.add(
            egui::TextEdit::singleline(&mut app.listing.filter)
                .desired_width(250.0)
                .hint_text("Search..."),
        );

        if !app.listing.filter.is_empty() && ui.button("Clear").clicked() {
            app.listing.filter.clear();
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
                export = true;
            }
        });
    });

    ui.add_space(10.0);

    let total = app.store.select_all().len();
    let rows = app.listing.apply(app.store.select_all());

    ui.label(format!("Showing {} of {} entries", rows.len(), total));
    ui.add_space(10.0);

    show_table(&mut app.listing, &rows, ui);

    if export {
        app.export_listing();
    }
}

fn show_table(listing: &mut ListingQuery, rows: &[DisplayRow], ui: &mut Ui) {
    let mut clicked = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(TableColumn::auto().at_least(90.0), Column::ALL.len())
        .header(28.0, |mut header| {
            for column in Column::ALL {
                header.col(|ui| {
                    let arrow = match listing.sort {
                        Some(sort) if sort.column == column => match sort.direction {
                            SortDirection::Ascending => CARET_UP,
                            SortDirection::Descending => CARET_DOWN,
                        },
                        _ => "",
                    };
                    let label = RichText::new(format!("{} {}", column.header(), arrow)).strong();
                    if ui.add(egui::Button::new(label).frame(false)).clicked() {
                        clicked = Some(column);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(24.0, rows.len(), |mut row| {
                let data = &rows[row.index()];
                for column in Column::ALL {
                    row.col(|ui| {
                        ui.label(column.cell(data));
                    });
                }
            });
        });

    if rows.is_empty() {
        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            ui.weak("No data available in table");
        });
    }

    if let Some(column) = clicked {
        listing.toggle_sort(column);
    }
}
