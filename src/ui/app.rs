//! Main application UI.

use chrono::{Local, Months, NaiveDate};
use eframe::egui::{self, Align, Layout, RichText};
use egui_phosphor::regular::{USER_PLUS, USERS};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::export;
use crate::listing::ListingQuery;
use crate::models::reference::ReferenceData;
use crate::pipeline::CreationPipeline;
use crate::reference::{self, ReferenceLoad};
use crate::store::{FileStorage, LoadStatus, PersistedStore};

use super::components::colors;
use super::{create_panel, list_panel};

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    CreateEmployee,
    EmployeeList,
}

impl Panel {
    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::CreateEmployee => "Create Employee",
            Panel::EmployeeList => "Current Employees",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Panel::CreateEmployee => USER_PLUS,
            Panel::EmployeeList => USERS,
        }
    }
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    ReferenceLoaded(ReferenceLoad),
}

/// Calendar state behind the two date picker buttons.
#[derive(Debug, Clone)]
pub struct DatePickers {
    pub birth: NaiveDate,
    pub start: NaiveDate,
}

impl Default for DatePickers {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            birth: today.checked_sub_months(Months::new(12 * 30)).unwrap_or(today),
            start: today,
        }
    }
}

/// Main application state.
pub struct App {
    // Runtime for reference loading
    pub rt: tokio::runtime::Runtime,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    // Navigation
    pub current_panel: Panel,

    // Employee data
    pub store: PersistedStore<FileStorage>,
    pub pipeline: CreationPipeline,
    pub date_pickers: DatePickers,

    /// Reference lists; `None` while loading.
    pub reference: Option<ReferenceData>,

    // Listing view
    pub listing: ListingQuery,

    // Configuration
    pub config: AppConfig,

    // Dialogs
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl App {
    pub fn new(
        ctx: &egui::Context,
        store: PersistedStore<FileStorage>,
        config: AppConfig,
        rt: tokio::runtime::Runtime,
    ) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        ctx.set_fonts(fonts);

        let (tx, rx) = mpsc::unbounded_channel();

        let error_message = match store.load_status() {
            LoadStatus::Recovered { reason } => Some(format!("Saved employees could not be read: {reason}")),
            LoadStatus::Restored { .. } | LoadStatus::Empty => None,
        };

        let mut app = Self {
            rt,
            tx,
            rx,
            current_panel: Panel::default(),
            store,
            pipeline: CreationPipeline::new(),
            date_pickers: DatePickers::default(),
            reference: None,
            listing: ListingQuery::default(),
            config,
            error_message,
            success_message: None,
        };

        // Load initial data
        app.load_reference_data(ctx);

        app
    }

    /// Load states and departments in the background.
    pub fn load_reference_data(&mut self, ctx: &egui::Context) {
        self.reference = None;

        let config = self.config.reference.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();

        self.rt.spawn(async move {
            let load = reference::load_reference_data(&config).await;
            let _ = tx.send(UiMessage::ReferenceLoaded(load));
            ctx.request_repaint();
        });
    }

    /// Submit the creation form.
    pub fn submit_employee(&mut self) {
        let Some(reference) = self.reference.as_ref() else {
            return;
        };

        match self.pipeline.submit(&mut self.store, reference) {
            Ok(confirmation) => {
                self.success_message = Some(format!("Employee '{}' created", confirmation.full_name));
                self.date_pickers = DatePickers::default();
                if let Some(e) = confirmation.persist_error {
                    self.error_message = Some(format!("Employee was not saved to disk: {e}"));
                }
            }
            Err(e) => {
                tracing::debug!("Submission blocked: {}", e);
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Export the rows currently shown in the listing.
    pub fn export_listing(&mut self) {
        let filename = export::generate_export_filename("employees");
        let Some(path) = export::show_save_dialog(&filename) else {
            return;
        };

        let rows = self.listing.apply(self.store.select_all());
        match export::export_rows_to_excel(&rows, &path) {
            Ok(()) => {
                tracing::info!("Exported {} employees to {:?}", rows.len(), path);
                self.success_message = Some(format!("Exported to: {}", path.display()));
            }
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                self.error_message = Some(format!("Export failed: {}", e));
            }
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::ReferenceLoaded(load) => {
                    if !load.is_complete() {
                        let reasons: Vec<_> = load.failures.iter().map(|e| e.to_string()).collect();
                        let reasons = reasons.join("\n");
                        self.error_message = Some(match self.error_message.take() {
                            Some(previous) => format!("{previous}\n{reasons}"),
                            None => reasons,
                        });
                    }
                    self.reference = Some(load.data);
                }
            }
        }
    }

    /// Render header with brand and navigation links.
    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").min_height(48.0).show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(RichText::new("HRnet").size(26.0).strong().color(colors::PRIMARY));

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    for panel in [Panel::EmployeeList, Panel::CreateEmployee] {
                        let text = RichText::new(format!("{} {}", panel.icon(), panel.name())).size(15.0);
                        if ui.selectable_label(self.current_panel == panel, text).clicked() {
                            self.current_panel = panel;
                        }
                        ui.add_space(8.0);
                    }
                });
            });
        });
    }

    /// Render modal dialogs (error, success).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        let (error_offset, success_offset) =
            dialog_offsets(self.error_message.is_some(), self.success_message.is_some());

        // Error dialog
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, error_offset)
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        // Success dialog
        if let Some(ref msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, success_offset)
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }
    }
}

/// Vertical spacing between stacked dialogs.
const DIALOG_STACK_OFFSET: f32 = 70.0;

/// Anchor offsets of the error and success dialogs.
///
/// When both are open the success dialog sits above the error dialog.
fn dialog_offsets(error_open: bool, success_open: bool) -> ([f32; 2], [f32; 2]) {
    if error_open && success_open {
        ([0.0, DIALOG_STACK_OFFSET], [0.0, -DIALOG_STACK_OFFSET])
    } else {
        ([0.0, 0.0], [0.0, 0.0])
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        self.show_header(ctx);

        // Modal dialogs (error, success)
        self.show_dialogs(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.current_panel {
            Panel::CreateEmployee => create_panel::show(self, ui),
            Panel::EmployeeList => list_panel::show(self, ui),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_dialog_is_centered() {
        assert_eq!(dialog_offsets(true, false), ([0.0, 0.0], [0.0, 0.0]));
        assert_eq!(dialog_offsets(false, true), ([0.0, 0.0], [0.0, 0.0]));
    }

    #[test]
    fn test_both_dialogs_do_not_overlap() {
        let (error, success) = dialog_offsets(true, true);
        assert_eq!(error[0], success[0]);
        assert!(error[1] - success[1] >= 2.0 * DIALOG_STACK_OFFSET);
    }

    #[test]
    fn test_date_pickers_start_inside_birth_range() {
        let pickers = DatePickers::default();
        let today = Local::now().date_naive();
        assert!(crate::pipeline::birth_date_range(today).contains(&pickers.birth));
    }
}
