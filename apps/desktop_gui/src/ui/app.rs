use client_core::{QueryController, StoreRequest};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    display::format_created_at,
    domain::{Expense, SortPreset},
};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::UiEvent,
        orchestration::{abandon_pending_fetch, dispatch_store_requests, undelivered_outcome},
    },
};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0xfd, 0xba, 0x74);
const CHIP: egui::Color32 = egui::Color32::from_rgb(0xea, 0x58, 0x0c);

pub struct ExpenseTrackerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    controller: QueryController,
    status: String,
    backend_available: bool,
}

impl ExpenseTrackerApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            controller: QueryController::new(),
            status: "Connecting to expense store".to_string(),
            backend_available: true,
        };
        let requests = app.controller.mount();
        app.dispatch(requests);
        app
    }

    fn dispatch(&mut self, requests: Vec<StoreRequest>) {
        let undelivered = dispatch_store_requests(&self.cmd_tx, requests, &mut self.status);
        for request in undelivered {
            let outcome = undelivered_outcome(request, &self.status);
            self.controller.apply(outcome);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::BackendUnavailable(message) => {
                    self.backend_available = false;
                    abandon_pending_fetch(&mut self.controller, &message);
                    self.status = message;
                }
                UiEvent::Store(outcome) => {
                    let follow_up = self.controller.apply(outcome);
                    self.dispatch(follow_up);
                }
            }
        }
    }

    fn show_entry_bar(&mut self, ui: &mut egui::Ui) {
        let mut requests = Vec::new();
        let draft = self.controller.draft().clone();

        ui.horizontal(|ui| {
            let mut description = draft.description;
            if labeled_input(ui, "Description*", "Movies", &mut description, 260.0).changed() {
                self.controller.set_description(description);
            }

            let mut amount = draft.amount;
            if labeled_input(ui, "Amount*", "500", &mut amount, 110.0).changed() {
                amount.retain(|c| c.is_ascii_digit() || c == '.' || c == '-');
                self.controller.set_amount(amount);
            }

            let mut category = draft.category;
            if labeled_input(ui, "Category", "Entertainment", &mut category, 160.0).changed() {
                self.controller.set_category(category);
            }

            let add = ui.add_enabled(
                self.backend_available,
                egui::Button::new(egui::RichText::new("Add Expense").strong())
                    .min_size(egui::vec2(120.0, 34.0)),
            );
            if add.clicked() {
                requests.push(self.controller.submit());
            }
        });

        self.dispatch(requests);
    }

    fn show_query_bar(&mut self, ui: &mut egui::Ui) {
        let mut requests = Vec::new();

        ui.horizontal(|ui| {
            for preset in SortPreset::ALL {
                let active = self.controller.sort_preset() == preset;
                let mut button = egui::Button::new(preset.label()).selected(active);
                if active {
                    button = button.fill(ACCENT);
                }
                if ui.add(button).clicked() {
                    requests.extend(self.controller.select_sort_preset(preset));
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut selected = self.controller.category_filter().to_string();
                egui::ComboBox::from_id_salt("category_filter")
                    .selected_text(category_label(&selected, "All Categories"))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut selected, String::new(), "All Categories");
                        for category in self.controller.categories() {
                            if category.is_empty() {
                                continue;
                            }
                            ui.selectable_value(
                                &mut selected,
                                category.clone(),
                                category.as_str(),
                            );
                        }
                    });
                ui.label(egui::RichText::new("Select Category").weak());

                if selected != self.controller.category_filter() {
                    requests.extend(self.controller.select_category_filter(selected));
                }
            });
        });

        self.dispatch(requests);
    }

    fn show_expenses(&self, ui: &mut egui::Ui) {
        if self.controller.is_busy() {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.add(egui::Spinner::new().size(32.0));
            });
            return;
        }

        if self.controller.expenses().is_empty() {
            ui.add_space(12.0);
            ui.label(egui::RichText::new("No expenses yet").weak());
            return;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for expense in self.controller.expenses() {
                    expense_row(ui, expense);
                    ui.separator();
                }
            });
    }
}

fn labeled_input(
    ui: &mut egui::Ui,
    label: &str,
    hint: &str,
    value: &mut String,
    width: f32,
) -> egui::Response {
    ui.vertical(|ui| {
        ui.small(label);
        ui.add(
            egui::TextEdit::singleline(value)
                .id_salt(label)
                .hint_text(hint)
                .desired_width(width),
        )
    })
    .inner
}

fn category_label<'a>(category: &'a str, empty: &'a str) -> &'a str {
    if category.is_empty() {
        empty
    } else {
        category
    }
}

fn expense_row(ui: &mut egui::Ui, expense: &Expense) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.label(expense.description.as_str());
                if !expense.category.is_empty() {
                    egui::Frame::new()
                        .stroke(egui::Stroke::new(1.0, CHIP))
                        .corner_radius(egui::CornerRadius::same(8))
                        .inner_margin(egui::Margin::symmetric(8, 1))
                        .show(ui, |ui| {
                            ui.colored_label(CHIP, expense.category.as_str());
                        });
                }
            });
            ui.label(egui::RichText::new(&expense.amount).strong().size(18.0));
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format_created_at(&expense.created_at));
        });
    });
}

impl eframe::App for ExpenseTrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("entry_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| ui.heading("Expense Tracker"));
            ui.add_space(6.0);
            self.show_entry_bar(ui);
            ui.add_space(6.0);
            self.show_query_bar(ui);
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(self.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| self.show_expenses(ui));

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
