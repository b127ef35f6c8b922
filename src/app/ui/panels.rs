use std::time::Instant;

use eframe::egui::{self, Align, Color32, Context, Layout, RichText};

use fisk_monitor::Dashboard;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            search: String::new(),
            selected: None,
            show_labels: true,
            show_halos: true,
            events_applied: 0,
            malformed_lines: 0,
            last_malformed: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        now: Instant,
        feed_label: &str,
        feed_failed: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("fisk-monitor");
                    ui.separator();

                    let state = self.dashboard.state();
                    ui.label(format!("slaves: {}", state.slave_count()));
                    ui.label(format!("clients: {}", state.client_count()));
                    ui.label(format!("jobs: {}", state.job_count()));
                    ui.separator();

                    if feed_failed {
                        ui.label(RichText::new(feed_label).color(Color32::from_rgb(235, 110, 96)));
                    } else {
                        ui.label(feed_label);
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("events: {}", self.events_applied));
                        if self.dashboard.reported_total() > 0 {
                            ui.label(format!("reported: {}", self.dashboard.reported_total()));
                        }
                        if self.dashboard.relayout_pending() {
                            ui.label("relayout pending");
                        }
                    });
                });
            });

        egui::SidePanel::left("slaves")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_sidebar(ui, now));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_chart(ui, now));
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<String>) {
        if self.selected == selected {
            return;
        }
        self.selected = selected;
    }
}
