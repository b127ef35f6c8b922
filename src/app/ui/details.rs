use std::collections::BTreeMap;

use eframe::egui::{RichText, Ui};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Slave Details");
        ui.add_space(6.0);

        let Some(selected_key) = self.selected.clone() else {
            ui.label("Select a slave from the chart or the list.");
            self.draw_clients(ui);
            return;
        };

        let state = self.dashboard.state();
        let Some(slave) = state.slave(&selected_key) else {
            ui.label("Selected slave is no longer part of the cluster.");
            if ui.button("Clear selection").clicked() {
                self.set_selected(None);
            }
            return;
        };

        ui.label(RichText::new(&slave.key).strong());
        ui.label(format!("Address: {}", slave.addr.ip));
        ui.label(format!("Port: {}", slave.addr.port));
        ui.label(format!("Active jobs: {}", slave.jobs));
        ui.label(format!("Fill: {}", slave.colors.fill));
        ui.label(format!("Halo: {}", slave.colors.halo));

        let mut by_client: BTreeMap<&str, usize> = BTreeMap::new();
        for (_, job) in state.jobs() {
            if job.slave_key == slave.key {
                *by_client.entry(job.client_key.as_str()).or_insert(0) += 1;
            }
        }

        ui.separator();
        ui.label(RichText::new("Jobs by client").strong());
        if by_client.is_empty() {
            ui.label("Idle.");
        }
        for (client_key, jobs) in by_client {
            let name = state
                .client(client_key)
                .map(|client| client.name.as_str())
                .unwrap_or("?");
            ui.label(format!("{name} ({client_key}): {jobs}"));
        }

        ui.separator();
        if ui.button("Clear selection").clicked() {
            self.set_selected(None);
        }
    }

    fn draw_clients(&self, ui: &mut Ui) {
        let state = self.dashboard.state();
        ui.separator();
        ui.label(RichText::new("Clients").strong());
        if state.client_count() == 0 {
            ui.label("No active clients.");
            return;
        }
        for client in state.clients() {
            ui.label(
                RichText::new(format!("{} ({}): {} jobs", client.name, client.key, client.jobs))
                    .color(client.color.to_color32()),
            );
        }
    }
}
