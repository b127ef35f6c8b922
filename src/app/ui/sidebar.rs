use std::time::Instant;

use eframe::egui::{self, Color32, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::util::format_age;

use super::super::ViewModel;

const SLAVE_ROWS_MAX_HEIGHT: f32 = 360.0;

impl ViewModel {
    /// Slave keys matching the search box, best match first.
    pub(in crate::app) fn search_matches(&self) -> Option<Vec<String>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        let mut ranked = self
            .dashboard
            .state()
            .slaves()
            .filter_map(|slave| {
                matcher
                    .fuzzy_match(&slave.key, query)
                    .map(|score| (score, slave.key.clone()))
            })
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        Some(ranked.into_iter().map(|(_, key)| key).collect())
    }

    pub(in crate::app) fn draw_sidebar(&mut self, ui: &mut Ui, now: Instant) {
        ui.heading("Slaves");
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            ui.label("Search");
            ui.text_edit_singleline(&mut self.search);
        });
        ui.checkbox(&mut self.show_labels, "Show labels");
        ui.checkbox(&mut self.show_halos, "Show load halos");
        ui.separator();

        let rows = match self.search_matches() {
            Some(matches) => matches,
            None => self
                .dashboard
                .state()
                .slaves()
                .map(|slave| slave.key.clone())
                .collect(),
        };

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_salt("slave_rows")
            .max_height(SLAVE_ROWS_MAX_HEIGHT)
            .show(ui, |ui| {
                if rows.is_empty() {
                    ui.label("No slaves.");
                }
                for key in &rows {
                    let Some(slave) = self.dashboard.state().slave(key) else {
                        continue;
                    };
                    let is_selected = self.selected.as_deref() == Some(key.as_str());
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("●").color(slave.colors.fill.to_color32()));
                        if ui
                            .selectable_label(is_selected, format!("{key}  ({} jobs)", slave.jobs))
                            .clicked()
                        {
                            clicked = Some(if is_selected { None } else { Some(key.clone()) });
                        }
                    });
                }
            });
        if let Some(selection) = clicked {
            self.set_selected(selection);
        }

        ui.separator();
        ui.heading("Reports");
        ui.add_space(4.0);

        if let Some(malformed) = &self.last_malformed {
            ui.label(
                RichText::new(format!(
                    "{} malformed lines, last {malformed}",
                    self.malformed_lines
                ))
                .small(),
            );
        }

        egui::ScrollArea::vertical()
            .id_salt("report_rows")
            .show(ui, |ui| {
                let mut any = false;
                for report in self.dashboard.reports().rev() {
                    any = true;
                    ui.label(
                        RichText::new(format!(
                            "{} ago  {}: {}",
                            format_age(now.saturating_duration_since(report.at)),
                            report.event,
                            report.error
                        ))
                        .color(Color32::from_rgb(235, 180, 96))
                        .small(),
                    );
                }
                if !any {
                    ui.label("No inconsistencies reported.");
                }
            });
    }
}
