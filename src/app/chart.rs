use std::collections::HashSet;
use std::time::Instant;

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, pos2, vec2};

use fisk_monitor::layout::BAR_HEIGHT;

use super::ViewModel;
use super::render_utils::{
    contrast_text, draw_background, ellipse_filled, ellipse_stroke, ellipse_visible,
    fade_into_background, hover_tint,
};

impl ViewModel {
    pub(in crate::app) fn draw_chart(&mut self, ui: &mut Ui, now: Instant) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect);
        self.dashboard.set_viewport(rect.size(), now);

        let snapshot = self.dashboard.snapshot(now);
        let offset = rect.left_top().to_vec2();

        if snapshot.slaves.is_empty() {
            let message = if self.dashboard.state().slave_count() == 0 {
                "Waiting for slaves to join..."
            } else {
                "Arranging slaves..."
            };
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                message,
                FontId::proportional(16.0),
                Color32::from_gray(170),
            );
        }

        let matches = self
            .search_matches()
            .map(|keys| keys.into_iter().collect::<HashSet<_>>());
        let search_active = matches.is_some();
        let hovered = self.hovered_slave(ui, &snapshot, offset);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let selected_color = Color32::from_rgb(245, 206, 93);
        let node_colors = snapshot
            .slaves
            .iter()
            .enumerate()
            .map(|(index, slave)| {
                let is_match = matches
                    .as_ref()
                    .is_some_and(|matches| matches.contains(&slave.key));
                let is_selected = self.selected.as_deref() == Some(slave.key.as_str());

                let mut fill = slave.color.to_color32();
                let mut halo = slave.halo_color.to_color32();
                if search_active && !is_match && !is_selected {
                    fill = fade_into_background(fill, 0.62);
                    halo = fade_into_background(halo, 0.62);
                } else if hovered == Some(index) {
                    fill = hover_tint(fill);
                }
                (fill, halo, is_selected)
            })
            .collect::<Vec<_>>();

        if self.show_halos {
            for (slave, (_, halo, _)) in snapshot.slaves.iter().zip(&node_colors) {
                let center = slave.center + offset;
                if ellipse_visible(rect, center, slave.halo_radii) {
                    ellipse_filled(&painter, center, slave.halo_radii, *halo);
                }
            }
        }

        for (slave, (fill, _, is_selected)) in snapshot.slaves.iter().zip(&node_colors) {
            let center = slave.center + offset;
            if !ellipse_visible(rect, center, slave.radii) {
                continue;
            }

            ellipse_filled(&painter, center, slave.radii, *fill);
            let stroke = if *is_selected {
                Stroke::new(2.4, selected_color)
            } else {
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
            };
            ellipse_stroke(&painter, center, slave.radii, stroke);

            if self.show_labels {
                painter.text(
                    slave.label + offset,
                    Align2::LEFT_BOTTOM,
                    &slave.key,
                    FontId::proportional(12.0),
                    contrast_text(*fill),
                );
            }
        }

        for client in &snapshot.clients {
            if client.width <= 0.0 {
                continue;
            }
            let bar = Rect::from_min_size(
                pos2(client.x, client.top) + offset,
                vec2(client.width, BAR_HEIGHT),
            );
            let fill = client.color.to_color32();
            painter.rect_filled(bar, 0.0, fill);
            painter.text(
                client.label + offset,
                Align2::LEFT_BOTTOM,
                &client.name,
                FontId::proportional(12.0),
                contrast_text(fill),
            );
        }

        if let Some(slave) = hovered.and_then(|index| snapshot.slaves.get(index)) {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}  |  jobs {}", slave.key, slave.jobs),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        self.handle_chart_click(&response, &snapshot, hovered);
    }
}
