use eframe::egui::{self, Response, Ui, Vec2};

use fisk_monitor::Snapshot;

use super::ViewModel;
use super::render_utils::ellipse_contains;

impl ViewModel {
    /// Topmost slave under the pointer; halos count as part of the node.
    pub(in crate::app) fn hovered_slave(
        &self,
        ui: &Ui,
        snapshot: &Snapshot,
        offset: Vec2,
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        snapshot
            .slaves
            .iter()
            .enumerate()
            .rev()
            .find(|(_, slave)| {
                let radii = if self.show_halos {
                    slave.halo_radii.max(slave.radii)
                } else {
                    slave.radii
                };
                ellipse_contains(slave.center + offset, radii, pointer)
            })
            .map(|(index, _)| index)
    }

    pub(in crate::app) fn handle_chart_click(
        &mut self,
        response: &Response,
        snapshot: &Snapshot,
        hovered: Option<usize>,
    ) {
        if !response.clicked_by(egui::PointerButton::Primary) {
            return;
        }

        let selected = hovered
            .and_then(|index| snapshot.slaves.get(index))
            .map(|slave| slave.key.clone());
        self.set_selected(selected);
    }
}
