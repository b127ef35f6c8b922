use std::f32::consts::{SQRT_2, TAU};

use eframe::egui::{Pos2, Vec2, pos2, vec2};

pub const NODES_PER_RING: usize = 20;
pub const RADIUS_FACTOR: f32 = 2.8;

const BASE_RADII: Vec2 = vec2(50.0, 25.0);
const GROWTH_PER_JOB: f32 = 4.0;
const LABEL_OFFSET: Vec2 = vec2(-45.0 * SQRT_2, 3.0 * SQRT_2);

#[derive(Clone, Debug, PartialEq)]
pub struct SlavePlacement {
    pub key: String,
    pub index: usize,
    pub angle: f32,
    pub ring_factor: f32,
    pub center: Pos2,
    pub radii: Vec2,
    pub halo_radii: Vec2,
    pub label: Pos2,
}

pub fn ring_count(count: usize) -> usize {
    count / NODES_PER_RING + 1
}

/// Inner rings pull in by `1 / (rings + 1)` per step.
pub fn ring_factor(index: usize, rings: usize) -> f32 {
    let rings = rings.max(1);
    1.0 - (1.0 / (rings as f32 + 1.0)) * (index % rings) as f32
}

pub fn ellipse_radii(jobs: u32, grow: bool) -> Vec2 {
    let growth = if grow { jobs as f32 * GROWTH_PER_JOB } else { 0.0 };
    (BASE_RADII + vec2(growth, growth)) * SQRT_2
}

pub fn label_anchor(center: Pos2) -> Pos2 {
    center + LABEL_OFFSET
}

pub fn radial_layout<'a, I>(slaves: I, viewport: Vec2) -> Vec<SlavePlacement>
where
    I: IntoIterator<Item = (&'a str, u32)>,
    I::IntoIter: ExactSizeIterator,
{
    let slaves = slaves.into_iter();
    let count = slaves.len();
    if count == 0 {
        return Vec::new();
    }

    let rings = ring_count(count);
    let radius = vec2(
        (viewport.x / RADIUS_FACTOR).round(),
        (viewport.y / RADIUS_FACTOR).round(),
    );
    let step = TAU / count as f32;
    let origin = pos2(viewport.x / 2.0, viewport.y / 2.0);

    slaves
        .enumerate()
        .map(|(index, (key, jobs))| {
            let angle = step * index as f32;
            let factor = ring_factor(index, rings);
            let center = origin
                + vec2(
                    angle.cos() * radius.x * factor,
                    angle.sin() * radius.y * factor,
                );

            SlavePlacement {
                key: key.to_owned(),
                index,
                angle,
                ring_factor: factor,
                center,
                radii: ellipse_radii(jobs, false),
                halo_radii: ellipse_radii(jobs, true),
                label: label_anchor(center),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(count: usize) -> Vec<String> {
        (0..count).map(|index| format!("10.0.0.{index}:9")).collect()
    }

    fn layout(keys: &[String], viewport: Vec2) -> Vec<SlavePlacement> {
        radial_layout(keys.iter().map(|key| (key.as_str(), 0)), viewport)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn empty_cluster_has_no_placements() {
        assert!(layout(&[], vec2(800.0, 600.0)).is_empty());
    }

    #[test]
    fn every_slave_gets_a_distinct_angle_step() {
        let keys = keys(7);
        let placements = layout(&keys, vec2(800.0, 600.0));
        assert_eq!(placements.len(), 7);

        let step = TAU / 7.0;
        for (index, placement) in placements.iter().enumerate() {
            assert_eq!(placement.index, index);
            assert!(close(placement.angle, step * index as f32));
            assert!(placement.angle >= 0.0 && placement.angle < TAU);
        }
    }

    #[test]
    fn single_ring_sits_on_the_scaled_ellipse() {
        let keys = keys(4);
        let placements = layout(&keys, vec2(560.0, 280.0));

        // radii round(560 / 2.8) = 200 and round(280 / 2.8) = 100
        assert!(close(placements[0].center.x, 280.0 + 200.0));
        assert!(close(placements[0].center.y, 140.0));
        assert!(close(placements[1].center.x, 280.0));
        assert!(close(placements[1].center.y, 140.0 + 100.0));
        assert!(placements.iter().all(|placement| placement.ring_factor == 1.0));
    }

    #[test]
    fn rings_dampen_alternate_indices() {
        assert_eq!(ring_count(19), 1);
        assert_eq!(ring_count(20), 2);
        assert_eq!(ring_count(25), 2);

        let keys = keys(25);
        let placements = layout(&keys, vec2(800.0, 600.0));
        assert!(close(placements[0].ring_factor, 1.0));
        assert!(close(placements[2].ring_factor, 1.0));
        assert!(close(placements[1].ring_factor, 1.0 - 1.0 / 3.0));
        assert!(close(placements[3].ring_factor, 1.0 - 1.0 / 3.0));
    }

    #[test]
    fn halo_grows_with_jobs_while_core_stays_fixed() {
        assert_eq!(ellipse_radii(0, false), ellipse_radii(0, true));
        assert_eq!(ellipse_radii(9, false), vec2(50.0, 25.0) * SQRT_2);

        let halo = ellipse_radii(3, true);
        assert!(close(halo.x, 62.0 * SQRT_2));
        assert!(close(halo.y, 37.0 * SQRT_2));
    }

    #[test]
    fn label_sits_lower_left_of_center() {
        let label = label_anchor(pos2(100.0, 100.0));
        assert!(close(label.x, 100.0 - 45.0 * SQRT_2));
        assert!(close(label.y, 100.0 + 3.0 * SQRT_2));
    }
}
