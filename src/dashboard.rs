use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use eframe::egui::{Pos2, Vec2, pos2, vec2};
use tracing::{debug, warn};

use crate::cluster::{ClusterError, ClusterEvent, ClusterState, Outcome};
use crate::color::Hsl;
use crate::layout::{
    BAR_HEIGHT, BAR_LABEL_INSET, BAR_LABEL_OFFSET, SlavePlacement, client_bars, ellipse_radii,
    radial_layout,
};
use crate::schedule::{BAR_TRANSITION, HALO_TRANSITION, RelayoutScheduler, Tween};

pub const DEFAULT_REPORT_HISTORY: usize = 64;

#[derive(Clone, Debug)]
pub struct Report {
    pub at: Instant,
    pub event: &'static str,
    pub error: ClusterError,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SlaveView {
    pub key: String,
    pub jobs: u32,
    pub color: Hsl,
    pub halo_color: Hsl,
    pub center: Pos2,
    pub radii: Vec2,
    pub halo_radii: Vec2,
    pub label: Pos2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClientView {
    pub key: String,
    pub name: String,
    pub jobs: u32,
    pub color: Hsl,
    pub x: f32,
    pub top: f32,
    pub width: f32,
    pub label: Pos2,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub viewport: Vec2,
    pub slaves: Vec<SlaveView>,
    pub clients: Vec<ClientView>,
}

#[derive(Debug)]
pub struct Dashboard {
    state: ClusterState,
    scheduler: RelayoutScheduler,
    viewport: Vec2,
    placements: HashMap<String, SlavePlacement>,
    halos: HashMap<String, Tween>,
    bars: HashMap<String, Tween>,
    reports: VecDeque<Report>,
    report_limit: usize,
    reported_total: u64,
    relayouts: u64,
}

impl Dashboard {
    pub fn new(viewport: Vec2) -> Self {
        Self::with_report_limit(viewport, DEFAULT_REPORT_HISTORY)
    }

    pub fn with_report_limit(viewport: Vec2, report_limit: usize) -> Self {
        Self {
            state: ClusterState::new(),
            scheduler: RelayoutScheduler::default(),
            viewport,
            placements: HashMap::new(),
            halos: HashMap::new(),
            bars: HashMap::new(),
            reports: VecDeque::new(),
            report_limit,
            reported_total: 0,
            relayouts: 0,
        }
    }

    pub fn with_scheduler(mut self, scheduler: RelayoutScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn state(&self) -> &ClusterState {
        &self.state
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn relayout_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn relayout_count(&self) -> u64 {
        self.relayouts
    }

    pub fn reports(&self) -> impl DoubleEndedIterator<Item = &Report> {
        self.reports.iter()
    }

    pub fn reported_total(&self) -> u64 {
        self.reported_total
    }

    pub fn handle_event(&mut self, event: &ClusterEvent, now: Instant) -> Outcome {
        let outcome = self.state.apply(event);

        for error in &outcome.reports {
            self.report(event.kind(), error.clone(), now);
        }

        let change = &outcome.change;
        if change.topology {
            self.forget_removed_slaves();
            let replaced = self.scheduler.schedule(now);
            debug!(event = event.kind(), replaced, "relayout scheduled");
        }

        if let Some(key) = &change.slave_load {
            self.adjust_halo(key, now);
        }

        if change.clients {
            self.refresh_bars(now, true);
        }

        outcome
    }

    /// Resizes bypass the debounce and relayout everything at once.
    pub fn set_viewport(&mut self, viewport: Vec2, now: Instant) -> bool {
        if viewport == self.viewport {
            return false;
        }

        debug!(width = viewport.x, height = viewport.y, "viewport changed");
        self.viewport = viewport;
        self.relayout(now);
        self.refresh_bars(now, false);
        true
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.scheduler.fire(now) {
            return false;
        }
        self.relayout(now);
        true
    }

    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        let animating = self
            .halos
            .values()
            .chain(self.bars.values())
            .filter(|tween| tween.is_animating(now))
            .map(|tween| tween.remaining(now))
            .min();

        match (self.scheduler.due_in(now), animating) {
            (Some(relayout), Some(animation)) => Some(relayout.min(animation)),
            (relayout, animation) => relayout.or(animation),
        }
    }

    pub fn snapshot(&self, now: Instant) -> Snapshot {
        let slaves = self
            .state
            .slaves()
            .filter_map(|slave| {
                let placement = self.placements.get(&slave.key)?;
                let halo_radii = self
                    .halos
                    .get(&slave.key)
                    .map(|tween| tween.sample(now))
                    .unwrap_or(placement.halo_radii);

                Some(SlaveView {
                    key: slave.key.clone(),
                    jobs: slave.jobs,
                    color: slave.colors.fill,
                    halo_color: slave.colors.halo,
                    center: placement.center,
                    radii: placement.radii,
                    halo_radii,
                    label: placement.label,
                })
            })
            .collect();

        let top = self.viewport.y - BAR_HEIGHT;
        let clients = self
            .state
            .clients()
            .filter_map(|client| {
                let geometry = self.bars.get(&client.key)?.sample(now);
                Some(ClientView {
                    key: client.key.clone(),
                    name: client.name.clone(),
                    jobs: client.jobs,
                    color: client.color,
                    x: geometry.x,
                    top,
                    width: geometry.y,
                    label: pos2(
                        geometry.x + BAR_LABEL_INSET,
                        self.viewport.y - BAR_LABEL_OFFSET,
                    ),
                })
            })
            .collect();

        Snapshot {
            viewport: self.viewport,
            slaves,
            clients,
        }
    }

    fn report(&mut self, event: &'static str, error: ClusterError, now: Instant) {
        warn!(
            event,
            entity = %error.entity(),
            key = error.key(),
            "{error}"
        );
        self.reported_total += 1;
        if self.report_limit == 0 {
            return;
        }
        self.reports.push_back(Report {
            at: now,
            event,
            error,
        });
        while self.reports.len() > self.report_limit {
            self.reports.pop_front();
        }
    }

    fn forget_removed_slaves(&mut self) {
        let state = &self.state;
        self.placements.retain(|key, _| state.slave(key).is_some());
        self.halos.retain(|key, _| state.slave(key).is_some());
    }

    fn adjust_halo(&mut self, key: &str, now: Instant) {
        let Some(slave) = self.state.slave(key) else {
            return;
        };
        let target = ellipse_radii(slave.jobs, true);
        if let Some(tween) = self.halos.get_mut(key) {
            tween.retarget(target, HALO_TRANSITION, now);
        }
    }

    fn relayout(&mut self, now: Instant) {
        let placements = radial_layout(
            self.state
                .slaves()
                .map(|slave| (slave.key.as_str(), slave.jobs)),
            self.viewport,
        );

        let mut halos = HashMap::with_capacity(placements.len());
        self.placements.clear();
        for placement in placements {
            let tween = match self.halos.remove(&placement.key) {
                Some(mut tween) => {
                    tween.retarget(placement.halo_radii, HALO_TRANSITION, now);
                    tween
                }
                None => Tween::settled(placement.halo_radii, now),
            };
            halos.insert(placement.key.clone(), tween);
            self.placements.insert(placement.key.clone(), placement);
        }
        self.halos = halos;

        self.relayouts += 1;
        debug!(
            slaves = self.placements.len(),
            width = self.viewport.x,
            height = self.viewport.y,
            "relayout"
        );
    }

    fn refresh_bars(&mut self, now: Instant, animate: bool) {
        let segments = client_bars(
            self.state
                .clients()
                .map(|client| (client.key.as_str(), client.jobs)),
            self.viewport,
        );

        let mut bars = HashMap::with_capacity(segments.len());
        for segment in segments {
            let target = vec2(segment.x, segment.width);
            let tween = match self.bars.remove(&segment.key) {
                Some(mut tween) if animate => {
                    tween.retarget(target, BAR_TRANSITION, now);
                    tween
                }
                _ => Tween::settled(target, now),
            };
            bars.insert(segment.key, tween);
        }
        self.bars = bars;
    }
}
