use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use eframe::egui::{Context, Vec2};
use tracing::{debug, info};

use fisk_monitor::Dashboard;
use fisk_monitor::feed::{FeedMessage, FeedSource, spawn_feed};

mod chart;
mod interaction;
mod render_utils;
mod ui;

const MAX_MESSAGES_PER_FRAME: usize = 4096;
const FEED_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct MonitorApp {
    source: FeedSource,
    feed_rx: Option<Receiver<FeedMessage>>,
    feed: FeedStatus,
    model: ViewModel,
}

enum FeedStatus {
    Waiting,
    Streaming,
    Closed { events: usize },
    Failed(String),
}

struct ViewModel {
    dashboard: Dashboard,
    search: String,
    selected: Option<String>,
    show_labels: bool,
    show_halos: bool,
    events_applied: u64,
    malformed_lines: u64,
    last_malformed: Option<String>,
}

impl MonitorApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        source: FeedSource,
        viewport: Vec2,
        report_history: usize,
    ) -> Self {
        let feed_rx = spawn_feed(source.clone());
        Self {
            source,
            feed_rx: Some(feed_rx),
            feed: FeedStatus::Waiting,
            model: ViewModel::new(Dashboard::with_report_limit(viewport, report_history)),
        }
    }

    fn drain_feed(&mut self, now: Instant) {
        let Some(rx) = self.feed_rx.take() else {
            return;
        };

        for _ in 0..MAX_MESSAGES_PER_FRAME {
            match rx.try_recv() {
                Ok(FeedMessage::Event(event)) => {
                    if matches!(self.feed, FeedStatus::Waiting) {
                        info!(source = %self.source, "receiving cluster events");
                        self.feed = FeedStatus::Streaming;
                    }
                    self.model.dashboard.handle_event(&event, now);
                    self.model.events_applied += 1;
                }
                Ok(FeedMessage::Malformed { line, error }) => {
                    self.model.malformed_lines += 1;
                    self.model.last_malformed = Some(format!("line {line}: {error}"));
                }
                Ok(FeedMessage::Closed { events }) => {
                    self.feed = FeedStatus::Closed { events };
                    return;
                }
                Ok(FeedMessage::Failed(error)) => {
                    self.feed = FeedStatus::Failed(error);
                    return;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("event feed worker disconnected");
                    self.feed = FeedStatus::Failed("Event feed worker disconnected".to_owned());
                    return;
                }
            }
        }

        self.feed_rx = Some(rx);
    }

    fn feed_label(&self) -> String {
        match &self.feed {
            FeedStatus::Waiting => format!("waiting for events on {}", self.source),
            FeedStatus::Streaming => format!("streaming from {}", self.source),
            FeedStatus::Closed { events } => {
                format!("{} closed after {events} events", self.source)
            }
            FeedStatus::Failed(error) => format!("feed error: {error}"),
        }
    }
}

impl eframe::App for MonitorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.drain_feed(now);
        self.model.dashboard.poll(now);

        let feed_label = self.feed_label();
        let feed_failed = matches!(self.feed, FeedStatus::Failed(_));
        self.model.show(ctx, now, &feed_label, feed_failed);

        if let Some(delay) = self.model.dashboard.next_deadline(now) {
            ctx.request_repaint_after(delay);
        }
        if self.feed_rx.is_some() {
            ctx.request_repaint_after(FEED_POLL_INTERVAL);
        }
    }
}
