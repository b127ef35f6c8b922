use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cluster::{ClusterEvent, parse_event_line};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedSource {
    Stdin,
    File(PathBuf),
}

impl FromStr for FeedSource {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(if value == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(value))
        })
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("stdin"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FeedMessage {
    Event(ClusterEvent),
    Malformed { line: usize, error: String },
    Closed { events: usize },
    Failed(String),
}

/// Decodes every line of `reader`, stopping early once the receiver is gone.
pub fn read_feed<R: BufRead>(reader: R, tx: &Sender<FeedMessage>) -> Result<usize> {
    let mut events = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read event feed line {}", index + 1))?;

        let message = match parse_event_line(&line) {
            Ok(Some(event)) => {
                events += 1;
                FeedMessage::Event(event)
            }
            Ok(None) => continue,
            Err(error) => {
                warn!(line = index + 1, "skipping malformed event: {error:#}");
                FeedMessage::Malformed {
                    line: index + 1,
                    error: format!("{error:#}"),
                }
            }
        };

        if tx.send(message).is_err() {
            break;
        }
    }

    Ok(events)
}

fn run_feed(source: &FeedSource, tx: &Sender<FeedMessage>) -> Result<usize> {
    match source {
        FeedSource::Stdin => read_feed(io::stdin().lock(), tx),
        FeedSource::File(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open event feed {}", path.display()))?;
            read_feed(BufReader::new(file), tx)
        }
    }
}

pub fn spawn_feed(source: FeedSource) -> Receiver<FeedMessage> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        info!(%source, "event feed started");
        let message = match run_feed(&source, &tx) {
            Ok(events) => {
                info!(%source, events, "event feed closed");
                FeedMessage::Closed { events }
            }
            Err(error) => {
                warn!(%source, "event feed failed: {error:#}");
                FeedMessage::Failed(format!("{error:#}"))
            }
        };
        let _ = tx.send(message);
    });

    rx
}
