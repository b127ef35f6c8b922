use std::io::Write;
use std::time::{Duration, Instant};

use eframe::egui::vec2;

use fisk_monitor::Dashboard;
use fisk_monitor::feed::{FeedMessage, FeedSource, spawn_feed};
use fisk_monitor::schedule::RELAYOUT_DEBOUNCE;

const EVENTS: &str = r#"{"type":"slaveAdded","ip":"10.0.0.1","port":9}
{"type":"slaveAdded","ip":"10.0.0.2","port":9}
{"type":"jobStarted","id":1,"slave":{"ip":"10.0.0.1","port":9},"client":{"ip":"1.2.3.4","name":"alice"}}
{"type":"jobStarted","id":2,"slave":{"ip":"10.0.0.2","port":9},"client":{"ip":"1.2.3.4","name":"alice"}}
{"type":"jobStarted","id":3,"slave":{"ip":"10.0.0.2","port":9},"client":{"ip":"5.6.7.8","name":"bob"}}
this line is not an event
{"type":"jobFinished","id":1}
{"type":"slaveRemove","ip":"10.0.0.1","port":9}
"#;

fn collect(source: FeedSource) -> Vec<FeedMessage> {
    let rx = spawn_feed(source);
    let mut messages = Vec::new();
    while let Ok(message) = rx.recv_timeout(Duration::from_secs(5)) {
        let done = matches!(
            message,
            FeedMessage::Closed { .. } | FeedMessage::Failed(_)
        );
        messages.push(message);
        if done {
            break;
        }
    }
    messages
}

#[test]
fn replaying_a_feed_file_rebuilds_the_cluster() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EVENTS.as_bytes()).unwrap();
    file.flush().unwrap();

    let messages = collect(FeedSource::File(file.path().to_path_buf()));
    assert_eq!(messages.last(), Some(&FeedMessage::Closed { events: 7 }));
    assert!(
        messages
            .iter()
            .any(|message| matches!(message, FeedMessage::Malformed { line: 6, .. }))
    );

    let now = Instant::now();
    let mut dashboard = Dashboard::new(vec2(800.0, 600.0));
    for message in &messages {
        if let FeedMessage::Event(event) = message {
            dashboard.handle_event(event, now);
        }
    }
    dashboard.poll(now + RELAYOUT_DEBOUNCE);

    let state = dashboard.state();
    assert_eq!(state.slave_count(), 1);
    assert_eq!(state.slave("10.0.0.2:9").unwrap().jobs, 2);
    assert_eq!(state.client("1.2.3.4").unwrap().jobs, 1);
    assert_eq!(state.client("5.6.7.8").unwrap().jobs, 1);
    assert_eq!(dashboard.reported_total(), 0);

    let snapshot = dashboard.snapshot(now + Duration::from_secs(1));
    assert_eq!(snapshot.slaves.len(), 1);
    let widths = snapshot
        .clients
        .iter()
        .map(|client| client.width)
        .collect::<Vec<_>>();
    assert_eq!(widths, vec![400.0, 400.0]);
}
