use eframe::egui::{Pos2, Vec2, pos2};

pub const BAR_HEIGHT: f32 = 30.0;
pub const BAR_LABEL_OFFSET: f32 = 12.0;
pub const BAR_LABEL_INSET: f32 = 5.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientSegment {
    pub key: String,
    pub x: f32,
    pub width: f32,
    pub label: Pos2,
}

pub fn client_bars<'a, I>(clients: I, viewport: Vec2) -> Vec<ClientSegment>
where
    I: IntoIterator<Item = (&'a str, u32)>,
    I::IntoIter: Clone,
{
    let clients = clients.into_iter();
    let total: u64 = clients.clone().map(|(_, jobs)| u64::from(jobs)).sum();
    if total == 0 {
        return Vec::new();
    }

    let label_y = viewport.y - BAR_LABEL_OFFSET;
    let mut x = 0.0;
    clients
        .map(|(key, jobs)| {
            let width = (jobs as f32 / total as f32) * viewport.x;
            let segment = ClientSegment {
                key: key.to_owned(),
                x,
                width,
                label: pos2(x + BAR_LABEL_INSET, label_y),
            };
            x += width;
            segment
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    #[test]
    fn widths_are_proportional_to_jobs() {
        let bars = client_bars([("A", 3), ("B", 1)], vec2(400.0, 300.0));
        assert_eq!(bars.len(), 2);

        assert_eq!(bars[0].key, "A");
        assert_eq!(bars[0].x, 0.0);
        assert_eq!(bars[0].width, 300.0);
        assert_eq!(bars[0].label, pos2(5.0, 288.0));

        assert_eq!(bars[1].key, "B");
        assert_eq!(bars[1].x, 300.0);
        assert_eq!(bars[1].width, 100.0);
        assert_eq!(bars[1].label, pos2(305.0, 288.0));
    }

    #[test]
    fn segments_cover_the_viewport_width() {
        let bars = client_bars([("a", 1), ("b", 5), ("c", 7), ("d", 2)], vec2(977.0, 10.0));
        let last = bars.last().unwrap();
        assert!((last.x + last.width - 977.0).abs() < 1e-3);
    }

    #[test]
    fn no_jobs_no_segments() {
        assert!(client_bars([], vec2(400.0, 300.0)).is_empty());
        assert!(client_bars([("idle", 0)], vec2(400.0, 300.0)).is_empty());
    }
}
