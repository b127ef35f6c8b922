use std::time::{Duration, Instant};

use eframe::egui::Vec2;
use eframe::emath::{easing, lerp};

pub const HALO_TRANSITION: Duration = Duration::from_millis(200);
pub const BAR_TRANSITION: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: Vec2,
    to: Vec2,
    start: Instant,
    duration: Duration,
}

impl Tween {
    pub fn settled(value: Vec2, now: Instant) -> Self {
        Self {
            from: value,
            to: value,
            start: now,
            duration: Duration::ZERO,
        }
    }

    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: Instant) -> Vec2 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        lerp(self.from..=self.to, easing::cubic_in_out(progress))
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.progress(now) < 1.0
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        (self.start + self.duration).saturating_duration_since(now)
    }

    pub fn retarget(&mut self, to: Vec2, duration: Duration, now: Instant) {
        if to == self.to {
            return;
        }
        self.from = self.sample(now);
        self.to = to;
        self.start = now;
        self.duration = duration;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    #[test]
    fn sampling_outside_the_transition_stays_at_the_endpoints() {
        let now = Instant::now();
        let mut tween = Tween::settled(vec2(10.0, 10.0), now);
        tween.retarget(vec2(30.0, 20.0), HALO_TRANSITION, now);

        let before = now.checked_sub(Duration::from_millis(50)).unwrap_or(now);
        assert_eq!(tween.progress(before), 0.0);
        assert_eq!(tween.sample(before), vec2(10.0, 10.0));
        assert_eq!(tween.progress(now + Duration::from_secs(3)), 1.0);
        assert_eq!(tween.sample(now + Duration::from_secs(3)), vec2(30.0, 20.0));
    }

    #[test]
    fn tween_moves_from_start_to_target() {
        let now = Instant::now();
        let mut tween = Tween::settled(vec2(10.0, 10.0), now);
        assert!(!tween.is_animating(now));

        tween.retarget(vec2(30.0, 20.0), HALO_TRANSITION, now);
        assert_eq!(tween.sample(now), vec2(10.0, 10.0));
        assert!(tween.is_animating(now + Duration::from_millis(100)));

        let halfway = tween.sample(now + Duration::from_millis(100));
        assert!((halfway.x - 20.0).abs() < 1e-3);
        assert!((halfway.y - 15.0).abs() < 1e-3);

        assert_eq!(tween.sample(now + HALO_TRANSITION), vec2(30.0, 20.0));
        assert_eq!(tween.remaining(now + Duration::from_secs(1)), Duration::ZERO);
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_value() {
        let now = Instant::now();
        let mut tween = Tween::settled(vec2(0.0, 0.0), now);
        tween.retarget(vec2(100.0, 0.0), BAR_TRANSITION, now);

        let mid = now + Duration::from_millis(50);
        let current = tween.sample(mid);
        tween.retarget(vec2(0.0, 0.0), BAR_TRANSITION, mid);
        assert_eq!(tween.sample(mid), current);
        assert_eq!(tween.sample(mid + BAR_TRANSITION), vec2(0.0, 0.0));
    }
}
