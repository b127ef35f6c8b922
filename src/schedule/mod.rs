mod debounce;
mod tween;

pub use debounce::{RELAYOUT_DEBOUNCE, RelayoutScheduler};
pub use tween::{BAR_TRANSITION, HALO_TRANSITION, Tween};
