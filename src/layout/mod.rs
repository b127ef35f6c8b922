mod bars;
mod radial;

pub use bars::{BAR_HEIGHT, BAR_LABEL_INSET, BAR_LABEL_OFFSET, ClientSegment, client_bars};
pub use radial::{
    NODES_PER_RING, RADIUS_FACTOR, SlavePlacement, ellipse_radii, label_anchor, radial_layout,
    ring_count, ring_factor,
};
