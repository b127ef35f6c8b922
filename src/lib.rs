pub mod cluster;
pub mod color;
pub mod dashboard;
pub mod feed;
pub mod layout;
pub mod schedule;

pub use cluster::{ClusterError, ClusterEvent, ClusterState};
pub use dashboard::{ClientView, Dashboard, SlaveView, Snapshot};
