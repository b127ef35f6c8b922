mod error;
mod event;
mod state;

pub use error::{ClusterError, Entity};
pub use event::{ClientInfo, ClusterEvent, JobId, JobStart, SlaveAddr, parse_event_line};
pub use state::{Client, ClusterState, Job, Outcome, Slave, StateChange};
