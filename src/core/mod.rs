//! Worker supervision and wiring

mod supervisor;
mod workers;

pub use supervisor::{Outcome, Supervisor, WorkerFuture, RESTART_DELAY};
pub use workers::{add_feed_workers, add_sensor_worker, build_supervisor};
