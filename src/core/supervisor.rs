//! Supervisor for the long-running source workers
//!
//! Every worker runs as its own task inside a `JoinSet`. When one stops the
//! supervisor logs a `worker=<name> outcome=<...>` line; a panicked worker is
//! started again from its factory after a fixed delay, a worker that
//! returned (normally or with an error) stays stopped.

use anyhow::Result;
use log::{error, info, warn};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Delay before a panicked worker is started again
pub const RESTART_DELAY: Duration = Duration::from_secs(30);

pub type WorkerFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

type WorkerFactory = Box<dyn Fn() -> WorkerFuture + Send + Sync>;

/// How a worker run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Panicked,
    Exited,
    Failed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Panicked => "panicked",
            Outcome::Exited => "exited",
            Outcome::Failed => "failed",
        })
    }
}

struct WorkerSpec {
    name: String,
    factory: WorkerFactory,
}

/// Starts, watches and restarts the source workers
pub struct Supervisor {
    workers: Vec<Arc<WorkerSpec>>,
    restart_delay: Duration,
}

impl Supervisor {
    pub fn new() -> Self {
        Self {
            workers: Vec::new(),
            restart_delay: RESTART_DELAY,
        }
    }

    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay;
        self
    }

    /// Register a worker. `factory` is called once per start.
    pub fn add<F, Fut>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.workers.push(Arc::new(WorkerSpec {
            name: name.into(),
            factory: Box::new(move || -> WorkerFuture { Box::pin(factory()) }),
        }));
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.workers.iter().map(|w| w.name.as_str()).collect()
    }

    fn spawn(set: &mut JoinSet<(Arc<WorkerSpec>, Outcome)>, spec: Arc<WorkerSpec>, delay: Duration) {
        set.spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            info!("worker={} starting", spec.name);

            // Run in a task of its own so a panic surfaces as a JoinError
            // instead of taking the supervisor down
            let outcome = match tokio::spawn((spec.factory)()).await {
                Ok(Ok(())) => Outcome::Exited,
                Ok(Err(e)) => {
                    error!("worker={} error: {:#}", spec.name, e);
                    Outcome::Failed
                }
                Err(e) if e.is_panic() => Outcome::Panicked,
                Err(_) => Outcome::Exited,
            };
            (spec, outcome)
        });
    }

    /// Run until every worker has stopped for good.
    ///
    /// Returns each stop in the order it happened.
    pub async fn run(self) -> Vec<(String, Outcome)> {
        let mut set = JoinSet::new();
        for spec in &self.workers {
            Self::spawn(&mut set, Arc::clone(spec), Duration::ZERO);
        }
        info!("Supervising {} worker(s)", self.workers.len());

        let mut history = Vec::new();
        while let Some(joined) = set.join_next().await {
            let (spec, outcome) = match joined {
                Ok(result) => result,
                Err(e) => {
                    // Only reachable if the wrapper task itself failed
                    error!("Supervisor task failed: {}", e);
                    continue;
                }
            };

            match outcome {
                Outcome::Panicked => {
                    error!("worker={} outcome={}", spec.name, outcome);
                    warn!(
                        "worker={} restarting in {:?}",
                        spec.name, self.restart_delay
                    );
                    Self::spawn(&mut set, Arc::clone(&spec), self.restart_delay);
                }
                Outcome::Failed => error!("worker={} outcome={}", spec.name, outcome),
                Outcome::Exited => warn!("worker={} outcome={}", spec.name, outcome),
            }
            history.push((spec.name.clone(), outcome));
        }

        history
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast() -> Supervisor {
        Supervisor::new().with_restart_delay(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_panicked_worker_is_restarted() {
        let starts = Arc::new(AtomicUsize::new(0));
        let mut supervisor = fast();
        let counter = Arc::clone(&starts);
        supervisor.add("flaky", move || {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    panic!("first run blows up");
                }
                Ok(())
            }
        });

        let history = supervisor.run().await;
        assert_eq!(starts.load(Ordering::SeqCst), 2);
        assert_eq!(
            history,
            vec![
                ("flaky".to_string(), Outcome::Panicked),
                ("flaky".to_string(), Outcome::Exited)
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_worker_is_not_restarted() {
        let starts = Arc::new(AtomicUsize::new(0));
        let mut supervisor = fast();
        let counter = Arc::clone(&starts);
        supervisor.add("sensor", move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(anyhow::anyhow!("no device"))
            }
        });

        let history = supervisor.run().await;
        assert_eq!(starts.load(Ordering::SeqCst), 1);
        assert_eq!(history, vec![("sensor".to_string(), Outcome::Failed)]);
    }

    #[tokio::test]
    async fn test_one_worker_failing_leaves_others_running() {
        let mut supervisor = fast();
        supervisor.add("bad", || async { Err(anyhow::anyhow!("boom")) });
        supervisor.add("slow", || async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(())
        });
        assert_eq!(supervisor.names(), vec!["bad", "slow"]);

        let history = supervisor.run().await;
        assert_eq!(
            history,
            vec![
                ("bad".to_string(), Outcome::Failed),
                ("slow".to_string(), Outcome::Exited)
            ]
        );
    }

    #[test]
    fn test_outcome_names() {
        assert_eq!(Outcome::Panicked.to_string(), "panicked");
        assert_eq!(Outcome::Failed.to_string(), "failed");
    }
}
