//! Wiring of configured sources into supervised workers

use super::supervisor::Supervisor;
use crate::config::AppConfig;
use anyhow::Result;
use log::{info, warn};
use rgb_marquee_core::ContentStore;
use rgb_marquee_sources::{FeedWorker, Fetch, HttpFetcher};
use rgb_marquee_types::SensorSourceConfig;
use std::sync::Arc;

type FeedConstructor = fn(&AppConfig, Arc<dyn Fetch>, Arc<ContentStore>) -> Option<FeedWorker>;

/// Feed workers by name, in start order
const FEEDS: [(&str, FeedConstructor); 4] = [
    ("quote", |c, f, s| FeedWorker::quote(&c.quote, f, s)),
    ("jokes", |c, f, s| FeedWorker::jokes(&c.jokes, f, s)),
    ("weather", |c, f, s| FeedWorker::weather(&c.weather, f, s)),
    ("news", |c, f, s| FeedWorker::news(&c.news, f, s)),
];

/// Register one worker per enabled and configured feed
pub fn add_feed_workers(
    supervisor: &mut Supervisor,
    config: &AppConfig,
    fetcher: Arc<dyn Fetch>,
    store: &Arc<ContentStore>,
) {
    for (name, construct) in FEEDS {
        // Probe once so disabled feeds are never registered
        if construct(config, Arc::clone(&fetcher), Arc::clone(store)).is_none() {
            info!("{} feed disabled or not configured", name);
            continue;
        }

        let config = config.clone();
        let fetcher = Arc::clone(&fetcher);
        let store = Arc::clone(store);
        supervisor.add(name, move || {
            let worker = construct(&config, Arc::clone(&fetcher), Arc::clone(&store));
            async move {
                if let Some(worker) = worker {
                    worker.run().await;
                }
                Ok(())
            }
        });
    }
}

/// Register the BME280 reader, which blocks on the bus between samples
#[cfg(feature = "i2c")]
pub fn add_sensor_worker(
    supervisor: &mut Supervisor,
    config: &SensorSourceConfig,
    store: &Arc<ContentStore>,
) {
    use rgb_marquee_sources::{I2cBus, SensorReader};

    if !config.enabled || !config.has_metrics() {
        info!("sensor disabled or no metrics selected");
        return;
    }

    let config = config.clone();
    let store = Arc::clone(store);
    supervisor.add("sensor", move || {
        let config = config.clone();
        let store = Arc::clone(&store);
        async move {
            let handle = tokio::task::spawn_blocking(move || -> Result<()> {
                let bus = I2cBus::open(std::path::Path::new(&config.bus_path))?;
                let reader = SensorReader::new(bus, config, store)?;
                reader.run();
                Ok(())
            });
            match handle.await {
                Ok(result) => result,
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(e) => Err(e.into()),
            }
        }
    });
}

#[cfg(not(feature = "i2c"))]
pub fn add_sensor_worker(
    _supervisor: &mut Supervisor,
    config: &SensorSourceConfig,
    _store: &Arc<ContentStore>,
) {
    if config.enabled {
        warn!("Built without I2C support, sensor disabled");
    }
}

/// Supervisor with every worker the configuration asks for
pub fn build_supervisor(config: &AppConfig, store: &Arc<ContentStore>) -> Result<Supervisor> {
    let mut supervisor = Supervisor::new();
    add_sensor_worker(&mut supervisor, &config.sensor, store);

    let fetcher: Arc<dyn Fetch> = Arc::new(HttpFetcher::new()?);
    add_feed_workers(&mut supervisor, config, fetcher, store);

    if supervisor.is_empty() {
        warn!("No sources enabled, bottom line will only show calendar events");
    }
    Ok(supervisor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rgb_marquee_sources::FeedError;

    struct Offline;

    #[async_trait]
    impl Fetch for Offline {
        async fn fetch(&self, endpoint: &str) -> Result<String, FeedError> {
            Err(FeedError::transport(endpoint, "offline"))
        }
    }

    #[test]
    fn test_only_configured_feeds_registered() {
        let mut config = AppConfig::default();
        config.jokes.enabled = true;
        config.jokes.urls.push("http://jokes.example/".into());
        // Enabled but missing its key
        config.weather.enabled = true;
        config.news.urls.push("https://news.google.com/".into());

        let store = Arc::new(ContentStore::new());
        let mut supervisor = Supervisor::new();
        add_feed_workers(&mut supervisor, &config, Arc::new(Offline), &store);
        assert_eq!(supervisor.names(), vec!["jokes"]);
    }

    #[test]
    fn test_all_feeds_disabled_registers_nothing() {
        let store = Arc::new(ContentStore::new());
        let mut supervisor = Supervisor::new();
        add_feed_workers(&mut supervisor, &AppConfig::default(), Arc::new(Offline), &store);
        assert!(supervisor.is_empty());
    }
}
