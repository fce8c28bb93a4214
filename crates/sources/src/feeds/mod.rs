//! Network feed workers
//!
//! Each feed is a [`FeedWorker`]: fetch one endpoint, parse the payload with
//! the source's [`FeedParser`], replace the source's list, sleep, repeat.
//! Failures are logged and leave the previous list in place.

mod html;
mod http;
mod jokes;
mod news;
mod quote;
mod weather;

pub use html::{decode_entities, html_to_text};
pub use http::{HttpFetcher, REQUEST_TIMEOUT};
pub use jokes::JokesParser;
pub use news::{cleanup_escapes, NewsParser, Provider};
pub use quote::{Quote, QuoteParser, FALLBACK_AUTHOR, FALLBACK_QUOTE};
pub use weather::{compass_point, WeatherParser};

use crate::error::{redact_endpoint, FeedError};
use async_trait::async_trait;
use log::{debug, info, warn};
use rgb_marquee_core::ContentStore;
use rgb_marquee_types::{
    JokesSourceConfig, Message, NewsSourceConfig, QuoteSourceConfig, SourceKind,
    WeatherSourceConfig,
};
use std::sync::Arc;
use std::time::Duration;

/// Retrieves the raw payload of an endpoint
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, endpoint: &str) -> Result<String, FeedError>;
}

/// Turns a raw payload into display messages for one source
pub trait FeedParser: Send + Sync {
    /// Source whose list this parser fills
    fn source(&self) -> SourceKind;

    fn parse(&self, endpoint: &str, raw: &str) -> Result<Vec<Message>, FeedError>;

    /// Installed after a failed cycle while the source has never had content
    fn fallback(&self) -> Option<Vec<Message>> {
        None
    }
}

/// Periodic fetch/parse/publish loop for one source
pub struct FeedWorker {
    fetcher: Arc<dyn Fetch>,
    parser: Box<dyn FeedParser>,
    endpoints: Vec<String>,
    next: usize,
    interval: Duration,
    store: Arc<ContentStore>,
    /// Set by the first cycle that published fetched content
    fetched: bool,
}

impl FeedWorker {
    pub fn new(
        fetcher: Arc<dyn Fetch>,
        parser: Box<dyn FeedParser>,
        endpoints: Vec<String>,
        interval: Duration,
        store: Arc<ContentStore>,
    ) -> Self {
        Self {
            fetcher,
            parser,
            endpoints,
            next: 0,
            interval,
            store,
            fetched: false,
        }
    }

    pub fn weather(
        config: &WeatherSourceConfig,
        fetcher: Arc<dyn Fetch>,
        store: Arc<ContentStore>,
    ) -> Option<Self> {
        config.is_runnable().then(|| {
            Self::new(
                fetcher,
                Box::new(WeatherParser::new(config.temp_unit)),
                vec![config.endpoint()],
                Duration::from_secs(config.update_interval_secs),
                store,
            )
        })
    }

    pub fn quote(
        config: &QuoteSourceConfig,
        fetcher: Arc<dyn Fetch>,
        store: Arc<ContentStore>,
    ) -> Option<Self> {
        config.is_runnable().then(|| {
            Self::new(
                fetcher,
                Box::new(QuoteParser),
                vec![config.url.clone()],
                Duration::from_secs(config.update_interval_secs),
                store,
            )
        })
    }

    pub fn jokes(
        config: &JokesSourceConfig,
        fetcher: Arc<dyn Fetch>,
        store: Arc<ContentStore>,
    ) -> Option<Self> {
        config.is_runnable().then(|| {
            Self::new(
                fetcher,
                Box::new(JokesParser),
                config.urls.clone(),
                Duration::from_secs(config.effective_interval_secs()),
                store,
            )
        })
    }

    pub fn news(
        config: &NewsSourceConfig,
        fetcher: Arc<dyn Fetch>,
        store: Arc<ContentStore>,
    ) -> Option<Self> {
        config.is_runnable().then(|| {
            Self::new(
                fetcher,
                Box::new(NewsParser),
                config.urls.clone(),
                Duration::from_secs(config.update_interval_secs),
                store,
            )
        })
    }

    pub fn source(&self) -> SourceKind {
        self.parser.source()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Round-robin over the configured endpoints
    fn next_endpoint(&mut self) -> Option<String> {
        let endpoint = self.endpoints.get(self.next)?.clone();
        self.next = (self.next + 1) % self.endpoints.len();
        Some(endpoint)
    }

    /// Run one fetch/parse/publish cycle.
    ///
    /// Returns the number of messages published; zero means the payload
    /// parsed but held nothing and the list was left alone.
    pub async fn run_cycle(&mut self) -> Result<usize, FeedError> {
        let source = self.parser.source();
        let Some(endpoint) = self.next_endpoint() else {
            return Err(FeedError::transport("", "no endpoints configured"));
        };

        let result = match self.fetcher.fetch(&endpoint).await {
            Ok(raw) => self.parser.parse(&endpoint, &raw),
            Err(e) => Err(e),
        };

        match result {
            Ok(messages) if messages.is_empty() => {
                debug!(
                    "{}: {} yielded no messages",
                    source,
                    redact_endpoint(&endpoint)
                );
                Ok(0)
            }
            Ok(messages) => {
                let count = messages.len();
                self.store.replace(source, messages);
                self.fetched = true;
                Ok(count)
            }
            Err(e) => {
                if !self.fetched && self.store.is_empty(source) {
                    if let Some(fallback) = self.parser.fallback() {
                        info!("{}: installing fallback content", source);
                        self.store.replace(source, fallback);
                    }
                }
                Err(e)
            }
        }
    }

    /// Cycle forever at the fixed interval
    pub async fn run(mut self) {
        let source = self.parser.source();
        info!(
            "{} worker started ({} endpoint(s), every {:?})",
            source,
            self.endpoints.len(),
            self.interval
        );
        loop {
            match self.run_cycle().await {
                Ok(0) => {}
                Ok(count) => info!("{}: published {} message(s)", source, count),
                Err(e) => warn!("{}: {}", source, e),
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb_marquee_types::Rgb;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses and records requested endpoints
    #[derive(Default)]
    struct ScriptedFetcher {
        responses: Mutex<VecDeque<Result<String, FeedError>>>,
        requested: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn new(responses: Vec<Result<String, FeedError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requested: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Fetch for ScriptedFetcher {
        async fn fetch(&self, endpoint: &str) -> Result<String, FeedError> {
            self.requested.lock().unwrap().push(endpoint.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FeedError::transport(endpoint, "script exhausted")))
        }
    }

    /// One message per non-empty line
    struct LineParser;

    impl FeedParser for LineParser {
        fn source(&self) -> SourceKind {
            SourceKind::News
        }

        fn parse(&self, endpoint: &str, raw: &str) -> Result<Vec<Message>, FeedError> {
            if raw == "garbage" {
                return Err(FeedError::parse(endpoint, "garbage"));
            }
            Ok(raw
                .lines()
                .filter(|l| !l.is_empty())
                .map(|l| Message::new(Rgb::WHITE, l))
                .collect())
        }
    }

    fn worker(fetcher: Arc<ScriptedFetcher>, endpoints: &[&str], store: &Arc<ContentStore>) -> FeedWorker {
        FeedWorker::new(
            fetcher,
            Box::new(LineParser),
            endpoints.iter().map(|e| e.to_string()).collect(),
            Duration::from_secs(1),
            Arc::clone(store),
        )
    }

    fn texts(store: &ContentStore, source: SourceKind) -> Vec<String> {
        store
            .list(source)
            .iter()
            .map(|m| m.text().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_success_replaces_never_appends() {
        let store = Arc::new(ContentStore::new());
        let fetcher = ScriptedFetcher::new(vec![Ok("a\nb".into()), Ok("c".into())]);
        let mut worker = worker(fetcher, &["http://one"], &store);

        assert_eq!(worker.run_cycle().await.unwrap(), 2);
        assert_eq!(texts(&store, SourceKind::News), vec!["a", "b"]);
        assert_eq!(worker.run_cycle().await.unwrap(), 1);
        assert_eq!(texts(&store, SourceKind::News), vec!["c"]);
    }

    #[tokio::test]
    async fn test_three_failures_keep_last_good_content() {
        let store = Arc::new(ContentStore::new());
        let fetcher = ScriptedFetcher::new(vec![
            Ok("good".into()),
            Err(FeedError::transport("http://one", "connection refused")),
            Ok("garbage".into()),
            Err(FeedError::transport("http://one", "HTTP 500")),
        ]);
        let mut worker = worker(fetcher, &["http://one"], &store);

        worker.run_cycle().await.unwrap();
        for _ in 0..3 {
            assert!(worker.run_cycle().await.is_err());
            assert_eq!(texts(&store, SourceKind::News), vec!["good"]);
        }
    }

    #[tokio::test]
    async fn test_cycle_error_hides_api_key() {
        let store = Arc::new(ContentStore::new());
        let fetcher = ScriptedFetcher::new(vec![]);
        let endpoint = "http://api.example/weather?zip=80301&APPID=secret";
        let mut worker = worker(Arc::clone(&fetcher), &[endpoint], &store);

        let message = worker.run_cycle().await.unwrap_err().to_string();
        assert!(!message.contains("secret"), "{}", message);
        // The request itself still carries the key
        assert_eq!(*fetcher.requested.lock().unwrap(), vec![endpoint]);
    }

    #[tokio::test]
    async fn test_empty_parse_leaves_content_and_dirty_flag() {
        let store = Arc::new(ContentStore::new());
        let fetcher = ScriptedFetcher::new(vec![Ok("first".into()), Ok("".into())]);
        let mut worker = worker(fetcher, &["http://one"], &store);

        worker.run_cycle().await.unwrap();
        store.merge_if_dirty(|_| Vec::new());
        assert_eq!(worker.run_cycle().await.unwrap(), 0);
        assert_eq!(texts(&store, SourceKind::News), vec!["first"]);
        assert!(!store.is_dirty());
    }

    #[tokio::test]
    async fn test_endpoints_round_robin() {
        let store = Arc::new(ContentStore::new());
        let fetcher = ScriptedFetcher::new(vec![]);
        let mut worker = worker(Arc::clone(&fetcher), &["http://a", "http://b", "http://c"], &store);

        for _ in 0..4 {
            let _ = worker.run_cycle().await;
        }
        assert_eq!(
            *fetcher.requested.lock().unwrap(),
            vec!["http://a", "http://b", "http://c", "http://a"]
        );
    }

    #[tokio::test]
    async fn test_quote_fallback_only_before_first_success() {
        let store = Arc::new(ContentStore::new());
        let fetcher = ScriptedFetcher::new(vec![
            Err(FeedError::transport("http://q", "timeout")),
            Ok("br.writeln(\"Stay hungry.<br>\");".into()),
            Err(FeedError::transport("http://q", "timeout")),
        ]);
        let mut worker = FeedWorker::new(
            fetcher,
            Box::new(QuoteParser),
            vec!["http://q".into()],
            Duration::from_secs(1),
            Arc::clone(&store),
        );

        assert!(worker.run_cycle().await.is_err());
        assert_eq!(
            texts(&store, SourceKind::Quote),
            vec![FALLBACK_QUOTE, FALLBACK_AUTHOR]
        );

        worker.run_cycle().await.unwrap();
        assert_eq!(texts(&store, SourceKind::Quote), vec!["Stay hungry."]);

        assert!(worker.run_cycle().await.is_err());
        assert_eq!(texts(&store, SourceKind::Quote), vec!["Stay hungry."]);
    }

    #[test]
    fn test_constructors_respect_configuration() {
        let store = Arc::new(ContentStore::new());
        let fetcher: Arc<dyn Fetch> = ScriptedFetcher::new(vec![]);

        assert!(FeedWorker::news(&NewsSourceConfig::default(), Arc::clone(&fetcher), Arc::clone(&store)).is_none());

        let jokes = JokesSourceConfig {
            enabled: true,
            urls: vec!["http://jokes".into()],
            update_interval_secs: 0,
        };
        let worker = FeedWorker::jokes(&jokes, Arc::clone(&fetcher), Arc::clone(&store)).unwrap();
        assert_eq!(worker.source(), SourceKind::Jokes);
        assert_eq!(worker.interval(), Duration::from_secs(1200));

        let weather = WeatherSourceConfig {
            enabled: true,
            api_key: "k".into(),
            zip: "z".into(),
            ..Default::default()
        };
        let worker = FeedWorker::weather(&weather, fetcher, store).unwrap();
        assert_eq!(worker.interval(), Duration::from_secs(900));
    }
}
