//! Asynchronous HTTP requests.
//!
//! The animation description and geocoder queries are fetched on background
//! threads, keeping the GUI responsive while the network is slow.

use anyhow::Context as _;
use declimag::{AnimationInfo, GeocodeHit, Geocoder, JsonFetcher};
use eframe::egui;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use crate::io::LoadingState;

/// Result of a completed background request.
#[derive(Debug)]
pub enum LoadResult {
    /// Animation fetched; `None` when the server did not answer 200
    Animation(Option<AnimationInfo>),
    /// Animation request or parsing failed
    AnimationFailed(String),
    /// Geocoder answered
    Geocode {
        query: String,
        hits: Vec<GeocodeHit>,
    },
    /// Geocoder request failed
    GeocodeFailed {
        query: String,
        error: String,
    },
    /// No request finished since the last poll
    None,
}

type SearchOutcome = (String, Result<Vec<GeocodeHit>, String>);

/// Manages background HTTP requests.
///
/// This struct coordinates worker threads with the main GUI thread. Each
/// request kind has its own channel so an animation fetch and a search can
/// run at the same time.
pub struct AsyncLoader {
    /// Shared progress flags
    loading_state: Arc<Mutex<LoadingState>>,

    /// Channel receiver for the animation description
    animation_receiver: Option<Receiver<Result<Option<AnimationInfo>, String>>>,

    /// Channel receiver for the latest geocoder query
    search_receiver: Option<Receiver<SearchOutcome>>,
}

impl AsyncLoader {
    /// Creates a new loader with no request in flight.
    pub fn new() -> Self {
        Self {
            loading_state: Arc::new(Mutex::new(LoadingState::new())),
            animation_receiver: None,
            search_receiver: None,
        }
    }

    fn state(&self) -> MutexGuard<'_, LoadingState> {
        self.loading_state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Checks if the animation description is still being fetched.
    pub fn is_loading_animation(&self) -> bool {
        self.state().animation_in_progress
    }

    /// Checks if a geocoder query is running.
    pub fn is_searching(&self) -> bool {
        self.state().search_in_progress
    }

    /// Starts fetching the animation description.
    ///
    /// Call `check_completion()` once per frame to pick up the result.
    ///
    /// # Arguments
    /// * `fetcher` - HTTP client moved into the worker thread
    /// * `url` - Location of the Lottie JSON document
    /// * `ctx` - egui context for requesting a repaint when the fetch ends
    pub fn start_animation_fetch<F>(&mut self, fetcher: F, url: String, ctx: &egui::Context)
    where
        F: JsonFetcher + 'static,
    {
        let (sender, receiver) = channel();
        self.animation_receiver = Some(receiver);
        self.state().animation_in_progress = true;

        let loading_state = Arc::clone(&self.loading_state);
        let ctx_handle = ctx.clone();

        thread::spawn(move || {
            let result = load_animation(&fetcher, &url).map_err(|e| format!("{e:#}"));
            let _ = sender.send(result);

            loading_state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .animation_in_progress = false;

            ctx_handle.request_repaint();
        });
    }

    /// Starts a geocoder query. A newer query supersedes one still running.
    ///
    /// # Arguments
    /// * `geocoder` - Geocoder moved into the worker thread
    /// * `query` - Free-text address or place name
    /// * `ctx` - egui context for requesting a repaint when the query ends
    pub fn start_search<G>(&mut self, geocoder: G, query: String, ctx: &egui::Context)
    where
        G: Geocoder + 'static,
    {
        let (sender, receiver) = channel();
        self.search_receiver = Some(receiver);
        self.state().search_in_progress = true;

        let loading_state = Arc::clone(&self.loading_state);
        let ctx_handle = ctx.clone();

        thread::spawn(move || {
            let result = geocoder.search(&query).map_err(|e| e.to_string());
            let _ = sender.send((query, result));

            loading_state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .search_in_progress = false;

            ctx_handle.request_repaint();
        });
    }

    /// Returns one finished request, if any.
    ///
    /// This should be called once per frame in the update loop.
    pub fn check_completion(&mut self) -> LoadResult {
        if let Some(receiver) = &self.animation_receiver {
            if let Ok(result) = receiver.try_recv() {
                self.animation_receiver = None;
                return match result {
                    Ok(info) => LoadResult::Animation(info),
                    Err(error) => LoadResult::AnimationFailed(error),
                };
            }
        }

        if let Some(receiver) = &self.search_receiver {
            if let Ok((query, result)) = receiver.try_recv() {
                self.search_receiver = None;
                return match result {
                    Ok(hits) => LoadResult::Geocode { query, hits },
                    Err(error) => LoadResult::GeocodeFailed { query, error },
                };
            }
        }

        LoadResult::None
    }
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn load_animation<F: JsonFetcher>(fetcher: &F, url: &str) -> anyhow::Result<Option<AnimationInfo>> {
    let Some(document) = fetcher
        .fetch_json(url)
        .with_context(|| format!("no se pudo descargar {url}"))?
    else {
        return Ok(None);
    };
    let info = AnimationInfo::from_json(document).context("animación inválida")?;
    log::debug!(
        "animation loaded: {} layers, {:.2}s loop",
        info.layer_count,
        info.duration_secs()
    );
    Ok(Some(info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use declimag::{FetchError, GeoPoint};
    use std::time::{Duration, Instant};

    struct StaticFetcher(Option<serde_json::Value>);

    impl JsonFetcher for StaticFetcher {
        fn fetch_json(&self, _url: &str) -> Result<Option<serde_json::Value>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct StaticGeocoder;

    impl Geocoder for StaticGeocoder {
        fn search(&self, query: &str) -> Result<Vec<GeocodeHit>, FetchError> {
            if query.is_empty() {
                return Err(FetchError::Status(400));
            }
            Ok(vec![GeocodeHit {
                display_name: query.to_string(),
                position: GeoPoint::new(-12.05, -77.04),
            }])
        }
    }

    fn wait_for(loader: &mut AsyncLoader) -> LoadResult {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            match loader.check_completion() {
                LoadResult::None => thread::sleep(Duration::from_millis(5)),
                other => return other,
            }
        }
        LoadResult::None
    }

    #[test]
    fn test_async_loader_creation() {
        let loader = AsyncLoader::new();
        assert!(!loader.is_loading_animation());
        assert!(!loader.is_searching());
    }

    #[test]
    fn test_check_completion_when_idle() {
        let mut loader = AsyncLoader::new();
        assert!(matches!(loader.check_completion(), LoadResult::None));
    }

    #[test]
    fn test_animation_fetch() {
        let ctx = egui::Context::default();
        let mut loader = AsyncLoader::new();
        let document = serde_json::json!({"fr": 25, "ip": 0, "op": 50, "w": 100, "h": 100});
        loader.start_animation_fetch(StaticFetcher(Some(document)), "memory".to_string(), &ctx);

        match wait_for(&mut loader) {
            LoadResult::Animation(Some(info)) => assert_eq!(info.duration_secs(), 2.0),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_animation_non_200_is_absent() {
        let ctx = egui::Context::default();
        let mut loader = AsyncLoader::new();
        loader.start_animation_fetch(StaticFetcher(None), "memory".to_string(), &ctx);
        assert!(matches!(wait_for(&mut loader), LoadResult::Animation(None)));
    }

    #[test]
    fn test_invalid_animation_reports_failure() {
        let ctx = egui::Context::default();
        let mut loader = AsyncLoader::new();
        let document = serde_json::json!({"unexpected": true});
        loader.start_animation_fetch(StaticFetcher(Some(document)), "memory".to_string(), &ctx);
        assert!(matches!(wait_for(&mut loader), LoadResult::AnimationFailed(_)));
    }

    #[test]
    fn test_search() {
        let ctx = egui::Context::default();
        let mut loader = AsyncLoader::new();
        loader.start_search(StaticGeocoder, "Lima".to_string(), &ctx);

        match wait_for(&mut loader) {
            LoadResult::Geocode { query, hits } => {
                assert_eq!(query, "Lima");
                assert_eq!(hits.len(), 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_search_failure() {
        let ctx = egui::Context::default();
        let mut loader = AsyncLoader::new();
        loader.start_search(StaticGeocoder, String::new(), &ctx);
        assert!(matches!(wait_for(&mut loader), LoadResult::GeocodeFailed { .. }));
    }
}
