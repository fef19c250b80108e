//! Shared progress flags for background requests.

/// Holds the state of the background HTTP requests.
///
/// Only the progress flags are shared; results come through a channel.
/// This struct is wrapped in an `Arc<Mutex<>>` to allow safe sharing between
/// the main thread and the worker threads.
#[derive(Debug, Default)]
pub struct LoadingState {
    /// True while the sidebar animation description is being fetched
    pub animation_in_progress: bool,
    /// True while a geocoder query is running
    pub search_in_progress: bool,
}

impl LoadingState {
    /// Creates a new loading state with nothing in progress.
    pub fn new() -> Self {
        Self::default()
    }
}
