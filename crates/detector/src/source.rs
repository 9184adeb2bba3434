use std::sync::{Arc, RwLock};

/// Supplies the candidate labels scanned by the detector.
///
/// Implementations should be cheap to query: the watcher calls this on a
/// fixed interval and on every mutation notification.
pub trait LabelSource {
    /// Returns at most `max` of the current label texts, in document order.
    fn labels(&self, max: usize) -> Vec<String>;
}

impl LabelSource for [String] {
    fn labels(&self, max: usize) -> Vec<String> {
        self.iter().take(max).cloned().collect()
    }
}

impl LabelSource for Vec<String> {
    fn labels(&self, max: usize) -> Vec<String> {
        self.as_slice().labels(max)
    }
}

impl LabelSource for [&str] {
    fn labels(&self, max: usize) -> Vec<String> {
        self.iter().take(max).map(|s| (*s).to_string()).collect()
    }
}

/// Label snapshot shared between a feed that replaces it and the detector
/// that reads it.
#[derive(Debug, Clone, Default)]
pub struct SharedLabels {
    inner: Arc<RwLock<Vec<String>>>,
}

impl SharedLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole snapshot.
    pub fn replace(&self, labels: Vec<String>) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = labels;
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LabelSource for SharedLabels {
    fn labels(&self, max: usize) -> Vec<String> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.iter().take(max).cloned().collect()
    }
}
