//! Label scanning.

use regex::Regex;

use crate::DetectorError;
use crate::signal::{SignalSource, UnreadSignal};
use crate::source::LabelSource;

/// Keywords recognised after the unread count (English and Hungarian).
pub const DEFAULT_KEYWORDS: &[&str] = &["unread", "new", "üzenet"];

/// Upper bound on labels inspected per pass.
pub const DEFAULT_MAX_LABELS: usize = 64;

/// Scans label snapshots for `<count> <keyword>` patterns.
#[derive(Debug, Clone)]
pub struct Detector {
    pattern: Regex,
    max_labels: usize,
}

impl Detector {
    /// Builds a detector recognising [`DEFAULT_KEYWORDS`].
    pub fn new() -> Result<Self, DetectorError> {
        Self::with_keywords(DEFAULT_KEYWORDS.iter().copied(), DEFAULT_MAX_LABELS)
    }

    /// Builds a detector from an explicit keyword list.
    ///
    /// Keywords are matched literally and case-insensitively.
    pub fn with_keywords<I, S>(keywords: I, max_labels: usize) -> Result<Self, DetectorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternatives: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .map(|k| regex::escape(&k))
            .collect();

        if alternatives.is_empty() {
            return Err(DetectorError::NoKeywords);
        }

        let pattern = Regex::new(&format!(r"(?i)([0-9]+)\s*(?:{})", alternatives.join("|")))?;
        Ok(Self {
            pattern,
            max_labels,
        })
    }

    /// Derives the current unread signal from `source`.
    ///
    /// Returns the first label carrying a positive count. Labels whose first
    /// match is zero are skipped.
    pub fn detect<S: LabelSource + ?Sized>(&self, source: &S) -> UnreadSignal {
        for label in source.labels(self.max_labels) {
            if let Some(count) = self.count_in(&label) {
                tracing::trace!(label = %label, count, "matched unread label");
                return UnreadSignal::unread(count, SignalSource::ChatsIconAria);
            }
        }
        UnreadSignal::none()
    }

    /// Returns the positive count in a single label, if any.
    ///
    /// Counts beyond `u32::MAX` saturate.
    pub fn count_in(&self, label: &str) -> Option<u32> {
        let caps = self.pattern.captures(label)?;
        let digits = caps.get(1)?.as_str().trim_start_matches('0');
        if digits.is_empty() {
            return None;
        }
        // All ASCII digits, so parsing only fails on overflow.
        Some(digits.parse().unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SharedLabels;

    fn detector() -> Detector {
        Detector::new().unwrap()
    }

    #[test]
    fn detects_english_label() {
        let labels: &[&str] = &["Chats, 2 unread"];
        let signal = detector().detect(labels);
        assert!(signal.has_unread);
        assert_eq!(signal.count, 2);
        assert_eq!(signal.source, SignalSource::ChatsIconAria);
    }

    #[test]
    fn keyword_is_case_insensitive() {
        let d = detector();
        assert_eq!(d.count_in("Chats, 7 UNREAD"), Some(7));
        assert_eq!(d.count_in("3 New"), Some(3));
        assert_eq!(d.count_in("12ÜZENET"), Some(12));
    }

    #[test]
    fn detects_hungarian_label() {
        let labels: &[&str] = &["Csevegések, 4 üzenet"];
        let signal = detector().detect(labels);
        assert!(signal.has_unread);
        assert_eq!(signal.count, 4);
    }

    #[test]
    fn zero_count_is_not_unread() {
        let labels: &[&str] = &["Chats, 0 unread"];
        let signal = detector().detect(labels);
        assert_eq!(signal, UnreadSignal::none());
    }

    #[test]
    fn no_keyword_is_not_unread() {
        let labels: &[&str] = &["Chats", "Messages (3)", "Marketplace 5"];
        assert_eq!(detector().detect(labels), UnreadSignal::none());
    }

    #[test]
    fn empty_source_is_not_unread() {
        let labels: Vec<String> = Vec::new();
        assert_eq!(detector().detect(&labels), UnreadSignal::none());
    }

    #[test]
    fn skips_zero_and_returns_first_positive() {
        let labels: &[&str] = &["Chats, 0 unread", "Requests, 5 new", "Archive, 9 unread"];
        let signal = detector().detect(labels);
        assert_eq!(signal.count, 5);
    }

    #[test]
    fn huge_count_saturates() {
        let labels: &[&str] = &["Chats, 99999999999 unread", "1 unread"];
        let signal = detector().detect(labels);
        assert!(signal.has_unread);
        assert_eq!(signal.count, u32::MAX);
    }

    #[test]
    fn leading_zeros_are_ignored() {
        let d = detector();
        assert_eq!(d.count_in("007 unread"), Some(7));
        assert_eq!(d.count_in("000 unread"), None);
        assert_eq!(d.count_in("00000000000000000000000001 new"), Some(1));
    }

    #[test]
    fn respects_label_bound() {
        let d = Detector::with_keywords(["unread"], 2).unwrap();
        let labels: &[&str] = &["a", "b", "3 unread"];
        assert!(!d.detect(labels).has_unread);
    }

    #[test]
    fn shared_labels_are_bounded_before_copying() {
        let shared = SharedLabels::new();
        shared.replace(vec!["a".into(), "b".into(), "3 unread".into()]);
        assert_eq!(shared.labels(2), vec!["a".to_string(), "b".to_string()]);

        let d = Detector::with_keywords(["unread"], 2).unwrap();
        assert!(!d.detect(&shared).has_unread);
        let d = Detector::with_keywords(["unread"], 3).unwrap();
        assert_eq!(d.detect(&shared).count, 3);
    }

    #[test]
    fn custom_keywords_are_escaped() {
        let d = Detector::with_keywords(["non lu(s)", "ungelesen"], DEFAULT_MAX_LABELS).unwrap();
        assert_eq!(d.count_in("2 non lu(s)"), Some(2));
        assert_eq!(d.count_in("5 ungelesen"), Some(5));
        assert_eq!(d.count_in("5 unread"), None);
    }

    #[test]
    fn empty_keyword_list_is_rejected() {
        let err = Detector::with_keywords(["", "  "], 8).unwrap_err();
        assert!(matches!(err, DetectorError::NoKeywords));
    }
}
