use serde::Serialize;

/// Which detection method produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalSource {
    /// A positive count was found in a chats-icon aria label.
    #[serde(rename = "chats-icon-aria")]
    ChatsIconAria,
    /// Nothing matched.
    #[serde(rename = "none")]
    None,
}

impl SignalSource {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalSource::ChatsIconAria => "chats-icon-aria",
            SignalSource::None => "none",
        }
    }
}

/// Result of a single detection pass. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadSignal {
    pub has_unread: bool,
    pub count: u32,
    pub source: SignalSource,
}

impl UnreadSignal {
    /// The "nothing found" signal.
    pub const fn none() -> Self {
        Self {
            has_unread: false,
            count: 0,
            source: SignalSource::None,
        }
    }

    pub const fn unread(count: u32, source: SignalSource) -> Self {
        Self {
            has_unread: true,
            count,
            source,
        }
    }
}

impl Default for UnreadSignal {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_signal() {
        let s = UnreadSignal::default();
        assert!(!s.has_unread);
        assert_eq!(s.count, 0);
        assert_eq!(s.source, SignalSource::None);
    }

    #[test]
    fn serializes_camel_case_with_tag() {
        let json = serde_json::to_value(UnreadSignal::unread(3, SignalSource::ChatsIconAria))
            .unwrap();
        assert_eq!(json["hasUnread"], true);
        assert_eq!(json["count"], 3);
        assert_eq!(json["source"], "chats-icon-aria");
    }
}
