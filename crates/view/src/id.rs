use std::fmt::{self, Display};

use chrono::Utc;

/// Identifies a bot transcript entry across the gap between rendering its
/// placeholder and the reply arriving.
///
/// Formatted as `id-<unix millis>-<16 hex digits>`. Two identifiers taken at
/// different milliseconds always differ; within the same millisecond the
/// random suffix makes a clash very unlikely, but nothing prevents it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(String);

impl MessageId {
    /// Generates a new identifier from the current time and a random suffix.
    #[inline]
    pub fn generate() -> Self {
        Self::from_parts(Utc::now().timestamp_millis(), rand::random())
    }

    /// Builds an identifier from a timestamp and a suffix.
    #[inline]
    pub fn from_parts(timestamp_millis: i64, suffix: u64) -> Self {
        Self(format!("id-{timestamp_millis}-{suffix:016x}"))
    }

    /// Returns the identifier as it appears in the `id` attribute.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MessageId {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_format() {
        let id = MessageId::from_parts(1_700_000_000_000, 0xabc);
        assert_eq!(id.as_str(), "id-1700000000000-0000000000000abc");
    }

    #[test]
    fn test_different_timestamps_differ() {
        let a = MessageId::from_parts(1, 42);
        let b = MessageId::from_parts(2, 42);
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: HashSet<_> =
            (0..1000).map(|_| MessageId::generate()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.as_str().starts_with("id-")));
    }
}
