//! Message identifiers and timestamps.
//!
//! The clock and the random suffix are the only non-deterministic inputs of
//! the compiler; both sit behind traits so tests can pin them.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Length of the random message-id suffix.
pub const SUFFIX_LEN: usize = 8;

/// Source of "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of random alphanumeric text.
pub trait RandomSource: Send + Sync {
    fn alphanumeric(&self, len: usize) -> String;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random suffix taken from v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRandom;

impl RandomSource for UuidRandom {
    fn alphanumeric(&self, len: usize) -> String {
        let mut out = String::with_capacity(len);
        while out.len() < len {
            let hex = Uuid::new_v4().simple().to_string().to_uppercase();
            out.extend(hex.chars().take(len - out.len()));
        }
        out
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Always returns the same text, truncated or padded with `0`.
#[derive(Debug, Clone)]
pub struct FixedRandom(pub String);

impl RandomSource for FixedRandom {
    fn alphanumeric(&self, len: usize) -> String {
        let mut out: String = self.0.chars().filter(|c| c.is_ascii_alphanumeric()).take(len).collect();
        while out.len() < len {
            out.push('0');
        }
        out
    }
}

/// Identifiers stamped on one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageStamp {
    pub message_id: String,
    pub created_at: String,
}

/// Build the message id and creation timestamp from a single clock reading.
///
/// The id is `<prefix><YYYYMMDDHHMMSS><suffix>`; the timestamp is RFC 3339
/// with millisecond precision. Uniqueness is best-effort.
pub fn stamp(prefix: &str, clock: &dyn Clock, random: &dyn RandomSource) -> MessageStamp {
    let now = clock.now();
    MessageStamp {
        message_id: format!(
            "{}{}{}",
            prefix,
            now.format("%Y%m%d%H%M%S"),
            random.alphanumeric(SUFFIX_LEN)
        ),
        created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
