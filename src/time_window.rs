// Wire time format (YYYY-MM-DDTHH:MM:SSZ) and inclusive query windows.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{ApiError, Boundary};

/// The one layout used for every boundary check and every rendered timestamp.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Effective lower bound when a request omits `from`.
pub const DEFAULT_FROM: &str = "1970-01-01T00:00:01Z";

/// A validated boundary: the wire string as received plus its epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowBound {
    pub raw: String,
    pub millis: i64,
}

/// Inclusive [from, to] window. Each side is optional until `with_defaults`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: Option<WindowBound>,
    pub to: Option<WindowBound>,
}

impl TimeWindow {
    /// Validate raw query values. Empty strings count as absent.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, ApiError> {
        let from = parse_bound(from, Boundary::From)?;
        let to = parse_bound(to, Boundary::To)?;
        Ok(Self { from, to })
    }

    /// Fill absent sides: `from` with `DEFAULT_FROM`, `to` with `now` truncated to the second.
    pub fn with_defaults(self, now: DateTime<Utc>) -> Self {
        let from = self.from.unwrap_or_else(|| {
            bound_from_millis(parse_wire_millis(DEFAULT_FROM).unwrap_or(1000))
        });
        let to = self
            .to
            .unwrap_or_else(|| bound_from_millis(now.timestamp() * 1000));
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn from_millis(&self) -> Option<i64> {
        self.from.as_ref().map(|b| b.millis)
    }

    pub fn to_millis(&self) -> Option<i64> {
        self.to.as_ref().map(|b| b.millis)
    }
}

fn parse_bound(value: Option<&str>, boundary: Boundary) -> Result<Option<WindowBound>, ApiError> {
    match value.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => {
            let millis =
                parse_wire_millis(raw).ok_or(ApiError::InvalidTimeFormat { boundary })?;
            Ok(Some(WindowBound {
                raw: raw.to_string(),
                millis,
            }))
        }
    }
}

fn bound_from_millis(millis: i64) -> WindowBound {
    WindowBound {
        raw: format_millis(millis),
        millis,
    }
}

/// Parse a wire timestamp into epoch milliseconds. `None` on any deviation from the layout.
pub fn parse_wire_millis(s: &str) -> Option<i64> {
    if !has_wire_shape(s) {
        return None;
    }
    NaiveDateTime::parse_from_str(s, WIRE_FORMAT)
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Render epoch milliseconds in the wire format (UTC, sub-second part dropped).
pub fn format_millis(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .format(WIRE_FORMAT)
        .to_string()
}

// chrono accepts unpadded numbers, signed years and a leap second of 60;
// the wire layout does not.
fn has_wire_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 20 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        17 => (b'0'..=b'5').contains(b),
        4 | 7 => *b == b'-',
        10 => *b == b'T',
        13 | 16 => *b == b':',
        19 => *b == b'Z',
        _ => b.is_ascii_digit(),
    })
}
