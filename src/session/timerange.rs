//! Query time windows
//!
//! Every pane carries a time window for its log query. Windows opened from
//! the sidebar are relative ("last 15 minutes") and get re-anchored to the
//! current clock whenever the pane is activated or re-queried. Absolute
//! windows (restored from a share link) keep their endpoints as-is.

use chrono::{Local, TimeZone};

const MINUTE_SECS: i64 = 60;
const HOUR_SECS: i64 = 3600;
const DAY_SECS: i64 = 86_400;
const WEEK_SECS: i64 = 7 * 86_400;

/// Units a relative span can be expressed in, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Weeks,
    Days,
    Hours,
    Minutes,
}

impl TimeUnit {
    fn seconds(&self) -> i64 {
        match self {
            TimeUnit::Weeks => WEEK_SECS,
            TimeUnit::Days => DAY_SECS,
            TimeUnit::Hours => HOUR_SECS,
            TimeUnit::Minutes => MINUTE_SECS,
        }
    }

    fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Weeks => "w",
            TimeUnit::Days => "d",
            TimeUnit::Hours => "h",
            TimeUnit::Minutes => "m",
        }
    }
}

/// A lookback expressed as an amount of one unit, e.g. "15 minutes".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeSpan {
    pub amount: i64,
    pub unit: TimeUnit,
}

impl RelativeSpan {
    pub fn seconds(&self) -> i64 {
        self.amount * self.unit.seconds()
    }

    /// Express a span in the largest unit that divides it evenly.
    ///
    /// 900s is "15m", 3600s is "1h", 90m stays "90m". Spans that are not a
    /// whole number of minutes have no relative form.
    pub fn from_seconds(span: i64) -> Option<RelativeSpan> {
        if span <= 0 {
            return None;
        }
        for unit in [
            TimeUnit::Weeks,
            TimeUnit::Days,
            TimeUnit::Hours,
            TimeUnit::Minutes,
        ] {
            if span % unit.seconds() == 0 {
                return Some(RelativeSpan {
                    amount: span / unit.seconds(),
                    unit,
                });
            }
        }
        None
    }
}

impl std::fmt::Display for RelativeSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

/// Closed query window in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    /// Window ending at `now` and reaching back the given number of minutes.
    pub fn last_minutes(now: i64, minutes: i64) -> TimeRange {
        TimeRange {
            start: now - minutes * MINUTE_SECS,
            end: now,
        }
    }

    pub fn span_seconds(&self) -> i64 {
        self.end - self.start
    }

    /// The relative form of this window, if its span has one.
    pub fn relative(&self) -> Option<RelativeSpan> {
        RelativeSpan::from_seconds(self.span_seconds())
    }

    /// Slide a relative window so it ends at `now`, keeping its span.
    ///
    /// Windows with no relative form are absolute and stay put.
    pub fn reanchor(&self, now: i64) -> TimeRange {
        match self.relative() {
            Some(span) => TimeRange {
                start: now - span.seconds(),
                end: now,
            },
            None => *self,
        }
    }

    /// Short label for the status line: "last 15m" or explicit endpoints.
    pub fn label(&self) -> String {
        match self.relative() {
            Some(span) => format!("last {}", span),
            None => format!("{} → {}", format_epoch(self.start), format_epoch(self.end)),
        }
    }
}

fn format_epoch(secs: i64) -> String {
    match Local.timestamp_opt(secs, 0).single() {
        Some(dt) => dt.format("%m-%d %H:%M:%S").to_string(),
        None => secs.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_minutes_window() {
        let range = TimeRange::last_minutes(1_700_000_900, 15);
        assert_eq!(range.start, 1_700_000_000);
        assert_eq!(range.end, 1_700_000_900);
        assert_eq!(range.span_seconds(), 900);
    }

    #[test]
    fn test_relative_span_picks_largest_unit() {
        assert_eq!(
            RelativeSpan::from_seconds(900),
            Some(RelativeSpan {
                amount: 15,
                unit: TimeUnit::Minutes
            })
        );
        assert_eq!(
            RelativeSpan::from_seconds(3600),
            Some(RelativeSpan {
                amount: 1,
                unit: TimeUnit::Hours
            })
        );
        assert_eq!(
            RelativeSpan::from_seconds(86_400),
            Some(RelativeSpan {
                amount: 1,
                unit: TimeUnit::Days
            })
        );
        assert_eq!(
            RelativeSpan::from_seconds(14 * 86_400),
            Some(RelativeSpan {
                amount: 2,
                unit: TimeUnit::Weeks
            })
        );
    }

    #[test]
    fn test_odd_span_has_no_relative_form() {
        assert_eq!(RelativeSpan::from_seconds(907), None);
        assert_eq!(RelativeSpan::from_seconds(0), None);
        assert_eq!(RelativeSpan::from_seconds(-60), None);
    }

    #[test]
    fn test_reanchor_slides_relative_window() {
        let range = TimeRange::last_minutes(1_000_000, 15);
        let moved = range.reanchor(2_000_000);
        assert_eq!(moved.end, 2_000_000);
        assert_eq!(moved.span_seconds(), 900);
    }

    #[test]
    fn test_reanchor_keeps_absolute_window() {
        // 907 second span: not expressible in whole minutes
        let range = TimeRange {
            start: 1_000_000,
            end: 1_000_907,
        };
        assert_eq!(range.reanchor(2_000_000), range);
    }

    #[test]
    fn test_labels() {
        let range = TimeRange::last_minutes(1_700_000_000, 15);
        assert_eq!(range.label(), "last 15m");
        let hour = TimeRange::last_minutes(1_700_000_000, 60);
        assert_eq!(hour.label(), "last 1h");
    }
}
