//! Millisecond arithmetic for timer displays

/// Minute/second/hundredth components of a millisecond count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeDisplay {
    pub minutes: u64,
    pub seconds: u64,
    pub hundredths: u64,
}

/// Whole minutes in a millisecond count
pub fn minutes_of(ms: u64) -> u64 {
    ms / 60_000
}

/// Seconds past the last whole minute
pub fn seconds_of(ms: u64) -> u64 {
    (ms % 60_000) / 1000
}

/// Hundredths of a second past the last whole second
pub fn hundredths_of(ms: u64) -> u64 {
    (ms % 1000) / 10
}

/// Minutes to show for a timer.
///
/// While the timer runs, or while it still holds time, the decomposed value is
/// shown. Otherwise the not-yet-started input is shown so an idle timer being
/// edited does not snap back to zero.
pub fn display_minutes(ms: u64, is_running: bool, fallback: u64) -> u64 {
    if is_running || ms > 0 {
        minutes_of(ms)
    } else {
        fallback
    }
}

/// Seconds to show for a timer, see [`display_minutes`]
pub fn display_seconds(ms: u64, is_running: bool, fallback: u64) -> u64 {
    if is_running || ms > 0 {
        seconds_of(ms)
    } else {
        fallback
    }
}

/// Hundredths only move while running
pub fn display_hundredths(ms: u64, is_running: bool) -> u64 {
    if is_running {
        hundredths_of(ms)
    } else {
        0
    }
}

/// Build the full display for a counter value
pub fn display(ms: u64, is_running: bool, fallback_minutes: u64, fallback_seconds: u64) -> TimeDisplay {
    TimeDisplay {
        minutes: display_minutes(ms, is_running, fallback_minutes),
        seconds: display_seconds(ms, is_running, fallback_seconds),
        hundredths: display_hundredths(ms, is_running),
    }
}

/// Format milliseconds as "MM:SS"
pub fn format_ms(ms: u64) -> String {
    format!("{:02}:{:02}", minutes_of(ms), seconds_of(ms))
}

/// Format milliseconds as "MM:SS.hh"
pub fn format_ms_hundredths(ms: u64) -> String {
    format!("{:02}:{:02}.{:02}", minutes_of(ms), seconds_of(ms), hundredths_of(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_with_floor_division() {
        let ms = 2 * 60_000 + 5_000 + 990;
        assert_eq!(minutes_of(ms), 2);
        assert_eq!(seconds_of(ms), 5);
        assert_eq!(hundredths_of(ms), 99);
        assert_eq!(hundredths_of(9), 0);
    }

    #[test]
    fn idle_display_falls_back_to_inputs() {
        assert_eq!(display_minutes(0, false, 3), 3);
        assert_eq!(display_seconds(0, false, 45), 45);
        // Running at zero shows zero, not the input
        assert_eq!(display_minutes(0, true, 3), 0);
        // Paused with time left shows the counter
        assert_eq!(display_seconds(12_000, false, 45), 12);
    }

    #[test]
    fn hundredths_hidden_when_idle() {
        assert_eq!(display_hundredths(1_230, false), 0);
        assert_eq!(display_hundredths(1_230, true), 23);
    }

    #[test]
    fn formats() {
        assert_eq!(format_ms(0), "00:00");
        assert_eq!(format_ms(1_500_000), "25:00");
        assert_eq!(format_ms_hundredths(12_340), "00:12.34");
        let shown = display(0, false, 1, 30);
        assert_eq!(shown, TimeDisplay { minutes: 1, seconds: 30, hundredths: 0 });
    }
}
