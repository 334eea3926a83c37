// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

/// Formats a time in milliseconds into a human-readable `MM:SS` string.
///
/// Partial seconds are dropped.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_time(65_000), "01:05");
/// assert_eq!(format_time(3_600_000), "60:00");
/// ```
pub(crate) fn format_time(total_ms: u64) -> String {
    let total_seconds = total_ms / 1000;
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Parses `MM:SS` or a plain number of seconds into milliseconds.
pub(crate) fn parse_time(text: &str) -> Option<u64> {
    let seconds = match text.split_once(':') {
        Some((mins, secs)) => {
            let mins: u64 = mins.parse().ok()?;
            let secs: u64 = secs.parse().ok()?;
            if secs >= 60 {
                return None;
            }
            mins.checked_mul(60)?.checked_add(secs)?
        }
        None => text.parse().ok()?,
    };
    seconds.checked_mul(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65_000), "01:05");
        assert_eq!(format_time(95_999), "01:35");
        assert_eq!(format_time(3_600_000), "60:00");
    }

    #[test]
    fn parses_times() {
        assert_eq!(parse_time("1:35"), Some(95_000));
        assert_eq!(parse_time("00:00"), Some(0));
        assert_eq!(parse_time("42"), Some(42_000));
    }

    #[test]
    fn rejects_malformed_times() {
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("1:75"), None);
        assert_eq!(parse_time("a:10"), None);
        assert_eq!(parse_time("-3"), None);
    }
}
