//! Display formatting for millisecond durations

/// `MM:SS.cc` with centiseconds. Minutes keep counting past 59.
pub fn format_clock(ms: u64) -> String {
    let total_secs = ms / 1000;
    let centis = (ms % 1000) / 10;
    format!("{:02}:{:02}.{:02}", total_secs / 60, total_secs % 60, centis)
}

/// `HH:MM:SS`, truncating sub-second remainder.
pub fn format_hms(ms: u64) -> String {
    let total_secs = ms / 1000;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// Like [`format_hms`] but rounding up, for countdowns: a timer with 400ms
/// left still shows one second.
pub fn format_hms_ceil(ms: u64) -> String {
    format_hms(ms.div_ceil(1000) * 1000)
}
