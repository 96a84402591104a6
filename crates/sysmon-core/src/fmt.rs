//! Shared formatting helpers for display rows and widgets.
//!
//! Pure functions only; no terminal styling here.

/// Format seconds as `HH:MM:SS`, each field zero-padded to two digits.
///
/// Hours are not wrapped at 24, so long uptimes keep growing
/// (`100:00:00`).
pub fn format_elapsed(secs: u64) -> String {
    let hours = secs / 3600;
    let rem = secs % 3600;
    let minutes = rem / 60;
    let seconds = rem % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format a utilization fraction as a percentage with one decimal.
///
/// Non-finite input shows as `0.0`.
pub fn format_percent(fraction: f64) -> String {
    let pct = if fraction.is_finite() {
        fraction * 100.0
    } else {
        0.0
    };
    format!("{:.1}", pct)
}

/// Render a raw cmdline record for a single display cell: NUL separators
/// become spaces and trailing separators are dropped.
pub fn format_command(raw: &str) -> String {
    raw.replace('\0', " ").trim().to_string()
}

/// Format a kB magnitude as MiB or GiB with one decimal.
pub fn format_kb(kb: u64) -> String {
    let f = kb as f64;
    if kb >= 1024 * 1024 {
        format!("{:.1}G", f / (1024.0 * 1024.0))
    } else if kb >= 1024 {
        format!("{:.1}M", f / 1024.0)
    } else {
        format!("{}K", kb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(3661), "01:01:01");
        assert_eq!(format_elapsed(59), "00:00:59");
        assert_eq!(format_elapsed(86399), "23:59:59");
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(360000), "100:00:00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.75), "75.0");
        assert_eq!(format_percent(0.0036), "0.4");
        assert_eq!(format_percent(f64::NAN), "0.0");
        assert_eq!(format_percent(f64::INFINITY), "0.0");
    }

    #[test]
    fn test_format_command() {
        assert_eq!(format_command("/bin/bash\0--login\0"), "/bin/bash --login");
        assert_eq!(format_command(""), "");
        assert_eq!(format_command("nginx: worker process"), "nginx: worker process");
    }

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(512), "512K");
        assert_eq!(format_kb(2048), "2.0M");
        assert_eq!(format_kb(16384000), "15.6G");
    }
}
