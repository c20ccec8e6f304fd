// crates/core/src/format.rs
//! Display helpers for the audit page.

const KIB: i64 = 1024;
const MIB: i64 = KIB * 1024;
const GIB: i64 = MIB * 1024;

/// Format a byte count with a binary unit:
/// - < 1 KB → whole bytes (e.g. "512 B")
/// - < 1 MB → kilobytes with 1 decimal place (e.g. "1.5 KB")
/// - < 1 GB → megabytes with 2 decimal places (e.g. "1.25 MB")
/// - otherwise gigabytes with 2 decimal places
///
/// Negative inputs are treated as 0.
pub fn human_bytes(n: i64) -> String {
    let n = n.max(0);
    if n < KIB {
        format!("{} B", n)
    } else if n < MIB {
        format!("{:.1} KB", n as f64 / KIB as f64)
    } else if n < GIB {
        format!("{:.2} MB", n as f64 / MIB as f64)
    } else {
        format!("{:.2} GB", n as f64 / GIB as f64)
    }
}

/// Whole-number percentage of `part` in `whole`, rounded half away from zero.
///
/// Returns 0 when `whole` is 0.
pub fn percentage(part: i64, whole: i64) -> i64 {
    if whole == 0 {
        return 0;
    }
    (100.0 * part as f64 / whole as f64).round() as i64
}

/// Format a `std::time::Duration` with smart unit selection:
/// - < 1ms → microseconds (e.g. "342µs")
/// - 1ms..999ms → milliseconds (e.g. "170ms")
/// - >= 1s → seconds with 2 decimal places (e.g. "1.23s")
pub fn format_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1_000 {
        format!("{}µs", micros)
    } else if d.as_millis() < 1_000 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

/// Insert thousands separators: `1234567` → `"1,234,567"`.
pub fn group_digits(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
