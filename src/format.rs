//! Human-readable throughput strings.
//!
//! Both presentations switch to the larger unit at exactly 1024 of the
//! smaller one, so 131072 bytes/s reads "1.00 Mbps" rather than "1024.0 kbps".

/// Bytes/s rendered as kilobits or megabits per second
pub fn format_bit_rate(bytes_per_second: Option<f64>) -> String {
    let Some(bytes_per_second) = bytes_per_second else {
        return "0 kbps".to_string();
    };

    let kbps = bytes_per_second * 8.0 / 1024.0;
    if kbps < 1024.0 {
        format!("{:.1} kbps", kbps)
    } else {
        format!("{:.2} Mbps", kbps / 1024.0)
    }
}

/// Bytes/s rendered as kilobytes or megabytes per second
pub fn format_byte_rate(bytes_per_second: Option<f64>) -> String {
    let Some(bytes_per_second) = bytes_per_second else {
        return "0 KB/s".to_string();
    };

    let kbytes = bytes_per_second / 1024.0;
    if kbytes < 1024.0 {
        format!("{:.1} KB/s", kbytes)
    } else {
        format!("{:.2} MB/s", kbytes / 1024.0)
    }
}

/// A way of presenting a rate to the user. One announcement controller
/// exists per presentation.
pub trait Presentation: Send + Sync + 'static {
    /// Short name used in logs
    const NAME: &'static str;

    fn format(bytes_per_second: Option<f64>) -> String;
}

/// kbps / Mbps
#[derive(Debug, Clone, Copy)]
pub struct BitRate;

impl Presentation for BitRate {
    const NAME: &'static str = "bits";

    fn format(bytes_per_second: Option<f64>) -> String {
        format_bit_rate(bytes_per_second)
    }
}

/// KB/s / MB/s
#[derive(Debug, Clone, Copy)]
pub struct ByteRate;

impl Presentation for ByteRate {
    const NAME: &'static str = "bytes";

    fn format(bytes_per_second: Option<f64>) -> String {
        format_byte_rate(bytes_per_second)
    }
}
