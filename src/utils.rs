//! Utility functions

/// Replace a non-finite amplitude with 0.0.
///
/// Applied to every sample before it enters the volume, so downstream
/// statistics never see NaN or infinity.
#[inline]
pub fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Sanitize a whole sample vector.
pub fn sanitize_samples(samples: &[f32]) -> Vec<f32> {
    samples.iter().copied().map(sanitize).collect()
}

/// Linear-interpolation quantile over pre-sorted data (the R-7 method,
/// NumPy's default).
///
/// `q` is clamped to `[0, 1]`. Returns 0.0 for an empty slice; callers that
/// need a different empty-input policy must check first.
pub fn quantile_sorted(sorted: &[f32], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return f64::from(sorted[0]);
    }

    let h = (n - 1) as f64 * q.clamp(0.0, 1.0);
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        f64::from(sorted[n - 1])
    } else {
        (1.0 - g) * f64::from(sorted[j]) + g * f64::from(sorted[j + 1])
    }
}

/// Format byte size in human-readable form
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(1.5), 1.5);
        assert_eq!(sanitize(-3.25), -3.25);
        assert_eq!(sanitize(f32::NAN), 0.0);
        assert_eq!(sanitize(f32::INFINITY), 0.0);
        assert_eq!(sanitize(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_sanitize_samples() {
        let dirty = vec![1.0, f32::NAN, -2.0, f32::INFINITY, 0.5];
        assert_eq!(sanitize_samples(&dirty), vec![1.0, 0.0, -2.0, 0.0, 0.5]);
    }

    #[test]
    fn test_quantile_sorted_endpoints() {
        let data = [1.0f32, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile_sorted(&data, 0.0), 1.0);
        assert_eq!(quantile_sorted(&data, 1.0), 5.0);
        assert_eq!(quantile_sorted(&data, 0.5), 3.0);
    }

    #[test]
    fn test_quantile_sorted_interpolates() {
        // h = 3 * 0.25 = 0.75 -> between 1.0 and 2.0
        let data = [1.0f32, 2.0, 3.0, 4.0];
        assert!((quantile_sorted(&data, 0.25) - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_sorted_degenerate() {
        assert_eq!(quantile_sorted(&[], 0.5), 0.0);
        assert_eq!(quantile_sorted(&[7.0], 0.95), 7.0);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1048576), "1.00 MB");
        assert_eq!(format_bytes(1073741824), "1.00 GB");
    }
}
