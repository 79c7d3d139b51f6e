//! Otsu threshold selection over a 256-bin histogram of the value range.
use crate::image::ImageF32;

const BINS: usize = 256;

/// Threshold maximising the between-class variance of `img`.
///
/// Returns `None` for an image without finite samples. A constant image yields
/// its only value, so nothing lies strictly above the threshold.
pub fn otsu_threshold(img: &ImageF32) -> Option<f32> {
    let (lo, hi) = img.min_max()?;
    if hi <= lo {
        return Some(lo);
    }
    let bin_width = (hi - lo) / BINS as f32;
    let mut hist = [0u64; BINS];
    for &v in img.data.iter().filter(|v| v.is_finite()) {
        let b = (((v - lo) / bin_width) as usize).min(BINS - 1);
        hist[b] += 1;
    }
    let centre = |i: usize| lo + (i as f32 + 0.5) * bin_width;

    let total: u64 = hist.iter().sum();
    let total_mass: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &n)| n as f64 * centre(i) as f64)
        .sum();

    let mut best_idx = 0usize;
    let mut best_var = f64::NEG_INFINITY;
    let mut w0 = 0u64;
    let mut mass0 = 0.0f64;
    for (i, &n) in hist.iter().enumerate().take(BINS - 1) {
        w0 += n;
        mass0 += n as f64 * centre(i) as f64;
        let w1 = total - w0;
        if w0 == 0 || w1 == 0 {
            continue;
        }
        let m0 = mass0 / w0 as f64;
        let m1 = (total_mass - mass0) / w1 as f64;
        let between = w0 as f64 * w1 as f64 * (m0 - m1) * (m0 - m1);
        if between > best_var {
            best_var = between;
            best_idx = i;
        }
    }
    Some(centre(best_idx))
}

#[cfg(test)]
mod tests {
    use super::otsu_threshold;
    use crate::image::ImageF32;

    #[test]
    fn separates_bimodal_values() {
        let mut img = ImageF32::new(10, 10);
        for (i, v) in img.data.iter_mut().enumerate() {
            *v = if i % 3 == 0 { 0.9 } else { 0.1 };
        }
        let t = otsu_threshold(&img).unwrap();
        assert!(t > 0.1 && t < 0.9, "threshold {t}");
    }

    #[test]
    fn constant_image_returns_its_value() {
        let mut img = ImageF32::new(4, 4);
        img.data.iter_mut().for_each(|v| *v = 0.5);
        assert_eq!(otsu_threshold(&img), Some(0.5));
    }
}
