//! Separable Gaussian smoothing.
//!
//! The kernel is sampled on `[-r, r]` with `r = ceil(4σ)` and normalised to
//! unit sum. Rows are filtered into a scratch image, then columns.
use super::clamp_index;
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order), centred on the middle tap.
    fn taps(&self) -> &[f32];
}

/// Gaussian taps for a given standard deviation.
#[derive(Clone, Debug)]
pub struct GaussianFilter {
    sigma: f32,
    taps: Vec<f32>,
}

impl GaussianFilter {
    pub fn new(sigma: f32) -> Self {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Self {
                sigma: 0.0,
                taps: vec![1.0],
            };
        }
        let radius = (4.0 * sigma).ceil() as isize;
        let denom = 2.0 * sigma * sigma;
        let mut taps: Vec<f32> = (-radius..=radius)
            .map(|i| (-((i * i) as f32) / denom).exp())
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Self { sigma, taps }
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }
}

impl SeparableFilter for GaussianFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Apply a separable filter horizontally then vertically.
pub fn apply_separable(filter: &dyn SeparableFilter, src: &ImageF32) -> ImageF32 {
    let taps = filter.taps();
    let radius = (taps.len() / 2) as isize;
    let (w, h) = (src.w, src.h);
    let mut tmp = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    for y in 0..h {
        let row = src.row(y);
        let dst = tmp.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = clamp_index(x as isize + k as isize - radius, w);
                acc += tap * row[sx];
            }
            *px = acc;
        }
    }

    for y in 0..h {
        let dst = out.row_mut(y);
        for (k, &tap) in taps.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - radius, h);
            let src_row = tmp.row(sy);
            for (px, &v) in dst.iter_mut().zip(src_row) {
                *px += tap * v;
            }
        }
    }
    out
}

/// Gaussian smoothing with standard deviation `sigma` (pixels).
pub fn gaussian_blur(src: &ImageF32, sigma: f32) -> ImageF32 {
    apply_separable(&GaussianFilter::new(sigma), src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taps_are_normalised() {
        let f = GaussianFilter::new(1.0);
        assert_eq!(f.taps().len(), 9);
        let sum: f32 = f.taps().iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn constant_image_is_preserved() {
        let mut img = ImageF32::new(7, 5);
        img.data.iter_mut().for_each(|v| *v = 0.25);
        let blurred = gaussian_blur(&img, 1.5);
        assert!(blurred.data.iter().all(|v| (v - 0.25).abs() < 1e-6));
    }
}
