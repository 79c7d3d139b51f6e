//! Owned 8-bit raster with 1 (gray), 3 (RGB) or 4 (RGBA) interleaved channels.
use crate::error::{RectifyError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Zero-filled raster.
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0; width * height * channels],
        }
    }

    /// Wrap raw interleaved samples, validating the buffer length.
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(RectifyError::EmptyImage);
        }
        if data.len() != width * height * channels {
            return Err(RectifyError::InputUnavailable {
                path: "<memory>".into(),
                reason: format!(
                    "buffer holds {} samples, expected {}x{}x{}",
                    data.len(),
                    width,
                    height,
                    channels
                ),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Single-channel raster built from `f(x, y)`.
    pub fn gray_from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            channels: 1,
            data,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = (y * self.width + x) * self.channels;
        &self.data[start..start + self.channels]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * self.channels;
        &self.data[y * stride..(y + 1) * stride]
    }

    /// Place `left` and `right` next to each other on a zero background.
    ///
    /// Both rasters must share a channel count; the taller one sets the height.
    pub fn side_by_side(left: &RasterImage, right: &RasterImage) -> Option<RasterImage> {
        if left.channels != right.channels {
            return None;
        }
        let channels = left.channels;
        let width = left.width + right.width;
        let height = left.height.max(right.height);
        let mut out = RasterImage::new(width, height, channels);
        let stride = width * channels;
        for y in 0..height {
            let dst = &mut out.data[y * stride..(y + 1) * stride];
            if y < left.height {
                dst[..left.width * channels].copy_from_slice(left.row(y));
            }
            if y < right.height {
                dst[left.width * channels..].copy_from_slice(right.row(y));
            }
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::RasterImage;

    #[test]
    fn side_by_side_keeps_both_halves() {
        let a = RasterImage::gray_from_fn(2, 2, |_, _| 10);
        let b = RasterImage::gray_from_fn(3, 1, |x, _| x as u8);
        let joined = RasterImage::side_by_side(&a, &b).expect("same channel count");
        assert_eq!((joined.width, joined.height), (5, 2));
        assert_eq!(joined.row(0), &[10, 10, 0, 1, 2]);
        assert_eq!(joined.row(1), &[10, 10, 0, 0, 0]);
    }

    #[test]
    fn from_raw_rejects_short_buffer() {
        assert!(RasterImage::from_raw(2, 2, 3, vec![0; 11]).is_err());
    }
}
