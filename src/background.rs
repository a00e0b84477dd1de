//! Background image: loading, aspect-preserving fit, and blitting.
//!
//! The fitted size is the reference extent zones are normalized against, so
//! it must be refreshed (and handed to the engine) after every window resize.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use zones::normalize::Size;
use zones::render::Color;

pub struct Background {
    source: DynamicImage,
    fitted: Vec<u32>,
    size: Size,
}

impl Background {
    pub fn open(path: &Path) -> Result<Self, image::ImageError> {
        Ok(Self::from_image(image::open(path)?))
    }

    #[must_use]
    pub fn from_image(source: DynamicImage) -> Self {
        Self { source, fitted: Vec::new(), size: Size::default() }
    }

    /// Current fitted extent. Empty until the first [`Background::fit`].
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Rescale the source to fit inside `target`, keeping its aspect ratio.
    pub fn fit(&mut self, target: Size) {
        let size = fit_size(self.source.dimensions(), target);
        if size == self.size && !self.fitted.is_empty() {
            return;
        }
        let (Ok(width), Ok(height)) = (u32::try_from(size.width), u32::try_from(size.height)) else {
            return;
        };
        if size.is_empty() {
            self.fitted.clear();
            self.size = Size::default();
            return;
        }
        let scaled = self.source.resize_exact(width, height, FilterType::Triangle).to_rgb8();
        self.fitted = scaled.pixels().map(|p| Color::rgb(p[0], p[1], p[2]).to_u32()).collect();
        self.size = size;
    }

    /// Copy the fitted image into the top-left of a `stride`-wide pixel buffer.
    pub fn blit(&self, buffer: &mut [u32], stride: usize) {
        let (Ok(width), Ok(height)) = (usize::try_from(self.size.width), usize::try_from(self.size.height)) else {
            return;
        };
        if stride == 0 || width == 0 {
            return;
        }
        let copy_w = width.min(stride);
        let rows = height.min(buffer.len() / stride);
        for y in 0..rows {
            let dst = y * stride;
            let src = y * width;
            buffer[dst..dst + copy_w].copy_from_slice(&self.fitted[src..src + copy_w]);
        }
    }
}

/// Largest size with the image's aspect ratio that fits inside `target`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn fit_size(image: (u32, u32), target: Size) -> Size {
    let (iw, ih) = image;
    if iw == 0 || ih == 0 || target.is_empty() {
        return Size::default();
    }
    let fx = f64::from(target.width) / f64::from(iw);
    let fy = f64::from(target.height) / f64::from(ih);
    let factor = fx.min(fy);
    Size::new(
        (f64::from(iw) * factor).round() as i32,
        (f64::from(ih) * factor).round() as i32,
    )
}

#[cfg(test)]
#[path = "background_test.rs"]
mod tests;
