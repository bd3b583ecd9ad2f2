//! RGB drawing surface backed by an `image::RgbImage`

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use image::{Rgb, RgbImage};

/// embedded-graphics target that paints straight into an [`RgbImage`]
#[derive(Debug, Clone)]
pub struct RgbCanvas {
    image: RgbImage,
}

impl RgbCanvas {
    /// Canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Rgb888) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, to_rgb(background)),
        }
    }

    /// Colour at (x, y), `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Rgb888::new(p.0[0], p.0[1], p.0[2]))
    }

    /// Borrow the finished image
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Finish drawing
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

fn to_rgb(color: Rgb888) -> Rgb<u8> {
    Rgb([color.r(), color.g(), color.b()])
}

impl DrawTarget for RgbCanvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if let Some(p) = self.image.get_pixel_mut_checked(x, y) {
                *p = to_rgb(color);
            }
        }
        Ok(())
    }
}

impl OriginDimensions for RgbCanvas {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

/// Resolve a `Result` whose error can never happen.
pub(crate) fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
