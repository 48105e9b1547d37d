use std::io::Cursor;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use tracing::debug;

use crate::{
    application::{error::ApplicationError, services::ThumbnailService},
    services::error::ThumbnailError,
};

const BACKGROUND: Rgba<u8> = Rgba([241, 243, 244, 255]);
const SHEET: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BORDER: Rgba<u8> = Rgba([189, 193, 198, 255]);

/// Scales raster images to fit a square bounding box. Anything the decoder
/// does not understand gets a blank document placeholder of the same size.
pub struct ImageThumbnailService {
    size: u32,
}

impl ImageThumbnailService {
    pub fn new(size: u32) -> Self {
        Self { size: size.max(1) }
    }

    fn render(content: &[u8], size: u32) -> Result<Vec<u8>, ThumbnailError> {
        let thumbnail = match image::load_from_memory(content) {
            Ok(decoded) if decoded.width() <= size && decoded.height() <= size => decoded,
            Ok(decoded) => decoded.thumbnail(size, size),
            Err(e) => {
                debug!("Content is not a decodable image ({}), using placeholder", e);
                placeholder(size)
            }
        };

        let mut buffer = Cursor::new(Vec::new());
        thumbnail.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}

/// A white sheet with a grey outline, centred on a light background.
fn placeholder(size: u32) -> DynamicImage {
    let margin = size / 8;
    let (left, right) = (margin, size - margin - 1);
    let (top, bottom) = (margin / 2, size - margin / 2 - 1);

    let image = RgbaImage::from_fn(size, size, |x, y| {
        let inside = x >= left && x <= right && y >= top && y <= bottom;
        let edge = x == left || x == right || y == top || y == bottom;
        match (inside, edge) {
            (true, true) => BORDER,
            (true, false) => SHEET,
            _ => BACKGROUND,
        }
    });
    DynamicImage::ImageRgba8(image)
}

#[async_trait]
impl ThumbnailService for ImageThumbnailService {
    async fn generate_thumbnail(&self, content: Vec<u8>) -> Result<Vec<u8>, ApplicationError> {
        let size = self.size;
        let png = tokio::task::spawn_blocking(move || Self::render(&content, size))
            .await
            .map_err(ThumbnailError::from)??;
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    #[tokio::test]
    async fn raster_images_are_scaled_into_the_bounding_box() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(400, 100, SHEET));
        let service = ImageThumbnailService::new(200);

        let png = service
            .generate_thumbnail(encode(source, ImageFormat::Png))
            .await
            .unwrap();

        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);
        let thumbnail = image::load_from_memory(&png).unwrap();
        assert_eq!(thumbnail.width(), 200);
        assert_eq!(thumbnail.height(), 50);
    }

    #[tokio::test]
    async fn small_images_are_not_upscaled() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(20, 10, BORDER));
        let service = ImageThumbnailService::new(200);

        let png = service
            .generate_thumbnail(encode(source, ImageFormat::Png))
            .await
            .unwrap();

        let thumbnail = image::load_from_memory(&png).unwrap();
        assert_eq!((thumbnail.width(), thumbnail.height()), (20, 10));
    }

    #[tokio::test]
    async fn undecodable_content_yields_a_placeholder() {
        let service = ImageThumbnailService::new(64);

        let png = service
            .generate_thumbnail(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n".to_vec())
            .await
            .unwrap();

        let thumbnail = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(thumbnail.dimensions(), (64, 64));
        assert_eq!(*thumbnail.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*thumbnail.get_pixel(32, 32), SHEET);
    }

    #[test]
    fn placeholder_survives_tiny_sizes() {
        assert_eq!(placeholder(1).width(), 1);
        assert_eq!(placeholder(3).height(), 3);
    }
}
