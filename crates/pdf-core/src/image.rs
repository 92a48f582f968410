//! Image handling for PDF documents

use crate::{PdfError, Result};
use image::{DynamicImage, ImageDecoder, ImageReader};
use lopdf::{Dictionary, Object, Stream};
use std::io::{Cursor, Write};

impl From<image::ImageError> for PdfError {
    fn from(err: image::ImageError) -> Self {
        PdfError::ImageError(err.to_string())
    }
}

/// Image scaling mode for insert_image_scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageScaleMode {
    /// Stretch to exact dimensions
    #[default]
    Stretch,
    /// Fit within bounding box, preserving aspect ratio
    FitBox,
}

/// Calculate display dimensions based on scaling mode
///
/// Returns (width, height) in points.
pub fn calculate_scaled_dimensions(
    original_width: u32,
    original_height: u32,
    target_width: f64,
    target_height: f64,
    mode: ImageScaleMode,
) -> (f64, f64) {
    match mode {
        ImageScaleMode::Stretch => (target_width, target_height),
        ImageScaleMode::FitBox => {
            if original_width == 0 || original_height == 0 {
                return (0.0, 0.0);
            }
            let scale = (target_width / original_width as f64)
                .min(target_height / original_height as f64);
            (
                original_width as f64 * scale,
                original_height as f64 * scale,
            )
        }
    }
}

/// Image XObject for PDF embedding
#[derive(Debug, Clone)]
pub struct ImageXObject {
    pub width: u32,
    pub height: u32,
    /// "DeviceRGB" or "DeviceGray"
    pub color_space: &'static str,
    /// "DCTDecode" for JPEG passthrough, "FlateDecode" for decoded pixels
    pub filter: &'static str,
    /// Encoded image data
    pub data: Vec<u8>,
}

impl ImageXObject {
    /// Build an XObject from JPEG or PNG bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::from_jpeg(data)
        } else if data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Self::from_png(data)
        } else {
            Err(PdfError::ImageError("Unknown image format".to_string()))
        }
    }

    /// JPEG data is embedded as-is with DCTDecode
    fn from_jpeg(data: &[u8]) -> Result<Self> {
        let (width, height, components) = jpeg_frame_info(data)?;

        Ok(Self {
            width,
            height,
            color_space: match components {
                1 => "DeviceGray",
                4 => "DeviceCMYK",
                _ => "DeviceRGB",
            },
            filter: "DCTDecode",
            data: data.to_vec(),
        })
    }

    /// PNG data is decoded, alpha blended onto white and re-compressed
    fn from_png(data: &[u8]) -> Result<Self> {
        let decoder = ImageReader::new(Cursor::new(data))
            .with_guessed_format()?
            .into_decoder()?;
        let (width, height) = decoder.dimensions();
        let has_alpha = decoder.color_type().has_alpha();
        let image = DynamicImage::from_decoder(decoder)?;

        let rgb: Vec<u8> = if has_alpha {
            image
                .to_rgba8()
                .pixels()
                .flat_map(|p| {
                    let alpha = p[3] as f32 / 255.0;
                    let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)) as u8;
                    [blend(p[0]), blend(p[1]), blend(p[2])]
                })
                .collect()
        } else {
            image.to_rgb8().into_raw()
        };

        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&rgb)?;

        Ok(Self {
            width,
            height,
            color_space: "DeviceRGB",
            filter: "FlateDecode",
            data: encoder.finish()?,
        })
    }

    /// Convert to lopdf Stream object
    pub fn to_pdf_stream(&self) -> Stream {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", self.width as i64);
        dict.set("Height", self.height as i64);
        dict.set("ColorSpace", Object::Name(self.color_space.as_bytes().to_vec()));
        dict.set("BitsPerComponent", 8_i64);
        dict.set("Filter", Object::Name(self.filter.as_bytes().to_vec()));
        dict.set("Length", self.data.len() as i64);

        Stream::new(dict, self.data.clone())
    }
}

/// Read (width, height, components) from the first SOF segment
fn jpeg_frame_info(data: &[u8]) -> Result<(u32, u32, u8)> {
    let mut i = 2;
    while i + 9 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }

        let marker = data[i + 1];
        // SOF0..SOF15 except DHT, JPG and DAC
        if (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
            let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
            return Ok((width, height, data[i + 9]));
        }

        let length = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        if length < 2 {
            break;
        }
        i += 2 + length;
    }

    Err(PdfError::ImageError("Could not parse JPEG info".to_string()))
}

/// Generate operators to draw an image XObject
///
/// `x`/`y` is the bottom-left corner in PDF coordinates.
pub fn generate_image_operators(
    image_name: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Vec<u8> {
    format!("q\n{width} 0 0 {height} {x} {y} cm\n/{image_name} Do\nQ\n").into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_jpeg() -> Vec<u8> {
        vec![
            0xFF, 0xD8, // SOI
            0xFF, 0xC0, // SOF0
            0x00, 0x11, // Length
            0x08, // Precision
            0x00, 0x64, // Height (100)
            0x00, 0xC8, // Width (200)
            0x03, // Components
            0x01, 0x22, 0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01, 0xFF, 0xD9,
        ]
    }

    #[test]
    fn test_jpeg_xobject() {
        let xobject = ImageXObject::from_bytes(&minimal_jpeg()).unwrap();
        assert_eq!(xobject.width, 200);
        assert_eq!(xobject.height, 100);
        assert_eq!(xobject.color_space, "DeviceRGB");
        assert_eq!(xobject.filter, "DCTDecode");
    }

    #[test]
    fn test_jpeg_color_space_by_components() {
        let color_space = |components: u8| {
            let mut jpeg = minimal_jpeg();
            jpeg[11] = components;
            ImageXObject::from_bytes(&jpeg).unwrap().color_space
        };

        assert_eq!(color_space(1), "DeviceGray");
        assert_eq!(color_space(3), "DeviceRGB");
        assert_eq!(color_space(4), "DeviceCMYK");
    }

    #[test]
    fn test_png_xobject() {
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([255, 0, 0, 128]));
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let xobject = ImageXObject::from_bytes(&png).unwrap();
        assert_eq!(xobject.width, 4);
        assert_eq!(xobject.height, 2);
        assert_eq!(xobject.color_space, "DeviceRGB");
        assert_eq!(xobject.filter, "FlateDecode");
    }

    #[test]
    fn test_unknown_format() {
        let err = ImageXObject::from_bytes(b"not an image at all").unwrap_err();
        assert!(matches!(err, PdfError::ImageError(_)));
    }

    #[test]
    fn test_truncated_jpeg() {
        assert!(ImageXObject::from_bytes(&[0xFF, 0xD8, 0xFF, 0x00]).is_err());
    }

    #[test]
    fn test_to_pdf_stream() {
        let xobject = ImageXObject {
            width: 100,
            height: 50,
            color_space: "DeviceGray",
            filter: "DCTDecode",
            data: vec![1, 2, 3],
        };

        let stream = xobject.to_pdf_stream();
        let dict = &stream.dict;
        assert_eq!(dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Image");
        assert_eq!(dict.get(b"Width").unwrap().as_i64().unwrap(), 100);
        assert_eq!(
            dict.get(b"ColorSpace").unwrap().as_name().unwrap(),
            b"DeviceGray"
        );
        assert_eq!(stream.content, vec![1, 2, 3]);
    }

    #[test]
    fn test_generate_image_operators() {
        let ops = generate_image_operators("Im1", 100.0, 200.0, 50.0, 75.0);
        let ops_str = String::from_utf8(ops).unwrap();
        assert!(ops_str.contains("50 0 0 75 100 200 cm"));
        assert!(ops_str.contains("/Im1 Do"));
    }

    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(
            calculate_scaled_dimensions(800, 600, 100.0, 200.0, ImageScaleMode::Stretch),
            (100.0, 200.0)
        );
        assert_eq!(
            calculate_scaled_dimensions(800, 600, 100.0, 200.0, ImageScaleMode::FitBox),
            (100.0, 75.0)
        );
        assert_eq!(
            calculate_scaled_dimensions(600, 800, 200.0, 100.0, ImageScaleMode::FitBox),
            (75.0, 100.0)
        );
        assert_eq!(
            calculate_scaled_dimensions(0, 800, 200.0, 100.0, ImageScaleMode::FitBox),
            (0.0, 0.0)
        );
    }
}
