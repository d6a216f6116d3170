//! Single-page PDF container around a JPEG stream.
//!
//! The pixels are encoded once with the `image` crate's JPEG encoder and the
//! resulting bytes are embedded untouched as a `DCTDecode` image XObject, so
//! the requested quality is exactly what ends up in the document.

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::error::{ConversionError, Result};

/// Points per inch in PDF user space
const POINTS_PER_INCH: f32 = 72.0;

/// Resolution used to size the page from the pixel dimensions
pub const DEFAULT_DPI: f32 = 72.0;

/// Resource name of the page image
const IMAGE_NAME: &str = "Im0";

/// Encode RGB pixels as a baseline JPEG at the given quality (1-100).
pub fn encode_jpeg(rgb: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .encode_image(rgb)
        .map_err(ConversionError::Encode)?;
    Ok(buffer)
}

/// Page size in points for an image of the given pixel size
pub fn page_size_points(width: u32, height: u32, dpi: f32) -> (f32, f32) {
    let scale = POINTS_PER_INCH / dpi;
    (width as f32 * scale, height as f32 * scale)
}

/// PDF text string: ASCII stays a literal, anything else is UTF-16BE with a BOM
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Build a complete one-page PDF whose page is filled by the JPEG image.
///
/// `title` goes into the document Info dictionary.
pub fn build_pdf(jpeg: Vec<u8>, width: u32, height: u32, title: &str) -> Result<Vec<u8>> {
    let (page_width, page_height) = page_size_points(width, height, DEFAULT_DPI);

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    )
    .with_compression(false);
    let image_id = doc.add_object(image_stream);

    // Scale the unit square to the page and paint the image
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    page_width.into(),
                    0.into(),
                    0.into(),
                    page_height.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_bytes = content.encode()?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content_bytes));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                IMAGE_NAME => image_id,
            },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(title),
        "Producer" => Object::string_literal(concat!("jpg2pdf ", env!("CARGO_PKG_VERSION"))),
        "Creator" => Object::string_literal("jpg2pdf"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut output = Vec::new();
    doc.save_to(&mut output)?;
    Ok(output)
}
