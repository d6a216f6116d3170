use image::{ColorType, DynamicImage, RgbImage};

/// Convert any decoded image into 8-bit, three-channel RGB.
///
/// Returns the pixels together with the source color type when a conversion
/// was needed, or `None` when the image already was RGB8.
pub fn normalize_to_rgb(img: DynamicImage) -> (RgbImage, Option<ColorType>) {
    match img {
        DynamicImage::ImageRgb8(rgb) => (rgb, None),
        other => {
            let source = other.color();
            (other.to_rgb8(), Some(source))
        }
    }
}

/// Short human-readable name for a color type, used in log lines
pub fn color_type_name(color: ColorType) -> &'static str {
    match color {
        ColorType::L8 => "L8",
        ColorType::La8 => "LA8",
        ColorType::Rgb8 => "RGB8",
        ColorType::Rgba8 => "RGBA8",
        ColorType::L16 => "L16",
        ColorType::La16 => "LA16",
        ColorType::Rgb16 => "RGB16",
        ColorType::Rgba16 => "RGBA16",
        ColorType::Rgb32F => "RGB32F",
        ColorType::Rgba32F => "RGBA32F",
        _ => "unknown",
    }
}
