//! Image-dimension formatting for `{image}` and `{image:...}`.

use crate::context::ImageInfo;

/// `w` -> width, `h` -> height, anything else -> `WIDTHxHEIGHT`.
/// Unknown dimensions render as an empty string.
pub fn format_image(info: ImageInfo, spec: &str) -> String {
    if info.is_empty() {
        return String::new();
    }

    match spec.trim().to_lowercase().as_str() {
        "w" | "width" => info.width.to_string(),
        "h" | "height" => info.height.to_string(),
        _ => format!("{}x{}", info.width, info.height),
    }
}
