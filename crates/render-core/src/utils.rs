/// Weight of a standard PDF font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Get PDF font name with weight suffix
pub fn get_styled_font_name(base_name: &str, weight: FontWeight) -> String {
    match weight {
        FontWeight::Regular => base_name.to_string(),
        FontWeight::Bold => format!("{}-Bold", base_name),
    }
}

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}
