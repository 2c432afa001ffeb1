//! Sharing a reading: clipboard text and exported card images.

pub mod export;

use crate::zodiac::{Rgb, Sign, DEFAULT_BACKDROP};

/// Templated text copied by "Copy Prophecy".
pub fn share_text(sign: &Sign, share_url: &str) -> String {
    format!(
        "The Oracle has spoken! My Cultural Zodiac is the {} {}\n\n\
         The Prophecy: \"{}\"\n\n\
         Discover your own sign here \u{1F449} {}\n#CulturalZodiac",
        sign.name, sign.emoji, sign.prophecy, share_url
    )
}

/// `my-zodiac-<slug>.png`, or the generic name when there is no sign.
pub fn export_file_name(sign: Option<&Sign>) -> String {
    match sign {
        Some(sign) => {
            let slug = sign
                .name
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("-");
            format!("my-zodiac-{}.png", slug)
        }
        None => "my-cultural-zodiac.png".to_string(),
    }
}

/// Solid color painted behind an exported card.
pub fn export_backdrop(sign: Option<&Sign>) -> Rgb {
    sign.map(|s| s.kind().backdrop()).unwrap_or(DEFAULT_BACKDROP)
}
