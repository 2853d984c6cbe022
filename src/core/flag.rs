//! core::flag
//!
//! Conversions between ISO 3166 alpha-2 country codes and flag emoji.
//!
//! A flag emoji is two Unicode regional indicator symbols, one per letter
//! of the country code. `PT` becomes U+1F1F5 U+1F1F9.

/// Offset between an ASCII uppercase letter and its regional indicator.
const REGIONAL_INDICATOR_OFFSET: u32 = 0x1F1A5;

/// First and last regional indicator symbols (A and Z).
const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;
const REGIONAL_INDICATOR_Z: u32 = 0x1F1FF;

/// Base URL of the flag image CDN.
const FLAG_CDN_BASE: &str = "https://flagcdn.com";

/// Convert a two-letter country code into its flag emoji.
///
/// Returns `None` unless the code is exactly two ASCII letters.
///
/// # Example
///
/// ```
/// use worldwise::core::flag::flag_emoji;
///
/// assert_eq!(flag_emoji("pt").as_deref(), Some("🇵🇹"));
/// assert_eq!(flag_emoji("P1"), None);
/// ```
pub fn flag_emoji(country_code: &str) -> Option<String> {
    let code = country_code.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    code.to_ascii_uppercase()
        .chars()
        .map(|c| char::from_u32(c as u32 + REGIONAL_INDICATOR_OFFSET))
        .collect()
}

/// Recover the lowercase country code from a flag emoji.
///
/// Returns `None` if the emoji is not a pair of regional indicators.
pub fn country_code(emoji: &str) -> Option<String> {
    let chars: Vec<char> = emoji.trim().chars().collect();
    if chars.len() != 2 {
        return None;
    }

    chars
        .into_iter()
        .map(|c| {
            let cp = c as u32;
            if (REGIONAL_INDICATOR_A..=REGIONAL_INDICATOR_Z).contains(&cp) {
                char::from_u32(cp - REGIONAL_INDICATOR_OFFSET).map(|c| c.to_ascii_lowercase())
            } else {
                None
            }
        })
        .collect()
}

/// URL of the SVG flag image for a flag emoji.
pub fn flag_image_url(emoji: &str) -> Option<String> {
    country_code(emoji).map(|code| format!("{}/{}.svg", FLAG_CDN_BASE, code))
}
