use media_track_models::Theme;

/// OS-level dark/light preference as far as a terminal can tell.
///
/// Reads `COLORFGBG` ("fg;bg" as set by rxvt, Konsole and friends). When the
/// variable is absent or unparsable the preference is unknown and `Light` is
/// returned.
pub fn detect_system_theme() -> Theme {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| theme_from_colorfgbg(&v))
        .unwrap_or(Theme::Light)
}

/// Background colour indexes 0-6 and 8 are dark in the 16-colour palette.
pub fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(Theme::from_dark_flag(matches!(bg, 0..=6 | 8)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorfgbg_parsing() {
        assert_eq!(theme_from_colorfgbg("15;0"), Some(Theme::Dark));
        assert_eq!(theme_from_colorfgbg("0;15"), Some(Theme::Light));
        assert_eq!(theme_from_colorfgbg("12;default;8"), Some(Theme::Dark));
        assert_eq!(theme_from_colorfgbg("garbage"), None);
    }
}
