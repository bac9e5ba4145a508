//! Font selection by locale.

/// Font file per locale prefix or script family. The first entry is the
/// fallback for unknown locales.
pub const FONTS: [(&str, &str); 16] = [
    ("asian", "NotoSansCJKjp-Bold.otf"),
    ("ja", "NotoSansCJKjp-Bold.otf"),
    ("zh", "NotoSansCJKjp-Bold.otf"),
    ("ko", "NotoSansCJKjp-Bold.otf"),
    ("latin", "NotoSans-Full-Bold.ttf"),
    ("pl", "NotoSans-Bold.ttf"),
    ("el", "NotoSans-Bold.ttf"),
    ("ar", "NotoSansArabic-Bold.ttf"),
    ("he", "NotoSansHebrew-Bold.ttf"),
    ("th", "NotoSansThai-Bold.ttf"),
    ("cyrillic", "NotoSans-Bold.ttf"),
    ("ru", "NotoSans-Bold.ttf"),
    ("uk", "NotoSans-Bold.ttf"),
    ("vi", "NotoSans-Full-Bold.ttf"),
    ("hy", "NotoSansArmenian-Bold.ttf"),
    ("ka", "NotoSansGeorgian-Bold.ttf"),
];

/// Language part of a locale tag: "pt_BR" and "pt-BR" both give "pt".
pub fn locale_prefix(locale: &str) -> String {
    locale
        .trim()
        .split(['_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Font file name to use for `locale`.
pub fn font_for_locale(locale: &str) -> &'static str {
    let prefix = locale_prefix(locale);
    match FONTS.iter().find(|(key, _)| *key == prefix) {
        Some((_, file)) => *file,
        None => {
            log::debug!("no font registered for locale '{locale}', using the default");
            FONTS[0].1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_prefixes() {
        assert_eq!(locale_prefix("ja_JP"), "ja");
        assert_eq!(locale_prefix(" pt-BR "), "pt");
        assert_eq!(locale_prefix("RU"), "ru");
        assert_eq!(locale_prefix(""), "");
    }

    #[test]
    fn fonts_by_locale() {
        assert_eq!(font_for_locale("ja_JP"), "NotoSansCJKjp-Bold.otf");
        assert_eq!(font_for_locale("RU"), "NotoSans-Bold.ttf");
        assert_eq!(font_for_locale("ar-EG"), "NotoSansArabic-Bold.ttf");
        assert_eq!(font_for_locale("pt-BR"), "NotoSansCJKjp-Bold.otf");
    }
}
