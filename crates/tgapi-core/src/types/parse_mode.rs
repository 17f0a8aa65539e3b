/// Text formatting mode for outgoing messages.
///
/// The service's tokens are not a mechanical transform of the variant names
/// (`Html` is `"HTML"`), so the wire form comes from [`ParseMode::STRING_MAP`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParseMode {
    /// Plain text.
    #[default]
    Default,
    Markdown,
    Html,
    MarkdownV2,
}

impl ParseMode {
    /// One entry per variant.
    pub const STRING_MAP: &'static [(ParseMode, &'static str)] = &[
        (ParseMode::Default, ""),
        (ParseMode::Markdown, "Markdown"),
        (ParseMode::Html, "HTML"),
        (ParseMode::MarkdownV2, "MarkdownV2"),
    ];

    pub fn as_str(self) -> &'static str {
        Self::STRING_MAP
            .iter()
            .find(|(mode, _)| *mode == self)
            .map(|(_, token)| *token)
            .unwrap_or("")
    }

    /// Reverse lookup. Unknown tokens map to [`ParseMode::Default`].
    pub fn from_wire(token: &str) -> Self {
        Self::STRING_MAP
            .iter()
            .find(|(_, t)| *t == token)
            .map(|(mode, _)| *mode)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_variant_once() {
        for mode in [
            ParseMode::Default,
            ParseMode::Markdown,
            ParseMode::Html,
            ParseMode::MarkdownV2,
        ] {
            let hits = ParseMode::STRING_MAP
                .iter()
                .filter(|(m, _)| *m == mode)
                .count();
            assert_eq!(hits, 1, "{mode:?}");
            assert_eq!(ParseMode::from_wire(mode.as_str()), mode);
        }
    }

    #[test]
    fn lookup_is_case_sensitive_and_lenient() {
        assert_eq!(ParseMode::Html.as_str(), "HTML");
        assert_eq!(ParseMode::from_wire("html"), ParseMode::Default);
        assert_eq!(ParseMode::from_wire("bbcode"), ParseMode::Default);
    }
}
