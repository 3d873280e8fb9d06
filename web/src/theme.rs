use crate::utils::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "light",
            Dark => "dark",
        }
    }

    pub(crate) const fn toggled(self) -> Self {
        use Theme::*;
        match self {
            Light => Dark,
            Dark => Light,
        }
    }

    /// Icon of the toggle button, showing the theme it switches to.
    pub(crate) const fn toggle_icon(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "🌙",
            Dark => "☀️",
        }
    }

    pub(crate) const fn toggle_label(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "Switch to dark mode",
            Dark => "Switch to light mode",
        }
    }

    fn update_html(self) {
        use gloo::utils::document;
        let Some(html) = document().document_element() else {
            log::error!("failed to set theme: no document element");
            return;
        };
        let scheme = self.scheme();
        log::debug!("theme-scheme: {}", scheme);
        if let Err(err) = html.set_attribute(Self::ATTR_NAME, scheme) {
            log::error!("failed to set theme: {:?}", err);
        }
    }

    pub(crate) fn init() -> Self {
        let theme: Self = LocalOrDefault::local_or_default();
        theme.update_html();
        theme
    }

    pub(crate) fn apply(self) {
        self.local_save();
        self.update_html();
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "nofox:theme";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_returns_to_the_same_theme() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_ne!(theme.toggled(), theme);
            assert_eq!(theme.toggled().toggled(), theme);
        }
    }

    #[test]
    fn stored_value_is_the_scheme_name() {
        for theme in [Theme::Light, Theme::Dark] {
            let json = serde_json::to_string(&theme).unwrap();
            assert_eq!(json, format!("\"{}\"", theme.scheme()));
        }
    }
}
