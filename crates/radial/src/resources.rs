use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct FontFamily(String);

crate::impl_string_newtype!(FontFamily);

pub const FALLBACK_FONT_FAMILY: &str = "Sans";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontHandle {
    pub family: FontFamily,
    pub bold: bool,
}

impl FontHandle {
    pub fn new(family: FontFamily) -> Self {
        Self { family, bold: true }
    }

    pub fn fallback() -> Self {
        Self::new(FontFamily::new(FALLBACK_FONT_FAMILY))
    }
}

/// Supplies ready-to-use style handles. Hosts decide how fonts are found.
pub trait ResourceProvider {
    fn label_font(&self) -> Option<FontHandle>;
}

/// The provider's label font, or [`FontHandle::fallback`] when it has none.
pub fn resolve_label_font(provider: &dyn ResourceProvider) -> FontHandle {
    provider.label_font().unwrap_or_else(|| {
        log::warn!(
            "Label font unavailable, falling back to '{}'",
            FALLBACK_FONT_FAMILY
        );
        FontHandle::fallback()
    })
}
