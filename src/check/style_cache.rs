//! Registration of log-entry styles with the rendering surface.
//!
//! Every log entry is painted in a single color. The surface learns about
//! a color through a style block scoped by a [`StyleKey`]; the
//! [`StyleCache`] makes sure each block is inserted at most once for the
//! lifetime of the surface, however many checks run against it.

use std::collections::HashSet;
use std::fmt;

use super::surface::RenderSurface;

/// Color used when the caller passes an empty color.
const FALLBACK_COLOR: &str = "#FFFFFF";

/// Prefix shared by every style key.
const STYLE_KEY_PREFIX: &str = "colorLog";

// ── StyleKey ────────────────────────────────────────────────────────

/// Identifier of a registered log style.
///
/// Derived from the color alone: `#c10000` becomes `colorLog-c10000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleKey(String);

impl StyleKey {
    /// Derives the key for `color_hex`.
    #[must_use]
    pub fn for_color(color_hex: &str) -> Self {
        Self(format!(
            "{STYLE_KEY_PREFIX}{}",
            color_hex.replacen('#', "-", 1)
        ))
    }

    /// Returns the inner string as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for StyleKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl AsRef<str> for StyleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── StyleCache ──────────────────────────────────────────────────────

/// Append-only set of styles already inserted into a surface.
///
/// Construct one per surface and pass it by `&mut` to every check that
/// logs against that surface. There is no eviction.
#[derive(Debug, Default)]
pub struct StyleCache {
    registered: HashSet<StyleKey>,
}

impl StyleCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the style key for `color_hex`, inserting its style block
    /// into `surface` the first time the color is seen.
    ///
    /// The key ignores `font_size`: a later call with the same color but a
    /// different font size reuses the block registered first.
    pub fn acquire_style(
        &mut self,
        surface: &mut dyn RenderSurface,
        color_hex: &str,
        font_size: Option<&str>,
    ) -> StyleKey {
        let color = effective_color(color_hex);
        let key = StyleKey::for_color(color);

        if !self.registered.contains(&key) {
            surface.insert_style(&key, &style_block(&key, color, font_size));
            tracing::debug!(style = %key, "registered log style");
            self.registered.insert(key.clone());
        }

        key
    }

    /// Returns `true` if a style for `color_hex` has been registered.
    #[must_use]
    pub fn contains(&self, color_hex: &str) -> bool {
        self.registered
            .contains(&StyleKey::for_color(effective_color(color_hex)))
    }

    /// Number of distinct styles registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Returns `true` if nothing has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}

/// Substitutes [`FALLBACK_COLOR`] for an empty color.
const fn effective_color(color_hex: &str) -> &str {
    if color_hex.is_empty() {
        FALLBACK_COLOR
    } else {
        color_hex
    }
}

/// Builds the style block for one key: method label, message, and the
/// emphasis elements nested in the message.
fn style_block(key: &StyleKey, color: &str, font_size: Option<&str>) -> String {
    let font = font_size.map_or_else(String::new, |size| format!("font-size: {size};"));
    let scope = format!(".command.command-name-{key}");

    format!(
        "{scope} span.command-method {{ color: {color} !important; text-transform: uppercase; \
         font-weight: bold; background-color: none; border-color: none; {font} }}\n\
         {scope} span.command-message {{ color: {color} !important; font-weight: normal; \
         background-color: none; border-color: none; {font} }}\n\
         {scope} span.command-message strong, {scope} span.command-message em {{ \
         color: {color} !important; background-color: none; border-color: none; {font} }}\n"
    )
}
