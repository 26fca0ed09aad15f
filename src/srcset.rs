//! `srcset` entries and the generator seam.
//!
//! A [`Src`] is one comma-separated entry of a `srcset` attribute: a URL
//! plus either a width descriptor (`800w`) or a density descriptor (`2x`).
//!
//! [`SrcsetGenerator`] is the strategy seam between markup composition and
//! variant selection: [`Source`](crate::source::Source) asks a generator for
//! the entries covering each [`Size`](crate::size::Size) and never sees the
//! catalog itself. The catalog-backed implementation is
//! [`CatalogGenerator`](crate::selector::CatalogGenerator); an on-the-fly
//! resizing service would be another implementation of the same trait.

use crate::catalog::CatalogError;
use crate::size::Size;
use std::fmt;

/// One entry of a `srcset` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Src {
    url: String,
    width: Option<u32>,
    density: Option<f64>,
}

impl Src {
    /// Entry with a width descriptor: `"{url} {width}w"`.
    pub fn with_width(url: impl Into<String>, width: u32) -> Self {
        Self {
            url: url.into(),
            width: Some(width),
            density: None,
        }
    }

    /// Entry with a density descriptor: `"{url} {density}x"`.
    pub fn with_density(url: impl Into<String>, density: f64) -> Self {
        Self {
            url: url.into(),
            width: None,
            density: Some(density),
        }
    }

    /// Bare URL entry, no descriptor.
    pub fn bare(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            density: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn density(&self) -> Option<f64> {
        self.density
    }

    /// Sort key for the cosmetic ascending order of a combined `srcset`:
    /// the width when present, else the truncated density multiplier.
    pub(crate) fn order_key(&self) -> u32 {
        self.width
            .or_else(|| self.density.map(|d| d as u32))
            .unwrap_or(0)
    }
}

impl fmt::Display for Src {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(width) = self.width {
            write!(f, "{} {}w", self.url, width)
        } else if let Some(density) = self.density {
            write!(f, "{} {}x", self.url, density)
        } else {
            write!(f, "{}", self.url)
        }
    }
}

/// Strategy for producing the `srcset` entries that cover one size.
///
/// Implementations select among available variants and resolve them to URLs
/// in one step; URL resolution must not happen before selection has settled
/// on the final candidate list. An empty result is a valid answer — it means
/// no usable variant exists for the size, not an error.
pub trait SrcsetGenerator {
    /// Ordered `srcset` entries for `image` under `size`.
    fn list_for(&self, image: &str, size: &Size) -> Result<Vec<Src>, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_descriptor_rendering() {
        let src = Src::with_width("/styles/teaser/cat.jpg", 480);
        assert_eq!(src.to_string(), "/styles/teaser/cat.jpg 480w");
    }

    #[test]
    fn density_descriptor_rendering() {
        let src = Src::with_density("/styles/retina/cat.jpg", 2.0);
        assert_eq!(src.to_string(), "/styles/retina/cat.jpg 2x");

        let src = Src::with_density("/styles/retina/cat.jpg", 1.5);
        assert_eq!(src.to_string(), "/styles/retina/cat.jpg 1.5x");
    }

    #[test]
    fn bare_url_rendering() {
        let src = Src::bare("/files/cat.jpg");
        assert_eq!(src.to_string(), "/files/cat.jpg");
    }

    #[test]
    fn order_key_falls_back_to_density() {
        assert_eq!(Src::with_width("a", 800).order_key(), 800);
        assert_eq!(Src::with_density("a", 2.9).order_key(), 2);
        assert_eq!(Src::bare("a").order_key(), 0);
    }
}
