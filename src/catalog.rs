//! The variant catalog collaborator boundary.
//!
//! Variant *production* is someone else's job — a CMS image-style system, a
//! build pipeline, a resizing proxy. This crate only needs three things from
//! whoever owns the variants, captured by the [`VariantCatalog`] trait:
//!
//! | Operation | Purpose |
//! |---|---|
//! | `list_variants` | Enumerate available variants, ascending by width |
//! | `resolve_url` | Turn a candidate into a fetchable URL for one image |
//! | `natural_dimensions` | Pixel size of the unprocessed original, if known |
//!
//! Catalog implementations may cache their listing however they like — the
//! caching policy lives behind the trait, never in the selection code. Any
//! failure from the collaborator propagates unmodified as a
//! [`CatalogError`]; this crate performs no retries, no suppression, and no
//! default-image substitution.
//!
//! The bundled in-memory implementation is
//! [`StyleCatalog`](crate::styles::StyleCatalog).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("variant listing failed: {0}")]
    Listing(String),
    #[error("could not resolve URL for variant {identifier:?} of {image}: {reason}")]
    UrlResolution {
        identifier: Option<String>,
        image: String,
        reason: String,
    },
    #[error("dimension lookup failed for {image}: {reason}")]
    Dimensions { image: String, reason: String },
}

/// Pixel dimensions of an image asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width/height ratio.
    pub fn ratio(self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// One available pre-rendered variant of an image.
///
/// `identifier` names the transformation that produces the variant (e.g. an
/// image-style machine name); `None` marks the unprocessed original asset,
/// whose URL resolves straight from the image reference.
///
/// `firm` distinguishes guaranteed-exact dimensions from upper bounds: a
/// non-upscaling resize of an unknown original can only promise "at most
/// this wide", so its declared ratio cannot be trusted for aspect-ratio
/// matching.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantCandidate {
    pub identifier: Option<String>,
    pub width: u32,
    pub height: Option<u32>,
    pub firm: bool,
}

impl VariantCandidate {
    /// Width/height ratio, when the height is known.
    pub fn ratio(&self) -> Option<f64> {
        self.height
            .filter(|&h| h > 0)
            .map(|h| self.width as f64 / h as f64)
    }
}

/// The catalog collaborator: enumerates available variants and resolves
/// them for concrete images.
///
/// Implementations must return `list_variants` sorted ascending by width;
/// the selection algorithm relies on that order. All three operations are
/// treated as synchronous collaborator calls that may block — retry and
/// timeout policy belongs behind this trait, not in front of it.
pub trait VariantCatalog {
    /// All usable variants, ascending by width.
    fn list_variants(&self) -> Result<Vec<VariantCandidate>, CatalogError>;

    /// URL for `candidate` applied to `image`. A `None` identifier resolves
    /// to the original asset's own URL.
    fn resolve_url(&self, image: &str, candidate: &VariantCandidate) -> Result<String, CatalogError>;

    /// Pixel dimensions of the unprocessed original, when the catalog can
    /// know them. `Ok(None)` simply disables upscale avoidance.
    fn natural_dimensions(&self, image: &str) -> Result<Option<Dimensions>, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_ratio() {
        assert_eq!(Dimensions::new(1600, 900).ratio(), 16.0 / 9.0);
    }

    #[test]
    fn candidate_ratio_requires_height() {
        let mut candidate = VariantCandidate {
            identifier: Some("teaser".into()),
            width: 320,
            height: Some(180),
            firm: true,
        };
        assert_eq!(candidate.ratio(), Some(16.0 / 9.0));

        candidate.height = None;
        assert_eq!(candidate.ratio(), None);

        candidate.height = Some(0);
        assert_eq!(candidate.ratio(), None);
    }
}
