//! Image styles: declarative transformation chains and the catalog over
//! them.
//!
//! A [`Style`] is a named chain of [`Effect`]s the way CMS image-style
//! systems define them — "scale to 480 wide, then crop to 480×270". This
//! crate never executes effects (variants are produced elsewhere); it only
//! needs to know what dimensions a style *ends up with*, which
//! [`final_dimensions`] computes by folding the chain.
//!
//! The crucial bit of that fold is **firmness**. Crop-family effects pin
//! exact output dimensions. A plain scale without upscaling, applied to an
//! original of unknown size, can only promise "at most this big" — its
//! declared dimensions are upper bounds and its aspect ratio cannot be
//! trusted, so the resulting candidate is marked non-firm and variant
//! selection will skip it.
//!
//! [`StyleCatalog`] turns a style list into a ready
//! [`VariantCatalog`](crate::catalog::VariantCatalog): one explicit object,
//! candidate list computed once at construction and sorted ascending by
//! width. Styles containing effects this crate does not recognize are
//! excluded wholesale — unknown effects could have unintended side-effects.

use crate::catalog::{CatalogError, Dimensions, VariantCandidate, VariantCatalog};
use std::collections::BTreeMap;

/// One step of a style's transformation chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Scale to cover, then crop: exact output dimensions.
    ScaleAndCrop { width: u32, height: u32 },
    /// Resize to exact dimensions, aspect ratio not preserved.
    Resize { width: u32, height: u32 },
    /// Crop to exact dimensions.
    Crop { width: u32, height: u32 },
    /// Aspect-preserving scale to fit within the given bounds. Without
    /// `upscale` the image is never enlarged, making the bounds upper
    /// bounds only.
    Scale {
        width: Option<u32>,
        height: Option<u32>,
        upscale: bool,
    },
    /// An effect this crate does not model. Poisons the whole style.
    Unknown(String),
}

/// A named transformation chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub name: String,
    pub effects: Vec<Effect>,
}

impl Style {
    pub fn new(name: impl Into<String>, effects: Vec<Effect>) -> Self {
        Self {
            name: name.into(),
            effects,
        }
    }
}

/// Outcome of folding a style's effect chain.
///
/// `None` sides are undetermined (the chain never constrained them). When
/// `firm` is false the known sides are upper bounds, not guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleDimensions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub firm: bool,
}

/// Aspect-preserving fit of `current` into the target bounds.
///
/// The side that would overshoot its bound is derived from the other;
/// a missing bound is derived outright. Without `upscale`, a fit that
/// would not shrink the image leaves it untouched.
pub fn scale_dimensions(
    current: Dimensions,
    width: Option<u32>,
    height: Option<u32>,
    upscale: bool,
) -> Dimensions {
    let aspect = current.height as f64 / current.width as f64;
    let (w, h) = match (width, height) {
        (Some(w), None) => (w, (w as f64 * aspect).round() as u32),
        (Some(w), Some(h)) if aspect < h as f64 / w as f64 => {
            (w, (w as f64 * aspect).round() as u32)
        }
        (_, Some(h)) => ((h as f64 / aspect).round() as u32, h),
        (None, None) => return current,
    };
    if !upscale && (w >= current.width || h >= current.height) {
        return current;
    }
    Dimensions::new(w, h)
}

/// Fold a style's effect chain into its final output dimensions.
pub fn final_dimensions(effects: &[Effect]) -> StyleDimensions {
    let mut dims = StyleDimensions {
        width: None,
        height: None,
        firm: false,
    };
    for effect in effects {
        match *effect {
            Effect::ScaleAndCrop { width, height }
            | Effect::Resize { width, height }
            | Effect::Crop { width, height } => {
                dims = StyleDimensions {
                    width: Some(width),
                    height: Some(height),
                    firm: true,
                };
            }
            Effect::Scale {
                width,
                height,
                upscale,
            } => {
                // Undetermined sides adopt the scale bounds as upper bounds;
                // firmness is unchanged.
                if dims.width.is_none() {
                    dims.width = width;
                }
                if dims.height.is_none() {
                    dims.height = height;
                }
                let (Some(current_w), Some(current_h)) = (dims.width, dims.height) else {
                    continue;
                };
                let exceeds_w = width.is_none_or(|w| w > current_w);
                let exceeds_h = height.is_none_or(|h| h > current_h);
                if !upscale && exceeds_w && exceeds_h {
                    continue;
                }
                let scaled =
                    scale_dimensions(Dimensions::new(current_w, current_h), width, height, upscale);
                dims.width = Some(scaled.width);
                dims.height = Some(scaled.height);
            }
            Effect::Unknown(_) => {}
        }
    }
    dims
}

/// In-memory [`VariantCatalog`] over a style list.
///
/// URLs are path joins: `{style_base}/{style}/{image}` for styled variants,
/// `{file_base}/{image}` for the original asset. Natural dimensions come
/// from a per-image map supplied via
/// [`with_natural_dimensions`](Self::with_natural_dimensions); a live
/// backend that looks them up on demand would be its own catalog
/// implementation.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    variants: Vec<VariantCandidate>,
    style_base: String,
    file_base: String,
    naturals: BTreeMap<String, Dimensions>,
}

impl StyleCatalog {
    /// Compute the candidate list for `styles`, once.
    ///
    /// Styles with unknown effects or without a determinable width are
    /// excluded. The surviving candidates are sorted ascending by width.
    pub fn new(styles: &[Style], style_base: &str, file_base: &str) -> Self {
        let mut variants: Vec<VariantCandidate> = styles
            .iter()
            .filter_map(|style| {
                if style
                    .effects
                    .iter()
                    .any(|e| matches!(e, Effect::Unknown(_)))
                {
                    return None;
                }
                let dims = final_dimensions(&style.effects);
                Some(VariantCandidate {
                    identifier: Some(style.name.clone()),
                    width: dims.width?,
                    height: dims.height,
                    firm: dims.firm,
                })
            })
            .collect();
        variants.sort_by_key(|v| v.width);
        Self {
            variants,
            style_base: style_base.trim_end_matches('/').to_string(),
            file_base: file_base.trim_end_matches('/').to_string(),
            naturals: BTreeMap::new(),
        }
    }

    /// Record the original asset dimensions for `image`, enabling upscale
    /// avoidance when it is rendered.
    pub fn with_natural_dimensions(mut self, image: impl Into<String>, dims: Dimensions) -> Self {
        self.naturals.insert(image.into(), dims);
        self
    }
}

impl VariantCatalog for StyleCatalog {
    fn list_variants(&self) -> Result<Vec<VariantCandidate>, CatalogError> {
        Ok(self.variants.clone())
    }

    fn resolve_url(
        &self,
        image: &str,
        candidate: &VariantCandidate,
    ) -> Result<String, CatalogError> {
        let path = image.trim_start_matches('/');
        Ok(match &candidate.identifier {
            Some(id) => format!("{}/{}/{}", self.style_base, id, path),
            None => format!("{}/{}", self.file_base, path),
        })
    }

    fn natural_dimensions(&self, image: &str) -> Result<Option<Dimensions>, CatalogError> {
        Ok(self.naturals.get(image).copied())
    }
}
