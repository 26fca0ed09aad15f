//! Catalog-backed variant selection — the algorithmic core.
//!
//! Given a [`Size`] and a catalog of pre-rendered variants, decide which
//! variants are worth offering in one `srcset`. The selection balances four
//! guarantees:
//!
//! - no wasted bandwidth on variants far outside the needed width window;
//! - the window's edges stay covered even when catalog granularity is coarse
//!   (one larger-than-needed variant is kept rather than leaving a gap);
//! - nothing is offered past the true resolution of the original asset when
//!   that resolution is known (a CMS resize chain will happily upscale — the
//!   unscaled original serves those displays equally well);
//! - coverage degrades gracefully: a too-small variant beats an empty list.
//!
//! The window math works on pure slices ([`select_within_window`],
//! [`prefer_original_asset`]) so it is unit-testable without a catalog;
//! [`CatalogGenerator`] wires the two steps to a [`VariantCatalog`] and
//! resolves the survivors to URLs.

use crate::catalog::{CatalogError, Dimensions, VariantCandidate, VariantCatalog};
use crate::size::Size;
use crate::srcset::{Src, SrcsetGenerator};

/// Pick the catalog variants that cover `size`'s width window.
///
/// `variants` must be sorted ascending by width (the catalog contract).
/// The result keeps that order and contains at most one entry per width.
///
/// Candidates must be `firm` and match the size's aspect-ratio band to be
/// considered at all — a non-firm width is only an upper bound, so its
/// declared ratio cannot be trusted. The window extends to `max_width × 2`
/// to leave headroom for 2x-density displays. When variants exist beyond
/// the window, the smallest of them is kept so the top of the window is
/// covered by something at least as large; when nothing lands inside the
/// window, the largest too-small variant is kept instead.
pub fn select_within_window(size: &Size, variants: &[VariantCandidate]) -> Vec<VariantCandidate> {
    let headroom = size.max_width() as u64 * 2;

    let mut less: Vec<&VariantCandidate> = Vec::new();
    let mut within: Vec<&VariantCandidate> = Vec::new();
    let mut greater: Vec<&VariantCandidate> = Vec::new();

    for candidate in variants {
        let matches = candidate.firm
            && candidate
                .ratio()
                .is_some_and(|r| size.matches_aspect_ratio(r));
        if !matches {
            continue;
        }
        if candidate.width < size.min_width() {
            less.push(candidate);
        } else if candidate.width as u64 > headroom {
            greater.push(candidate);
        } else {
            within.push(candidate);
        }
    }

    if let Some(&first_greater) = greater.first() {
        // Make sure the end of the window is covered.
        within.push(first_greater);
    }

    let picked: Vec<&VariantCandidate> = if within.is_empty() {
        // Better something too small than nothing at all.
        less.last().copied().into_iter().collect()
    } else {
        within
    };

    let mut result: Vec<VariantCandidate> = picked.into_iter().cloned().collect();
    result.dedup_by_key(|c| c.width);
    result
}

/// Refine a selection against the natural dimensions of the original asset.
///
/// Every selected variant at least as wide as the original would be an
/// upscale. When the original itself fits the size's aspect-ratio band and
/// is useful — either the smallest upscaling variant is not already exactly
/// original-sized, or the original's width sits within the 2x headroom —
/// the upscaling variants are replaced by a synthetic original-asset
/// candidate (`identifier: None`). Otherwise only the smallest upscaling
/// variant survives.
pub fn prefer_original_asset(
    selected: Vec<VariantCandidate>,
    size: &Size,
    natural: Dimensions,
) -> Vec<VariantCandidate> {
    let (mut kept, upscaling): (Vec<_>, Vec<_>) = selected
        .into_iter()
        .partition(|c| c.width < natural.width);

    let original_useful = size.matches_aspect_ratio(natural.ratio())
        && (upscaling.first().is_some_and(|c| c.width != natural.width)
            || natural.width as u64 <= size.max_width() as u64 * 2);

    if original_useful {
        kept.push(VariantCandidate {
            identifier: None,
            width: natural.width,
            height: Some(natural.height),
            firm: false,
        });
    } else if let Some(first) = upscaling.into_iter().next() {
        kept.push(first);
    }
    kept
}

/// [`SrcsetGenerator`] backed by a [`VariantCatalog`].
///
/// Construct one per catalog snapshot and share it freely: it holds no
/// mutable state, so concurrent rendering needs no coordination beyond what
/// the catalog itself provides.
#[derive(Debug, Clone)]
pub struct CatalogGenerator<C> {
    catalog: C,
}

impl<C: VariantCatalog> CatalogGenerator<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}

impl<C: VariantCatalog> SrcsetGenerator for CatalogGenerator<C> {
    fn list_for(&self, image: &str, size: &Size) -> Result<Vec<Src>, CatalogError> {
        let variants = self.catalog.list_variants()?;
        let mut selected = select_within_window(size, &variants);
        if let Some(natural) = self.catalog.natural_dimensions(image)? {
            selected = prefer_original_asset(selected, size, natural);
        }
        selected
            .iter()
            .map(|candidate| {
                let url = self.catalog.resolve_url(image, candidate)?;
                Ok(Src::with_width(url, candidate.width))
            })
            .collect()
    }
}
