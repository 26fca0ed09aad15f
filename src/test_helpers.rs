//! Shared test utilities for the respic test suite.
//!
//! Construction helpers for the value types most tests need — firm variant
//! candidates with derived identifiers, sizes with a plain width window —
//! plus a scripted in-memory catalog whose listing and failures tests can
//! control directly.

use crate::catalog::{CatalogError, Dimensions, VariantCandidate, VariantCatalog};
use crate::size::Size;
use std::collections::BTreeMap;

/// Firm candidate named after its width (`style_480` etc.).
pub fn firm(width: u32, height: u32) -> VariantCandidate {
    VariantCandidate {
        identifier: Some(format!("style_{width}")),
        width,
        height: Some(height),
        firm: true,
    }
}

/// Size with an explicit width window and no media query.
pub fn sized(min_width: u32, max_width: u32, aspect_ratio: f64) -> Size {
    Size::builder(min_width, aspect_ratio)
        .max_width(max_width)
        .build()
        .unwrap()
}

/// Catalog returning a fixed candidate list, with URLs derived from the
/// identifier and per-image natural dimensions.
#[derive(Debug, Default)]
pub struct FixedCatalog {
    pub variants: Vec<VariantCandidate>,
    pub naturals: BTreeMap<String, Dimensions>,
    pub fail_listing: bool,
}

impl FixedCatalog {
    pub fn new(variants: Vec<VariantCandidate>) -> Self {
        Self {
            variants,
            naturals: BTreeMap::new(),
            fail_listing: false,
        }
    }

    pub fn with_natural(mut self, image: &str, dims: Dimensions) -> Self {
        self.naturals.insert(image.to_string(), dims);
        self
    }
}

impl VariantCatalog for FixedCatalog {
    fn list_variants(&self) -> Result<Vec<VariantCandidate>, CatalogError> {
        if self.fail_listing {
            return Err(CatalogError::Listing("catalog offline".into()));
        }
        Ok(self.variants.clone())
    }

    fn resolve_url(
        &self,
        image: &str,
        candidate: &VariantCandidate,
    ) -> Result<String, CatalogError> {
        Ok(match &candidate.identifier {
            Some(id) => format!("/styles/{id}/{image}"),
            None => format!("/files/{image}"),
        })
    }

    fn natural_dimensions(&self, image: &str) -> Result<Option<Dimensions>, CatalogError> {
        Ok(self.naturals.get(image).copied())
    }
}
