//! # respic
//!
//! Responsive image markup composition: given a catalog of pre-rendered
//! image variants, decide which ones a browser should be offered and render
//! the `srcset`/`sizes`/`picture` markup that lets it pick the best variant
//! for its viewport and pixel density.
//!
//! Clients declare, per layout [`Slot`](slot::Slot), an ordered list of
//! viewport conditions ([`Size`](size::Size)s) and the image dimensions
//! expected under each. The crate:
//!
//! 1. selects, per size, which catalog variants cover the expected width
//!    window well ([`selector`]);
//! 2. groups consecutive sizes sharing an aspect ratio into independently
//!    negotiated markup units ([`Source`](source::Source));
//! 3. emits `<source>`/`<img>` elements — wrapped in `<picture>` only when
//!    the aspect ratio actually changes across conditions — respecting the
//!    browser's left-to-right evaluation order ([`slot`]).
//!
//! Variant *production* is out of scope: images are resized and encoded
//! elsewhere, and reach this crate through the
//! [`VariantCatalog`](catalog::VariantCatalog) collaborator trait.
//!
//! ```
//! use respic::catalog::Dimensions;
//! use respic::selector::CatalogGenerator;
//! use respic::size::Size;
//! use respic::slot::Slot;
//! use respic::styles::{Effect, Style, StyleCatalog};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let styles = [
//!     Style::new("teaser", vec![Effect::ScaleAndCrop { width: 320, height: 160 }]),
//!     Style::new("content", vec![Effect::ScaleAndCrop { width: 900, height: 450 }]),
//! ];
//! let catalog = StyleCatalog::new(&styles, "/styles", "/files")
//!     .with_natural_dimensions("cat.jpg", Dimensions::new(340, 170));
//! let generator = CatalogGenerator::new(catalog);
//!
//! let slot = Slot::new(vec![
//!     Size::builder(320, 2.0).media_query("(max-width: 600px)").build()?,
//!     Size::builder(320, 2.0).build()?,
//! ]);
//! let html = slot.render(&generator, "cat.jpg", "A cat")?.into_string();
//! assert!(html.contains("/styles/teaser/cat.jpg 320w"));
//! assert!(html.contains("/files/cat.jpg 340w")); // the original, not an upscale
//! # Ok(())
//! # }
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`size`] | [`Size`](size::Size) — one `sizes` entry: condition, width window, aspect ratio |
//! | [`srcset`] | [`Src`](srcset::Src) entries and the [`SrcsetGenerator`](srcset::SrcsetGenerator) strategy seam |
//! | [`catalog`] | The [`VariantCatalog`](catalog::VariantCatalog) collaborator boundary and variant descriptions |
//! | [`selector`] | The selection algorithm: width bucketing, 2x headroom, upscale avoidance |
//! | [`source`] | One markup unit — a `<source>` or the base `<img>` |
//! | [`slot`] | [`Slot`](slot::Slot) composition and [`SlotGroup`](slot::SlotGroup) index dispatch |
//! | [`styles`] | Effect-chain dimension math and the in-memory [`StyleCatalog`](styles::StyleCatalog) |
//! | [`config`] | Declarative TOML/JSON definitions of styles, slots, and groups |
//!
//! # Design Decisions
//!
//! ## Maud Over String Templates
//!
//! Markup is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Attribute interpolation is auto-escaped, malformed
//! element structure is a build error, and there are no template files to
//! ship or get out of sync.
//!
//! ## Explicit Catalog Object, No Hidden Cache
//!
//! The catalog is an object constructed once and passed by reference into
//! rendering — never a module-level static behind a memoizing function. A
//! catalog implementation may cache its own listing; that policy stays
//! behind the [`VariantCatalog`](catalog::VariantCatalog) trait where it can
//! be swapped out per backend.
//!
//! ## Immutability and Concurrency
//!
//! Every entity — sizes, sources, slots, groups, catalogs — is immutable
//! after construction, and rendering is a pure function of entity, image
//! reference, and catalog snapshot. Slots built once can be rendered from
//! any number of threads with no coordination, provided the catalog is safe
//! for concurrent reads.
//!
//! ## Errors Fail Fast, Missing Variants Don't
//!
//! Malformed declarations (inverted width windows, non-positive ratios,
//! dangling slot references) are construction-time errors. A size for which
//! no usable variant exists is *not* an error: it contributes an empty
//! `srcset`, and rendering degrades to whatever coverage the catalog has.
//! Collaborator failures propagate unmodified — no retries, no fallback
//! images.

pub mod catalog;
pub mod config;
pub mod selector;
pub mod size;
pub mod slot;
pub mod source;
pub mod srcset;
pub mod styles;

pub use catalog::{CatalogError, Dimensions, VariantCandidate, VariantCatalog};
pub use config::{ConfigError, SlotSet, SlotsConfig};
pub use selector::CatalogGenerator;
pub use size::{Size, SizeBuilder, SizeError};
pub use slot::{Slot, SlotError, SlotGroup, SlotRule};
pub use source::Source;
pub use srcset::{Src, SrcsetGenerator};
pub use styles::{Effect, Style, StyleCatalog, StyleDimensions};

#[cfg(test)]
pub(crate) mod test_helpers;
