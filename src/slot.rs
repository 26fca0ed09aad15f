//! Layout slots and slot groups.
//!
//! A [`Slot`] is one layout position whose image markup adapts to viewport
//! conditions. It owns the declared [`Size`] list and, derived once at
//! construction, the [`Source`] partition: a new source starts wherever the
//! aspect ratio changes between consecutive sizes, because a `srcset`
//! negotiates scale only — an image that changes shape across conditions
//! needs its own `<source>` element. The final source always renders as the
//! base `<img>`.
//!
//! With a single source the slot renders a bare element instead of wrapping
//! it in `<picture>`: `<img srcset sizes>` enjoys broader support than
//! `<picture>`, so skipping the wrapper avoids triggering polyfills when
//! nothing needs negotiating beyond scale.
//!
//! A [`SlotGroup`] picks the slot for the Nth item of a repeated listing —
//! say a hero slot for the first teaser and a grid slot for the rest.

use crate::catalog::CatalogError;
use crate::size::Size;
use crate::source::Source;
use crate::srcset::SrcsetGenerator;
use maud::{Markup, html};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SlotError {
    #[error("no slot in the group accepts item index {0}")]
    NoSlotForIndex(u32),
}

/// An image position and how it responds to viewport conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    sizes: Vec<Size>,
    sources: Vec<Source>,
}

impl Slot {
    /// Build a slot from sizes in the order their conditions should be
    /// evaluated. `<source>` elements and `sizes` entries are both evaluated
    /// top to bottom, first match wins; the list must reflect that order and
    /// is never reordered here.
    pub fn new(sizes: Vec<Size>) -> Self {
        let sources = partition_by_aspect_ratio(&sizes);
        Self { sizes, sources }
    }

    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    /// The derived markup units, in declaration order. The last always has
    /// [`as_img`](Source::as_img) set.
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Render the markup representing `image` in this slot.
    ///
    /// One source renders bare; several render concatenated inside
    /// `<picture>…</picture>`. Collaborator failures propagate unmodified.
    pub fn render(
        &self,
        generator: &dyn SrcsetGenerator,
        image: &str,
        alt: &str,
    ) -> Result<Markup, CatalogError> {
        if self.sources.len() == 1 {
            return self.sources[0].render(generator, image, alt);
        }
        let rendered = self
            .sources
            .iter()
            .map(|source| source.render(generator, image, alt))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(html! {
            picture {
                @for element in rendered {
                    (element)
                }
            }
        })
    }
}

/// Split the declared sizes into same-aspect-ratio runs.
///
/// Ratio comparison is exact value equality — the per-size tolerance only
/// widens variant matching, never this grouping boundary.
fn partition_by_aspect_ratio(sizes: &[Size]) -> Vec<Source> {
    let mut sources = Vec::new();
    let mut run: Vec<Size> = Vec::new();
    let mut previous_ratio = None;

    for size in sizes {
        let ratio = size.aspect_ratio();
        if let Some(previous) = previous_ratio {
            if ratio != previous {
                sources.push(Source::new(std::mem::take(&mut run), false));
            }
        }
        previous_ratio = Some(ratio);
        run.push(size.clone());
    }
    sources.push(Source::new(run, true));
    sources
}

/// Which listing indexes a slot in a group applies to.
///
/// Predicates take 1-based indexes. [`SlotRule::All`] accepts every index
/// and serves as the catch-all entry.
pub enum SlotRule {
    All,
    Matching(Box<dyn Fn(u32) -> bool + Send + Sync>),
}

impl SlotRule {
    /// Rule from an arbitrary predicate of the 1-based index.
    pub fn matching(predicate: impl Fn(u32) -> bool + Send + Sync + 'static) -> Self {
        Self::Matching(Box::new(predicate))
    }

    /// Rule accepting exactly one index.
    pub fn index(n: u32) -> Self {
        Self::matching(move |nth| nth == n)
    }

    /// Rule accepting indexes 1 through `n`.
    pub fn up_to(n: u32) -> Self {
        Self::matching(move |nth| nth <= n)
    }

    fn accepts(&self, nth: u32) -> bool {
        match self {
            Self::All => true,
            Self::Matching(predicate) => predicate(nth),
        }
    }
}

impl fmt::Debug for SlotRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Matching(_) => f.write_str("Matching(..)"),
        }
    }
}

/// Ordered slots selectable by listing index.
#[derive(Debug)]
pub struct SlotGroup {
    slots: Vec<(SlotRule, Slot)>,
}

impl SlotGroup {
    pub fn new(slots: Vec<(SlotRule, Slot)>) -> Self {
        Self { slots }
    }

    /// The slot for the `nth` (1-based) item: first rule that accepts wins.
    ///
    /// There is no implicit default — a group meant to cover every index
    /// must end with a [`SlotRule::All`] entry.
    pub fn slot_for_nth(&self, nth: u32) -> Result<&Slot, SlotError> {
        self.slots
            .iter()
            .find(|(rule, _)| rule.accepts(nth))
            .map(|(_, slot)| slot)
            .ok_or(SlotError::NoSlotForIndex(nth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::CatalogGenerator;
    use crate::size::Size;
    use crate::test_helpers::{FixedCatalog, firm, sized};

    #[test]
    fn uniform_ratio_yields_single_img_source() {
        let slot = Slot::new(vec![sized(320, 320, 1.5), sized(600, 600, 1.5)]);
        assert_eq!(slot.sources().len(), 1);
        assert!(slot.sources()[0].as_img());
        assert_eq!(slot.sources()[0].sizes().len(), 2);
    }

    #[test]
    fn ratio_change_starts_new_source() {
        let slot = Slot::new(vec![
            sized(320, 320, 1.5),
            sized(480, 480, 1.5),
            sized(600, 600, 2.0),
            sized(900, 900, 2.0),
        ]);
        let sources = slot.sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].sizes().len(), 2);
        assert_eq!(sources[1].sizes().len(), 2);
        assert!(!sources[0].as_img());
        assert!(sources[1].as_img());
    }

    #[test]
    fn alternating_ratios_each_get_a_source() {
        let slot = Slot::new(vec![
            sized(320, 320, 1.5),
            sized(480, 480, 2.0),
            sized(600, 600, 1.5),
        ]);
        assert_eq!(slot.sources().len(), 3);
    }

    #[test]
    fn single_source_renders_bare_img() {
        let generator = CatalogGenerator::new(FixedCatalog::new(vec![firm(320, 160)]));
        let slot = Slot::new(vec![sized(320, 320, 2.0)]);
        let html = slot.render(&generator, "cat.jpg", "A cat").unwrap().into_string();
        assert!(html.starts_with("<img "));
        assert!(!html.contains("<picture>"));
    }

    #[test]
    fn multiple_sources_wrapped_in_picture() {
        let generator = CatalogGenerator::new(FixedCatalog::new(vec![
            firm(320, 160),
            firm(480, 320),
        ]));
        let wide = Size::builder(320, 2.0)
            .media_query("(min-width: 800px)")
            .build()
            .unwrap();
        let slot = Slot::new(vec![wide, sized(480, 480, 1.5)]);
        let html = slot.render(&generator, "cat.jpg", "A cat").unwrap().into_string();
        assert!(html.starts_with("<picture>"));
        assert!(html.ends_with("</picture>"));
        assert!(html.contains("<source "));
        assert!(html.contains("<img "));
    }

    #[test]
    fn render_propagates_catalog_failure() {
        let mut catalog = FixedCatalog::new(vec![firm(320, 160)]);
        catalog.fail_listing = true;
        let generator = CatalogGenerator::new(catalog);
        let slot = Slot::new(vec![sized(320, 320, 2.0)]);
        assert!(slot.render(&generator, "cat.jpg", "").is_err());
    }

    #[test]
    fn group_returns_first_matching_slot() {
        let hero = Slot::new(vec![sized(900, 900, 2.0)]);
        let grid = Slot::new(vec![sized(320, 320, 1.5)]);
        let group = SlotGroup::new(vec![
            (SlotRule::index(1), hero),
            (SlotRule::All, grid),
        ]);

        assert_eq!(group.slot_for_nth(1).unwrap().sizes()[0].min_width(), 900);
        assert_eq!(group.slot_for_nth(2).unwrap().sizes()[0].min_width(), 320);
        assert_eq!(group.slot_for_nth(99).unwrap().sizes()[0].min_width(), 320);
    }

    #[test]
    fn group_without_match_is_a_lookup_error() {
        let hero = Slot::new(vec![sized(900, 900, 2.0)]);
        let group = SlotGroup::new(vec![(SlotRule::index(1), hero)]);
        let err = group.slot_for_nth(3).unwrap_err();
        assert_eq!(err, SlotError::NoSlotForIndex(3));
    }

    #[test]
    fn up_to_rule_covers_leading_indexes() {
        let lead = Slot::new(vec![sized(600, 600, 2.0)]);
        let rest = Slot::new(vec![sized(320, 320, 2.0)]);
        let group = SlotGroup::new(vec![
            (SlotRule::up_to(2), lead),
            (SlotRule::All, rest),
        ]);
        assert_eq!(group.slot_for_nth(2).unwrap().sizes()[0].min_width(), 600);
        assert_eq!(group.slot_for_nth(3).unwrap().sizes()[0].min_width(), 320);
    }
}
