//! One negotiable markup unit: a `<source>` or the base `<img>`.
//!
//! A [`Source`] owns the ordered run of [`Size`]s that share one aspect
//! ratio and renders them as a single element. The last unit of a
//! [`Slot`](crate::slot::Slot) renders as `<img>` — a `<picture>` must end
//! with one, and a lone unit skips the `<picture>` wrapper entirely — every
//! earlier unit renders as `<source>` carrying a `media` attribute.
//!
//! Rendering goes through [maud](https://maud.lambda.xyz/), the same
//! compile-time HTML macros used for every fragment this crate emits:
//! attribute values are auto-escaped and malformed markup is a build error.

use crate::catalog::CatalogError;
use crate::size::Size;
use crate::srcset::{Src, SrcsetGenerator};
use maud::{Markup, html};

/// A run of same-aspect-ratio sizes rendered as one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    sizes: Vec<Size>,
    as_img: bool,
}

impl Source {
    pub(crate) fn new(sizes: Vec<Size>, as_img: bool) -> Self {
        Self { sizes, as_img }
    }

    /// The sizes covered by this unit, in browser evaluation order.
    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    /// Whether this unit renders as the base `<img>` element.
    pub fn as_img(&self) -> bool {
        self.as_img
    }

    /// Render the `<source>`/`<img>` element for `image`.
    ///
    /// The `srcset` combines every size's entries, de-duplicated by URL
    /// across sizes (one variant may satisfy several sizes) and stably
    /// sorted ascending by width, falling back to the density multiplier.
    /// The order is cosmetic but deterministic. A size contributing no
    /// entries is fine; if every size comes up empty the element carries an
    /// empty `srcset`, which is degenerate but valid output.
    ///
    /// The `sizes` attribute renders each size's condition and width except
    /// the last, which contributes its width only — browsers fall through
    /// to the final entry unconditionally, so it must carry no condition.
    /// `alt` is used only in the `<img>` case.
    pub fn render(
        &self,
        generator: &dyn SrcsetGenerator,
        image: &str,
        alt: &str,
    ) -> Result<Markup, CatalogError> {
        let mut entries: Vec<Src> = Vec::new();
        for size in &self.sizes {
            for src in generator.list_for(image, size)? {
                if !entries.iter().any(|e| e.url() == src.url()) {
                    entries.push(src);
                }
            }
        }
        // Not really needed, but makes debugging nicer.
        entries.sort_by_key(Src::order_key);

        let srcset = entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let count = self.sizes.len();
        let sizes_attr = self
            .sizes
            .iter()
            .enumerate()
            .map(|(i, size)| {
                if i + 1 == count {
                    size.render_width_only()
                } else {
                    size.render()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        Ok(if self.as_img {
            html! { img srcset=(srcset) sizes=(sizes_attr) alt=(alt); }
        } else {
            let media = self.sizes.last().and_then(|s| s.media_query());
            html! { source srcset=(srcset) sizes=(sizes_attr) media=[media]; }
        })
    }
}
