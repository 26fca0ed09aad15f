//! Viewport size conditions for the `sizes` attribute.
//!
//! A [`Size`] is one entry of a `sizes` attribute: a media-query condition
//! paired with the width the image is expected to render at while the
//! condition holds, plus the aspect ratio the image must have under that
//! condition. Browsers evaluate `sizes` entries left to right and stop at
//! the first matching condition, so the declaration order of sizes is part
//! of their meaning — nothing in this crate ever reorders them.
//!
//! ## Width window
//!
//! The expected rendered width is a window `[min_width, max_width]` in CSS
//! pixels at 1:1 density. A fluid layout column might render anywhere from
//! 320px to 480px wide depending on the viewport; a fixed column has
//! `min_width == max_width`. Variant selection uses the window to decide
//! which pre-rendered widths are worth offering (see
//! [`selector`](crate::selector)).
//!
//! ## Aspect ratio tolerance
//!
//! `aspect_ratio_tolerance` widens the ratio test into a symmetric band:
//! a candidate ratio `r` matches when
//! `aspect_ratio - tolerance <= r <= aspect_ratio + tolerance`. The default
//! tolerance is 0 (exact match).
//!
//! Sizes are immutable values built through [`Size::builder`], which
//! rejects malformed input at construction time — rendering never fails.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SizeError {
    #[error("max width {max} is smaller than min width {min}")]
    InvertedWidthRange { min: u32, max: u32 },
    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f64),
    #[error("aspect ratio tolerance must be non-negative and finite, got {0}")]
    InvalidTolerance(f64),
}

/// One condition of a `sizes` attribute with the image dimensions expected
/// while it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Size {
    min_width: u32,
    max_width: u32,
    aspect_ratio: f64,
    aspect_ratio_tolerance: f64,
    media_query: Option<String>,
    viewport_width: Option<f64>,
}

impl Size {
    /// Start building a size with the required fields.
    ///
    /// `min_width` doubles as the maximum unless
    /// [`max_width`](SizeBuilder::max_width) is set. Aspect ratio reads best
    /// written as a fraction, e.g. `16.0 / 9.0`.
    pub fn builder(min_width: u32, aspect_ratio: f64) -> SizeBuilder {
        SizeBuilder {
            min_width,
            aspect_ratio,
            max_width: None,
            media_query: None,
            viewport_width: None,
            aspect_ratio_tolerance: 0.0,
        }
    }

    /// Minimum expected rendered width in pixels at 1:1 density.
    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    /// Maximum expected rendered width in pixels at 1:1 density.
    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    /// Target width/height ratio.
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// The media-query condition, including parentheses. `None` means the
    /// entry always applies and must be the last one evaluated in its group.
    pub fn media_query(&self) -> Option<&str> {
        self.media_query.as_deref()
    }

    /// Whether `ratio` falls within the tolerance band around the target
    /// aspect ratio.
    pub fn matches_aspect_ratio(&self, ratio: f64) -> bool {
        let min = self.aspect_ratio - self.aspect_ratio_tolerance;
        let max = self.aspect_ratio + self.aspect_ratio_tolerance;
        min <= ratio && ratio <= max
    }

    /// Render only the width portion of the `sizes` entry: `"{vw}vw"` when a
    /// viewport width was declared, `"{min_width}px"` otherwise.
    pub fn render_width_only(&self) -> String {
        match self.viewport_width {
            Some(vw) => format!("{vw}vw"),
            None => format!("{}px", self.min_width),
        }
    }

    /// Render the full `sizes` entry: condition (when present) followed by
    /// the expected width.
    pub fn render(&self) -> String {
        match &self.media_query {
            Some(query) => format!("{query} {}", self.render_width_only()),
            None => self.render_width_only(),
        }
    }
}

/// Builder for [`Size`]. Validation happens in [`build`](SizeBuilder::build)
/// so malformed declarations surface where the size is constructed, never at
/// render time.
#[derive(Debug, Clone)]
pub struct SizeBuilder {
    min_width: u32,
    aspect_ratio: f64,
    max_width: Option<u32>,
    media_query: Option<String>,
    viewport_width: Option<f64>,
    aspect_ratio_tolerance: f64,
}

impl SizeBuilder {
    /// Upper end of the expected width window. Defaults to `min_width`.
    pub fn max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Media-query condition for this entry, including parentheses.
    pub fn media_query(mut self, query: impl Into<String>) -> Self {
        self.media_query = Some(query.into());
        self
    }

    /// Express the rendered width as `vw` units instead of `{min_width}px`.
    pub fn viewport_width(mut self, vw: f64) -> Self {
        self.viewport_width = Some(vw);
        self
    }

    /// Symmetric band around the aspect ratio within which candidate ratios
    /// are accepted. Defaults to 0 (exact match).
    pub fn aspect_ratio_tolerance(mut self, tolerance: f64) -> Self {
        self.aspect_ratio_tolerance = tolerance;
        self
    }

    pub fn build(self) -> Result<Size, SizeError> {
        let max_width = self.max_width.unwrap_or(self.min_width);
        if max_width < self.min_width {
            return Err(SizeError::InvertedWidthRange {
                min: self.min_width,
                max: max_width,
            });
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(SizeError::InvalidAspectRatio(self.aspect_ratio));
        }
        if !(self.aspect_ratio_tolerance.is_finite() && self.aspect_ratio_tolerance >= 0.0) {
            return Err(SizeError::InvalidTolerance(self.aspect_ratio_tolerance));
        }
        Ok(Size {
            min_width: self.min_width,
            max_width,
            aspect_ratio: self.aspect_ratio,
            aspect_ratio_tolerance: self.aspect_ratio_tolerance,
            media_query: self.media_query,
            viewport_width: self.viewport_width,
        })
    }
}
