//! Declarative slot configuration.
//!
//! Builds styles, slots, and slot groups from TOML (or JSON) the way a site
//! would declare them next to its templates. The core model never depends
//! on this module — [`Slot`](crate::slot::Slot) and friends are plain
//! constructors — but hand-writing size lists in code gets old fast.
//!
//! ## Schema
//!
//! ```toml
//! [[styles]]
//! name = "teaser"
//! effects = [{ name = "scale_and_crop", width = 480, height = 240 }]
//!
//! [[styles]]
//! name = "content_large"
//! effects = [{ name = "scale", width = 1200 }]
//!
//! [slots.article]
//! sizes = [
//!   { min_width = 960, aspect_ratio = [16, 9], media_query = "(min-width: 1200px)" },
//!   { min_width = 320, max_width = 720, aspect_ratio = [16, 9], viewport_width = 100.0 },
//! ]
//!
//! [slots.teaser_grid]
//! sizes = [{ min_width = 480, aspect_ratio = [2, 1] }]
//!
//! [groups.listing]
//! slots = [
//!   { rule = { index = 1 }, slot = "article" },
//!   { rule = "all", slot = "teaser_grid" },
//! ]
//! ```
//!
//! Aspect ratios read best as `[width, height]` fractions but a plain float
//! works too. Unknown keys are rejected to catch typos early; dangling slot
//! references and malformed size records fail at load time, never at render
//! time.

use crate::size::{Size, SizeError};
use crate::slot::{Slot, SlotGroup, SlotRule};
use crate::styles::{Effect, Style};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid size declaration: {0}")]
    Size(#[from] SizeError),
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Top-level declarative config: styles, named slots, named groups.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlotsConfig {
    pub styles: Vec<StyleDef>,
    pub slots: BTreeMap<String, SlotDef>,
    pub groups: BTreeMap<String, GroupDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleDef {
    pub name: String,
    #[serde(default)]
    pub effects: Vec<EffectDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EffectDef {
    pub name: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(default)]
    pub upscale: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotDef {
    pub sizes: Vec<SizeDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeDef {
    pub min_width: u32,
    pub max_width: Option<u32>,
    pub aspect_ratio: AspectRatioDef,
    pub media_query: Option<String>,
    pub viewport_width: Option<f64>,
    #[serde(default)]
    pub aspect_ratio_tolerance: f64,
}

/// `[16, 9]` fraction form or a plain float.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AspectRatioDef {
    Fraction([u32; 2]),
    Ratio(f64),
}

impl AspectRatioDef {
    fn value(&self) -> f64 {
        match *self {
            // A zero denominator yields a non-finite ratio, rejected by the
            // size builder.
            Self::Fraction([w, h]) => w as f64 / h as f64,
            Self::Ratio(r) => r,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupDef {
    pub slots: Vec<GroupEntryDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupEntryDef {
    pub rule: RuleDef,
    pub slot: String,
}

/// `"all"`, `{ index = n }`, or `{ up_to = n }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RuleDef {
    Keyword(String),
    Index { index: u32 },
    UpTo { up_to: u32 },
}

/// The built artifacts of a [`SlotsConfig`].
#[derive(Debug)]
pub struct SlotSet {
    pub styles: Vec<Style>,
    pub slots: BTreeMap<String, Slot>,
    pub groups: BTreeMap<String, SlotGroup>,
}

impl SlotsConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load from a file, picking the format by extension (`.json` is JSON,
    /// anything else TOML).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        if path.extension().is_some_and(|e| e == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Build the declared styles, slots, and groups, failing fast on
    /// malformed sizes, bad rules, or dangling slot references.
    pub fn build(&self) -> Result<SlotSet, ConfigError> {
        let styles = self
            .styles
            .iter()
            .map(|def| {
                Ok(Style::new(
                    def.name.clone(),
                    def.effects
                        .iter()
                        .map(|e| build_effect(&def.name, e))
                        .collect::<Result<Vec<_>, _>>()?,
                ))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let mut slots = BTreeMap::new();
        for (name, def) in &self.slots {
            let sizes = def
                .sizes
                .iter()
                .map(build_size)
                .collect::<Result<Vec<_>, _>>()?;
            slots.insert(name.clone(), Slot::new(sizes));
        }

        let mut groups = BTreeMap::new();
        for (name, def) in &self.groups {
            let mut entries = Vec::new();
            for entry in &def.slots {
                let slot = slots.get(&entry.slot).cloned().ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "group '{name}' references undeclared slot '{}'",
                        entry.slot
                    ))
                })?;
                entries.push((build_rule(name, &entry.rule)?, slot));
            }
            groups.insert(name.clone(), SlotGroup::new(entries));
        }

        Ok(SlotSet {
            styles,
            slots,
            groups,
        })
    }
}

fn build_size(def: &SizeDef) -> Result<Size, ConfigError> {
    let mut builder = Size::builder(def.min_width, def.aspect_ratio.value())
        .aspect_ratio_tolerance(def.aspect_ratio_tolerance);
    if let Some(max) = def.max_width {
        builder = builder.max_width(max);
    }
    if let Some(query) = &def.media_query {
        builder = builder.media_query(query.clone());
    }
    if let Some(vw) = def.viewport_width {
        builder = builder.viewport_width(vw);
    }
    Ok(builder.build()?)
}

fn build_effect(style: &str, def: &EffectDef) -> Result<Effect, ConfigError> {
    let exact = |name: &str| -> Result<(u32, u32), ConfigError> {
        match (def.width, def.height) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(ConfigError::Validation(format!(
                "style '{style}': effect '{name}' needs both width and height"
            ))),
        }
    };
    Ok(match def.name.as_str() {
        "scale_and_crop" => {
            let (width, height) = exact("scale_and_crop")?;
            Effect::ScaleAndCrop { width, height }
        }
        "resize" => {
            let (width, height) = exact("resize")?;
            Effect::Resize { width, height }
        }
        "crop" => {
            let (width, height) = exact("crop")?;
            Effect::Crop { width, height }
        }
        "scale" => {
            if def.width.is_none() && def.height.is_none() {
                return Err(ConfigError::Validation(format!(
                    "style '{style}': effect 'scale' needs a width or a height"
                )));
            }
            Effect::Scale {
                width: def.width,
                height: def.height,
                upscale: def.upscale,
            }
        }
        other => Effect::Unknown(other.to_string()),
    })
}

fn build_rule(group: &str, def: &RuleDef) -> Result<SlotRule, ConfigError> {
    match def {
        RuleDef::Keyword(word) if word == "all" => Ok(SlotRule::All),
        RuleDef::Keyword(word) => Err(ConfigError::Validation(format!(
            "group '{group}': unknown rule keyword '{word}' (expected \"all\")"
        ))),
        RuleDef::Index { index } => Ok(SlotRule::index(*index)),
        RuleDef::UpTo { up_to } => Ok(SlotRule::up_to(*up_to)),
    }
}
