//! Data-zone hover explorer: legend keys and the readout for the zone under
//! the pointer.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use thiserror::Error;

pub const ZONE_NAME_PROPERTY: &str = "DZName";
pub const ZONE_RANK_PROPERTY: &str = "Percentv2";
pub const HOVER_PROMPT: &str = "Hover over a data zone!";
pub const LEGEND_ALPHA: f64 = 0.8;

const DECILE_LABELS: [&str; 10] = ["<10", "20", "30", "40", "50", "60", "70", "80", "90", "100"];

// Diverging red-blue ramp, most deprived first
const DECILE_COLORS: [&str; 10] = [
    "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#d1e5f0", "#92c5de", "#4393c3",
    "#2166ac", "#053061",
];

#[derive(Error, Debug, PartialEq)]
pub enum ColorError {
    #[error("Expected a #rrggbb colour, got {0:?}")]
    Malformed(String),
}

/// Converts `#rrggbb` to a CSS `rgba(...)` string.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Result<String, ColorError> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.is_ascii())
        .ok_or_else(|| ColorError::Malformed(hex.to_string()))?;
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError::Malformed(hex.to_string()))
    };
    Ok(format!(
        "rgba({}, {}, {}, {})",
        channel(0..2)?,
        channel(2..4)?,
        channel(4..6)?,
        alpha
    ))
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendKey {
    pub label: String,
    pub background: String,
    /// Dark swatches get white text.
    pub light_text: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub keys: Vec<LegendKey>,
}

impl Legend {
    /// Ten decile keys for the deprivation rank layer.
    pub fn percentile_deciles() -> Result<Self, ColorError> {
        let keys = DECILE_LABELS
            .iter()
            .zip(DECILE_COLORS)
            .enumerate()
            .map(|(i, (label, color))| {
                Ok(LegendKey {
                    label: label.to_string(),
                    background: hex_to_rgba(color, LEGEND_ALPHA)?,
                    light_text: i <= 1 || i >= 8,
                })
            })
            .collect::<Result<Vec<_>, ColorError>>()?;
        Ok(Self { keys })
    }
}

/// A rendered data zone under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneFeature {
    pub geometry: Option<Geometry>,
    pub properties: JsonObject,
}

impl From<Feature> for ZoneFeature {
    fn from(feature: Feature) -> Self {
        Self {
            geometry: feature.geometry,
            properties: feature.properties.unwrap_or_default(),
        }
    }
}

impl ZoneFeature {
    pub fn name(&self) -> Option<String> {
        self.properties.get(ZONE_NAME_PROPERTY).map(display_value)
    }

    pub fn rank(&self) -> Option<String> {
        self.properties.get(ZONE_RANK_PROPERTY).map(display_value)
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HoverReadout {
    Zone { name: String, rank: String },
    Prompt,
}

impl HoverReadout {
    /// Readout for the topmost zone, or the prompt when the pointer is off the layer.
    pub fn from_zones(zones: &[ZoneFeature]) -> Self {
        match zones.first() {
            Some(zone) => HoverReadout::Zone {
                name: zone.name().unwrap_or_default(),
                rank: zone.rank().unwrap_or_default(),
            },
            None => HoverReadout::Prompt,
        }
    }

    pub fn text(&self) -> String {
        match self {
            HoverReadout::Zone { name, rank } => format!("{}\nRank: {} %", name, rank),
            HoverReadout::Prompt => HOVER_PROMPT.to_string(),
        }
    }
}

/// Geometry-only copy of the hovered zones for the outline layer.
pub fn hover_outline(zones: &[ZoneFeature]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: zones
            .iter()
            .map(|z| Feature {
                bbox: None,
                geometry: z.geometry.clone(),
                id: None,
                properties: None,
                foreign_members: None,
            })
            .collect(),
        foreign_members: None,
    }
}
