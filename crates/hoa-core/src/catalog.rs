//! Fixed data resources consumed by the calculators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a catalog resource is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    /// A JSON document
    Json,
    /// A markdown document rendered with the content converter
    Markdown,
}

/// A data file the calculator pages load at runtime.
///
/// Paths are relative to a calculator page two levels below the
/// repository root, which is why they all start with `../../`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataAsset {
    /// Water-provider tariffs
    WaterProviders,
    /// Electricity tariffs
    ElectricityTariffs,
    /// Nutrient mix presets
    NutrientPresets,
    /// Ventilation recommendation text
    VentilationRecommendations,
    /// Dehumidification recommendation text
    DehumidificationRecommendations,
}

impl DataAsset {
    /// Every catalog entry, in declaration order.
    pub const ALL: [DataAsset; 5] = [
        DataAsset::WaterProviders,
        DataAsset::ElectricityTariffs,
        DataAsset::NutrientPresets,
        DataAsset::VentilationRecommendations,
        DataAsset::DehumidificationRecommendations,
    ];

    /// The page-relative path of the resource.
    pub fn path(&self) -> &'static str {
        match self {
            DataAsset::WaterProviders => "../../data/water_providers.json",
            DataAsset::ElectricityTariffs => "../../data/electricity_tariffs.json",
            DataAsset::NutrientPresets => "../../data/nutrient_presets.json",
            DataAsset::VentilationRecommendations => "../../Recommendations/ventilation.md",
            DataAsset::DehumidificationRecommendations => {
                "../../Recommendations/dehumidification.md"
            }
        }
    }

    /// The encoding of the resource.
    pub fn kind(&self) -> PayloadKind {
        match self {
            DataAsset::WaterProviders
            | DataAsset::ElectricityTariffs
            | DataAsset::NutrientPresets => PayloadKind::Json,
            DataAsset::VentilationRecommendations
            | DataAsset::DehumidificationRecommendations => PayloadKind::Markdown,
        }
    }

    /// Short stable name, used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataAsset::WaterProviders => "water-providers",
            DataAsset::ElectricityTariffs => "electricity-tariffs",
            DataAsset::NutrientPresets => "nutrient-presets",
            DataAsset::VentilationRecommendations => "ventilation-recommendations",
            DataAsset::DehumidificationRecommendations => "dehumidification-recommendations",
        }
    }

    /// Looks an asset up by its short name.
    pub fn from_name(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|asset| asset.as_str() == raw)
    }
}

impl fmt::Display for DataAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_page_relative() {
        for asset in DataAsset::ALL {
            assert!(asset.path().starts_with("../../"), "{asset}");
        }
    }

    #[test]
    fn test_kind_matches_extension() {
        for asset in DataAsset::ALL {
            let expected = if asset.path().ends_with(".json") {
                PayloadKind::Json
            } else {
                PayloadKind::Markdown
            };
            assert_eq!(asset.kind(), expected);
        }
    }

    #[test]
    fn test_from_name_round_trip() {
        for asset in DataAsset::ALL {
            assert_eq!(DataAsset::from_name(asset.as_str()), Some(asset));
        }
        assert_eq!(
            DataAsset::from_name(" Water-Providers "),
            Some(DataAsset::WaterProviders)
        );
        assert_eq!(DataAsset::from_name("harvest"), None);
    }
}
