//! Configuration for the helper crates.
//!
//! Every value has a compiled-in default matching the deployed calculators,
//! so most callers use [`HoaConfig::default()`] and never touch a file. The
//! command-line tool can override any section from TOML:
//!
//! ```toml
//! [preview.canonical]
//! owner = "hydro-oasis"
//! repo = "hoa-calculators"
//! branch = "main"
//!
//! [harvest]
//! capacity = 25
//!
//! [branding.layout]
//! brand_title = "Hydro Oasis"
//! ```
//!
//! Resolution order for the config file:
//! 1. Explicit path argument
//! 2. `HOA_CONFIG` environment variable
//! 3. `<platform config dir>/hoa/config.toml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::preview::PreviewContext;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "HOA_CONFIG";

/// Project name used for the platform config directory.
pub const PROJECT_NAME: &str = "hoa";

/// Storage key the harvest list lives under.
pub const HARVEST_STORAGE_KEY: &str = "hoa.harvest.payloads.v1";

/// Maximum number of harvest payloads kept.
pub const HARVEST_CAPACITY: usize = 25;

/// Brand logo image.
pub const LOGO_URL: &str =
    "https://cdn.shopify.com/s/files/1/0709/5261/6094/files/Hydro_Oasis_Logo.svg?v=1750645434";

/// Nepenthes mascot image, drawn left of the title.
pub const NEPENTHES_URL: &str =
    "https://cdn.shopify.com/s/files/1/0709/5261/6094/files/Nepenthes_Mascot.png?v=1750645317";

/// Cactus mascot image, drawn right of the title and used as the watermark.
pub const CACTUS_URL: &str =
    "https://cdn.shopify.com/s/files/1/0709/5261/6094/files/Cactus_Mascot.png?v=1750645317";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoaConfig {
    /// Preview-host detection
    pub preview: PreviewConfig,
    /// Fallback mirrors used in preview mode
    pub mirrors: MirrorConfig,
    /// Cross-calculator handoff store
    pub harvest: HarvestConfig,
    /// Report branding
    pub branding: BrandingConfig,
}

/// How preview hosting is recognized and parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Context used outside preview mode and when parsing fails
    pub canonical: PreviewContext,
    /// Host names (or parent domains) that serve previews
    pub host_patterns: Vec<String>,
    /// Top-level repository directories that mark where the branch ends
    pub content_markers: Vec<String>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            canonical: PreviewContext::canonical(),
            host_patterns: [
                "raw.githubusercontent.com",
                "github.com",
                "raw.githack.com",
                "rawcdn.githack.com",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            content_markers: ["calculators", "shared", "data", "Recommendations", "assets"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// One mirror base URL template.
///
/// `{owner}`, `{repo}` and `{branch}` are substituted from the preview
/// context. The expanded base always ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorTemplate {
    /// URL template
    pub url: String,
    /// Skip this mirror when the branch name contains `/`
    #[serde(default)]
    pub flat_branch_only: bool,
}

impl MirrorTemplate {
    /// Creates a template usable with any branch name.
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            flat_branch_only: false,
        }
    }

    /// Creates a template that cannot address nested branch names.
    pub fn flat_branch_only<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            flat_branch_only: true,
        }
    }
}

/// Ordered mirror templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Templates in fallback priority order
    pub templates: Vec<MirrorTemplate>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            templates: vec![
                MirrorTemplate::new("https://raw.githubusercontent.com/{owner}/{repo}/{branch}/"),
                MirrorTemplate::flat_branch_only("https://cdn.jsdelivr.net/gh/{owner}/{repo}@{branch}/"),
                MirrorTemplate::new("https://raw.githack.com/{owner}/{repo}/{branch}/"),
            ],
        }
    }
}

/// Harvest store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Storage key holding the payload list
    pub storage_key: String,
    /// Number of payloads kept, newest first
    pub capacity: usize,
    /// Directory for file-backed storage (CLI only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            storage_key: HARVEST_STORAGE_KEY.to_string(),
            capacity: HARVEST_CAPACITY,
            storage_dir: None,
        }
    }
}

impl HarvestConfig {
    /// The configured storage directory, or the platform data directory.
    pub fn resolved_storage_dir(&self) -> Option<PathBuf> {
        self.storage_dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join(PROJECT_NAME)))
    }
}

/// Brand asset locations and header layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingConfig {
    /// Image URLs
    pub assets: BrandAssetUrls,
    /// Header and watermark geometry
    pub layout: HeaderLayout,
}

/// The three brand images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandAssetUrls {
    /// Logo drawn above the title
    pub logo: String,
    /// Mascot drawn left of the title
    pub nepenthes: String,
    /// Mascot drawn right of the title and used as the watermark
    pub cactus: String,
}

impl Default for BrandAssetUrls {
    fn default() -> Self {
        Self {
            logo: LOGO_URL.to_string(),
            nepenthes: NEPENTHES_URL.to_string(),
            cactus: CACTUS_URL.to_string(),
        }
    }
}

/// Header and watermark geometry, in document units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderLayout {
    /// Y coordinate of the top of the header
    pub start_y: f64,
    /// Logo width; height follows the aspect ratio
    pub logo_width: f64,
    /// Gap between the logo and the title
    pub logo_spacing: f64,
    /// Title text
    pub brand_title: String,
    /// Title font family
    pub brand_font: String,
    /// Title font size in points
    pub brand_font_size: f64,
    /// Mascot height; width follows the aspect ratio
    pub mascot_height: f64,
    /// Gap between a mascot and the title text
    pub mascot_spacing: f64,
    /// Minimum distance between a mascot and the page edge
    pub mascot_margin: f64,
    /// Space below the title baseline
    pub header_padding: f64,
    /// Watermark width; height follows the aspect ratio
    pub watermark_width: f64,
    /// Distance from the bottom-right page corner
    pub watermark_margin: f64,
    /// Watermark opacity, 0.0 to 1.0
    pub watermark_opacity: f64,
    /// Space between the header and the caller's content
    pub content_gap: f64,
}

impl Default for HeaderLayout {
    fn default() -> Self {
        Self {
            start_y: 12.0,
            logo_width: 44.0,
            logo_spacing: 4.0,
            brand_title: "Hydro Oasis".to_string(),
            brand_font: "helvetica".to_string(),
            brand_font_size: 22.0,
            mascot_height: 18.0,
            mascot_spacing: 6.0,
            mascot_margin: 8.0,
            header_padding: 6.0,
            watermark_width: 36.0,
            watermark_margin: 14.0,
            watermark_opacity: 0.12,
            content_gap: 10.0,
        }
    }
}

impl HoaConfig {
    /// Default config file location on this platform.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolve which config file to use, without checking that it exists.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        Self::default_config_path()
    }

    /// Load configuration, falling back to defaults when no file exists.
    ///
    /// A file that exists but does not parse is an error.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Reject values that would break the helpers at runtime.
    pub fn validate(&self) -> Result<()> {
        let canonical = &self.preview.canonical;
        if canonical.owner.is_empty() || canonical.repo.is_empty() || canonical.branch.is_empty()
        {
            return Err(Error::config(
                "preview.canonical owner, repo and branch must be non-empty",
            ));
        }
        if self.harvest.capacity == 0 {
            return Err(Error::config("harvest.capacity must be at least 1"));
        }
        if self.harvest.storage_key.is_empty() {
            return Err(Error::config("harvest.storage_key must be non-empty"));
        }
        let opacity = self.branding.layout.watermark_opacity;
        if !(0.0..=1.0).contains(&opacity) {
            return Err(Error::config(format!(
                "branding.layout.watermark_opacity must be within 0..=1, got {opacity}"
            )));
        }
        Ok(())
    }
}
