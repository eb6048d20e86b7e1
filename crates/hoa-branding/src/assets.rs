//! Brand image loading.
//!
//! Each asset URL is fetched at most once per [`AssetLoader`]. Callers that
//! ask for the same URL while a fetch is in flight wait on that fetch rather
//! than starting their own. A failed fetch is cached as absent.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex, PoisonError};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hoa_fetch::Transport;
use serde::Serialize;
use tokio::sync::OnceCell;

/// Media type assumed when the response carries none.
const DEFAULT_MEDIA_TYPE: &str = "image/png";

/// A loaded brand image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandAsset {
    /// `data:<type>;base64,<body>` URL
    pub data_url: String,
    /// Natural width in pixels, at least 1
    pub width: u32,
    /// Natural height in pixels, at least 1
    pub height: u32,
}

impl BrandAsset {
    /// Build an asset from a response body.
    ///
    /// Dimensions are read from the image header; formats that cannot be
    /// decoded (such as SVG) get 1x1.
    pub fn from_bytes(content_type: Option<&str>, body: &[u8]) -> Self {
        let media_type = content_type
            .and_then(|ct| ct.split(';').next())
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_MEDIA_TYPE);
        let (width, height) = image_dimensions(body).unwrap_or((1, 1));
        Self {
            data_url: format!("data:{media_type};base64,{}", STANDARD.encode(body)),
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Height that keeps the aspect ratio at `width`.
    pub fn height_for_width(&self, width: f64) -> f64 {
        width * f64::from(self.height) / f64::from(self.width)
    }

    /// Width that keeps the aspect ratio at `height`.
    pub fn width_for_height(&self, height: f64) -> f64 {
        height * f64::from(self.width) / f64::from(self.height)
    }
}

fn image_dimensions(body: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(body))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// The three brand images; any may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BrandAssets {
    /// Wordmark logo drawn above the title
    pub logo: Option<BrandAsset>,
    /// Mascot drawn left of the title
    pub nepenthes: Option<BrandAsset>,
    /// Mascot drawn right of the title and used as the watermark
    pub cactus: Option<BrandAsset>,
}

impl BrandAssets {
    /// Whether at least one asset loaded.
    pub fn any(&self) -> bool {
        self.logo.is_some() || self.nepenthes.is_some() || self.cactus.is_some()
    }

    /// Names of the assets that failed to load.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("logo", self.logo.is_none()),
            ("nepenthes", self.nepenthes.is_none()),
            ("cactus", self.cactus.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }
}

type AssetSlot = Arc<OnceCell<Option<BrandAsset>>>;

/// Per-URL memoizing image loader.
pub struct AssetLoader {
    transport: Arc<dyn Transport>,
    slots: Mutex<HashMap<String, AssetSlot>>,
}

impl AssetLoader {
    /// Creates a loader that fetches through `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Load the image at `url`, or `None` if it cannot be fetched.
    pub async fn load(&self, url: &str) -> Option<BrandAsset> {
        if url.is_empty() {
            return None;
        }
        let slot = self.slot(url);
        slot.get_or_init(|| self.fetch(url)).await.clone()
    }

    /// Number of distinct URLs requested so far.
    pub fn cached_urls(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn slot(&self, url: &str) -> AssetSlot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(url.to_string()).or_default())
    }

    async fn fetch(&self, url: &str) -> Option<BrandAsset> {
        match self.transport.get(url).await {
            Ok(response) if response.is_success() => {
                let asset = BrandAsset::from_bytes(response.content_type.as_deref(), &response.body);
                tracing::debug!(url, width = asset.width, height = asset.height, "Loaded brand asset");
                Some(asset)
            }
            Ok(response) => {
                tracing::warn!(url, status = response.status, "Unable to load branding asset");
                None
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Unable to load branding asset");
                None
            }
        }
    }
}

impl std::fmt::Debug for AssetLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetLoader")
            .field("cached_urls", &self.cached_urls())
            .finish()
    }
}
