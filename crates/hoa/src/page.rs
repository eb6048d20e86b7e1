//! The per-page session.
//!
//! A calculator page creates one [`HoaPage`] when it loads. Everything it
//! holds is scoped to that page: the detected preview context, the mirror
//! bases, the brand asset cache, and the harvest store handle.

use std::sync::Arc;

use hoa_branding::{AssetLoader, Branding, Decorated, PdfDocument};
use hoa_core::{
    DataAsset, Error, HoaConfig, Outcome, PageContext, PageLocation, PageSession, PayloadKind,
    Result,
};
use hoa_fetch::{AssetPayload, MirroredFetcher, ReqwestTransport, Transport};
use hoa_harvest::{FileStorage, HarvestStore, MemoryStorage, StorageBackend};
use serde::de::DeserializeOwned;

/// Helpers for one calculator page.
#[derive(Debug)]
pub struct HoaPage {
    config: HoaConfig,
    session: Arc<PageSession>,
    fetcher: MirroredFetcher,
    harvest: HarvestStore,
    branding: Branding,
}

impl HoaPage {
    /// Assemble a page from explicit collaborators.
    pub fn new(
        config: HoaConfig,
        location: Option<PageLocation>,
        transport: Arc<dyn Transport>,
        storage: Arc<dyn StorageBackend>,
    ) -> Self {
        let session = Arc::new(PageSession::from_config(location, &config));
        let fetcher = MirroredFetcher::new(Arc::clone(&session), Arc::clone(&transport), &config.mirrors);
        let harvest = HarvestStore::new(storage, &config.harvest);
        let branding = Branding::new(Arc::new(AssetLoader::new(transport)), &config.branding);
        Self {
            config,
            session,
            fetcher,
            harvest,
            branding,
        }
    }

    /// Open a page over HTTP with file-backed harvest storage.
    ///
    /// Relative paths resolve against `location`. When no data directory is
    /// configured or discoverable, harvest storage lives in memory.
    pub fn open(config: HoaConfig, location: Option<PageLocation>) -> Result<Self> {
        let mut transport = ReqwestTransport::new()?;
        if let Some(location) = &location {
            transport = transport.with_base(location);
        }

        let storage: Arc<dyn StorageBackend> = match config.harvest.resolved_storage_dir() {
            Some(dir) => Arc::new(FileStorage::new(dir)),
            None => {
                tracing::warn!("No data directory available; harvest payloads will not persist");
                Arc::new(MemoryStorage::new())
            }
        };

        Ok(Self::new(config, location, Arc::new(transport), storage))
    }

    /// The configuration this page was opened with.
    pub fn config(&self) -> &HoaConfig {
        &self.config
    }

    /// The page session.
    pub fn session(&self) -> &PageSession {
        &self.session
    }

    /// Canonical or preview context, detected once.
    pub fn page_context(&self) -> &PageContext {
        self.session.page_context()
    }

    /// Whether the page is served from a repository preview.
    pub fn is_preview(&self) -> bool {
        self.session.is_preview()
    }

    /// The mirrored fetcher.
    pub fn fetcher(&self) -> &MirroredFetcher {
        &self.fetcher
    }

    /// The harvest handoff store.
    pub fn harvest(&self) -> &HarvestStore {
        &self.harvest
    }

    /// The report decorator.
    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    /// Fetch and deserialize a JSON resource.
    pub async fn load_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetcher.fetch_json(path).await
    }

    /// Fetch a text resource.
    pub async fn load_text(&self, path: &str) -> Result<String> {
        self.fetcher.fetch_text(path).await
    }

    /// Fetch a catalog resource.
    pub async fn load_asset(&self, asset: DataAsset) -> Result<AssetPayload> {
        self.fetcher.fetch_asset(asset).await
    }

    /// Fetch a recommendation document and render it to HTML.
    pub async fn load_recommendation(&self, asset: DataAsset) -> Result<String> {
        if asset.kind() != PayloadKind::Markdown {
            return Err(Error::decode(asset.path(), format!("{asset} is not a markdown document")));
        }
        let markdown = self.fetcher.fetch_text(asset.path()).await?;
        Ok(hoa_content::md_to_html(&markdown))
    }

    /// Hand a computed result to the Harvest calculator.
    pub fn push_harvest<T: serde::Serialize + ?Sized>(&self, payload: &T) -> Outcome<()> {
        self.harvest.push(payload)
    }

    /// Payloads waiting for the Harvest calculator, newest first.
    pub fn harvest_payloads(&self) -> Outcome<Vec<serde_json::Value>> {
        self.harvest.payloads()
    }

    /// Brand a report document.
    pub async fn decorate<D: PdfDocument>(&self, doc: D) -> Outcome<Decorated<D>> {
        self.branding.decorate(doc).await
    }
}
