//! Common harness for page session integration tests.

use std::io::Cursor;
use std::sync::Arc;

use hoa::HoaPage;
use hoa::core::config::{BrandAssetUrls, MirrorConfig, MirrorTemplate};
use hoa::core::{HoaConfig, PageLocation};
use hoa::fetch::ReqwestTransport;
use hoa::harvest::{FileStorage, MemoryStorage, StorageBackend};
use wiremock::MockServer;

/// Preview page path on the local server.
pub const PREVIEW_PAGE: &str = "/acme/hoa/blob/main/calculators/ec/index.html";

/// A local server configured as a preview host with two mirrors.
pub struct TestHarness {
    /// The stand-in for every remote host
    pub server: MockServer,
    /// Configuration pointing at `server`
    pub config: HoaConfig,
}

impl TestHarness {
    /// Start a server and build a matching configuration.
    ///
    /// Mirrors are `/raw/{owner}/{repo}/{branch}/` and, for flat branches
    /// only, `/cdn/{owner}/{repo}@{branch}/`. Brand assets live under `/brand/`.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let uri = server.uri();

        let mut config = HoaConfig::default();
        config.preview.host_patterns = vec!["127.0.0.1".to_string()];
        config.mirrors = MirrorConfig {
            templates: vec![
                MirrorTemplate::new(format!("{uri}/raw/{{owner}}/{{repo}}/{{branch}}/")),
                MirrorTemplate::flat_branch_only(format!("{uri}/cdn/{{owner}}/{{repo}}@{{branch}}/")),
            ],
        };
        config.branding.assets = BrandAssetUrls {
            logo: format!("{uri}/brand/logo.svg"),
            nepenthes: format!("{uri}/brand/nepenthes.png"),
            cactus: format!("{uri}/brand/cactus.png"),
        };

        Self { server, config }
    }

    /// Absolute URL for `path` on the server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.server.uri())
    }

    /// A page at `path` with in-memory harvest storage.
    pub fn page(&self, path: &str) -> HoaPage {
        self.page_with_storage(path, Arc::new(MemoryStorage::new()))
    }

    /// A page at `path` sharing `storage`.
    pub fn page_with_storage(&self, path: &str, storage: Arc<dyn StorageBackend>) -> HoaPage {
        self.build(self.config.clone(), path, storage)
    }

    /// A page at `path` using a modified configuration.
    pub fn page_from(&self, config: HoaConfig, path: &str) -> HoaPage {
        self.build(config, path, Arc::new(MemoryStorage::new()))
    }

    fn build(&self, config: HoaConfig, path: &str, storage: Arc<dyn StorageBackend>) -> HoaPage {
        let location = PageLocation::parse(&self.url(path)).unwrap();
        let transport = ReqwestTransport::new().unwrap().with_base(&location);
        HoaPage::new(config, Some(location), Arc::new(transport), storage)
    }

    /// Paths the server has been asked for, in order.
    pub async fn requested_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.url.path().to_string())
            .collect()
    }
}

/// File-backed storage in a fresh temporary directory.
pub fn file_storage() -> (tempfile::TempDir, Arc<FileStorage>) {
    let dir = tempfile::TempDir::new().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path()));
    (dir, storage)
}

/// Encode a blank PNG of the given size.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    image::RgbaImage::new(width, height)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}
