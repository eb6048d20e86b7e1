//! Handlers for the data, preview, harvest, and branding commands.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use hoa::branding::{DrawOp, PdfDocument, RecordingDocument};
use hoa::core::{PageSession, PreviewDetector};
use hoa::fetch::MockTransport;
use hoa::harvest::MemoryStorage;
use hoa::{HoaConfig, HoaPage, Outcome, PageLocation};
use serde_json::{Value, json};

/// Data URLs longer than this are shortened in printed plans.
const DATA_URL_PREVIEW: usize = 48;

fn parse_location(page_url: Option<&str>) -> Result<Option<PageLocation>> {
    page_url
        .map(|url| PageLocation::parse(url).with_context(|| format!("invalid page URL: {url}")))
        .transpose()
}

/// Report a degraded outcome on stderr and return its value.
fn settle<T>(outcome: Outcome<T>) -> T {
    if let Some(reason) = outcome.reason() {
        eprintln!("warning: {reason}");
    }
    outcome.into_value()
}

/// Fetch `path` and print it.
pub async fn cmd_fetch(config: HoaConfig, path: &str, page_url: Option<&str>, text: bool) -> Result<()> {
    let page = HoaPage::open(config, parse_location(page_url)?)?;
    if text {
        let body = page.load_text(path).await?;
        print!("{body}");
    } else {
        let value: Value = page.load_json(path).await?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

/// Print the candidate URLs for `path`.
pub fn cmd_candidates(config: HoaConfig, path: &str, page_url: &str) -> Result<()> {
    let page = HoaPage::new(
        config,
        parse_location(Some(page_url))?,
        Arc::new(MockTransport::new()),
        Arc::new(MemoryStorage::new()),
    );
    for candidate in page.fetcher().candidates(path) {
        println!("{candidate}");
    }
    Ok(())
}

/// Detection result for `url` as JSON.
pub fn preview_report(config: &HoaConfig, url: &str) -> Result<Value> {
    let location = PageLocation::parse(url).with_context(|| format!("invalid page URL: {url}"))?;
    let session = PageSession::new(location, PreviewDetector::from_config(&config.preview));
    let detection = session.detection();
    Ok(json!({
        "page": detection.value(),
        "degraded": detection.reason(),
    }))
}

/// Print how `url` is classified.
pub fn cmd_preview(config: &HoaConfig, url: &str) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&preview_report(config, url)?)?);
    Ok(())
}

/// Render a markdown file (or stdin for `-`) to HTML.
pub fn cmd_render(file: &str) -> Result<()> {
    let markdown = if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?
    };
    println!("{}", hoa::content::md_to_html(&markdown));
    Ok(())
}

/// Interpret a command-line payload: JSON when it parses, a string otherwise.
pub fn parse_payload(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Push a payload onto the harvest list.
pub fn cmd_harvest_push(config: HoaConfig, raw: &str) -> Result<()> {
    let page = HoaPage::open(config, None)?;
    settle(page.push_harvest(&parse_payload(raw)));
    println!("{}", settle(page.harvest_payloads()).len());
    Ok(())
}

/// Print the harvest list.
pub fn cmd_harvest_list(config: HoaConfig) -> Result<()> {
    let page = HoaPage::open(config, None)?;
    let payloads = settle(page.harvest_payloads());
    println!("{}", serde_json::to_string_pretty(&payloads)?);
    Ok(())
}

/// Clear the harvest list.
pub fn cmd_harvest_clear(config: HoaConfig) -> Result<()> {
    let page = HoaPage::open(config, None)?;
    settle(page.harvest().clear());
    Ok(())
}

/// Shorten a data URL to its media type and first few payload characters.
pub fn abbreviate_data_url(data_url: &str) -> String {
    if data_url.len() <= DATA_URL_PREVIEW {
        return data_url.to_string();
    }
    let cut = (0..=DATA_URL_PREVIEW)
        .rev()
        .find(|i| data_url.is_char_boundary(*i))
        .unwrap_or(0);
    format!("{}... ({} bytes)", &data_url[..cut], data_url.len())
}

/// Draw a branded report of `pages` pages and describe it as JSON.
pub async fn brand_plan(page: &HoaPage, pages: usize) -> Value {
    let outcome = page.decorate(RecordingDocument::a4()).await;
    let degraded = outcome.reason().map(str::to_string);
    let decorated = outcome.into_value();

    let mut doc = decorated.document;
    for _ in 1..pages.max(1) {
        doc.add_page();
    }

    let ops: Vec<DrawOp> = doc
        .into_inner()
        .into_ops()
        .into_iter()
        .map(|op| match op {
            DrawOp::Image {
                page,
                data_url,
                x,
                y,
                width,
                height,
            } => DrawOp::Image {
                page,
                data_url: abbreviate_data_url(&data_url),
                x,
                y,
                width,
                height,
            },
            other => other,
        })
        .collect();

    json!({
        "header_bottom": decorated.report.header_bottom,
        "content_start": decorated.report.content_start,
        "missing_assets": decorated.report.assets.missing(),
        "degraded": degraded,
        "ops": ops,
    })
}

/// Print the drawing plan for a branded report.
pub async fn cmd_brand_plan(config: HoaConfig, pages: usize, offline: bool) -> Result<()> {
    let page = if offline {
        HoaPage::new(
            config,
            None,
            Arc::new(MockTransport::new()),
            Arc::new(MemoryStorage::new()),
        )
    } else {
        HoaPage::open(config, None)?
    };
    let plan = brand_plan(&page, pages).await;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
