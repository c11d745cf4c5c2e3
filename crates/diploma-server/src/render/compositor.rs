//! Headless Chromium document compositor.

use std::path::PathBuf;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};

use super::DocumentCompositor;
use crate::error::AppError;

/// Page setup used when printing markup to PDF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFormat {
    /// Paper width in inches, before orientation is applied.
    pub paper_width: f64,
    /// Paper height in inches, before orientation is applied.
    pub paper_height: f64,
    pub landscape: bool,
    pub print_background: bool,
    /// Let `@page` rules in the markup override the paper size.
    pub prefer_css_page_size: bool,
}

impl PageFormat {
    /// A4 paper, landscape, backgrounds printed, CSS page size honoured.
    pub const A4_LANDSCAPE: PageFormat = PageFormat {
        paper_width: 8.27,
        paper_height: 11.69,
        landscape: true,
        print_background: true,
        prefer_css_page_size: true,
    };

    fn to_print_options(self) -> PrintToPdfOptions {
        PrintToPdfOptions {
            landscape: Some(self.landscape),
            print_background: Some(self.print_background),
            paper_width: Some(self.paper_width),
            paper_height: Some(self.paper_height),
            prefer_css_page_size: Some(self.prefer_css_page_size),
            ..Default::default()
        }
    }
}

/// Compositor that prints markup to PDF through headless Chromium.
///
/// A fresh browser is launched for every document and torn down once the
/// PDF has been produced.
#[derive(Debug, Clone)]
pub struct ChromeCompositor {
    chrome_path: Option<PathBuf>,
    format: PageFormat,
}

impl ChromeCompositor {
    /// Creates a compositor using the given Chromium binary, or the one found
    /// on the system when `chrome_path` is `None`.
    pub fn new(chrome_path: Option<PathBuf>) -> Self {
        Self {
            chrome_path,
            format: PageFormat::A4_LANDSCAPE,
        }
    }

    pub fn format(&self) -> PageFormat {
        self.format
    }
}

#[async_trait]
impl DocumentCompositor for ChromeCompositor {
    async fn compose(&self, markup: String) -> Result<Vec<u8>, AppError> {
        let chrome_path = self.chrome_path.clone();
        let format = self.format;

        // headless_chrome drives the browser synchronously.
        tokio::task::spawn_blocking(move || print_to_pdf(chrome_path, format, &markup))
            .await
            .map_err(|e| AppError::Internal(format!("Compositor task failed: {}", e)))?
    }
}

fn print_to_pdf(
    chrome_path: Option<PathBuf>,
    format: PageFormat,
    markup: &str,
) -> Result<Vec<u8>, AppError> {
    let options = LaunchOptions::default_builder()
        .headless(true)
        .path(chrome_path)
        .build()
        .map_err(|e| AppError::Render(format!("Invalid browser options: {}", e)))?;

    let browser = Browser::new(options)
        .map_err(|e| AppError::Render(format!("Failed to launch browser: {}", e)))?;
    let tab = browser
        .new_tab()
        .map_err(|e| AppError::Render(format!("Failed to open tab: {}", e)))?;

    tab.navigate_to(&markup_data_url(markup))
        .and_then(|tab| tab.wait_until_navigated())
        .map_err(|e| AppError::Render(format!("Failed to load certificate markup: {}", e)))?;

    let pdf = tab
        .print_to_pdf(Some(format.to_print_options()))
        .map_err(|e| AppError::Render(format!("Failed to print certificate: {}", e)))?;

    tracing::debug!(bytes = pdf.len(), "Composed certificate document");
    Ok(pdf)
}

/// Wraps markup in a `data:` URL the browser can navigate to.
fn markup_data_url(markup: &str) -> String {
    format!("data:text/html;base64,{}", BASE64_STANDARD.encode(markup))
}
