//! Opening a book's detail page outside the application.

use std::io;
use std::process::{Child, Command};

use url::Url;

/// Hands a URL to whatever shows web pages on this machine.
///
/// Fire-and-forget: callers do not wait for the page to load.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &Url);
}

/// Opens links with the platform's default URL handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl SystemOpener {
    fn spawn(url: &str) -> io::Result<Child> {
        if cfg!(target_os = "windows") {
            // explorer.exe leaves the console modes alone; cmd is the fallback.
            Command::new("explorer")
                .arg(url)
                .spawn()
                .or_else(|_| Command::new("cmd").args(["/C", "start", "", url]).spawn())
        } else if cfg!(target_os = "macos") {
            Command::new("open").arg(url).spawn()
        } else {
            Command::new("xdg-open").arg(url).spawn()
        }
    }
}

impl LinkOpener for SystemOpener {
    fn open(&self, url: &Url) {
        match Self::spawn(url.as_str()) {
            Ok(_) => tracing::info!(url = %url, "opened detail page"),
            Err(e) => tracing::warn!(url = %url, "failed to open detail page: {e}"),
        }
    }
}
