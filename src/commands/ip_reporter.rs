use async_trait::async_trait;
use reqwest::Client;
use std::io::Write;
use std::time::Duration;
use tracing::debug;

use crate::utils::config::ToolConfig;
use crate::utils::error::{IpError, KcError, KcResult};

pub const FETCH_FAILED_MESSAGE: &str = "error fetching ip address.";
pub const NOT_CONNECTED_MESSAGE: &str =
    "Couldn't find the ip address. Are you sure you are connected to network?";
pub const COPIED_MESSAGE: &str = "IP address copied to clipboard!";

/// Something that can produce the raw `key=value` trace text
#[async_trait]
pub trait TraceSource: Send + Sync {
    async fn fetch_trace(&self) -> KcResult<String>;
}

/// Destination for the resolved address
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> KcResult<()>;
}

/// Outcome of one `ip` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpReport {
    /// Address printed and placed on the clipboard
    Copied(String),
    /// Address printed, clipboard write failed
    PrintedOnly(String),
    /// Response had no usable `ip=` line
    NotConnected,
    /// Request could not be sent or the body could not be read
    FetchFailed,
}

/// Pull the address out of a trace body.
///
/// Only the first `ip=` line counts, even if its value is blank.
pub fn parse_trace_ip(body: &str) -> Option<String> {
    let value = body.lines().find_map(|line| line.strip_prefix("ip="))?.trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Fetches the trace document over HTTP(S)
pub struct HttpTraceSource {
    client: Client,
    url: String,
}

impl HttpTraceSource {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> KcResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| IpError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn from_config(config: &ToolConfig) -> KcResult<Self> {
        Self::new(config.trace_url.clone(), config.request_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TraceSource for HttpTraceSource {
    async fn fetch_trace(&self) -> KcResult<String> {
        debug!(url = %self.url, "requesting trace");

        // Status codes are not inspected; whatever body comes back is scanned.
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| IpError::Transport(e.to_string()))?;

        debug!(status = %response.status(), "trace endpoint responded");

        let body = response
            .text()
            .await
            .map_err(|e| IpError::Transport(format!("Failed to read response body: {}", e)))?;

        Ok(body)
    }
}

/// The host clipboard, opened on first write.
///
/// On X11 and Wayland the selection is served by this process, so the text
/// only outlives `kc` if a clipboard manager takes it over when the handle
/// is dropped.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> KcResult<()> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|e| IpError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }

        if let Some(clipboard) = self.inner.as_mut() {
            clipboard
                .set_text(text.to_string())
                .map_err(|e| IpError::Clipboard(e.to_string()))?;
        }

        Ok(())
    }
}

/// Resolves the public address, prints it, copies it
pub struct IpReporter<S, C> {
    source: S,
    clipboard: C,
}

impl<S: TraceSource, C: ClipboardSink> IpReporter<S, C> {
    pub fn new(source: S, clipboard: C) -> Self {
        Self { source, clipboard }
    }

    /// Look up the address once; returns `None` when it could not be resolved
    pub async fn resolve(&self) -> KcResult<Option<String>> {
        let body = self.source.fetch_trace().await?;
        let address = parse_trace_ip(&body);
        debug!(?address, "parsed trace body");
        Ok(address)
    }

    /// Run the whole command, writing user-facing lines to `out`.
    ///
    /// Lookup and clipboard failures are reported as one line on `out` and
    /// folded into the returned [`IpReport`]; only a failing `out` is an
    /// error. The underlying cause is logged at debug level only.
    pub async fn report<W: Write>(&mut self, out: &mut W) -> KcResult<IpReport> {
        let address = match self.resolve().await {
            Ok(Some(address)) => address,
            Ok(None) => {
                writeln!(out, "{}", NOT_CONNECTED_MESSAGE)?;
                return Ok(IpReport::NotConnected);
            }
            Err(e) => {
                debug!(error = %e, "trace lookup failed");
                writeln!(out, "{}", FETCH_FAILED_MESSAGE)?;
                return Ok(IpReport::FetchFailed);
            }
        };

        writeln!(out, "ip address: {}", address)?;

        match self.clipboard.set_text(&address) {
            Ok(()) => {
                writeln!(out, "{}", COPIED_MESSAGE)?;
                Ok(IpReport::Copied(address))
            }
            Err(e) => {
                debug!(error = %e, "clipboard write failed");
                let reason = match e {
                    KcError::Ip(IpError::Clipboard(reason)) => reason,
                    other => other.to_string(),
                };
                writeln!(out, "Error copying to clipboard: {}", reason)?;
                Ok(IpReport::PrintedOnly(address))
            }
        }
    }

    pub fn into_parts(self) -> (S, C) {
        (self.source, self.clipboard)
    }
}
