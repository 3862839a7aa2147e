use std::cell::Cell;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::textutil::{excerpt, is_blank, split_into_chunks};

use super::Translator;

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_MAX_CHARS: usize = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const ERROR_BODY_CHARS: usize = 200;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Longest text sent in a single request; longer inputs are chunked.
    pub max_chars: usize,
    /// Minimum spacing between consecutive requests.
    pub min_interval_ms: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("chain-translator/", env!("CARGO_PKG_VERSION")).to_string(),
            max_chars: DEFAULT_MAX_CHARS,
            min_interval_ms: 0,
        }
    }
}

/// Client for the public `translate_a/single` (client=gtx) endpoint.
pub struct GoogleTranslator {
    client: Client,
    settings: ProviderSettings,
    last_request: Cell<Option<Instant>>,
}

impl GoogleTranslator {
    pub fn new(settings: ProviderSettings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .user_agent(settings.user_agent.clone())
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            settings,
            last_request: Cell::new(None),
        })
    }

    fn throttle(&self) {
        let min_interval = Duration::from_millis(self.settings.min_interval_ms);
        if min_interval.is_zero() {
            return;
        }
        if let Some(last) = self.last_request.get() {
            let since = last.elapsed();
            if since < min_interval {
                std::thread::sleep(min_interval - since);
            }
        }
    }

    fn translate_chunk(&self, source: &str, target: &str, chunk: &str) -> anyhow::Result<Option<String>> {
        self.throttle();
        let sent = self
            .client
            .get(&self.settings.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", chunk),
            ])
            .send();
        self.last_request.set(Some(Instant::now()));
        let resp = sent.with_context(|| format!("request {source}->{target}"))?;

        let status = resp.status();
        let body = resp.text().context("read response body")?;
        if !status.is_success() {
            return Err(anyhow!(
                "HTTP {status}: {}",
                excerpt(body.trim(), ERROR_BODY_CHARS)
            ));
        }
        parse_gtx_response(&body)
    }
}

impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    fn translate(&self, source: &str, target: &str, text: &str) -> anyhow::Result<Option<String>> {
        if is_blank(text) {
            return Ok(Some(text.to_string()));
        }
        translate_in_chunks(text, self.settings.max_chars, |chunk| {
            self.translate_chunk(source, target, chunk)
        })
    }
}

/// Sends `text` through `call` in chunks of at most `max_chars` and joins the results.
///
/// Any failed chunk fails the whole text; any chunk with no result makes the whole result `None`.
fn translate_in_chunks<F>(text: &str, max_chars: usize, mut call: F) -> anyhow::Result<Option<String>>
where
    F: FnMut(&str) -> anyhow::Result<Option<String>>,
{
    let chunks = split_into_chunks(text, max_chars);
    let total = chunks.len();
    let mut out = String::with_capacity(text.len());
    for (idx, chunk) in chunks.iter().enumerate() {
        if is_blank(chunk) {
            out.push_str(chunk);
            continue;
        }
        let Some(t) = call(chunk).with_context(|| format!("chunk {}/{total}", idx + 1))? else {
            return Ok(None);
        };
        // The endpoint trims trailing whitespace; restore the chunk's own seam.
        let seam = &chunk[chunk.trim_end().len()..];
        if idx + 1 < total && !seam.is_empty() {
            out.push_str(t.trim_end());
            out.push_str(seam);
        } else {
            out.push_str(&t);
        }
    }
    Ok(Some(out))
}

/// Joins the translated segments of a gtx response (`[[["seg", "src", ...], ...], ...]`).
///
/// A null or empty segment list yields `Ok(None)`.
pub fn parse_gtx_response(body: &str) -> anyhow::Result<Option<String>> {
    let json: Value = serde_json::from_str(body).context("parse translation response json")?;
    let segments = match json.get(0) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(segs)) => segs,
        Some(_) => {
            return Err(anyhow!(
                "unexpected translation response: {}",
                excerpt(body, ERROR_BODY_CHARS)
            ))
        }
    };
    let mut out = String::new();
    for seg in segments {
        if let Some(s) = seg.get(0).and_then(Value::as_str) {
            out.push_str(s);
        }
    }
    if out.is_empty() {
        return Ok(None);
    }
    Ok(Some(out))
}
