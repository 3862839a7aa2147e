use std::path::Path;

use anyhow::{anyhow, Context};
use encoding_rs::{Encoding, UTF_8};

pub fn read_input_text(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("read input: {}", path.display()))?;
    decode_utf8(&bytes).with_context(|| format!("decode input: {}", path.display()))
}

/// Strict UTF-8 decode; a leading UTF-8 BOM is dropped.
pub fn decode_utf8(bytes: &[u8]) -> anyhow::Result<String> {
    let body = match Encoding::for_bom(bytes) {
        Some((enc, bom_len)) if enc == UTF_8 => &bytes[bom_len..],
        Some((enc, _)) => return Err(anyhow!("expected UTF-8 text, found {} BOM", enc.name())),
        None => bytes,
    };
    UTF_8
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|s| s.into_owned())
        .ok_or_else(|| anyhow!("malformed UTF-8"))
}

pub fn write_output_text(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir: {}", parent.display()))?;
        }
    }
    std::fs::write(path, text.as_bytes())
        .with_context(|| format!("write output: {}", path.display()))?;
    Ok(())
}
