use std::path::{Path, PathBuf};

use anyhow::Context;

/// Optional dump of the running text after each hop.
pub struct TraceWriter {
    dir: PathBuf,
    enabled: bool,
}

impl TraceWriter {
    pub fn new(dir: PathBuf, enabled: bool) -> anyhow::Result<Self> {
        if enabled {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("create trace dir: {}", dir.display()))?;
        }
        Ok(Self { dir, enabled })
    }

    pub fn disabled() -> Self {
        Self {
            dir: PathBuf::new(),
            enabled: false,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write_named_text(&self, name: &str, text: &str) -> anyhow::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let path = self.dir.join(sanitize_filename(name));
        std::fs::write(&path, text).with_context(|| format!("write trace: {}", path.display()))?;
        Ok(())
    }

    pub fn write_hop_text(&self, hop: usize, lang: &str, text: &str) -> anyhow::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let name = format!("hop_{hop:03}.{lang}.txt");
        self.write_named_text(&name, text)
    }
}

fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => out.push('_'),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hop_files_are_numbered() {
        let dir = tempfile::tempdir().expect("tempdir");
        let trace = TraceWriter::new(dir.path().join("_trace"), true).expect("trace");
        trace.write_hop_text(7, "zh-CN", "你好").expect("write");
        let got = std::fs::read_to_string(trace.dir().join("hop_007.zh-CN.txt")).expect("read");
        assert_eq!(got, "你好");
    }

    #[test]
    fn disabled_writer_touches_nothing() {
        let trace = TraceWriter::disabled();
        trace.write_hop_text(1, "es", "hola").expect("noop");
        assert_eq!(sanitize_filename("a/b:c?.txt"), "a_b_c_.txt");
    }
}
