use std::cell::RefCell;
use std::path::PathBuf;

use anyhow::anyhow;

use chain_translator::config::{init_default_config, load_config};
use chain_translator::pipeline::{ChainConfig, ChainOverrides, FinalHop, TranslatorPipeline};
use chain_translator::provider::Translator;

/// Appends `[target]` to the text; refuses Arabic to mimic an unsupported pair.
#[derive(Default)]
struct TaggingTranslator {
    calls: RefCell<Vec<String>>,
}

impl Translator for TaggingTranslator {
    fn name(&self) -> &str {
        "tagging"
    }

    fn translate(&self, source: &str, target: &str, text: &str) -> anyhow::Result<Option<String>> {
        self.calls.borrow_mut().push(format!("{source}->{target}"));
        if target == "ar" {
            return Err(anyhow!("HTTP 400 Bad Request: unsupported language"));
        }
        Ok(Some(format!("{text}[{target}]")))
    }
}

/// Never produces text.
struct SilentTranslator;

impl Translator for SilentTranslator {
    fn name(&self) -> &str {
        "silent"
    }

    fn translate(&self, _: &str, _: &str, _: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}

fn overrides(dir: &tempfile::TempDir, num_languages: Option<usize>) -> ChainOverrides {
    ChainOverrides {
        config_path: None,
        input: Some(dir.path().join("input.txt")),
        output: Some(dir.path().join("output.txt")),
        base_language: None,
        num_languages,
        num_cycles: None,
    }
}

#[test]
fn file_to_file_chain_with_truncated_catalog() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("input.txt"), "Hello world").expect("write input");
    let cfg = ChainConfig::resolve(overrides(&dir, Some(3)), Default::default(), None)
        .expect("config");

    let translator = TaggingTranslator::default();
    let pipeline = TranslatorPipeline::new(cfg, &translator, true);
    let report = pipeline.translate_file().expect("run");

    let out = std::fs::read_to_string(dir.path().join("output.txt")).expect("read output");
    assert_eq!(out, "Hello world[zh-CN][es][en]");
    assert_eq!(
        *translator.calls.borrow(),
        vec!["en->zh-CN", "zh-CN->es", "es->en"]
    );
    assert_eq!(report.final_hop, FinalHop::Translated);
}

#[test]
fn unsupported_language_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("input.txt"), "x").expect("write input");
    let cfg = ChainConfig::resolve(overrides(&dir, Some(6)), Default::default(), None)
        .expect("config");

    let translator = TaggingTranslator::default();
    let report = TranslatorPipeline::new(cfg, &translator, true)
        .translate_file()
        .expect("run");

    let out = std::fs::read_to_string(dir.path().join("output.txt")).expect("read output");
    assert_eq!(out, "x[zh-CN][es][fr][pt][en]");
    assert_eq!(report.failed, 1);
    assert!(translator.calls.borrow().contains(&"fr->ar".to_string()));
    assert!(translator.calls.borrow().contains(&"fr->pt".to_string()));
}

#[test]
fn silent_provider_writes_input_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("input.txt"), "\u{feff}keep me\n").expect("write input");
    std::fs::write(dir.path().join("output.txt"), "stale").expect("write stale output");
    let cfg = ChainConfig::resolve(overrides(&dir, None), Default::default(), None)
        .expect("config");

    let report = TranslatorPipeline::new(cfg, SilentTranslator, true)
        .translate_file()
        .expect("run");

    let out = std::fs::read_to_string(dir.path().join("output.txt")).expect("read output");
    assert_eq!(out, "keep me\n");
    assert_eq!(report.succeeded, 0);
    assert_eq!(report.final_hop, FinalHop::NotNeeded);
}

#[test]
fn missing_input_is_fatal_and_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = ChainConfig::resolve(overrides(&dir, None), Default::default(), None)
        .expect("config");

    let err = TranslatorPipeline::new(cfg, SilentTranslator, true)
        .translate_file()
        .expect_err("missing input");
    assert!(format!("{err:#}").contains("input.txt"));
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn unwritable_output_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("input.txt"), "Hello").expect("write input");
    std::fs::create_dir(dir.path().join("output.txt")).expect("dir in the way");
    let cfg = ChainConfig::resolve(overrides(&dir, Some(3)), Default::default(), None)
        .expect("config");

    let translator = TaggingTranslator::default();
    let err = TranslatorPipeline::new(cfg, &translator, true)
        .translate_file()
        .expect_err("output is a directory");
    let msg = format!("{err:#}");
    assert!(msg.contains("write output"));
    assert!(msg.contains("output.txt"));
    assert!(dir.path().join("output.txt").is_dir());
    assert!(!translator.calls.borrow().is_empty());
}

#[test]
fn config_file_drives_the_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("chain-translator.toml"),
        r#"
[chain]
input = "in.txt"
output = "out/result.txt"
num_cycles = 2
trace_dir = "_trace"

[[catalog.languages]]
code = "en"
name = "English"

[[catalog.languages]]
code = "ja"
name = "Japanese"
"#,
    )
    .expect("write config");
    std::fs::write(dir.path().join("in.txt"), "cfg").expect("write input");

    let cfg = ChainConfig::from_args(ChainOverrides {
        config_path: Some(dir.path().join("chain-translator.toml")),
        ..ChainOverrides::default()
    })
    .expect("config");
    assert_eq!(cfg.num_cycles, 2);

    let translator = TaggingTranslator::default();
    TranslatorPipeline::new(cfg, &translator, true)
        .translate_file()
        .expect("run");

    let out_dir = dir.path().join("out");
    let out = std::fs::read_to_string(out_dir.join("result.txt")).expect("read output");
    assert_eq!(out, "cfg[ja][en][ja][en]");
    assert_eq!(
        *translator.calls.borrow(),
        vec!["en->ja", "ja->en", "en->ja", "ja->en"]
    );
    assert!(out_dir.join("_trace").join("hop_001.ja.txt").exists());
    assert!(out_dir.join("_trace").join("hop_004.en.txt").exists());
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let res = ChainConfig::from_args(ChainOverrides {
        config_path: Some(dir.path().join("nope.toml")),
        ..ChainOverrides::default()
    });
    assert!(res.is_err());
}

#[test]
fn generated_config_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = init_default_config(dir.path(), false).expect("init");
    let file_cfg = load_config(&path).expect("load");
    let cfg = ChainConfig::resolve(ChainOverrides::default(), file_cfg, Some(path.clone()))
        .expect("resolve");
    let cfg_dir: PathBuf = path.parent().expect("parent").to_path_buf();
    assert_eq!(cfg.input, cfg_dir.join("input.txt"));
    assert_eq!(cfg.output, cfg_dir.join("output.txt"));
    assert_eq!(cfg.provider.max_chars, 5000);
}
