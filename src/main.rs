use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use chain_translator::catalog::{parse_language_count, LanguageCount};
use chain_translator::config::init_default_config;
use chain_translator::pipeline::{ChainConfig, ChainOverrides, TranslatorPipeline};
use chain_translator::progress::ConsoleProgress;
use chain_translator::provider::GoogleTranslator;

#[derive(Parser, Debug)]
#[command(name = "chain-translator")]
#[command(
    about = "Paraphrase text by machine-translating it through a chain of languages and back",
    long_about = None
)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Use only the first N catalog languages (default: all)
    #[arg(value_name = "NUM_LANGUAGES")]
    num_languages: Option<String>,

    /// Input text file (default: input.txt)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output text file, overwritten (default: output.txt)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Passes over the language list before translating back (default: 1)
    #[arg(long, value_name = "N")]
    cycles: Option<usize>,

    /// Language of the input text and of the final output (default: en)
    #[arg(long, value_name = "CODE")]
    base_language: Option<String>,

    /// Config file path (default: search for chain-translator.toml upwards)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Generate a default config file, then exit
    #[arg(long)]
    init_config: bool,

    /// Directory to write the config file to (default: current directory)
    #[arg(long, value_name = "DIR")]
    init_config_dir: Option<PathBuf>,

    /// Overwrite an existing config file when used with --init-config
    #[arg(long)]
    force: bool,

    /// Print the languages that would be used, then exit
    #[arg(long)]
    list_languages: bool,

    /// No progress output on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let progress = ConsoleProgress::new(!args.quiet);

    if args.init_config {
        let dir = args
            .init_config_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let cfg_path = init_default_config(&dir, args.force).context("init default config")?;
        eprintln!("Wrote config: {}", cfg_path.display());
        return Ok(());
    }

    let num_languages = match args.num_languages.as_deref().map(parse_language_count) {
        None => None,
        Some(LanguageCount::Valid(n)) => Some(n),
        Some(LanguageCount::NonPositive(n)) => {
            progress.warn(format!(
                "Number of languages must be positive (got {n}), using default"
            ));
            None
        }
        Some(LanguageCount::Invalid(raw)) => {
            progress.warn(format!("Invalid number of languages {raw:?}, using default"));
            None
        }
    };

    let cfg = ChainConfig::from_args(ChainOverrides {
        config_path: args.config,
        input: args.input,
        output: args.output,
        base_language: args.base_language,
        num_languages,
        num_cycles: args.cycles,
    })
    .context("build config")?;
    if let Some(p) = cfg.config_path.as_ref() {
        progress.info(format!("Config: {}", p.display()));
    }

    if args.list_languages {
        for (idx, lang) in cfg.selected_languages().iter().enumerate() {
            println!("{:>3}. {:<8} {}", idx + 1, lang.code, lang.name);
        }
        return Ok(());
    }

    let translator =
        GoogleTranslator::new(cfg.provider.clone()).context("init translation provider")?;
    let pipeline = TranslatorPipeline::new(cfg, translator, args.quiet);
    pipeline.translate_file()?;
    Ok(())
}
