use crate::progress::ConsoleProgress;
use crate::provider::Translator;
use crate::textio::{read_input_text, write_output_text};

use super::chainer::{ChainReport, TranslationChainer};
use super::trace::TraceWriter;
use super::ChainConfig;

/// Reads the input file, runs the chain, writes the output file.
pub struct TranslatorPipeline<T: Translator> {
    cfg: ChainConfig,
    chainer: TranslationChainer<T>,
    progress: ConsoleProgress,
}

impl<T: Translator> TranslatorPipeline<T> {
    pub fn new(cfg: ChainConfig, translator: T, quiet: bool) -> Self {
        let progress = ConsoleProgress::new(!quiet);
        let trace = match cfg.trace_dir.clone() {
            Some(dir) => TraceWriter::new(dir, true).unwrap_or_else(|e| {
                progress.warn(format!("{e:#}; hop trace disabled"));
                TraceWriter::disabled()
            }),
            None => TraceWriter::disabled(),
        };
        let chainer =
            TranslationChainer::new(translator, cfg.base_language.clone(), progress.clone())
                .with_cycles(cfg.num_cycles)
                .with_trace(trace);
        Self {
            cfg,
            chainer,
            progress,
        }
    }

    pub fn translate_file(&self) -> anyhow::Result<ChainReport> {
        let input = &self.cfg.input;
        let output = &self.cfg.output;

        let text = read_input_text(input)?;
        self.progress.info(format!(
            "Read {} characters from {}",
            text.chars().count(),
            input.display()
        ));

        let languages = self.cfg.selected_languages();
        self.progress.info(format!(
            "Will use top {} languages for translation, {} cycle(s)",
            languages.len(),
            self.cfg.num_cycles
        ));

        let out = self.chainer.run(&text, &languages);

        write_output_text(output, &out.text)?;
        self.progress.info(format!(
            "Translated result ({} characters) written to {}",
            out.text.chars().count(),
            output.display()
        ));
        Ok(out.report)
    }
}
