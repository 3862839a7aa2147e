use crate::catalog::Language;
use crate::progress::ConsoleProgress;
use crate::provider::Translator;
use crate::textutil::is_blank;

use super::trace::TraceWriter;

/// Result of one hop.
#[derive(Debug)]
pub enum HopOutcome {
    Success(String),
    Empty,
    Failure(anyhow::Error),
}

impl HopOutcome {
    pub fn from_result(res: anyhow::Result<Option<String>>) -> Self {
        match res {
            Ok(Some(text)) if !is_blank(&text) => Self::Success(text),
            Ok(_) => Self::Empty,
            Err(e) => Self::Failure(e),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinalHop {
    Translated,
    /// The text was already in the base language.
    NotNeeded,
    Empty,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub empty: usize,
    pub failed: usize,
    pub skipped: usize,
    pub final_hop: FinalHop,
    /// Languages the text actually passed through, starting with the base language.
    pub path: Vec<String>,
}

impl ChainReport {
    fn new(base_language: &str) -> Self {
        Self {
            attempted: 0,
            succeeded: 0,
            empty: 0,
            failed: 0,
            skipped: 0,
            final_hop: FinalHop::NotNeeded,
            path: vec![base_language.to_string()],
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} hops attempted: {} ok, {} empty, {} failed, {} skipped; path {}",
            self.attempted,
            self.succeeded,
            self.empty,
            self.failed,
            self.skipped,
            self.path.join(" -> ")
        )
    }
}

#[derive(Debug)]
pub struct ChainOutput {
    pub text: String,
    pub report: ChainReport,
}

struct ChainState {
    current_text: String,
    previous_language: String,
}

pub struct TranslationChainer<T: Translator> {
    translator: T,
    progress: ConsoleProgress,
    trace: TraceWriter,
    base_language: String,
    num_cycles: usize,
}

impl<T: Translator> TranslationChainer<T> {
    pub fn new(translator: T, base_language: impl Into<String>, progress: ConsoleProgress) -> Self {
        Self {
            translator,
            progress,
            trace: TraceWriter::disabled(),
            base_language: base_language.into(),
            num_cycles: 1,
        }
    }

    #[must_use]
    pub fn with_cycles(mut self, num_cycles: usize) -> Self {
        self.num_cycles = num_cycles.max(1);
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: TraceWriter) -> Self {
        self.trace = trace;
        self
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Walks `languages` `num_cycles` times, then translates back to the base language.
    ///
    /// Hop failures and empty results leave the running text untouched; this never fails.
    pub fn run(&self, text: &str, languages: &[Language]) -> ChainOutput {
        let base = self.base_language.as_str();
        let mut state = ChainState {
            current_text: text.to_string(),
            previous_language: base.to_string(),
        };
        let mut report = ChainReport::new(base);

        self.progress.info(format!(
            "Using {} languages for translation via {}",
            languages.len(),
            self.translator.name()
        ));
        let total_hops = languages.len() * self.num_cycles;
        let mut hop_idx = 0usize;

        for cycle in 0..self.num_cycles {
            self.progress.info(format!(
                "Starting translation cycle {}/{}",
                cycle + 1,
                self.num_cycles
            ));
            for lang in languages {
                hop_idx += 1;
                self.progress.progress("hop", hop_idx, total_hops);
                let target = lang.code.as_str();

                if target == state.previous_language {
                    report.skipped += 1;
                    if target == base {
                        self.progress
                            .info(format!("Text is already in {target}, nothing to translate"));
                    } else {
                        self.progress.info(format!(
                            "Skipping translation from {} to {target} (same language)",
                            state.previous_language
                        ));
                    }
                    continue;
                }

                self.progress.info(format!(
                    "Translating from {} to {target} ({})...",
                    state.previous_language, lang.name
                ));
                self.apply_hop(&mut state, &mut report, target);
            }
        }

        let text = self.translate_back(state, &mut report);
        self.progress.info(report.summary());
        ChainOutput { text, report }
    }

    fn apply_hop(&self, state: &mut ChainState, report: &mut ChainReport, target: &str) {
        report.attempted += 1;
        let res = self
            .translator
            .translate(&state.previous_language, target, &state.current_text);
        match HopOutcome::from_result(res) {
            HopOutcome::Success(text) => {
                report.succeeded += 1;
                report.path.push(target.to_string());
                if let Err(e) = self.trace.write_hop_text(report.succeeded, target, &text) {
                    self.progress.warn(format!("{e:#}"));
                }
                state.current_text = text;
                state.previous_language = target.to_string();
                self.progress.info(format!("Successfully translated to {target}"));
            }
            HopOutcome::Empty => {
                report.empty += 1;
                self.progress.warn(format!(
                    "Translation to {target} returned nothing. Skipping this step."
                ));
            }
            HopOutcome::Failure(e) => {
                report.failed += 1;
                self.progress.error(format!(
                    "Error translating from {} to {target}: {e:#}",
                    state.previous_language
                ));
                self.progress.info(format!(
                    "Continuing with {} as source for next attempt.",
                    state.previous_language
                ));
            }
        }
    }

    fn translate_back(&self, state: ChainState, report: &mut ChainReport) -> String {
        let base = self.base_language.as_str();
        if state.previous_language == base {
            report.final_hop = FinalHop::NotNeeded;
            self.progress
                .info(format!("Text is already in {base}, no final translation needed"));
            return state.current_text;
        }

        self.progress.info(format!(
            "Translating final text from {} back to {base}...",
            state.previous_language
        ));
        report.attempted += 1;
        let res = self
            .translator
            .translate(&state.previous_language, base, &state.current_text);
        match HopOutcome::from_result(res) {
            HopOutcome::Success(text) => {
                report.succeeded += 1;
                report.final_hop = FinalHop::Translated;
                report.path.push(base.to_string());
                if let Err(e) = self.trace.write_hop_text(report.succeeded, base, &text) {
                    self.progress.warn(format!("{e:#}"));
                }
                text
            }
            HopOutcome::Empty => {
                report.empty += 1;
                report.final_hop = FinalHop::Empty;
                self.progress.warn(format!(
                    "Final translation back to {base} returned nothing. Keeping the last translated text."
                ));
                state.current_text
            }
            HopOutcome::Failure(e) => {
                report.failed += 1;
                report.final_hop = FinalHop::Failed;
                self.progress.error(format!(
                    "Error translating back to {base} from {}: {e:#}",
                    state.previous_language
                ));
                state.current_text
            }
        }
    }
}
