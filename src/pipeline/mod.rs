mod chainer;
mod config;
mod trace;
mod translator;

pub use chainer::{ChainOutput, ChainReport, FinalHop, HopOutcome, TranslationChainer};
pub use config::{ChainConfig, ChainOverrides, DEFAULT_INPUT, DEFAULT_OUTPUT};
pub use trace::TraceWriter;
pub use translator::TranslatorPipeline;
