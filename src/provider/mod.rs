mod google;

pub use google::{parse_gtx_response, GoogleTranslator, ProviderSettings};

/// A machine-translation backend.
///
/// `Ok(None)` means the backend answered but produced no text. Any `Err` (network, quota,
/// unsupported language pair) is treated by callers as a failed hop, never as fatal.
pub trait Translator {
    fn name(&self) -> &str;

    fn translate(&self, source: &str, target: &str, text: &str) -> anyhow::Result<Option<String>>;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn translate(&self, source: &str, target: &str, text: &str) -> anyhow::Result<Option<String>> {
        (**self).translate(source, target, text)
    }
}
