use crate::config::Config;
use crate::core::converter::LocalEngine;
use crate::core::style::{RandomSource, ThreadRandom};
use crate::core::types::{Mode, Style};
use crate::error::{EngineError, OverlayError, RemoteError};
use crate::overlay::CustomOverlay;
use crate::remote::{reassemble, HttpTranslator, Translation, TranslationRequest, Translator};

/// Where the returned text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    /// Local dictionary conversion, used when the remote path failed or is disabled.
    Local,
}

/// Result of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub text: String,
    pub source: Source,
    /// Why the remote path was abandoned, if it was.
    pub remote_error: Option<String>,
}

/// One conversion request as the caller describes it.
#[derive(Debug, Clone, Copy)]
pub struct ConversionRequest<'a> {
    pub text: &'a str,
    pub mode: Mode,
    pub style: Style,
    pub streaming: bool,
}

// The engine tries the remote translator first and always has the local
// dictionary conversion to fall back on.
pub struct EmojiEngine {
    translator: Option<Box<dyn Translator>>,
    overlay: CustomOverlay,
    rng: Box<dyn RandomSource>,
    max_text_chars: usize,
}

impl EmojiEngine {
    /// Local conversion only; never touches the network.
    pub fn local_only() -> Self {
        Self {
            translator: None,
            overlay: CustomOverlay::new(),
            rng: Box::new(ThreadRandom),
            max_text_chars: Config::default().max_text_chars,
        }
    }

    /// HTTP translator from `config`, plus the saved overlay when one exists.
    pub fn from_config(config: &Config) -> Result<Self, RemoteError> {
        let overlay = CustomOverlay::load_json(&config.overlay_path()).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "custom emoji file unreadable, starting empty");
            CustomOverlay::new()
        });
        Ok(Self {
            translator: Some(Box::new(HttpTranslator::new(config)?)),
            overlay,
            rng: Box::new(ThreadRandom),
            max_text_chars: config.max_text_chars,
        })
    }

    pub fn with_translator(mut self, translator: Box<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn without_translator(mut self) -> Self {
        self.translator = None;
        self
    }

    pub fn with_overlay(mut self, overlay: CustomOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn with_random(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn overlay(&self) -> &CustomOverlay {
        &self.overlay
    }

    /// Adds a mapping from raw form input; takes effect on the next conversion.
    pub fn add_custom_mapping(&mut self, word: &str, emojis: &str) -> Result<(), OverlayError> {
        self.overlay.add_from_input(word, emojis)
    }

    /// Dictionary conversion with the current overlay.
    pub fn convert_local(&mut self, text: &str, mode: Mode, style: Style) -> String {
        LocalEngine::new(&self.overlay).render(mode, text, style, self.rng.as_mut())
    }

    /// Converts `request.text`. Streamed fragments are passed to `on_fragment`
    /// as they arrive.
    ///
    /// Only empty input is an error. Any remote failure, including a stream
    /// that breaks or yields nothing, is replaced by the local conversion of
    /// the full input with the same mode, style and overlay.
    pub fn convert(
        &mut self,
        request: ConversionRequest<'_>,
        mut on_fragment: impl FnMut(&str),
    ) -> Result<Conversion, EngineError> {
        if request.text.trim().is_empty() {
            return Err(EngineError::EmptyInput);
        }

        let remote_error = match self.try_remote(&request, &mut on_fragment) {
            Some(Ok(text)) => {
                return Ok(Conversion {
                    text,
                    source: Source::Remote,
                    remote_error: None,
                })
            }
            Some(Err(err)) => {
                tracing::warn!(error = %err, mode = %request.mode, "remote translation failed, using local conversion");
                Some(err.to_string())
            }
            None => None,
        };

        Ok(Conversion {
            text: self.convert_local(request.text, request.mode, request.style),
            source: Source::Local,
            remote_error,
        })
    }

    fn try_remote(
        &self,
        request: &ConversionRequest<'_>,
        on_fragment: &mut impl FnMut(&str),
    ) -> Option<Result<String, RemoteError>> {
        let translator = self.translator.as_ref()?;
        let wire = TranslationRequest::new(request.text, request.mode, request.style, self.max_text_chars);
        let result = translator
            .translate(&wire, request.streaming)
            .and_then(|translation| match translation {
                Translation::Complete(text) => Ok(text),
                Translation::Stream(stream) => {
                    let text = reassemble(stream, |fragment| on_fragment(fragment))?;
                    if text.is_empty() {
                        Err(RemoteError::EmptyStream)
                    } else {
                        Ok(text)
                    }
                }
            });
        Some(result)
    }
}
