//! Remote translation: request construction, HTTP transport and stream decoding.

pub mod client;
pub mod prompts;
pub mod stream;

pub use client::{truncate_chars, ByteStream, HttpTranslator, Translation, TranslationRequest, Translator};
pub use stream::{reassemble, FrameReader, SseDecoder, StreamFrame};
