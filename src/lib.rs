// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod overlay;
pub mod persistence;
pub mod remote;

pub use crate::config::Config;
pub use crate::core::engine::{Conversion, ConversionRequest, EmojiEngine, Source};
pub use crate::core::types::{Mode, NewRecord, Style, TranslationRecord};
