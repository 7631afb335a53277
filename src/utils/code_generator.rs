//! Short code generation.
//!
//! Two interchangeable strategies produce codes over the 62-symbol
//! alphanumeric alphabet:
//!
//! - [`RandomCodeGenerator`] samples a fixed number of symbols from a CSPRNG.
//!   Collisions are possible, so the caller must insert atomically and retry.
//! - [`SequenceCodeGenerator`] encodes the store's monotonic counter in
//!   base 62. Codes are unique by construction; a collision means the
//!   sequence and the table disagree and is treated as fatal by the caller.
//!
//! Generators never look at existing codes.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use serde_json::json;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Code alphabet in base-62 digit order.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Shortest configurable code length.
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest configurable code length.
pub const MAX_CODE_LENGTH: usize = 8;

/// Longest code accepted on lookup paths (matches the column width).
pub const MAX_LOOKUP_CODE_LENGTH: usize = 16;

/// Codes that collide with fixed top-level routes.
const RESERVED_CODES: &[&str] = &["api", "health", "docs", "openapi", "assets", "static"];

/// Selects how new codes are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeStrategy {
    Random,
    Sequence,
}

impl FromStr for CodeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "sequence" | "seq" => Ok(Self::Sequence),
            other => Err(format!(
                "unknown code strategy '{other}', expected 'random' or 'sequence'"
            )),
        }
    }
}

impl fmt::Display for CodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => f.write_str("random"),
            Self::Sequence => f.write_str("sequence"),
        }
    }
}

/// Produces candidate codes for new links.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    fn strategy(&self) -> CodeStrategy;

    /// Produces a candidate code for `original_url`.
    ///
    /// Uniqueness is not checked here.
    async fn generate(&self, original_url: &str) -> Result<String, AppError>;
}

/// Fixed-length random codes.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    /// Creates a generator producing codes of `length` symbols.
    ///
    /// `length` is clamped to `MIN_CODE_LENGTH..=MAX_CODE_LENGTH`.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

#[async_trait]
impl CodeGenerator for RandomCodeGenerator {
    fn strategy(&self) -> CodeStrategy {
        CodeStrategy::Random
    }

    async fn generate(&self, _original_url: &str) -> Result<String, AppError> {
        Ok(random_code(self.length))
    }
}

/// Base-62 encoding of the store's sequence.
///
/// Values are offset by `62^(min_length - 1)` so that the first code already
/// has `min_length` symbols.
pub struct SequenceCodeGenerator {
    source: Arc<dyn LinkRepository>,
    offset: u64,
}

impl SequenceCodeGenerator {
    pub fn new(source: Arc<dyn LinkRepository>, min_length: usize) -> Self {
        let min_length = min_length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH);
        Self {
            source,
            offset: 62u64.pow((min_length - 1) as u32),
        }
    }

    /// Encodes a sequence value into its code.
    pub fn encode(&self, value: u64) -> Option<String> {
        value.checked_add(self.offset).map(encode_base62)
    }
}

#[async_trait]
impl CodeGenerator for SequenceCodeGenerator {
    fn strategy(&self) -> CodeStrategy {
        CodeStrategy::Sequence
    }

    async fn generate(&self, _original_url: &str) -> Result<String, AppError> {
        let value = self.source.next_sequence().await?;

        self.encode(value).ok_or_else(|| {
            AppError::allocation_failed(
                "Short code sequence exhausted",
                json!({ "sequence": value }),
            )
        })
    }
}

/// Samples `length` symbols uniformly from [`ALPHABET`].
pub fn random_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Encodes `value` in base 62 using [`ALPHABET`], most significant digit first.
pub fn encode_base62(mut value: u64) -> String {
    if value == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut digits = Vec::with_capacity(11);
    while value > 0 {
        digits.push(ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Returns true if `code` would be shadowed by a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Returns true if `code` has the shape of a short code.
///
/// Lookups for anything else can answer "not found" without touching the store.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_LOOKUP_CODE_LENGTH
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
