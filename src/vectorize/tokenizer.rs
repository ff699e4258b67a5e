//! Word tokenizer.
//!
//! Lowercases the input and emits runs of word characters (alphanumeric or
//! `_`) that are at least [`MIN_TOKEN_CHARS`] characters long. Everything else
//! is a separator. No stop words are removed: rare-but-common words are already
//! damped by idf.

/// Shortest token kept, in characters.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Tokenized text: owns the lowercased buffer, hands out `&str` slices via byte spans.
pub struct Tokens {
    buffer: String,
    spans: Vec<(u32, u32)>,
}

impl Tokens {
    /// Returns the tokens in text order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans
            .iter()
            .map(|&(s, e)| &self.buffer[s as usize..e as usize])
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns true if no tokens were produced.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenize `text`.
pub fn tokenize(text: &str) -> Tokens {
    let buffer = text.to_lowercase();
    let mut spans = Vec::new();
    let mut start: Option<(usize, usize)> = None; // (byte offset, chars so far)

    for (i, c) in buffer.char_indices() {
        if is_word_char(c) {
            start = match start {
                None => Some((i, 1)),
                Some((s, n)) => Some((s, n + 1)),
            };
        } else if let Some((s, n)) = start.take() {
            if n >= MIN_TOKEN_CHARS {
                spans.push((s as u32, i as u32));
            }
        }
    }
    if let Some((s, n)) = start {
        if n >= MIN_TOKEN_CHARS {
            spans.push((s as u32, buffer.len() as u32));
        }
    }

    Tokens { buffer, spans }
}
