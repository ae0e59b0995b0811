use regex::Regex;
use std::iter::FusedIterator;
use std::sync::LazyLock;

use crate::domain::value_objects::ChunkMode;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Collapses every whitespace run to a single space and trims both ends.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// One window of text. `start` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunk<'a> {
    pub index: usize,
    pub start: usize,
    pub text: &'a str,
}

/// Lazily walks `text` according to a [`ChunkMode`].
///
/// Windows are measured in characters. Each window after the first starts
/// `size - overlap` characters after the previous one, and iteration ends
/// with the first window that reaches the end of the text. The iterator is
/// `Clone`, so a copy taken before consumption replays the same chunks.
#[derive(Debug, Clone)]
pub struct TextChunks<'a> {
    text: &'a str,
    window: Option<(usize, usize)>,
    next_byte: Option<usize>,
    next_char: usize,
    index: usize,
}

impl<'a> TextChunks<'a> {
    pub fn new(text: &'a str, mode: ChunkMode) -> Self {
        let window = match mode {
            ChunkMode::Chunked { size, overlap } => Some((size, overlap)),
            ChunkMode::Full => None,
        };

        Self {
            text,
            window,
            next_byte: if text.is_empty() { None } else { Some(0) },
            next_char: 0,
            index: 0,
        }
    }

    /// A fresh iterator over the same text and mode.
    pub fn restart(&self) -> Self {
        Self {
            text: self.text,
            window: self.window,
            next_byte: if self.text.is_empty() { None } else { Some(0) },
            next_char: 0,
            index: 0,
        }
    }

    fn emit(&mut self, start: usize, end: usize) -> TextChunk<'a> {
        let chunk = TextChunk {
            index: self.index,
            start: self.next_char,
            text: &self.text[start..end],
        };
        self.index += 1;
        chunk
    }
}

impl<'a> Iterator for TextChunks<'a> {
    type Item = TextChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_byte?;

        let Some((size, overlap)) = self.window else {
            self.next_byte = None;
            return Some(self.emit(start, self.text.len()));
        };

        let end = self.text[start..]
            .char_indices()
            .nth(size)
            .map_or(self.text.len(), |(offset, _)| start + offset);

        let chunk = self.emit(start, end);

        if end == self.text.len() {
            self.next_byte = None;
        } else {
            // The window is exactly `size` chars here, so stepping back
            // `overlap < size` chars always lands after `start`.
            let next = if overlap == 0 {
                end
            } else {
                self.text[start..end]
                    .char_indices()
                    .rev()
                    .nth(overlap - 1)
                    .map_or(start, |(offset, _)| start + offset)
            };
            self.next_byte = Some(next);
            self.next_char += size - overlap;
        }

        Some(chunk)
    }
}

impl FusedIterator for TextChunks<'_> {}

pub fn chunk_text(text: &str, mode: ChunkMode) -> TextChunks<'_> {
    TextChunks::new(text, mode)
}
