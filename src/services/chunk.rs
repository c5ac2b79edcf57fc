// src/services/chunk.rs

//! Message chunking for size-limited chat transports.

use std::num::NonZeroUsize;

/// Split `text` into consecutive frames of at most `limit` characters.
///
/// Concatenating the frames gives back `text`. Empty input yields no frames.
pub fn split_frames(text: &str, limit: NonZeroUsize) -> Vec<&str> {
    let limit = limit.get();
    let mut frames = Vec::with_capacity(text.len() / limit + 1);
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == limit {
            frames.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        frames.push(&text[start..]);
    }
    frames
}
