//! Offset conversion between UTF-8 storage bytes and native UTF-16 code units.
//!
//! Application text is a Rust `String`, so every offset the application sees
//! is a UTF-8 byte offset. Native controls (Cocoa, the DOM, IME composition
//! ranges) count UTF-16 code units instead. Both conversions clamp rather than
//! panic: offsets past the end map to the end, offsets inside a character
//! round down to that character's start.

/// Clamps `offset` to `text.len()` and then back to the nearest char boundary.
pub fn clamp_to_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Returns the number of UTF-16 code units needed to encode
/// `text[..byte_offset]`.
pub fn to_native_units(text: &str, byte_offset: usize) -> usize {
    let end = clamp_to_char_boundary(text, byte_offset);
    text[..end].encode_utf16().count()
}

/// Returns the UTF-8 length of the prefix of `text` spanning `native_offset`
/// UTF-16 code units.
///
/// An offset that splits a surrogate pair rounds down to the start of the
/// pair.
pub fn to_storage_bytes(text: &str, native_offset: usize) -> usize {
    let mut units = 0;
    for (index, ch) in text.char_indices() {
        let next = units + ch.len_utf16();
        if next > native_offset {
            return index;
        }
        units = next;
    }
    text.len()
}

#[cfg(test)]
#[path = "tests/codec_tests.rs"]
mod tests;
