//! Chunk-boundary aware UTF-8 decoding.

/// Decodes UTF-8 across chunk boundaries.
///
/// An incomplete multi-byte sequence at the end of a chunk is held back until
/// the next chunk arrives. Invalid sequences become U+FFFD.
#[derive(Debug, Default)]
pub(crate) struct Utf8Carry {
    pending: Vec<u8>,
}

impl Utf8Carry {
    /// Decode `chunk` and append the text to `out`.
    pub(crate) fn decode_into(&mut self, chunk: &[u8], out: &mut String) {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    return;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            self.pending = after.to_vec();
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Number of bytes waiting for the rest of their character.
    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
