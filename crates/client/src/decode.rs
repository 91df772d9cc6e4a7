//! Incremental UTF-8 decoding of the raw byte chunks.
//!
//! Transport chunks split anywhere, including through the middle of a
//! multi-byte sequence, so the decoder keeps the incomplete tail of one
//! chunk and prepends it to the next.

/// Streaming UTF-8 decoder. One instance per stream.
pub struct Utf8Decoder {
    /// Incomplete trailing sequence from the previous chunk (at most 3 bytes).
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Flush the decoder once the stream has ended. A retained tail can
    /// never complete at that point, so it decodes to one replacement
    /// character; an empty tail yields nothing.
    pub fn finish(&mut self) -> Option<char> {
        if self.pending.is_empty() {
            None
        } else {
            self.pending.clear();
            Some(char::REPLACEMENT_CHARACTER)
        }
    }

    /// Decode the next chunk, yielding every scalar value that is now
    /// complete. Invalid sequences become U+FFFD; an incomplete sequence
    /// at the end of the chunk is retained for the next call.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let mut buf = std::mem::take(&mut self.pending);
        buf.extend_from_slice(bytes);

        let mut out = String::with_capacity(buf.len());
        let mut rest = buf.as_slice();
        while !rest.is_empty() {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let (valid, tail) = rest.split_at(err.valid_up_to());
                    out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &tail[len..];
                        }
                        None => {
                            // Truncated sequence: wait for the next chunk.
                            self.pending = tail.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }
}

impl Default for Utf8Decoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(b"data: hello\n"), "data: hello\n");
    }

    #[test]
    fn test_two_byte_sequence_split_across_chunks() {
        let mut decoder = Utf8Decoder::new();
        let bytes = "é".as_bytes();
        assert_eq!(decoder.decode(&bytes[..1]), "");
        assert_eq!(decoder.decode(&bytes[1..]), "é");
    }

    #[test]
    fn test_four_byte_sequence_split_across_three_chunks() {
        let mut decoder = Utf8Decoder::new();
        let bytes = "🚀".as_bytes();
        assert_eq!(decoder.decode(&bytes[..1]), "");
        assert_eq!(decoder.decode(&bytes[1..3]), "");
        assert_eq!(decoder.decode(&bytes[3..]), "🚀");
    }

    #[test]
    fn test_split_sequence_inside_longer_text() {
        let mut decoder = Utf8Decoder::new();
        let bytes = "naïve".as_bytes();
        let mid = 3; // splits the "ï" sequence
        let mut out = decoder.decode(&bytes[..mid]);
        out.push_str(&decoder.decode(&bytes[mid..]));
        assert_eq!(out, "naïve");
    }

    #[test]
    fn test_invalid_byte_replaced() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(b"a\xffb"), "a\u{FFFD}b");
    }

    #[test]
    fn test_finish_flushes_truncated_tail() {
        let mut decoder = Utf8Decoder::new();
        let bytes = "é".as_bytes();
        assert_eq!(decoder.decode(&bytes[..1]), "");
        assert_eq!(decoder.finish(), Some('\u{FFFD}'));
        // The tail is consumed; a second flush has nothing to report.
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_finish_after_complete_input_is_empty() {
        let mut decoder = Utf8Decoder::new();
        decoder.decode("fin".as_bytes());
        assert_eq!(decoder.finish(), None);
    }
}
