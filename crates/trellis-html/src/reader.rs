//! `std::io::Read` over a character sequence.
//!
//! Lets a render be handed to anything that pulls bytes (`io::copy`, a
//! response body, a compressor) while still producing characters only as
//! the reader asks for them.

use std::io::{self, Read};

/// Encodes characters as UTF-8 into the caller's buffers.
///
/// A character whose encoding does not fit in what is left of a buffer is
/// finished on the next `read`.
///
/// ```
/// use std::io::Read;
///
/// use trellis_dom::ElementNode;
/// use trellis_html::{RenderReader, render};
///
/// let node = ElementNode::void("br");
/// let mut out = String::new();
/// RenderReader::new(render(&node, 0)).read_to_string(&mut out).unwrap();
/// assert_eq!(out, "<br>\n");
/// ```
pub struct RenderReader<I> {
    chars: I,
    /// Encoded bytes of the last character pulled.
    pending: [u8; 4],
    pending_len: usize,
    pending_pos: usize,
}

impl<I: Iterator<Item = char>> RenderReader<I> {
    /// Wrap a character sequence.
    pub const fn new(chars: I) -> Self {
        Self {
            chars,
            pending: [0; 4],
            pending_len: 0,
            pending_pos: 0,
        }
    }

    /// The wrapped sequence. Bytes of a partly written character are lost.
    pub fn into_inner(self) -> I {
        self.chars
    }
}

impl<I: Iterator<Item = char>> Read for RenderReader<I> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < buf.len() {
            if self.pending_pos < self.pending_len {
                let n = (self.pending_len - self.pending_pos).min(buf.len() - written);
                buf[written..written + n]
                    .copy_from_slice(&self.pending[self.pending_pos..self.pending_pos + n]);
                self.pending_pos += n;
                written += n;
                continue;
            }
            let Some(c) = self.chars.next() else {
                break;
            };
            self.pending_len = c.encode_utf8(&mut self.pending).len();
            self.pending_pos = 0;
        }
        Ok(written)
    }
}
