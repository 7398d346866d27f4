//! Cursor over a compressed or raw input slice paired with a growable output
//! buffer. Every codec call owns its own stream.

use crate::Lz2Error;

#[derive(Debug, Clone)]
pub struct ByteStream<'a> {
    input: &'a [u8],
    pos: usize,
    output: Vec<u8>,
}

impl<'a> ByteStream<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            output: Vec::new(),
        }
    }

    pub fn with_capacity(input: &'a [u8], capacity: usize) -> Self {
        Self {
            input,
            pos: 0,
            output: Vec::with_capacity(capacity),
        }
    }

    /// Read position within the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    pub fn next_byte(&mut self) -> Result<u8, Lz2Error> {
        let byte = *self
            .input
            .get(self.pos)
            .ok_or_else(|| Lz2Error::malformed(self.pos, "unexpected end of stream"))?;
        self.pos += 1;
        Ok(byte)
    }

    /// Borrow the next `n` input bytes and advance past them.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], Lz2Error> {
        if self.remaining() < n {
            return Err(Lz2Error::malformed(
                self.pos,
                format!("need {n} bytes, {} left", self.remaining()),
            ));
        }
        let slice = &self.input[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn output_len(&self) -> usize {
        self.output.len()
    }

    pub fn push(&mut self, byte: u8) {
        self.output.push(byte);
    }

    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }

    /// Copy `length` bytes that start at `offset` in the output onto its end,
    /// one byte at a time so that an overlapping source repeats its pattern.
    pub fn copy_within_output(&mut self, offset: usize, length: usize) {
        for k in 0..length {
            let byte = self.output[offset + k];
            self.output.push(byte);
        }
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_past_end_is_malformed() {
        let mut stream = ByteStream::new(&[1, 2, 3]);
        assert_eq!(stream.take(2).unwrap(), &[1, 2]);
        assert!(matches!(
            stream.take(2),
            Err(Lz2Error::MalformedStream { offset: 2, .. })
        ));
        assert_eq!(stream.next_byte().unwrap(), 3);
        assert!(stream.next_byte().is_err());
    }

    #[test]
    fn overlapping_copy_repeats_pattern() {
        let mut stream = ByteStream::new(&[]);
        stream.extend_from_slice(b"AB");
        stream.copy_within_output(0, 6);
        assert_eq!(stream.output(), b"ABABABAB");
    }
}
