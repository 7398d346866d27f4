//! Per-position candidate runs and the back-reference match finder.

use crate::config::Format;
use crate::types::{encoded_cost, CommandKind, Payload, Piece, MAX_PIECE_LEN};

/// Shortest back-reference worth looking for. Anything shorter never beats a
/// literal.
pub const MIN_MATCH_LEN: usize = 3;
/// Back-reference offsets are 16-bit absolute output positions.
pub const MAX_MATCH_OFFSET: usize = u16::MAX as usize;

const HASH_BITS: u32 = 16;
const HASH_SIZE: usize = 1 << HASH_BITS;

/// Best achievable run of one command kind at a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: CommandKind,
    /// Output bytes covered. Every shorter length is achievable with the
    /// same payload.
    pub length: usize,
    /// Encoded size of the piece at `length`.
    pub cost: usize,
    pub payload: Payload,
}

impl Candidate {
    fn new(kind: CommandKind, length: usize, payload: Payload) -> Self {
        Self {
            kind,
            length,
            cost: encoded_cost(kind, length),
            payload,
        }
    }

    /// Bytes saved against copying the same run literally (header excluded).
    pub fn savings(&self) -> isize {
        self.length as isize - self.cost as isize
    }

    /// Piece covering the first `length` bytes of this candidate.
    pub fn to_piece(&self, length: usize) -> Piece {
        Piece {
            kind: self.kind,
            length,
            payload: self.payload.clone(),
        }
    }
}

#[inline]
fn hash3(data: &[u8], pos: usize) -> usize {
    let val = u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], 0]);
    (val.wrapping_mul(0x1E35_A7BD) >> (32 - HASH_BITS)) as usize
}

/// Hash chains over 3-byte prefixes of the input.
///
/// Positions are indexed lazily in increasing order, so a lookup at `pos`
/// only ever sees earlier positions. Every chain entry is visited: the
/// longest match is always found.
#[derive(Debug)]
pub struct MatchFinder {
    head: Vec<i32>,
    prev: Vec<i32>,
    indexed: usize,
}

impl MatchFinder {
    pub fn new(len: usize) -> Self {
        Self {
            head: vec![-1; HASH_SIZE],
            prev: vec![-1; len.min(MAX_MATCH_OFFSET + 1)],
            indexed: 0,
        }
    }

    fn index_until(&mut self, data: &[u8], pos: usize) {
        let end = pos
            .min(data.len().saturating_sub(MIN_MATCH_LEN - 1))
            .min(MAX_MATCH_OFFSET + 1);
        while self.indexed < end {
            let p = self.indexed;
            let h = hash3(data, p);
            self.prev[p] = self.head[h];
            self.head[h] = p as i32;
            self.indexed += 1;
        }
    }

    /// Longest `(offset, length)` with `data[offset + k] == data[pos + k]` for
    /// all `k < length` and `offset < pos`. The source may run past `pos`:
    /// the decoder copies byte by byte, so overlap is legal.
    pub fn longest_match(&mut self, data: &[u8], pos: usize) -> Option<(usize, usize)> {
        if pos + MIN_MATCH_LEN > data.len() {
            return None;
        }
        self.index_until(data, pos);
        let max_len = (data.len() - pos).min(MAX_PIECE_LEN);
        let mut best: Option<(usize, usize)> = None;
        let mut cursor = self.head[hash3(data, pos)];
        while cursor >= 0 {
            let cand = cursor as usize;
            cursor = self.prev[cand];
            if cand >= pos {
                continue;
            }
            let length = data[cand..]
                .iter()
                .zip(&data[pos..pos + max_len])
                .take_while(|(a, b)| a == b)
                .count();
            // Chains run from the newest position backwards, so on equal
            // lengths the nearer offset is kept.
            if length >= MIN_MATCH_LEN && best.map_or(true, |(_, l)| length > l) {
                best = Some((cand, length));
                if length == max_len {
                    break;
                }
            }
        }
        best
    }
}

/// Computes the best run of every command kind at a read position.
#[derive(Debug)]
pub struct CandidateGenerator<'a> {
    input: &'a [u8],
    format: Format,
    matcher: MatchFinder,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(input: &'a [u8], format: Format) -> Self {
        Self {
            input,
            format,
            matcher: MatchFinder::new(input.len()),
        }
    }

    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    fn limit(&self, pos: usize) -> usize {
        (self.input.len() - pos).min(MAX_PIECE_LEN)
    }

    fn byte_fill(&self, pos: usize) -> Option<Candidate> {
        let data = &self.input[pos..pos + self.limit(pos)];
        let first = *data.first()?;
        let length = data.iter().take_while(|&&b| b == first).count();
        Some(Candidate::new(CommandKind::ByteFill, length, Payload::Byte(first)))
    }

    fn word_fill(&self, pos: usize) -> Option<Candidate> {
        let data = &self.input[pos..pos + self.limit(pos)];
        if data.len() < 2 {
            return None;
        }
        let word = [data[0], data[1]];
        let length = data
            .iter()
            .enumerate()
            .take_while(|&(k, &b)| b == word[k & 1])
            .count();
        Some(Candidate::new(CommandKind::WordFill, length, Payload::Word(word)))
    }

    fn increasing_fill(&self, pos: usize) -> Option<Candidate> {
        let data = &self.input[pos..pos + self.limit(pos)];
        let first = *data.first()?;
        let length = data
            .iter()
            .enumerate()
            .take_while(|&(k, &b)| b == first.wrapping_add(k as u8))
            .count();
        Some(Candidate::new(
            CommandKind::IncreasingFill,
            length,
            Payload::Byte(first),
        ))
    }

    fn back_reference(&mut self, pos: usize) -> Option<Candidate> {
        if !self.format.supports(CommandKind::BackReference) {
            return None;
        }
        let (offset, length) = self.matcher.longest_match(self.input, pos)?;
        Some(Candidate::new(
            CommandKind::BackReference,
            length,
            Payload::Offset(offset as u16),
        ))
    }

    /// Candidates for the four structured kinds at `pos`, in priority order.
    /// Kinds with no run at `pos` are omitted.
    pub fn structured(&mut self, pos: usize) -> Vec<Candidate> {
        if pos >= self.input.len() {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(4);
        out.extend(self.byte_fill(pos));
        out.extend(self.word_fill(pos));
        out.extend(self.increasing_fill(pos));
        out.extend(self.back_reference(pos));
        out
    }

    /// Structured candidate with the largest positive saving, earliest kind
    /// first on ties.
    pub fn best_structured(&mut self, pos: usize) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for cand in self.structured(pos) {
            if cand.savings() > 0 && best.as_ref().map_or(true, |b| cand.savings() > b.savings()) {
                best = Some(cand);
            }
        }
        best
    }

    /// Length of the literal run starting at `pos`: at least one byte, then
    /// every following byte where no structured run would save space.
    pub fn literal_run(&mut self, pos: usize) -> usize {
        let limit = self.limit(pos);
        let mut length = 1;
        while length < limit && self.best_structured(pos + length).is_none() {
            length += 1;
        }
        length
    }

    /// All five candidates at `pos`, DirectCopy first.
    pub fn evaluate(&mut self, pos: usize) -> Vec<Candidate> {
        if pos >= self.input.len() {
            return Vec::new();
        }
        let structured = self.structured(pos);
        let run = self.literal_run(pos);
        let literal = Candidate::new(
            CommandKind::DirectCopy,
            run,
            Payload::Literal(self.input[pos..pos + run].to_vec()),
        );
        std::iter::once(literal).chain(structured).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(data: &[u8], pos: usize, kind: CommandKind) -> Option<Candidate> {
        CandidateGenerator::new(data, Format::Graphics)
            .evaluate(pos)
            .into_iter()
            .find(|c| c.kind == kind)
    }

    #[test]
    fn byte_fill_stops_at_change() {
        let c = find(&[7, 7, 7, 7, 8], 0, CommandKind::ByteFill).unwrap();
        assert_eq!(c.length, 4);
        assert_eq!(c.cost, 2);
        assert_eq!(c.payload, Payload::Byte(7));
    }

    #[test]
    fn word_fill_allows_odd_lengths() {
        let c = find(&[1, 2, 1, 2, 1, 9], 0, CommandKind::WordFill).unwrap();
        assert_eq!(c.length, 5);
        assert_eq!(c.payload, Payload::Word([1, 2]));
    }

    #[test]
    fn increasing_fill_wraps() {
        let c = find(&[0xFE, 0xFF, 0x00, 0x01, 0x05], 0, CommandKind::IncreasingFill).unwrap();
        assert_eq!(c.length, 4);
    }

    #[test]
    fn fills_are_bounded() {
        let data = vec![0u8; 3000];
        let c = find(&data, 0, CommandKind::ByteFill).unwrap();
        assert_eq!(c.length, MAX_PIECE_LEN);
        assert_eq!(c.cost, 3);
    }

    #[test]
    fn back_reference_only_looks_backwards() {
        let data = b"xyzqxyzq";
        assert!(find(data, 0, CommandKind::BackReference).is_none());
        let c = find(data, 4, CommandKind::BackReference).unwrap();
        assert_eq!(c.length, 4);
        assert_eq!(c.payload, Payload::Offset(0));
    }

    #[test]
    fn back_reference_overlaps_its_source() {
        let data: Vec<u8> = b"ABC".iter().copied().cycle().take(60).collect();
        let c = find(&data, 3, CommandKind::BackReference).unwrap();
        assert_eq!(c.length, 57);
        assert_eq!(c.payload, Payload::Offset(0));
    }

    #[test]
    fn longest_match_wins_over_nearest() {
        let data = b"abcdefg__abcd__abcdefg";
        let mut finder = MatchFinder::new(data.len());
        assert_eq!(finder.longest_match(data, 15), Some((0, 7)));
    }

    #[test]
    fn hyrule_magic_never_back_references() {
        let data = b"xyzqxyzq";
        let mut gen = CandidateGenerator::new(data, Format::HyruleMagic);
        assert!(gen.structured(4).iter().all(|c| c.kind != CommandKind::BackReference));
    }

    #[test]
    fn literal_run_ends_before_saving_run() {
        let data = [1, 2, 3, 9, 9, 9, 9, 4];
        let mut gen = CandidateGenerator::new(&data, Format::Graphics);
        assert_eq!(gen.literal_run(0), 3);
        let direct = &gen.evaluate(0)[0];
        assert_eq!(direct.kind, CommandKind::DirectCopy);
        assert_eq!(direct.payload, Payload::Literal(vec![1, 2, 3]));
    }
}
