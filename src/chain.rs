//! Piece chains and the builder that produces them.
//!
//! A [`Chain`] is an arena of pieces linked through `next` indices. Merging
//! relinks nodes in place; unlinked nodes stay in the arena but are never
//! visited again.

use crate::candidate::CandidateGenerator;
use crate::config::{Format, Strategy};
use crate::types::{encoded_cost, CommandKind, Payload, Piece, MAX_PIECE_LEN};

#[derive(Debug, Clone)]
struct Node {
    piece: Piece,
    /// Output position of the first byte this piece produces.
    start: usize,
    next: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct Chain {
    nodes: Vec<Node>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

/// Walks a chain in output order, yielding `(start, piece)`.
pub struct Iter<'c> {
    chain: &'c Chain,
    cursor: Option<usize>,
}

impl<'c> Iterator for Iter<'c> {
    type Item = (usize, &'c Piece);

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.chain.nodes[self.cursor?];
        self.cursor = node.next;
        Some((node.start, &node.piece))
    }
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from pieces laid end to end.
    pub fn from_pieces(pieces: impl IntoIterator<Item = Piece>) -> Self {
        let mut chain = Self::new();
        let mut start = 0;
        for piece in pieces {
            let length = piece.length;
            chain.push(start, piece);
            start += length;
        }
        chain
    }

    pub fn push(&mut self, start: usize, piece: Piece) {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            piece,
            start,
            next: None,
        });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
    }

    /// Number of linked pieces.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            chain: self,
            cursor: self.head,
        }
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.iter().map(|(_, piece)| piece)
    }

    pub fn to_pieces(&self) -> Vec<Piece> {
        self.pieces().cloned().collect()
    }

    /// Total output bytes described by the chain.
    pub fn covered_len(&self) -> usize {
        self.pieces().map(|p| p.length).sum()
    }

    /// Serialized size including the terminator.
    pub fn encoded_len(&self) -> usize {
        self.pieces().map(Piece::encoded_len).sum::<usize>() + 1
    }

    /// MergeCopy pass. Joins adjacent DirectCopy pieces, and folds
    /// `DirectCopy, X, DirectCopy` into one DirectCopy whenever the merged
    /// piece is no larger. Returns the number of encoded bytes saved.
    pub fn merge_copies(&mut self, input: &[u8]) -> usize {
        let mut saved = 0;
        let mut cursor = self.head;
        while let Some(i) = cursor {
            if self.nodes[i].piece.kind != CommandKind::DirectCopy {
                cursor = self.nodes[i].next;
                continue;
            }
            let Some(j) = self.nodes[i].next else { break };
            let last = if self.nodes[j].piece.kind == CommandKind::DirectCopy {
                Some(j)
            } else {
                self.nodes[j]
                    .next
                    .filter(|&k| self.nodes[k].piece.kind == CommandKind::DirectCopy)
            };
            if let Some(gain) = last.and_then(|last| self.try_merge(i, last, input)) {
                saved += gain;
                // Stay on `i`: the grown copy may absorb its new neighbour too.
                continue;
            }
            cursor = self.nodes[i].next;
        }
        saved
    }

    fn try_merge(&mut self, first: usize, last: usize, input: &[u8]) -> Option<usize> {
        let start = self.nodes[first].start;
        let end = self.nodes[last].start + self.nodes[last].piece.length;
        if end - start > MAX_PIECE_LEN {
            return None;
        }

        let mut before = 0;
        let mut count = 0;
        let mut cursor = Some(first);
        while let Some(idx) = cursor {
            before += self.nodes[idx].piece.encoded_len();
            count += 1;
            cursor = if idx == last { None } else { self.nodes[idx].next };
        }
        let after = encoded_cost(CommandKind::DirectCopy, end - start);
        if after > before {
            return None;
        }

        self.nodes[first].piece = Piece::direct_copy(&input[start..end]);
        self.nodes[first].next = self.nodes[last].next;
        if self.tail == Some(last) {
            self.tail = Some(first);
        }
        self.len -= count - 1;
        Some(before - after)
    }
}

/// Ephemeral encoder state for one compress call.
#[derive(Debug)]
pub struct CompressionContext<'a> {
    generator: CandidateGenerator<'a>,
    pos: usize,
    chain: Chain,
    /// Running size of the serialized output, terminator included.
    emitted: usize,
}

impl<'a> CompressionContext<'a> {
    pub fn new(input: &'a [u8], format: Format) -> Self {
        Self {
            generator: CandidateGenerator::new(input, format),
            pos: 0,
            chain: Chain::new(),
            emitted: 1,
        }
    }

    pub fn input(&self) -> &'a [u8] {
        self.generator.input()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn into_chain(self) -> Chain {
        self.chain
    }

    /// Size the serialized chain is expected to have.
    pub fn estimated_len(&self) -> usize {
        self.emitted
    }

    fn emit(&mut self, piece: Piece) {
        self.emitted += piece.encoded_len();
        let length = piece.length;
        self.chain.push(self.pos, piece);
        self.pos += length;
    }

    fn merge_copies(&mut self) {
        let input = self.generator.input();
        self.emitted -= self.chain.merge_copies(input);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Score {
    cost: usize,
    pieces: usize,
}

#[derive(Debug, Clone)]
struct Step {
    from: usize,
    kind: CommandKind,
    /// `None` for DirectCopy; the literal is sliced from the input.
    payload: Option<Payload>,
}

/// Drives the candidate generator across a whole input.
#[derive(Debug, Clone, Copy)]
pub struct ChainBuilder {
    format: Format,
    strategy: Strategy,
}

impl ChainBuilder {
    pub fn new(format: Format, strategy: Strategy) -> Self {
        Self { format, strategy }
    }

    /// Produce the chain for `input`, with MergeCopy already applied.
    pub fn build<'a>(&self, input: &'a [u8]) -> CompressionContext<'a> {
        let mut ctx = CompressionContext::new(input, self.format);
        match self.strategy {
            Strategy::Greedy => Self::build_greedy(&mut ctx),
            Strategy::OptimalWithAlternatives => Self::build_optimal(&mut ctx),
        }
        ctx.merge_copies();
        ctx
    }

    fn build_greedy(ctx: &mut CompressionContext) {
        let input = ctx.input();
        while ctx.position() < input.len() {
            let pos = ctx.position();
            let piece = match ctx.generator.best_structured(pos) {
                Some(cand) => cand.to_piece(cand.length),
                None => {
                    let run = ctx.generator.literal_run(pos);
                    Piece::direct_copy(&input[pos..pos + run])
                }
            };
            ctx.emit(piece);
        }
    }

    /// Shortest path over output positions. Each position relaxes every
    /// length of every candidate, so a run is shortened whenever that lets a
    /// later piece start somewhere cheaper.
    ///
    /// Ties keep the first relaxation seen: fewer pieces first, then the
    /// earlier start position, then kind priority.
    fn build_optimal(ctx: &mut CompressionContext) {
        let input = ctx.input();
        let n = input.len();
        let mut best = vec![
            Score {
                cost: usize::MAX,
                pieces: usize::MAX,
            };
            n + 1
        ];
        let mut steps: Vec<Option<Step>> = vec![None; n + 1];
        best[0] = Score { cost: 0, pieces: 0 };

        for pos in 0..n {
            let base = best[pos];
            let mut relax = |length: usize, kind: CommandKind, payload: Option<&Payload>| {
                let score = Score {
                    cost: base.cost + encoded_cost(kind, length),
                    pieces: base.pieces + 1,
                };
                if score < best[pos + length] {
                    best[pos + length] = score;
                    steps[pos + length] = Some(Step {
                        from: pos,
                        kind,
                        payload: payload.cloned(),
                    });
                }
            };

            for length in 1..=(n - pos).min(MAX_PIECE_LEN) {
                relax(length, CommandKind::DirectCopy, None);
            }
            for cand in ctx.generator.structured(pos) {
                for length in 1..=cand.length {
                    relax(length, cand.kind, Some(&cand.payload));
                }
            }
        }

        let mut pieces = Vec::new();
        let mut end = n;
        while let Some(step) = steps[end].take() {
            let piece = match step.payload {
                None => Piece::direct_copy(&input[step.from..end]),
                Some(payload) => Piece {
                    kind: step.kind,
                    length: end - step.from,
                    payload,
                },
            };
            pieces.push(piece);
            end = step.from;
        }
        for piece in pieces.into_iter().rev() {
            ctx.emit(piece);
        }
    }
}
