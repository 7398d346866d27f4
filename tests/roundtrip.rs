use lz2::{
    compress, compress_with, decompress, ChainSerializer, CommandKind, Config, Decompressor, Format,
    Piece, Strategy,
};

fn pieces(packed: &[u8]) -> Vec<Piece> {
    Decompressor::new(Format::Graphics).parse(packed).unwrap()
}

fn both_strategies() -> [Config; 2] {
    [
        Config::new(Format::Graphics, Strategy::Greedy),
        Config::new(Format::Graphics, Strategy::OptimalWithAlternatives),
    ]
}

#[test]
fn empty_input_is_just_the_terminator() {
    for config in both_strategies() {
        assert_eq!(compress_with(&[], &config).unwrap(), [0xFF]);
    }
    assert_eq!(decompress(&[0xFF]).unwrap(), Vec::<u8>::new());
}

#[test]
fn short_byte_fill() {
    let raw = [0x11u8; 4];
    for config in both_strategies() {
        let packed = compress_with(&raw, &config).unwrap();
        assert_eq!(packed, [0x23, 0x11, 0xFF]);
        assert_eq!(decompress(&packed).unwrap(), raw);
    }
}

#[test]
fn ascending_run_uses_increasing_fill() {
    let raw: Vec<u8> = (0u8..10).collect();
    let packed = compress(&raw).unwrap();
    assert_eq!(packed, [0x69, 0x00, 0xFF]);
    assert_eq!(pieces(&packed), [Piece::increasing_fill(0, 10)]);
    assert_eq!(decompress(&packed).unwrap(), raw);
}

#[test]
fn longest_fill_takes_the_extended_header() {
    let raw = vec![0x11u8; 1024];
    for config in both_strategies() {
        let packed = compress_with(&raw, &config).unwrap();
        assert_eq!(packed, [0xE7, 0xFF, 0x11, 0xFF]);
    }
}

#[test]
fn one_byte_past_the_longest_fill_needs_two_pieces() {
    let raw = vec![0x11u8; 1025];
    for config in both_strategies() {
        let packed = compress_with(&raw, &config).unwrap();
        assert_eq!(packed.len(), 6);
        assert_eq!(decompress(&packed).unwrap(), raw);
    }

    let greedy = compress_with(&raw, &both_strategies()[0]).unwrap();
    assert_eq!(
        pieces(&greedy),
        [Piece::byte_fill(0x11, 1024), Piece::direct_copy(&[0x11])]
    );

    // The first position that reaches the end at minimum cost is kept.
    let optimal = compress_with(&raw, &both_strategies()[1]).unwrap();
    assert_eq!(
        pieces(&optimal),
        [Piece::direct_copy(&[0x11]), Piece::byte_fill(0x11, 1024)]
    );
    assert_eq!(optimal, [0x00, 0x11, 0xE7, 0xFF, 0x11, 0xFF]);
}

#[test]
fn equal_cost_kinds_resolve_by_priority() {
    // At position 5 a WordFill and a BackReference to offset 0 both cover
    // four bytes for three encoded bytes.
    let raw = b"XYXYqXYXY";
    for config in both_strategies() {
        let packed = compress_with(raw, &config).unwrap();
        assert_eq!(
            pieces(&packed),
            [
                Piece::word_fill(*b"XY", 4),
                Piece::direct_copy(b"q"),
                Piece::word_fill(*b"XY", 4),
            ]
        );
        assert_eq!(packed, [0x43, b'X', b'Y', 0x00, b'q', 0x43, b'X', b'Y', 0xFF]);
    }
}

#[test]
fn equal_cost_chains_prefer_fewer_pieces() {
    // Copy "BAA", fill B x3, increasing "AB", then 3 bytes from offset 2 is
    // also twelve bytes, in four pieces.
    let raw = b"BAABBBABABB";
    let config = Config::new(Format::Graphics, Strategy::OptimalWithAlternatives);
    let packed = compress_with(raw, &config).unwrap();
    assert_eq!(
        pieces(&packed),
        [
            Piece::direct_copy(b"BAABB"),
            Piece::word_fill(*b"BA", 4),
            Piece::byte_fill(b'B', 2),
        ]
    );
    assert_eq!(packed.len(), 12);
    assert_eq!(decompress(&packed).unwrap(), raw);
}

#[test]
fn repeated_pattern_becomes_self_overlapping_reference() {
    let raw: Vec<u8> = b"AXE".iter().copied().cycle().take(300).collect();
    for config in both_strategies() {
        let packed = compress_with(&raw, &config).unwrap();
        assert_eq!(
            pieces(&packed),
            [Piece::direct_copy(b"AXE"), Piece::back_reference(0, 297)]
        );
        assert_eq!(packed, [0x02, b'A', b'X', b'E', 0xF1, 0x28, 0x00, 0x00, 0xFF]);
        assert_eq!(decompress(&packed).unwrap(), raw);
    }
}

#[test]
fn two_byte_period_prefers_word_fill() {
    let raw: Vec<u8> = b"AB".iter().copied().cycle().take(200).collect();
    let packed = compress(&raw).unwrap();
    assert_eq!(packed, [0xE8, 0xC7, b'A', b'B', 0xFF]);
    assert_eq!(decompress(&packed).unwrap(), raw);
}

#[test]
fn overlapping_reference_decodes_byte_by_byte() {
    let stream = ChainSerializer::new(Format::Graphics)
        .serialize(&[Piece::direct_copy(b"AB"), Piece::back_reference(0, 198)])
        .unwrap();
    let expected: Vec<u8> = b"AB".iter().copied().cycle().take(200).collect();
    assert_eq!(decompress(&stream).unwrap(), expected);

    let stream = ChainSerializer::new(Format::Graphics)
        .serialize(&[Piece::direct_copy(b"Z"), Piece::back_reference(0, 50)])
        .unwrap();
    assert_eq!(decompress(&stream).unwrap(), vec![b'Z'; 51]);
}

#[test]
fn greedy_folds_marginal_fill_into_copy() {
    let raw = b"qzxDDDmk";
    let packed = compress_with(raw, &Config::new(Format::Graphics, Strategy::Greedy)).unwrap();
    assert_eq!(pieces(&packed), [Piece::direct_copy(raw)]);
}

#[test]
fn long_literal_runs_are_split_at_the_piece_limit() {
    let raw: Vec<u8> = (0..3000u32)
        .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
        .collect();
    for config in both_strategies() {
        let packed = compress_with(&raw, &config).unwrap();
        let parsed = pieces(&packed);
        assert!(parsed.iter().all(|p| p.length <= 1024));
        assert_eq!(parsed.iter().map(|p| p.length).sum::<usize>(), raw.len());
        assert_eq!(decompress(&packed).unwrap(), raw);
    }
}

#[test]
fn every_command_kind_roundtrips() {
    let mut raw = Vec::new();
    raw.extend([0x42u8; 40]);
    raw.extend((0u8..50).map(|i| if i % 2 == 0 { 0x12 } else { 0x34 }));
    raw.extend(0x80u8..0xC0);
    raw.extend(b"one literal stretch");
    let copy = raw[40..120].to_vec();
    raw.extend(copy);

    let packed = compress(&raw).unwrap();
    let kinds: Vec<CommandKind> = pieces(&packed).iter().map(|p| p.kind).collect();
    for kind in CommandKind::ALL {
        assert!(kinds.contains(&kind), "missing {kind:?} in {kinds:?}");
    }
    assert_eq!(decompress(&packed).unwrap(), raw);
}
