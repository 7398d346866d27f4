use honggfuzz::fuzz;
use lz2::{decompress_with_limit, Format};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            for format in [Format::Graphics, Format::Overworld, Format::HyruleMagic] {
                let _ = decompress_with_limit(data, format, 1 << 20);
            }
        });
    }
}
