use honggfuzz::fuzz;
use lz2::{compress_with, decompress_with, Config, Format, Strategy};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let Some((&selector, input)) = data.split_first() else {
                return;
            };
            let format = match selector % 3 {
                0 => Format::Graphics,
                1 => Format::Overworld,
                _ => Format::HyruleMagic,
            };
            let strategy = if selector & 0x80 == 0 {
                Strategy::OptimalWithAlternatives
            } else {
                Strategy::Greedy
            };
            let config = Config::new(format, strategy);
            let packed = compress_with(input, &config).expect("compression failed");
            assert_eq!(decompress_with(&packed, &config).expect("decode failed"), input);
        });
    }
}
