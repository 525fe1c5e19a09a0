#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate rawhuff;

use rawhuff::CompressOptions;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // First byte selects the options and a width that divides the rest.
    let (&selector, pixels) = data.split_first().unwrap();
    let options = CompressOptions {
        model: selector & 1 != 0,
        adaptive: selector & 2 != 0,
    };
    let mut width = (selector >> 2) as u32 % 16 + 1;
    while pixels.len() % width as usize != 0 {
        width -= 1;
    }

    let packed = rawhuff::compress(pixels, width, options).unwrap();
    let restored = rawhuff::decompress(&packed).unwrap();
    assert_eq!(restored, pixels);
});
