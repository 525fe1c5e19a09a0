#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate rawhuff;

fuzz_target!(|data: &[u8]| {
    // Errors are expected on arbitrary input; panics are not.
    let _ = rawhuff::decompress(data);
});
