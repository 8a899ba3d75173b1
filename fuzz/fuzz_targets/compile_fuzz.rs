//! Compile fuzz target: feed arbitrary text to the compiler.
//! It must not panic; every input yields bytes or a CompileError.
//! Indirect reads are bounded; inputs naming `/dev/` or `/proc/` are skipped since those can block.
//! Build with: cargo fuzz run compile_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if s.contains("/dev/") || s.contains("/proc/") {
        return;
    }
    let config = confcomp::CompilerConfig::default();
    if let Ok(bytes) = confcomp::compile_source(s, &config) {
        assert!(bytes.len() >= 7);
        assert_eq!(bytes[0], 1);
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run compile_fuzz");
}
