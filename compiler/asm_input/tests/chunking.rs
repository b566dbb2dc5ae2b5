//! Property tests for chunked delivery.
//!
//! Whatever the buffer size, the concatenated buffers must equal the file
//! minus only the bytes a first-line directive consumed.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use asm_diagnostic::Diagnostic;
use asm_input::{InputConfig, InputFile, MemoryOpener};
use proptest::prelude::*;

fn input_with(files: &[(&str, &[u8])]) -> InputFile {
    let mut opener = MemoryOpener::new();
    for &(path, contents) in files {
        opener.insert(path, contents);
    }
    InputFile::new(InputConfig::default()).with_opener(opener)
}

fn drain(input: &mut InputFile, chunk: usize, sink: &mut Vec<Diagnostic>) -> Vec<u8> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; chunk];
    loop {
        let n = input.next_buffer(&mut buf, sink);
        if n == 0 {
            return out;
        }
        assert!(n <= chunk);
        out.extend_from_slice(&buf[..n]);
    }
}

/// Contents whose first byte is not the `#` comment trigger.
fn plain_contents() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..4096)
        .prop_filter("no leading comment", |bytes| bytes.first() != Some(&b'#'))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    #[test]
    fn plain_file_survives_any_chunking(
        contents in plain_contents(),
        chunk in 1usize..600,
        hint in any::<bool>(),
    ) {
        let mut input = input_with(&[("a.s", contents.as_slice())]);
        let mut sink: Vec<Diagnostic> = Vec::new();
        input.open("a.s", hint, &mut sink).unwrap();

        prop_assert_eq!(input.preprocess(), hint);
        prop_assert_eq!(drain(&mut input, chunk, &mut sink), contents);
        prop_assert!(sink.is_empty());
    }

    #[test]
    fn directive_consumes_only_its_line(
        body in prop::collection::vec(any::<u8>(), 0..2048),
        chunk in 1usize..300,
        app in any::<bool>(),
    ) {
        let mut contents = if app { b"#APP\n".to_vec() } else { b"#NO_APP\n".to_vec() };
        contents.extend_from_slice(&body);
        let mut input = input_with(&[("a.s", contents.as_slice())]);
        let mut sink: Vec<Diagnostic> = Vec::new();
        input.open("a.s", !app, &mut sink).unwrap();

        prop_assert_eq!(input.preprocess(), app);
        let mut expected = b"\n".to_vec();
        expected.extend_from_slice(&body);
        prop_assert_eq!(drain(&mut input, chunk, &mut sink), expected);
    }

    #[test]
    fn nested_file_at_any_point_leaves_outer_intact(
        outer in plain_contents(),
        inner in plain_contents(),
        split in 0usize..4096,
        chunk in 1usize..512,
    ) {
        let mut input = input_with(&[("outer.s", outer.as_slice()), ("inner.s", inner.as_slice())]);
        let mut sink: Vec<Diagnostic> = Vec::new();
        input.open("outer.s", false, &mut sink).unwrap();

        // Read some prefix of the outer file, then include the inner one.
        let mut head = Vec::new();
        let mut buf = vec![0u8; chunk];
        while head.len() < split.min(outer.len()) {
            let n = input.next_buffer(&mut buf, &mut sink);
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let saved = input.push();
        input.open("inner.s", false, &mut sink).unwrap();
        prop_assert_eq!(drain(&mut input, chunk, &mut sink), inner);
        input.pop(saved);

        head.extend(drain(&mut input, chunk, &mut sink));
        prop_assert_eq!(head, outer);
        prop_assert!(sink.is_empty());
    }
}
