//! End-to-end reading of files on disk.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::fs;
use std::path::Path;

use asm_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use asm_input::{InputConfig, InputFile, MultibyteHandling, BUFFER_SIZE};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &[u8]) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

fn read_all(input: &mut InputFile, sink: &mut Vec<Diagnostic>) -> Vec<u8> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; input.buffer_size()];
    loop {
        let n = input.next_buffer(&mut buf, sink);
        if n == 0 {
            return out;
        }
        out.extend_from_slice(&buf[..n]);
    }
}

#[test]
fn reads_file_larger_than_one_buffer() {
    let dir = TempDir::new().unwrap();
    let contents: Vec<u8> = b"\tmovl $1, %eax\n".repeat(BUFFER_SIZE / 8);
    let path = write(&dir, "big.s", &contents);

    let mut input = InputFile::new(InputConfig::default());
    let mut sink: Vec<Diagnostic> = Vec::new();
    input.begin();
    input.open(&path, false, &mut sink).unwrap();

    let mut buf = vec![0u8; BUFFER_SIZE];
    assert_eq!(input.next_buffer(&mut buf, &mut sink), BUFFER_SIZE);
    assert_eq!(&buf[..], &contents[..BUFFER_SIZE]);

    let mut rest = read_all(&mut input, &mut sink);
    let mut all = buf;
    all.append(&mut rest);
    assert_eq!(all, contents);
    assert!(sink.is_empty());
    input.end();
}

#[test]
fn no_app_file_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "cc.s", b"#NO_APP\n\t.file \"t.c\"\n");

    let mut input = InputFile::new(InputConfig::default());
    let mut sink: Vec<Diagnostic> = Vec::new();
    input.open(&path, true, &mut sink).unwrap();

    assert!(!input.preprocess());
    assert_eq!(input.file_name(), Some(path.as_str()));
    assert_eq!(read_all(&mut input, &mut sink), b"\n\t.file \"t.c\"\n");
}

#[test]
fn missing_file_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.s");
    let name = path.to_str().unwrap();

    let mut input = InputFile::new(InputConfig::default());
    let mut queue = DiagnosticQueue::new();
    assert!(input.open(name, false, &mut queue).is_err());
    assert!(queue.has_errors().is_some());

    let diagnostics = queue.flush();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E0001);
    assert!(diagnostics[0]
        .message
        .starts_with(&format!("can't open {name} for reading: ")));
}

#[test]
fn directory_cannot_be_read() {
    let dir = TempDir::new().unwrap();
    let name = dir.path().to_str().unwrap();

    let mut input = InputFile::new(InputConfig::default());
    let mut sink: Vec<Diagnostic> = Vec::new();
    // Opening a directory succeeds on some platforms and fails on the
    // first read on others; either way nothing is left open.
    let _ = input.open(name, false, &mut sink);
    assert_eq!(read_all(&mut input, &mut sink), b"");
    assert!(!input.is_open());
    assert!(sink
        .iter()
        .all(|d| matches!(d.code, ErrorCode::E0001 | ErrorCode::E0002)));
    assert!(!sink.is_empty());
}

#[test]
fn include_from_disk_resumes_outer_file() {
    let dir = TempDir::new().unwrap();
    let outer = write(&dir, "outer.s", b"start:\n.include \"inner.s\"\nend:\n");
    let inner = write(&dir, "inner.s", b"#APP\n\tnop\n");

    let mut input = InputFile::new(InputConfig::default());
    let mut sink: Vec<Diagnostic> = Vec::new();
    input.open(&outer, false, &mut sink).unwrap();

    let mut buf = [0u8; 7];
    assert_eq!(input.next_buffer(&mut buf, &mut sink), 7);
    assert_eq!(&buf, b"start:\n");

    let saved = input.push();
    assert_eq!(saved.file_name(), Some(outer.as_str()));
    input.open(&inner, false, &mut sink).unwrap();
    assert!(input.preprocess());
    assert_eq!(read_all(&mut input, &mut sink), b"\n\tnop\n");
    input.pop(saved);

    assert_eq!(input.file_name(), Some(outer.as_str()));
    assert!(!input.preprocess());
    assert_eq!(
        read_all(&mut input, &mut sink),
        b".include \"inner.s\"\nend:\n"
    );
    assert!(sink.is_empty());
}

#[test]
fn dropped_saved_file_releases_outer_stream() {
    let dir = TempDir::new().unwrap();
    let outer = write(&dir, "outer.s", b"outer\n");

    let mut input = InputFile::new(InputConfig::default());
    let mut sink: Vec<Diagnostic> = Vec::new();
    input.open(&outer, false, &mut sink).unwrap();
    drop(input.push());

    assert!(!input.is_open());
    assert_eq!(read_all(&mut input, &mut sink), b"");
}

#[test]
fn malformed_utf8_warning_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "latin1.s", b".ascii \"caf\xe9\"\n");

    let config = InputConfig::default().with_multibyte(MultibyteHandling::Warn);
    let mut input = InputFile::new(config);
    let mut sink: Vec<Diagnostic> = Vec::new();
    input.open(&path, false, &mut sink).unwrap();
    read_all(&mut input, &mut sink);

    assert_eq!(sink.len(), 1);
    assert!(sink[0].is_warning());
    assert_eq!(sink[0].code, ErrorCode::E0004);
    assert_eq!(sink[0].file.as_deref(), Some(path.as_str()));
}

#[test]
fn custom_comment_character_directive() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "arm.s", b"@APP\nmov r0, r1\n");

    let config = InputConfig::default().with_line_comment_chars(*b"@");
    let mut input = InputFile::new(config);
    let mut sink: Vec<Diagnostic> = Vec::new();
    input.open(&path, false, &mut sink).unwrap();

    assert!(input.preprocess());
    assert_eq!(read_all(&mut input, &mut sink), b"\nmov r0, r1\n");
}

#[test]
fn unicode_path_is_display_name() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "données.s", b"nop\n");
    assert!(Path::new(&path).exists());

    let mut input = InputFile::new(InputConfig::default());
    let mut sink: Vec<Diagnostic> = Vec::new();
    input.open(&path, false, &mut sink).unwrap();
    assert!(input.file_name().unwrap().ends_with("données.s"));
}
