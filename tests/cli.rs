use std::{fs, path::Path, process::Command};

use corpus_search::{Corpus, Document};

fn write_corpus(dir: &Path) -> String {
    let mut corpus = Corpus::new("cli");
    corpus.add_document(Document::new("first", "ann", "2024-01-01", "http://a/1", "cat dog cat"));
    corpus.add_document(Document::new("second", "ann", "2024-02-01", "http://a/2", "dog bird"));
    corpus.add_document(Document::new("third", "bob", "2024-03-01", "http://a/3", "bird bird bird"));
    let path = dir.join("corpus.tsv");
    corpus.save(&path).unwrap();
    path.to_string_lossy().into_owned()
}

fn run(args: &[&str]) -> (bool, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_corpus-search"))
        .args(args)
        .env("RUST_LOG", "off")
        .env_remove("CORPUS_SEARCH_CONFIG")
        .output()
        .unwrap();
    (output.status.success(), String::from_utf8(output.stdout).unwrap())
}

#[test]
fn author_reports_average_length() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_corpus(dir.path());

    let (ok, out) = run(&[&corpus, "author", "ann"]);
    assert!(ok);
    assert!(out.contains("Author: ann"));
    // (3 + 2) / 2 words
    assert!(out.contains("average length: 2.5 words"), "{out}");
}

#[test]
fn concordance_is_exported_to_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_corpus(dir.path());
    let out_path = dir.path().join("bird.tsv");
    let out_arg = out_path.to_string_lossy().into_owned();

    let (ok, out) = run(&[&corpus, "concord", r"bird\s*", &out_arg]);
    assert!(ok);
    assert!(out.contains("4 lines written"), "{out}");

    let table = fs::read_to_string(&out_path).unwrap();
    let mut rows = table.lines();
    assert_eq!(rows.next(), Some("document\tleft\tmatch\tright"));
    assert_eq!(rows.count(), 4);
}

#[test]
fn unknown_command_fails_with_usage() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_corpus(dir.path());
    let (ok, _) = run(&[&corpus, "frobnicate"]);
    assert!(!ok);
}
