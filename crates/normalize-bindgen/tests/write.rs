//! Writing binding files to disk.

use std::fs;

use normalize_bindgen::{BindgenOptions, WriteError, write_bindings};
use tempfile::TempDir;

const SOURCE: &str = "declare namespace monaco {\n  export function a(): void;\n}\n\ndeclare namespace monaco.languages {\n  export type Kind = \"a\" | \"b\";\n}\n";

#[test]
fn writes_one_file_per_namespace() {
    let dir = TempDir::new().unwrap();
    let written = write_bindings(SOURCE, dir.path(), &BindgenOptions::default()).unwrap();
    assert_eq!(
        written,
        [dir.path().join("monaco.rs"), dir.path().join("monaco.languages.rs")]
    );

    let monaco = fs::read_to_string(dir.path().join("monaco.rs")).unwrap();
    assert!(monaco.contains("pub fn a();"));
    assert!(monaco.ends_with("}\n"));
    let languages = fs::read_to_string(dir.path().join("monaco.languages.rs")).unwrap();
    assert!(languages.starts_with("str_enum! {"));
}

#[test]
fn creates_missing_output_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("gen/bindings");
    write_bindings(SOURCE, &out, &BindgenOptions::default()).unwrap();
    assert!(out.join("monaco.rs").is_file());
}

#[test]
fn uses_configured_extension() {
    let dir = TempDir::new().unwrap();
    let options = BindgenOptions::from_toml_str("extension = \"txt\"").unwrap();
    write_bindings(SOURCE, dir.path(), &options).unwrap();
    assert!(dir.path().join("monaco.txt").is_file());
    assert!(!dir.path().join("monaco.rs").exists());
}

#[test]
fn translation_errors_write_nothing() {
    let dir = TempDir::new().unwrap();
    let source = "declare namespace ok {\n  export function a(): void;\n}\n\ndeclare namespace bad {\n  export type T = () => void;\n}\n";
    let err = write_bindings(source, dir.path(), &BindgenOptions::default()).unwrap_err();
    assert!(matches!(err, WriteError::Translate(_)));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn loads_options_from_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bindgen.toml");
    fs::write(&config, "copy_types = [\"Range\"]\nextension = \"gen.rs\"\n").unwrap();
    let options = BindgenOptions::load(&config).unwrap();
    assert_eq!(options.copy_types, ["Range"]);
    assert_eq!(options.extension, "gen.rs");
}
