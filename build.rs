use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::DirEntry;
use std::path::Path;
use std::{env, fs};

const MD_CASES_PATH: &str = "tests/md_cases/";
const CASES_WRITE: &str = "tests/integ_test_cases.rs";

fn main() -> Result<(), String> {
    println!("cargo::rerun-if-changed={MD_CASES_PATH}");
    let out_dir = env::var("OUT_DIR").map_err(|e| format!("OUT_DIR: {e}"))?;

    let mut out = Writer::new();
    let mut entries = fs::read_dir(MD_CASES_PATH)
        .map_err(|e| format!("{MD_CASES_PATH}: {e}"))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("{MD_CASES_PATH}: {e}"))?;
    entries.sort_by_key(DirEntry::file_name);

    for entry in entries {
        write_case_file(&entry, &mut out)?;
    }

    let out_path = Path::new(&out_dir).join(CASES_WRITE);
    let out_parent = out_path.parent().ok_or_else(|| format!("no parent dir for {}", out_path.display()))?;
    fs::create_dir_all(out_parent).map_err(|e| format!("mkdirs on {}: {e}", out_parent.display()))?;
    fs::write(&out_path, out.get()).map_err(|e| format!("writing to {}: {e}", out_path.display()))?;
    Ok(())
}

/// Writes one `mod` per case file: its markdown and files as consts, then one `#[test]` per `[expect.*]` table.
fn write_case_file(entry: &DirEntry, out: &mut Writer) -> Result<(), String> {
    let path = entry.path();
    let err = |e: &dyn std::fmt::Display| format!("{}: {e}", path.display());

    if !entry.file_type().map_err(|e| err(&e))?.is_file() {
        return Err(err(&"not a regular file"));
    }
    let mod_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .ok_or_else(|| err(&"no file stem"))?;
    let contents = fs::read_to_string(&path).map_err(|e| err(&e))?;
    let case_file: CaseFile = toml::from_str(&contents).map_err(|e| err(&e))?;

    out.writes(&["mod ", &mod_name, " {"]);
    out.with_indent(|out| {
        out.write("use super::*;").nl().nl();

        out.write("const MD: &str = ");
        out.raw_string(case_file.given.md.trim());
        out.writeln(";");

        out.write(&format!("const FILES: [(&str, &str); {}] = [", case_file.given.files.len()));
        if !case_file.given.files.is_empty() {
            out.with_indent(|out| {
                for (file_name, file_content) in &case_file.given.files {
                    out.writeln(&format!("({file_name:?}, {file_content:?}),"));
                }
            });
        }
        out.writeln("];");

        for (name, expect) in &case_file.expect {
            out.nl();
            expect.write_test_fn(name, out);
        }
    });
    out.writeln("}");
    out.nl();
    Ok(())
}

#[derive(Deserialize)]
struct CaseFile {
    given: Given,
    expect: BTreeMap<String, Expect>,
}

#[derive(Deserialize)]
struct Given {
    md: String,
    #[serde(default)]
    files: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct Expect {
    cli_args: Vec<String>,
    #[serde(default)]
    output: String,
    #[serde(default)]
    output_err: String,
    #[serde(default = "default_true")]
    expect_success: bool,
    ignore: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Expect {
    fn write_test_fn(&self, case_name: &str, out: &mut Writer) {
        let fn_name = case_name
            .replace(|ch: char| !(ch.is_alphanumeric() || ch.is_whitespace() || ch == '_'), "")
            .replace(|ch: char| ch.is_whitespace(), "_");
        if self.ignore.is_some() {
            out.writeln("#[ignore]");
        }
        out.writeln("#[test]");
        out.writes(&["fn ", &fn_name, "() {"]);
        out.with_indent(|out| {
            out.write("Case {");
            out.with_indent(|out| {
                out.writeln(&format!("cli_args: {:?},", &self.cli_args));
                out.write("expect_output: ");
                out.raw_string(&self.output);
                out.writeln(",");
                out.write("expect_error: ");
                out.raw_string(&self.output_err);
                out.writeln(",");
                out.writeln(&format!("expect_success: {},", self.expect_success));
                out.writeln("md: MD,");
                out.write("files: &FILES,");
            });
            out.write("}.check();");
        });
        out.writeln("}");
    }
}

/// Accumulates generated source, indenting every line by the current level.
struct Writer {
    out: String,
    indent_level: usize,
}

impl Writer {
    fn new() -> Self {
        Self {
            out: String::with_capacity(512),
            indent_level: 0,
        }
    }

    fn with_indent<F>(&mut self, block: F)
    where
        F: FnOnce(&mut Self),
    {
        self.indent_level += 1;
        self.write("\n");
        block(self);
        self.indent_level -= 1;
        self.write("\n");
    }

    fn write(&mut self, text: &str) -> &mut Self {
        let mut iter = text.split('\n').peekable();
        while let Some(line) = iter.next() {
            self.out.push_str(line);
            if iter.peek().is_some() {
                self.out.push('\n');
                for _ in 0..self.indent_level {
                    self.out.push_str("    ");
                }
            }
        }
        self
    }

    /// Writes `text` as a raw string literal, unindented so that its contents are exact.
    fn raw_string(&mut self, text: &str) -> &mut Self {
        let mut hashes = String::from("#");
        while text.contains(&format!("\"{hashes}")) {
            hashes.push('#');
        }
        self.out.push_str(&format!("r{hashes}\"{text}\"{hashes}"));
        self
    }

    fn writes(&mut self, items: &[&str]) -> &mut Self {
        for item in items {
            self.write(item);
        }
        self
    }

    fn writeln(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    fn nl(&mut self) -> &mut Self {
        self.write("\n");
        self
    }

    fn get(&self) -> &str {
        &self.out
    }
}
