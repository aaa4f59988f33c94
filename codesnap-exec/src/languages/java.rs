use regex::Regex;
use std::sync::LazyLock;

use crate::{
    error::Error,
    input::InputLines,
    languages::{LanguageAdapter, PreparedProgram, SourceFile},
    runner::CommandSpec,
    types::Language,
};

const DEFAULT_CLASS_NAME: &str = "Main";

static PUBLIC_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"public\s+class\s+(\w+)").expect("valid public-class regex"));
static ANY_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bclass\s+(\w+)").expect("valid class regex"));

/// Best-effort discovery of the class `javac` will expect the file to be
/// named after: the public class, else the first class, else `Main`.
///
/// This is a text heuristic, not a parser. Comments or string literals can
/// fool it; the compiler then rejects the file, which is surfaced as an
/// ordinary compilation error.
pub fn extract_class_name(code: &str) -> String {
    PUBLIC_CLASS
        .captures(code)
        .or_else(|| ANY_CLASS.captures(code))
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_CLASS_NAME.to_string())
}

pub struct JavaAdapter {
    compiler: String,
    runtime: String,
}

impl JavaAdapter {
    pub fn new(compiler: impl Into<String>, runtime: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
            runtime: runtime.into(),
        }
    }
}

impl LanguageAdapter for JavaAdapter {
    fn language(&self) -> Language {
        Language::Java
    }

    fn toolchain_name(&self) -> &str {
        "Java"
    }

    fn required_tools(&self) -> Vec<&str> {
        vec![self.compiler.as_str(), self.runtime.as_str()]
    }

    fn prepare(&self, code: &str, input: &InputLines) -> Result<PreparedProgram, Error> {
        let class_name = extract_class_name(code);
        let filename = format!("{}.java", class_name);

        Ok(PreparedProgram {
            files: vec![SourceFile::new(&filename, code)],
            compile: Some(
                CommandSpec::new(&self.compiler)
                    .args(["-encoding", "UTF-8"])
                    .arg(filename),
            ),
            run: CommandSpec::new(&self.runtime)
                .args(["-cp", "."])
                .arg(class_name)
                .stdin(input.joined()),
            input_guarded: false,
        })
    }
}
