use crate::{
    error::Error,
    input::InputLines,
    languages::{LanguageAdapter, PreparedProgram, SourceFile},
    runner::CommandSpec,
    types::Language,
};

const SOURCE_FILE: &str = "main.c";
const BINARY: &str = "main";

pub struct CAdapter {
    compiler: String,
}

impl CAdapter {
    pub fn new(compiler: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
        }
    }
}

impl LanguageAdapter for CAdapter {
    fn language(&self) -> Language {
        Language::C
    }

    fn toolchain_name(&self) -> &str {
        "GCC"
    }

    fn required_tools(&self) -> Vec<&str> {
        vec![self.compiler.as_str()]
    }

    fn prepare(&self, code: &str, input: &InputLines) -> Result<PreparedProgram, Error> {
        Ok(PreparedProgram {
            files: vec![SourceFile::new(SOURCE_FILE, code)],
            compile: Some(
                CommandSpec::new(&self.compiler).args([SOURCE_FILE, "-o", BINARY, "-lm"]),
            ),
            run: CommandSpec::new(format!("./{}", BINARY)).stdin(input.joined()),
            input_guarded: false,
        })
    }
}
