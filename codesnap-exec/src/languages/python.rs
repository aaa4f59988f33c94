use crate::{
    error::Error,
    input::InputLines,
    languages::{quoted_literal, LanguageAdapter, PreparedProgram, SourceFile},
    normalize::{INPUT_EXHAUSTED_EXIT_CODE, INPUT_EXHAUSTED_SENTINEL},
    runner::CommandSpec,
    types::Language,
};

const DRIVER_FILE: &str = "main.py";

/// Driver executed in place of the user's file. The user source runs in its
/// own `__main__` namespace where `input` is the feed's `next_line`; the
/// feed's stream also stands in for `sys.stdin`. Exit status 87 belongs to
/// the driver; a user `sys.exit(87)` leaves with status 1.
const DRIVER_TEMPLATE: &str = r#"import io
import linecache
import sys
import traceback

_LINES = __CODESNAP_LINES__
_EXHAUSTED_EXIT_CODE = __CODESNAP_EXIT_CODE__
_EXHAUSTED_MESSAGE = __CODESNAP_SENTINEL__
_FILENAME = "solution.py"


class _InputExhausted(BaseException):
    pass


class _InputFeed:
    def __init__(self, stream):
        self._stream = stream

    def next_line(self, prompt=""):
        if prompt:
            sys.stdout.write(str(prompt))
            sys.stdout.flush()
        line = self._stream.readline()
        if not line:
            raise _InputExhausted()
        return line[:-1] if line.endswith("\n") else line


def _run(source):
    stream = io.StringIO("\n".join(_LINES) + "\n")
    sys.stdin = stream
    feed = _InputFeed(stream)
    linecache.cache[_FILENAME] = (len(source), None, source.splitlines(True), _FILENAME)
    namespace = {
        "__name__": "__main__",
        "__builtins__": __builtins__,
        "input": feed.next_line,
    }
    try:
        exec(compile(source, _FILENAME, "exec"), namespace)
    except _InputExhausted:
        sys.stdout.flush()
        sys.stderr.write(_EXHAUSTED_MESSAGE + "\n")
        sys.stderr.flush()
        sys.exit(_EXHAUSTED_EXIT_CODE)
    except SystemExit as exc:
        if exc.code == _EXHAUSTED_EXIT_CODE:
            sys.exit(1)
        raise
    except BaseException as exc:
        sys.stdout.flush()
        traceback.print_exception(type(exc), exc, exc.__traceback__.tb_next)
        sys.exit(1)


_run(__CODESNAP_SOURCE__)
"#;

pub struct PythonAdapter {
    interpreter: String,
}

impl PythonAdapter {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    /// Generate the driver program for `code` fed with `input`
    pub fn wrap(&self, code: &str, input: &InputLines) -> Result<String, Error> {
        let lines = serde_json::to_string(input.lines())?;
        // User-controlled text is substituted once, bottom placeholder first,
        // so placeholders appearing inside it are never expanded
        Ok(DRIVER_TEMPLATE
            .replace(
                "__CODESNAP_EXIT_CODE__",
                &INPUT_EXHAUSTED_EXIT_CODE.to_string(),
            )
            .replace(
                "__CODESNAP_SENTINEL__",
                &quoted_literal(INPUT_EXHAUSTED_SENTINEL)?,
            )
            .replacen("__CODESNAP_SOURCE__", &quoted_literal(code)?, 1)
            .replacen("__CODESNAP_LINES__", &lines, 1))
    }
}

impl LanguageAdapter for PythonAdapter {
    fn language(&self) -> Language {
        Language::Python
    }

    fn toolchain_name(&self) -> &str {
        "Python"
    }

    fn required_tools(&self) -> Vec<&str> {
        vec![self.interpreter.as_str()]
    }

    fn prepare(&self, code: &str, input: &InputLines) -> Result<PreparedProgram, Error> {
        let driver = self.wrap(code, input)?;
        Ok(PreparedProgram {
            files: vec![SourceFile::new(DRIVER_FILE, driver)],
            compile: None,
            run: CommandSpec::new(&self.interpreter).arg(DRIVER_FILE),
            input_guarded: true,
        })
    }
}
