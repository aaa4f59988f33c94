use regex::Regex;
use std::sync::LazyLock;

use crate::{
    error::Error,
    input::InputLines,
    languages::{quoted_literal, LanguageAdapter, PreparedProgram, SourceFile},
    normalize::{INPUT_EXHAUSTED_EXIT_CODE, INPUT_EXHAUSTED_SENTINEL},
    runner::CommandSpec,
    types::Language,
};

const SOURCE_FILE: &str = "main.js";
const INPUT_FILE: &str = "input.txt";
const SCRIPT_NAME: &str = "solution.js";

static INTERACTIVE_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bprompt\s*\(|\breadline\b|process\.stdin").expect("valid input-detection regex")
});

/// Loader written as `main.js` for programs that read input. The user source
/// runs unmodified as its own script named `solution.js` inside a fresh `vm`
/// context, so stack traces keep their line numbers and the program may
/// declare its own `prompt`. The feed reads `input.txt` and is handed to the
/// context as its `prompt`; Node's own global object is left alone. Stdout
/// writes are mirrored into a buffer. Exit status 87 belongs to the
/// feed: a program exiting with 87 itself leaves with status 1.
const WRAPPER_TEMPLATE: &str = r#"const fs = require("fs");
const path = require("path");
const vm = require("vm");

const __codesnapFeed = (() => {
  let lines = [""];
  try {
    lines = fs
      .readFileSync(path.join(__dirname, __CODESNAP_INPUT_FILE__), "utf8")
      .split("\n")
      .map((line) => line.replace(/\r$/, ""));
    while (lines.length > 0 && lines[lines.length - 1].trim() === "") {
      lines.pop();
    }
    if (lines.length === 0) {
      lines = [""];
    }
  } catch (err) {
    lines = [""];
  }
  let index = 0;
  const feed = {
    exhausted: false,
    next(message) {
      if (message !== undefined && message !== null && message !== "") {
        process.stdout.write(String(message));
      }
      if (index >= lines.length) {
        feed.exhausted = true;
        process.stderr.write(__CODESNAP_SENTINEL__ + "\n");
        process.exit(__CODESNAP_EXIT_CODE__);
      }
      return lines[index++];
    },
  };
  return feed;
})();

process.on("exit", (code) => {
  if (code === __CODESNAP_EXIT_CODE__ && !__codesnapFeed.exhausted) {
    process.exitCode = 1;
  }
});

const __codesnapStdout = [];
const __codesnapWrite = process.stdout.write.bind(process.stdout);
process.stdout.write = (chunk, ...rest) => {
  __codesnapStdout.push(String(chunk));
  return __codesnapWrite(chunk, ...rest);
};

const __codesnapContext = vm.createContext({
  prompt: __codesnapFeed.next,
  require,
  module,
  exports: module.exports,
  __dirname,
  __filename: path.join(__dirname, __CODESNAP_SCRIPT_NAME__),
  console,
  process,
  Buffer,
  URL,
  URLSearchParams,
  TextEncoder,
  TextDecoder,
  queueMicrotask,
  setTimeout,
  clearTimeout,
  setInterval,
  clearInterval,
  setImmediate,
  clearImmediate,
});

new vm.Script(__CODESNAP_SOURCE__, { filename: __CODESNAP_SCRIPT_NAME__ }).runInContext(
  __codesnapContext
);
"#;

/// Whether `code` asks for interactive input and therefore needs the wrapper
pub fn needs_input_wrapper(code: &str) -> bool {
    INTERACTIVE_INPUT.is_match(code)
}

pub struct JavaScriptAdapter {
    interpreter: String,
}

impl JavaScriptAdapter {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    pub fn wrap(&self, code: &str) -> Result<String, Error> {
        Ok(WRAPPER_TEMPLATE
            .replace("__CODESNAP_INPUT_FILE__", &quoted_literal(INPUT_FILE)?)
            .replace(
                "__CODESNAP_SENTINEL__",
                &quoted_literal(INPUT_EXHAUSTED_SENTINEL)?,
            )
            .replace(
                "__CODESNAP_EXIT_CODE__",
                &INPUT_EXHAUSTED_EXIT_CODE.to_string(),
            )
            .replace("__CODESNAP_SCRIPT_NAME__", &quoted_literal(SCRIPT_NAME)?)
            .replacen("__CODESNAP_SOURCE__", &quoted_literal(code)?, 1))
    }
}

impl LanguageAdapter for JavaScriptAdapter {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn toolchain_name(&self) -> &str {
        "Node.js"
    }

    fn required_tools(&self) -> Vec<&str> {
        vec![self.interpreter.as_str()]
    }

    fn prepare(&self, code: &str, input: &InputLines) -> Result<PreparedProgram, Error> {
        let run = CommandSpec::new(&self.interpreter).arg(SOURCE_FILE);

        if !needs_input_wrapper(code) {
            return Ok(PreparedProgram {
                files: vec![SourceFile::new(SOURCE_FILE, code)],
                compile: None,
                run,
                input_guarded: false,
            });
        }

        Ok(PreparedProgram {
            files: vec![
                SourceFile::new(SOURCE_FILE, self.wrap(code)?),
                SourceFile::new(INPUT_FILE, input.joined()),
            ],
            compile: None,
            // readline-style programs consume the same lines from stdin
            run: run.stdin(input.joined()),
            input_guarded: true,
        })
    }
}
