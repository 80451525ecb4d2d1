//! dumbc-drv - compiler driver
//!
//! Thin orchestrator that reads source files, runs the lex → parse →
//! semantic-analysis pipeline the rest of the workspace implements, and
//! turns the result into process exit codes and printed diagnostics.
//!
//! Code generation, object emission, linking and stdlib prototype
//! injection are out of this repository's scope (they belong to a
//! backend this crate hands the typed AST to); this driver stops at the
//! typed-AST/function-table boundary `dumbc-sem` produces and exists
//! only to exercise that boundary from the command line.
//!
//! Pipeline:
//!
//! ```text
//! source file(s) → Lexer → tokens → Parser → AST → dumbc_sem::analyze → typed AST
//! ```

use std::path::{Path, PathBuf};

use dumbc_par::{Parser, TranslationUnit};
use dumbc_util::span::SourceMap;
use dumbc_util::{CompileError, Symbol};

/// What the driver should print once the pipeline finishes.
///
/// Anything past `TypedAst` (IR, assembly, objects, an executable) is a
/// backend's job; this driver's contract ends at the typed AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitKind {
    /// The raw token stream, one file at a time.
    Tokens,
    /// The untyped AST `dumbc-par` produces.
    Ast,
    /// The typed AST after the full `dumbc-sem` pass pipeline runs.
    #[default]
    TypedAst,
}

/// Driver configuration, built from command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub input_files: Vec<PathBuf>,
    pub emit: EmitKind,
    pub verbose: bool,
}

impl Config {
    /// Parses the driver's flag vocabulary out of `args` (excluding
    /// `argv[0]`). Unknown flags and a missing input file are reported as
    /// [`DriverError::Usage`].
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, DriverError> {
        let mut config = Config::default();
        let mut iter = args.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--emit-tokens" => config.emit = EmitKind::Tokens,
                "--emit-ast" => config.emit = EmitKind::Ast,
                "--emit-typed-ast" => config.emit = EmitKind::TypedAst,
                "--verbose" | "-v" => config.verbose = true,
                other if other.starts_with('-') => {
                    return Err(DriverError::Usage(format!("unrecognized flag '{other}'")));
                }
                other => config.input_files.push(PathBuf::from(other)),
            }
        }

        if config.input_files.is_empty() {
            return Err(DriverError::Usage("no input files".to_string()));
        }

        Ok(config)
    }
}

/// A single file's pipeline result, short of the point an error aborted
/// it — errors are fatal per the front-end's "no recovery" model, so at
/// most one file's worth of partial output accompanies a failure.
pub enum FileResult {
    Tokens(Vec<dumbc_lex::Token>),
    Ast(TranslationUnit),
    TypedAst { ast: TranslationUnit, function_count: usize },
}

/// Driver-level failure: either a malformed invocation, an I/O error
/// reading a source file, or a compiler error surfaced from the
/// lex/parse/analyze pipeline.
#[derive(Debug)]
pub enum DriverError {
    Usage(String),
    Io { path: PathBuf, source: std::io::Error },
    Compile { path: PathBuf, error: CompileError },
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::Usage(msg) => write!(f, "usage error: {msg}"),
            DriverError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            DriverError::Compile { path, error } => {
                let loc = error.loc().map(|l| format!("{l}: ")).unwrap_or_default();
                write!(f, "{}: {}error[{}]: {}", path.display(), loc, error.kind(), error)
            }
        }
    }
}

impl std::error::Error for DriverError {}

/// A compilation session: the accumulated source map plus whatever the
/// pipeline has produced so far for each input file.
pub struct Session {
    pub config: Config,
    pub sources: SourceMap,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config, sources: SourceMap::new() }
    }

    /// Reads every configured input file into `self.sources`, failing on
    /// the first one that can't be read.
    pub fn read_sources(&mut self) -> Result<(), DriverError> {
        let files = self.config.input_files.clone();
        for path in &files {
            let content = std::fs::read_to_string(path)
                .map_err(|source| DriverError::Io { path: path.clone(), source })?;
            self.sources.add_file(path.display().to_string(), content);
        }
        Ok(())
    }

    /// Runs the pipeline up to `self.config.emit` for every source file,
    /// stopping at the first file that fails.
    pub fn compile(&mut self) -> Result<Vec<FileResult>, DriverError> {
        let mut results = Vec::with_capacity(self.sources.file_count());

        for idx in 0..self.sources.file_count() {
            let file = self.sources.get(dumbc_util::FileId(idx)).expect("file just added");
            let path = PathBuf::from(file.name());

            if self.config.verbose {
                eprintln!("compiling {}", file.name());
            }

            let tokens = dumbc_lex::Lexer::new(file.content())
                .tokenize()
                .map_err(|error| DriverError::Compile { path: path.clone(), error })?;

            if self.config.emit == EmitKind::Tokens {
                results.push(FileResult::Tokens(tokens));
                continue;
            }

            let mut ast = Parser::new(tokens)
                .parse()
                .map_err(|error| DriverError::Compile { path: path.clone(), error })?;

            if self.config.emit == EmitKind::Ast {
                results.push(FileResult::Ast(ast));
                continue;
            }

            let table = dumbc_sem::analyze(&mut ast)
                .map_err(|error| DriverError::Compile { path: path.clone(), error })?;
            results.push(FileResult::TypedAst { ast, function_count: table.len() });
        }

        Ok(results)
    }
}

/// Prints `results` per `config.emit` to stdout.
pub fn print_results(results: &[FileResult]) {
    for result in results {
        match result {
            FileResult::Tokens(tokens) => {
                for tok in tokens {
                    println!("{:?} {}", tok.kind, tok.loc);
                }
            }
            FileResult::Ast(ast) => println!("{ast:#?}"),
            FileResult::TypedAst { ast, function_count } => {
                println!("{ast:#?}");
                println!("// {function_count} function(s) in the function table");
            }
        }
    }
}

/// The driver entry point `main.rs` calls. Separated from `main` proper
/// so integration tests can invoke it without spawning a subprocess.
pub fn run<I: IntoIterator<Item = String>>(args: I) -> Result<(), DriverError> {
    let config = Config::from_args(args)?;
    let mut session = Session::new(config);
    session.read_sources()?;
    let results = session.compile()?;
    print_results(&results);
    Ok(())
}

/// Exit codes this driver returns, matching the taxonomy its doc
/// comments have always described: success, compilation failure,
/// internal error, and a command-line error.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const COMPILE_FAILURE: i32 = 1;
    pub const USAGE_ERROR: i32 = 3;
}

/// Maps a [`DriverError`] to the process exit code `main.rs` should use.
pub fn exit_code_for(err: &DriverError) -> i32 {
    match err {
        DriverError::Usage(_) => exit_code::USAGE_ERROR,
        DriverError::Io { .. } | DriverError::Compile { .. } => exit_code::COMPILE_FAILURE,
    }
}

/// Interns a path's display form as a [`Symbol`], used by callers that
/// want to key diagnostics by file without holding a borrowed `&Path`.
pub fn intern_path(path: &Path) -> Symbol {
    Symbol::intern(&path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn config_from_args_collects_input_files() {
        let config = Config::from_args(vec!["main.fax".to_string()]).unwrap();
        assert_eq!(config.input_files, vec![PathBuf::from("main.fax")]);
        assert_eq!(config.emit, EmitKind::TypedAst);
    }

    #[test]
    fn config_from_args_rejects_empty_input() {
        assert!(matches!(Config::from_args(Vec::<String>::new()), Err(DriverError::Usage(_))));
    }

    #[test]
    fn config_from_args_rejects_unknown_flag() {
        let err = Config::from_args(vec!["--bogus".to_string(), "a.fax".to_string()]).unwrap_err();
        assert!(matches!(err, DriverError::Usage(_)));
    }

    #[test]
    fn end_to_end_compile_of_a_well_formed_program() {
        let file = write_temp("func main(): i32 { return 0 }");
        let config = Config::from_args(vec![file.path().display().to_string()]).unwrap();
        let mut session = Session::new(config);
        session.read_sources().unwrap();
        let results = session.compile().unwrap();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], FileResult::TypedAst { function_count: 1, .. }));
    }

    #[test]
    fn compile_error_reports_the_offending_file() {
        let file = write_temp("func main(): i32 { return y }");
        let config = Config::from_args(vec![file.path().display().to_string()]).unwrap();
        let mut session = Session::new(config);
        session.read_sources().unwrap();
        let err = session.compile().unwrap_err();
        match err {
            DriverError::Compile { path, error } => {
                assert_eq!(path, file.path());
                assert_eq!(error.kind(), "name");
            }
            other => panic!("expected Compile error, got {other:?}"),
        }
    }

    #[test]
    fn emit_tokens_stops_before_parsing() {
        let file = write_temp("func main(): i32 { return 0 }");
        let mut config = Config::from_args(vec![file.path().display().to_string()]).unwrap();
        config.emit = EmitKind::Tokens;
        let mut session = Session::new(config);
        session.read_sources().unwrap();
        let results = session.compile().unwrap();
        assert!(matches!(results[0], FileResult::Tokens(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let config = Config::from_args(vec!["/does/not/exist.fax".to_string()]).unwrap();
        let mut session = Session::new(config);
        assert!(matches!(session.read_sources(), Err(DriverError::Io { .. })));
    }

    #[test]
    fn exit_code_for_usage_error_is_three() {
        let err = DriverError::Usage("no input files".to_string());
        assert_eq!(exit_code_for(&err), exit_code::USAGE_ERROR);
    }
}
