use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors raised while reading buildout-flavoured INI text. Line numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: section name cannot be empty")]
    SectionNameEmpty { line: usize },

    #[error("line {line}: section name cannot exceed 255 characters")]
    SectionNameTooLong { line: usize },

    #[error("line {line}: missing `]` after section name")]
    UnterminatedSectionName { line: usize },

    #[error("line {line}: unexpected character: {c:?}")]
    UnexpectedCharacter { line: usize, c: char },

    #[error("line {line}: entry found before any section header")]
    EntryOutsideSection { line: usize },

    #[error("line {line}: expected `key = value`")]
    MissingDelimiter { line: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no package given")]
    NoPackages,

    #[error("no requirements file given for target `{target}`")]
    NoRequirements { target: String },

    #[error("Cannot overwrite {}: file already exists! Use --force if necessary.", .path.display())]
    DestinationExists { path: PathBuf },

    #[error("template part `{name}` not found (searched {} and the built-in templates)", .searched.display())]
    TemplateNotFound { name: String, searched: PathBuf },

    #[error("template {} does not define a [{name}] section", .path.display())]
    TemplateSectionMissing { name: String, path: PathBuf },

    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("cannot run buildout on a configuration written to standard output")]
    RunOnStdout,

    #[error("failed to start `{program}`")]
    BuildoutSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` exited with {status}")]
    Buildout { program: String, status: ExitStatus },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
