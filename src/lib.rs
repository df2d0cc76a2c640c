#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

//! Generate `buildout.cfg` files for zc.buildout and optionally run buildout on them.
//!
//! ```
//! use buildstrap::{Request, Templates, build_parts, render_to_string};
//!
//! let request = Request {
//!     packages: vec!["app".to_owned()],
//!     requirements: vec!["requirements.txt".to_owned()],
//!     ..Request::default()
//! };
//! let buildout = build_parts(&request, &Templates::default()).unwrap();
//!
//! assert!(render_to_string(&buildout).starts_with("[buildout]\nnewest = false\nparts = app\n"));
//! ```

mod buildout;
mod cli;
mod error;
mod parser;
mod parts;
mod runner;
mod section;
mod template;
mod util;
mod writer;

pub use buildout::Buildout;
pub use cli::{Cli, Command, GenerateArgs, TemplatesArgs};
pub use error::{Error, ParseError, Result};
pub use parser::Parser;
pub use parts::{
    BUILDOUT, Paths, Request, Target, build_part_buildout, build_part_pip, build_part_target,
    build_parts, partname_pip,
};
pub use runner::run_buildout;
pub use section::{Entry, ListStyle, Section, Value};
pub use template::{TemplateSource, Templates};
pub use util::split_list;
pub use writer::{Output, render, render_to_string, write_buildout};
