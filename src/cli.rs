//! Command line surface of the `buildstrap` binary.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::error::{Error, Result};
use crate::parts::{Paths, Request, Target, build_parts};
use crate::runner::run_buildout;
use crate::template::Templates;
use crate::util::split_list;
use crate::writer::{Output, write_buildout};

/// Generate and run buildout in your projects.
///
/// Without a subcommand the configuration is written to the output file.
#[derive(Debug, Parser)]
#[command(name = "buildstrap", version)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub generate: GenerateArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the configuration to the output file
    Generate(GenerateArgs),
    /// Print the configuration on standard output
    Show(GenerateArgs),
    /// Print the internal model of the configuration
    Debug(GenerateArgs),
    /// Write the configuration, then run buildout on it
    Run(GenerateArgs),
    /// List the available template parts
    Templates(TemplatesArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Package being developed; several may be given, comma separated
    #[arg(required = true)]
    pub package: Option<String>,

    /// Requirements file(s) of the package, comma separated
    #[arg(required = true)]
    pub requirements: Option<String>,

    /// Extra target with its own requirements file(s)
    #[arg(value_name = "TARGET=REQUIREMENTS")]
    pub targets: Vec<Target>,

    /// Add a template part (see `buildstrap templates`)
    #[arg(short, long = "part", value_name = "NAME")]
    pub parts: Vec<String>,

    /// Python interpreter script to generate for each target
    #[arg(short, long)]
    pub interpreter: Option<String>,

    /// File to write, `-` for standard output
    #[arg(short, long, default_value = "buildout.cfg")]
    pub output: Output,

    /// Buildout root directory
    #[arg(short, long)]
    pub root: Option<String>,

    /// Directory holding the developed sources
    #[arg(short, long)]
    pub src: Option<String>,

    /// Directory holding eggs, parts and develop checkouts
    #[arg(short, long)]
    pub env: Option<String>,

    /// Directory for generated scripts
    #[arg(short, long)]
    pub bin: Option<String>,

    /// Directory searched for template parts before the built-in ones
    #[arg(short, long, env = "BUILDSTRAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Buildout executable used by `run`
    #[arg(long, env = "BUILDSTRAP_BUILDOUT", default_value = "buildout")]
    pub buildout: String,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    pub force: bool,

    /// Increase verbosity
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Args)]
pub struct TemplatesArgs {
    /// Directory searched for template parts before the built-in ones
    #[arg(short, long, env = "BUILDSTRAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Generate,
    Show,
    Debug,
    Run,
}

impl GenerateArgs {
    /// Split the comma separated arguments into a [`Request`].
    #[must_use]
    pub fn request(&self) -> Request {
        Request {
            packages: split_list(self.package.as_deref().unwrap_or_default()),
            requirements: split_list(self.requirements.as_deref().unwrap_or_default()),
            targets: self.targets.clone(),
            parts: self.parts.iter().flat_map(|part| split_list(part)).collect(),
            interpreter: self.interpreter.clone(),
            paths: Paths {
                root: self.root.clone(),
                src: self.src.clone(),
                env: self.env.clone(),
                bin: self.bin.clone(),
            },
        }
    }

    fn templates(&self) -> Templates {
        templates_in(self.config.as_ref())
    }

    fn execute(&self, mode: Mode) -> Result<()> {
        if mode == Mode::Run && self.output == Output::Stdout {
            return Err(Error::RunOnStdout);
        }

        let buildout = build_parts(&self.request(), &self.templates())?;

        match mode {
            Mode::Generate => write_buildout(&buildout, &self.output, self.force),
            Mode::Show => write_buildout(&buildout, &Output::Stdout, true),
            Mode::Debug => {
                println!("{buildout:#?}");
                Ok(())
            }
            Mode::Run => {
                write_buildout(&buildout, &self.output, self.force)?;
                match &self.output {
                    Output::File(path) => run_buildout(&self.buildout, path),
                    Output::Stdout => Err(Error::RunOnStdout),
                }
            }
        }
    }
}

impl TemplatesArgs {
    fn execute(&self) -> Result<()> {
        for name in templates_in(self.config.as_ref()).names()? {
            println!("{name}");
        }
        Ok(())
    }
}

fn templates_in(config: Option<&PathBuf>) -> Templates {
    config.map_or_else(Templates::default, Templates::new)
}

impl Cli {
    #[must_use]
    pub fn verbose(&self) -> u8 {
        match &self.command {
            None => self.generate.verbose,
            Some(
                Command::Generate(args)
                | Command::Show(args)
                | Command::Debug(args)
                | Command::Run(args),
            ) => args.verbose,
            Some(Command::Templates(args)) => args.verbose,
        }
    }

    /// Run the selected subcommand, `generate` when none was given.
    ///
    /// # Errors
    ///
    /// Any error raised while building, writing or running the configuration.
    pub fn execute(self) -> Result<()> {
        match self.command {
            None => self.generate.execute(Mode::Generate),
            Some(Command::Generate(args)) => args.execute(Mode::Generate),
            Some(Command::Show(args)) => args.execute(Mode::Show),
            Some(Command::Debug(args)) => args.execute(Mode::Debug),
            Some(Command::Run(args)) => args.execute(Mode::Run),
            Some(Command::Templates(args)) => args.execute(),
        }
    }
}
