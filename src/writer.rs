use std::convert::Infallible;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

use crate::buildout::Buildout;
use crate::error::{Error, Result};
use crate::section::ListStyle;

/// Where a rendered configuration goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl FromStr for Output {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(if s == "-" {
            Self::Stdout
        } else {
            Self::File(PathBuf::from(s))
        })
    }
}

/// Render `buildout` as buildout INI text.
///
/// Lists go one item per line and every line after the first of a value is written as a
/// tab-indented continuation. Each section is followed by a blank line.
///
/// # Errors
///
/// Propagates failures of `writer`.
pub fn render<W: Write>(buildout: &Buildout, writer: &mut W) -> io::Result<()> {
    for section in buildout.sections() {
        writeln!(writer, "[{}]", section.name())?;
        for entry in section.entries() {
            let value = entry.value.render(ListStyle::Lines).replace('\n', "\n\t");
            writeln!(writer, "{} = {value}", entry.key)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

#[must_use]
pub fn render_to_string(buildout: &Buildout) -> String {
    let mut buffer = Vec::<u8>::with_capacity(1024);
    // Writing into a Vec cannot fail.
    _ = render(buildout, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Write `buildout` to `output`.
///
/// # Errors
///
/// [`Error::DestinationExists`] if `output` already exists and `force` is false; the file is
/// created atomically so nothing is written in that case. I/O failures are returned as [`Error::Io`].
pub fn write_buildout(buildout: &Buildout, output: &Output, force: bool) -> Result<()> {
    match output {
        Output::Stdout => {
            let mut stdout = io::stdout().lock();
            render(buildout, &mut stdout)?;
            stdout.flush()?;
        }
        Output::File(path) => {
            let file = if force {
                File::create(path)?
            } else {
                // `create_new` refuses any existing entry, dangling symlinks included.
                OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(path)
                    .map_err(|err| match err.kind() {
                        ErrorKind::AlreadyExists => Error::DestinationExists { path: path.clone() },
                        _ => Error::Io(err),
                    })?
            };

            let mut writer = BufWriter::new(file);
            render(buildout, &mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), sections = buildout.len(), "wrote buildout configuration");
        }
    }

    Ok(())
}
