use std::iter::{Enumerate, Peekable};
use std::str::Lines;

use crate::error::ParseError;
use crate::section::{Entry, Section, Value};

/// Represents an on-going parse of buildout-flavoured INI text.
///
/// Indented lines continue the previous value and are joined to it with `\n`, which is how
/// buildout spells a list. Lines starting with `#` or `;` are comments.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate().peekable(),
        }
    }
}

impl Parser<'_> {
    /// Consume the input and return its sections in order of first appearance.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming the offending line.
    pub fn into_sections(mut self) -> Result<Vec<Section>, ParseError> {
        let mut sections = Vec::<Section>::with_capacity(16);

        while let Some((index, line)) = self.lines.next() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            match line.chars().next() {
                Some('[') => self.parse_section(index + 1, &line[1..], &mut sections)?,
                Some('#' | ';') | None => {}
                Some(_) if line.trim().is_empty() => {}
                Some(_) => return Err(ParseError::EntryOutsideSection { line: index + 1 }),
            }
        }

        Ok(sections)
    }

    /// Read each line until the next section header or end of input.
    fn parse_section(
        &mut self,
        line: usize,
        header: &str,
        sections: &mut Vec<Section>,
    ) -> Result<(), ParseError> {
        let mut section = Section::new(parse_section_name(line, header)?);
        // Continuation lines extend the key written last, wherever `set` placed it.
        let mut last_key = None::<String>;

        while self.lines.peek().is_some_and(|(_, l)| !l.starts_with('[')) {
            let Some((index, current)) = self.lines.next() else {
                break;
            };
            let current = current.strip_suffix('\r').unwrap_or(current);
            let number = index + 1;

            match current.chars().next() {
                Some('#' | ';') | None => {}
                Some(_) if current.trim().is_empty() => {}
                Some(c) if c.is_whitespace() => {
                    let value = last_key
                        .as_deref()
                        .and_then(|key| section.get_mut(key))
                        .ok_or(ParseError::MissingDelimiter { line: number })?;
                    continue_value(value, current.trim());
                }
                Some(_) => {
                    let Entry { key, value } = parse_section_entry(number, current)?;
                    section.set(key.clone(), value);
                    last_key = Some(key);
                }
            }
        }

        // Repeated sections are merged; later keys win.
        if let Some(existing) = sections.iter_mut().find(|s| s.name() == section.name()) {
            existing.merge(section);
        } else {
            sections.push(section);
        }

        Ok(())
    }
}

/// Parse what follows the opening `[` of a section header.
fn parse_section_name(line: usize, header: &str) -> Result<String, ParseError> {
    let Some(end) = header.find(']') else {
        return Err(ParseError::UnterminatedSectionName { line });
    };
    let section_name = &header[..end];

    if section_name.is_empty() {
        return Err(ParseError::SectionNameEmpty { line });
    } else if section_name.len() > 255 {
        return Err(ParseError::SectionNameTooLong { line });
    }

    // Only whitespace or a trailing comment may follow the header.
    for c in header[end + 1..].chars() {
        match c {
            ';' | '#' => break,
            c if c.is_whitespace() => {}
            c => return Err(ParseError::UnexpectedCharacter { line, c }),
        }
    }

    Ok(section_name.to_owned())
}

fn parse_section_entry(line: usize, text: &str) -> Result<Entry, ParseError> {
    let Some(equal) = text.find('=') else {
        return Err(ParseError::MissingDelimiter { line });
    };

    let key = text[..equal].trim();
    if key.is_empty() {
        return Err(ParseError::MissingDelimiter { line });
    }

    Ok(Entry::new(key, text[equal + 1..].trim()))
}

fn continue_value(value: &mut Value, line: &str) {
    match value {
        Value::Raw(raw) if raw.is_empty() => line.clone_into(raw),
        Value::Raw(raw) => {
            raw.push('\n');
            raw.push_str(line);
        }
        Value::List(values) => values.push(line.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<Section> {
        Parser::new(text)
            .into_sections()
            .expect("failed to parse hardcoded buildout text")
    }

    #[test]
    fn multiple_keys_and_values() {
        let sections = parse(
            "
[buildout]
newest = false
develop = .
eggs-directory = ${buildout:directory}/var/eggs
",
        );

        assert_eq!(
            sections,
            [Section::with_entries(
                "buildout",
                vec![
                    Entry::new("newest", "false"),
                    Entry::new("develop", "."),
                    Entry::new("eggs-directory", "${buildout:directory}/var/eggs"),
                ]
            )]
        );
    }

    #[test]
    fn continuation_lines_join_with_newline() {
        let sections = parse("[app]\neggs = ${app-pip:eggs}\n\tapp\n\tother\nrecipe = zc.recipe.egg\n");

        assert_eq!(
            sections[0].get("eggs"),
            Some(&Value::from("${app-pip:eggs}\napp\nother"))
        );
        assert_eq!(sections[0].get("recipe"), Some(&Value::from("zc.recipe.egg")));
    }

    #[test]
    fn empty_value_then_continuation() {
        let sections = parse("[buildout]\nparts =\n    app\n    docs\n");

        assert_eq!(sections[0].get("parts"), Some(&Value::from("app\ndocs")));
    }

    #[test]
    fn comments_and_header_comment() {
        let sections = parse(
            "# leading comment
; another one

[sphinx] ; documentation
recipe = collective.recipe.sphinxbuilder
# source = nowhere
",
        );

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name(), "sphinx");
        assert_eq!(sections[0].len(), 1);
    }

    #[test]
    fn value_keeps_equal_signs() {
        let sections = parse("[pytest]\narguments = ['--cov=src']\n");

        assert_eq!(sections[0].get("arguments"), Some(&Value::from("['--cov=src']")));
    }

    #[test]
    fn duplicate_sections_are_merged() {
        let sections = parse("[a]\nx = 1\ny = 2\n\n[b]\nz = 3\n\n[a]\nx = 4\n");

        assert_eq!(sections.len(), 2);
        assert_eq!(
            sections[0].entries(),
            &[Entry::new("x", "4"), Entry::new("y", "2")]
        );
    }

    #[test]
    fn repeated_key_overwrites_in_place() {
        let sections = parse("[a]\nx = 1\ny = 2\nx = 3\n");

        assert_eq!(
            sections[0].entries(),
            &[Entry::new("x", "3"), Entry::new("y", "2")]
        );
    }

    #[test]
    fn continuation_follows_repeated_key() {
        let sections = parse("[a]\nx = 1\ny = 2\nx = 3\n\tmore\n");

        assert_eq!(sections[0].get("x"), Some(&Value::from("3\nmore")));
        assert_eq!(sections[0].get("y"), Some(&Value::from("2")));
    }

    #[test]
    fn crlf_line_endings() {
        let sections = parse("[a]\r\nx = 1\r\n\ty\r\n");

        assert_eq!(sections[0].get("x"), Some(&Value::from("1\ny")));
    }

    #[test]
    fn errors_report_line() {
        let err = |text: &str| Parser::new(text).into_sections().unwrap_err();

        assert_eq!(err("\n[]\n"), ParseError::SectionNameEmpty { line: 2 });
        assert_eq!(err("[a\n"), ParseError::UnterminatedSectionName { line: 1 });
        assert_eq!(err("[a] x\n"), ParseError::UnexpectedCharacter { line: 1, c: 'x' });
        assert_eq!(err("key = value\n"), ParseError::EntryOutsideSection { line: 1 });
        assert_eq!(err("[a]\nkey value\n"), ParseError::MissingDelimiter { line: 2 });
        assert_eq!(err("[a]\n  orphan\n"), ParseError::MissingDelimiter { line: 2 });

        let long = format!("[{}]", "x".repeat(256));
        assert_eq!(err(&long), ParseError::SectionNameTooLong { line: 1 });
    }
}
