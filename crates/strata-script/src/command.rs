//! Parsing of single script lines into [`Command`]s.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use strata_core::OperationKind;

use crate::error::{Result, ScriptError};

/// One parsed script command.
///
/// Layer numbers are 1-based, as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `add blank`
    AddBlank,
    /// `num layers`
    NumLayers,
    /// `current layer`
    CurrentLayer,
    /// `list layers`
    ListLayers,
    /// `set current N`
    SetCurrent(usize),
    /// `remove`
    Remove,
    /// `make vis`
    MakeVisible,
    /// `make invis`
    MakeInvisible,
    /// `blur`, `sharpen`, `greyscale`, `sepia` or `mosaic`
    Apply(OperationKind),
    /// `rename NAME`
    Rename(String),
    /// `checkerboard W H CELL`
    Checkerboard {
        width: u32,
        height: u32,
        cell_size: u32,
    },
    /// `import PATH`
    Import(PathBuf),
    /// `export PATH`
    Export(PathBuf),
    /// `batch PATH`
    Batch(PathBuf),
    /// `close program`
    Close,
}

impl Command {
    /// Keyword that introduces this command.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::AddBlank => "add blank",
            Self::NumLayers => "num layers",
            Self::CurrentLayer => "current layer",
            Self::ListLayers => "list layers",
            Self::SetCurrent(_) => "set current",
            Self::Remove => "remove",
            Self::MakeVisible => "make vis",
            Self::MakeInvisible => "make invis",
            Self::Apply(kind) => kind.name(),
            Self::Rename(_) => "rename",
            Self::Checkerboard { .. } => "checkerboard",
            Self::Import(_) => "import",
            Self::Export(_) => "export",
            Self::Batch(_) => "batch",
            Self::Close => "close program",
        }
    }

    /// Whether the command only acts when the stack has a current layer.
    pub fn needs_layer(&self) -> bool {
        matches!(
            self,
            Self::Remove
                | Self::MakeVisible
                | Self::MakeInvisible
                | Self::Apply(_)
                | Self::Rename(_)
                | Self::Export(_)
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())?;
        match self {
            Self::SetCurrent(layer) => write!(f, " {layer}"),
            Self::Rename(name) => write!(f, " {name}"),
            Self::Checkerboard {
                width,
                height,
                cell_size,
            } => write!(f, " {width} {height} {cell_size}"),
            Self::Import(path) | Self::Export(path) | Self::Batch(path) => {
                write!(f, " {}", path.display())
            }
            _ => Ok(()),
        }
    }
}

/// Strip a line down to its command text.
///
/// Returns `None` for blank lines and whole-line `#` comments. A trailing
/// comment must be preceded by a space, so `#` inside a file name survives.
pub fn strip_comment(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = match line.find(" #") {
        Some(at) => line[..at].trim_end(),
        None => line,
    };
    Some(line)
}

impl FromStr for Command {
    type Err = ScriptError;

    /// Parse one comment-free line. Keywords are case-insensitive; arguments
    /// keep their case.
    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let lower = line.to_ascii_lowercase();

        let command = match lower.as_str() {
            "add blank" => Self::AddBlank,
            "num layers" => Self::NumLayers,
            "current layer" => Self::CurrentLayer,
            "list layers" => Self::ListLayers,
            "remove" => Self::Remove,
            "make vis" => Self::MakeVisible,
            "make invis" => Self::MakeInvisible,
            "close program" => Self::Close,
            _ => {
                if let Ok(kind) = lower.parse::<OperationKind>() {
                    return Ok(Self::Apply(kind));
                }
                return parse_with_argument(line, &lower);
            }
        };
        Ok(command)
    }
}

fn parse_with_argument(line: &str, lower: &str) -> Result<Command> {
    const WITH_ARGUMENT: [&str; 6] = ["set current", "rename", "checkerboard", "import", "export", "batch"];

    let Some(keyword) = WITH_ARGUMENT
        .into_iter()
        .find(|keyword| lower == *keyword || lower.starts_with(&format!("{keyword} ")))
    else {
        return Err(ScriptError::UnknownCommand(line.to_string()));
    };
    // ASCII lowercasing keeps byte offsets, so the keyword length indexes `line`.
    let argument = line[keyword.len()..].trim();

    match keyword {
        "set current" => {
            let text = require(argument, keyword, "layer number")?;
            let layer = text.parse::<usize>().ok().filter(|&n| n > 0).ok_or_else(|| {
                ScriptError::InvalidArgument {
                    command: "set current",
                    argument: "layer number",
                    value: text.to_string(),
                }
            })?;
            Ok(Command::SetCurrent(layer))
        }
        "rename" => Ok(Command::Rename(require(argument, keyword, "name")?.to_string())),
        "checkerboard" => {
            let fields: Vec<&str> = argument.split_whitespace().collect();
            let [width, height, cell_size] = fields.as_slice() else {
                return Err(if fields.len() < 3 {
                    ScriptError::MissingArgument {
                        command: "checkerboard",
                        argument: "width, height and cell size",
                    }
                } else {
                    ScriptError::InvalidArgument {
                        command: "checkerboard",
                        argument: "size",
                        value: argument.to_string(),
                    }
                });
            };
            Ok(Command::Checkerboard {
                width: parse_size(width, "width")?,
                height: parse_size(height, "height")?,
                cell_size: parse_size(cell_size, "cell size")?,
            })
        }
        "import" => Ok(Command::Import(require(argument, keyword, "file path")?.into())),
        "export" => Ok(Command::Export(require(argument, keyword, "file path")?.into())),
        _ => Ok(Command::Batch(require(argument, "batch", "file path")?.into())),
    }
}

fn require<'a>(argument: &'a str, command: &'static str, what: &'static str) -> Result<&'a str> {
    if argument.is_empty() {
        Err(ScriptError::MissingArgument {
            command,
            argument: what,
        })
    } else {
        Ok(argument)
    }
}

fn parse_size(text: &str, argument: &'static str) -> Result<u32> {
    text.parse().map_err(|_| ScriptError::InvalidArgument {
        command: "checkerboard",
        argument,
        value: text.to_string(),
    })
}
