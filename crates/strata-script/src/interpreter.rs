//! The command interpreter.
//!
//! An [`Interpreter`] owns a [`LayerStack`] and executes script lines against
//! it, collecting one reply per command for the presentation layer. A failing
//! command never aborts the script: its error becomes a
//! `"Command failed: ..."` reply and processing moves on to the next line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use strata_core::logging::targets;
use strata_core::{Checkerboard, LayerStack, StackDebug};
use tracing::{debug, warn};

use crate::command::{Command, strip_comment};
use crate::error::{Result, ScriptError};

/// Reply given for a line that names no command.
pub const UNRECOGNIZED: &str = "unrecognized command, try again.";

/// Batch files may include each other up to this depth.
pub const MAX_BATCH_DEPTH: usize = 16;

/// Executes script commands against a layer stack.
#[derive(Debug)]
pub struct Interpreter {
    stack: LayerStack,
    rng: StdRng,
    batch_depth: usize,
    closed: bool,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create an interpreter over an empty stack.
    pub fn new() -> Self {
        Self::with_stack(LayerStack::new())
    }

    /// Create an interpreter over an existing stack.
    pub fn with_stack(stack: LayerStack) -> Self {
        Self {
            stack,
            rng: StdRng::from_entropy(),
            batch_depth: 0,
            closed: false,
        }
    }

    /// Seed the random source used by `mosaic`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// The stack being edited.
    pub fn stack(&self) -> &LayerStack {
        &self.stack
    }

    /// Take back the edited stack.
    pub fn into_stack(self) -> LayerStack {
        self.stack
    }

    /// Whether `close program` has been executed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Run every line of `reader` until it ends or the program is closed.
    ///
    /// Returns the replies in order. Only failing to read the input is an
    /// error; failing commands are reported in the replies.
    pub fn run<R: BufRead>(&mut self, reader: R) -> std::io::Result<Vec<String>> {
        let mut replies = Vec::new();
        self.run_into(reader, &mut replies)?;
        Ok(replies)
    }

    /// Run the script file at `path`.
    pub fn run_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let path = path.as_ref();
        let io_error = |source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        self.run(BufReader::new(file)).map_err(io_error)
    }

    /// Execute one line and return its replies.
    ///
    /// Blank and comment lines produce no reply. A `batch` line produces the
    /// replies of every line it runs followed by its own.
    pub fn execute(&mut self, line: &str) -> Vec<String> {
        let mut replies = Vec::new();
        self.execute_into(line, &mut replies);
        replies
    }

    fn run_into<R: BufRead>(&mut self, reader: R, replies: &mut Vec<String>) -> std::io::Result<()> {
        for line in reader.lines() {
            if self.closed {
                break;
            }
            self.execute_into(&line?, replies);
        }
        Ok(())
    }

    fn execute_into(&mut self, line: &str, replies: &mut Vec<String>) {
        if self.closed {
            return;
        }
        let Some(text) = strip_comment(line) else {
            return;
        };

        let outcome = text
            .parse::<Command>()
            .and_then(|command| self.dispatch(command, replies));
        let reply = match outcome {
            Ok(Some(reply)) => {
                debug!(target: targets::SCRIPT, command = text, reply = %reply, "command executed");
                reply
            }
            Ok(None) => return,
            Err(ScriptError::NoLayers) => ScriptError::NoLayers.to_string(),
            Err(ScriptError::UnknownCommand(_)) => {
                warn!(target: targets::SCRIPT, line = text, "unrecognized command");
                UNRECOGNIZED.to_string()
            }
            Err(err) => {
                warn!(target: targets::SCRIPT, command = text, error = %err, "command failed");
                format!("Command failed: {err}")
            }
        };
        replies.push(reply);
    }

    fn dispatch(&mut self, command: Command, replies: &mut Vec<String>) -> Result<Option<String>> {
        let current = match (command.needs_layer(), self.stack.current_layer()) {
            (true, None) => return Err(ScriptError::NoLayers),
            (_, current) => current.unwrap_or(0),
        };
        let keyword = command.keyword();

        let reply = match command {
            Command::AddBlank => {
                self.stack.add_blank_layer()?;
                format!("add blank performed. created blank layer #{}", self.stack.layer_count())
            }
            Command::NumLayers => format!("num layers {}", self.stack.layer_count()),
            Command::CurrentLayer => match self.stack.current_layer() {
                Some(index) => format!("current layer is layer #{}", index + 1),
                None => return Err(ScriptError::NoLayers),
            },
            Command::ListLayers => StackDebug::new().format(&self.stack).trim_end().to_string(),
            Command::SetCurrent(layer) => {
                self.stack.set_current_layer(layer - 1)?;
                format!("set new current layer to #{layer}")
            }
            Command::Remove => {
                self.stack.remove_at(current)?;
                applied(keyword, current)
            }
            Command::MakeVisible => {
                self.stack.make_layer_visible(current)?;
                applied(keyword, current)
            }
            Command::MakeInvisible => {
                self.stack.make_layer_invisible(current)?;
                applied(keyword, current)
            }
            Command::Apply(kind) => {
                self.stack.apply_operation_with_rng(kind, current, &mut self.rng)?;
                applied(keyword, current)
            }
            Command::Rename(name) => {
                let stored = self.stack.rename_layer_at(current, &name)?;
                format!("renamed layer #{} to {stored}", current + 1)
            }
            Command::Checkerboard {
                width,
                height,
                cell_size,
            } => {
                let pattern = Checkerboard::new(width, height, cell_size)?;
                self.stack.add_from_pattern(&pattern)?;
                format!("created checkerboard layer #{}", self.stack.layer_count())
            }
            Command::Import(path) => {
                let image = strata_codec::read_image(&path)?;
                let index = self.stack.add_image(image)?;
                if let Some(stem) = strata_codec::file_stem(&path).filter(|s| !s.is_empty()) {
                    self.stack.rename_layer_at(index, &stem)?;
                }
                format!("imported {} successfully!", path.display())
            }
            Command::Export(path) => {
                let image = self.stack.image_at(current)?;
                strata_codec::write_image(&path, &image)?;
                format!("file writing to {} successful", path.display())
            }
            Command::Batch(path) => {
                self.run_batch(&path, replies)?;
                "batch reading successful".to_string()
            }
            Command::Close => {
                self.closed = true;
                debug!(target: targets::SCRIPT, "program closed");
                return Ok(None);
            }
        };
        Ok(Some(reply))
    }

    fn run_batch(&mut self, path: &Path, replies: &mut Vec<String>) -> Result<()> {
        let is_script = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt") || ext.eq_ignore_ascii_case("bat"));
        if !is_script {
            return Err(ScriptError::InvalidArgument {
                command: "batch",
                argument: "script file (.txt or .bat)",
                value: path.display().to_string(),
            });
        }
        if self.batch_depth >= MAX_BATCH_DEPTH {
            return Err(ScriptError::InvalidArgument {
                command: "batch",
                argument: "nesting depth",
                value: self.batch_depth.to_string(),
            });
        }

        let io_error = |source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;

        self.batch_depth += 1;
        let outcome = self.run_into(BufReader::new(file), replies);
        self.batch_depth -= 1;
        outcome.map_err(io_error)
    }
}

fn applied(keyword: &str, index: usize) -> String {
    format!("applied {keyword} on layer #{}", index + 1)
}
