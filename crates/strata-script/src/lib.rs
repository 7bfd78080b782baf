//! Script interpreter for Strata.
//!
//! Scripts are plain text, one command per line:
//!
//! ```text
//! # build a two-layer document
//! checkerboard 40 40 5
//! add blank
//! sepia                # applies to the current (top) layer
//! set current 1
//! make invis
//! export out/board.png
//! ```
//!
//! [`Interpreter::run`] executes a whole script and returns a reply per
//! command; [`Interpreter::execute`] runs one line.
//!
//! ```
//! use strata_script::Interpreter;
//!
//! let mut interpreter = Interpreter::new();
//! let replies = interpreter.run("add blank\nnum layers\n".as_bytes())?;
//! assert_eq!(replies[1], "num layers 1");
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod command;
pub mod error;
pub mod interpreter;

pub use command::Command;
pub use error::{Result, ScriptError};
pub use interpreter::{Interpreter, MAX_BATCH_DEPTH, UNRECOGNIZED};
