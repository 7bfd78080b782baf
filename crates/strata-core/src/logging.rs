//! Logging and debugging facilities for Strata.
//!
//! Strata emits structured events through the `tracing` crate. Mutations
//! are reported at `debug` level once they have succeeded; failures are
//! returned to the caller and never logged here. Install a subscriber in the
//! host application to see them:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("strata_core::stack=debug")
//!     .init();
//! ```
//!
//! [`StackDebug`] renders a human-readable listing of a layer stack.

use crate::stack::LayerStack;

/// Target names for log filtering.
pub mod targets {
    /// Layer stack mutations.
    pub const STACK: &str = "strata_core::stack";
    /// Plain history mutations.
    pub const HISTORY: &str = "strata_core::history";
    /// File encoding and decoding.
    pub const CODEC: &str = "strata_codec";
    /// Command interpreter.
    pub const SCRIPT: &str = "strata_script";
}

/// Style options for stack listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStyle {
    /// One line per layer, top layer first.
    #[default]
    Full,
    /// Everything on a single line.
    Compact,
}

/// Debug utility for listing the layers of a stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackDebug {
    style: ListStyle,
}

impl StackDebug {
    /// Create a formatter with the full style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with the given style.
    pub fn with_style(style: ListStyle) -> Self {
        Self { style }
    }

    /// Format `stack` as text.
    ///
    /// Layers are numbered from 1. The current layer is marked with `*` and
    /// hidden layers with `(hidden)`.
    pub fn format(&self, stack: &LayerStack) -> String {
        let mut output = String::new();
        if stack.is_empty() {
            output.push_str("(no layers)");
            return output;
        }

        let count = stack.layer_count();
        let size = stack
            .dimensions()
            .map(|(width, height)| format!("{width}x{height}"))
            .unwrap_or_default();
        if self.style == ListStyle::Full {
            output.push_str(&format!("{count} layer(s):\n"));
        }

        for index in (0..count).rev() {
            let marker = if stack.current_layer() == Some(index) { '*' } else { ' ' };
            let name = stack.name_at(index).unwrap_or("(unnamed)");
            let hidden = if stack.is_invisible(index).unwrap_or(false) { " (hidden)" } else { "" };

            match self.style {
                ListStyle::Full => {
                    output.push_str(&format!("{marker} #{} {name} [{size}]{hidden}\n", index + 1));
                }
                ListStyle::Compact => {
                    if index + 1 != count {
                        output.push_str(" | ");
                    }
                    output.push_str(&format!("{marker}#{} {name}{hidden}", index + 1));
                }
            }
        }

        output
    }
}
