//! Prompter port
//!
//! Asks the operator a free-text question. Injected so the confirmation gate
//! can be driven by scripted answers in tests.

/// Source of interactive answers
pub trait Prompter {
    /// Ask `message` and return the raw answer. An empty answer resolves to
    /// `default`.
    fn prompt(&self, message: &str, default: &str) -> std::io::Result<String>;
}
