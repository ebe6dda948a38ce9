pub mod adapters;
pub mod branches;
pub mod diagnostic;
pub mod dictionary;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod fixer;
pub mod gender;
pub mod lint;
pub mod matcher;
pub mod position;
pub mod prose;
pub mod reader;
pub mod rewriter;
pub mod span;
pub mod stats;

// Re-export main types for convenient access
pub use adapters::{AdapterKind, FormatAdapter};
pub use diagnostic::{Diagnostic, Fix};
pub use dictionary::TermDictionary;
pub use engine::RewriteEngine;
pub use error::{AdapterError, BranchError, BranchRenameError, EngineError};
pub use span::{SpanKind, SpanOutcome, TextSpan};

// Re-export the file pipeline for the binary and benchmarks
pub use branches::{normalize_branches, BranchRename, BranchStore, GitBranchStore, MemoryBranchStore};
pub use lint::{lint_file, lint_files, FileReport, LintConfig, LintReport};
pub use stats::{FileStats, RunStats};
