//! Recursive-descent grammars for Swift structure.
//!
//! The grammars cover type identifiers (generics, array/dictionary sugar, optionals, IUOs, protocol
//! composition, tuples and function types), `self` expressions, function/initializer/subscript
//! declarations with their parameter clauses, accessor keyword blocks, and the type/variable/function
//! skeleton of whole files. Statement and expression bodies are skipped, not parsed.
//!
//! ## Examples
//!
//! ```rust
//! use mockgen_syntax::parser;
//!
//! let func = parser::parse_function_declaration("func f(a: Int, _ b: String) throws -> Bool").unwrap();
//! assert_eq!(func.node.name, "f");
//! assert_eq!(func.node.parameters.len(), 2);
//! assert!(func.node.throws);
//! ```

use crate::ast::*;
use crate::config::ParseConfig;
use crate::diagnostics::{ErrorKind, Parsed, SyntaxError};
use crate::lexer::{self, Token, TokenKind};
use mockgen_core::lang::contextual::{self, ContextualId};
use mockgen_core::lang::keywords::{self, KeywordId};
use mockgen_core::lang::ownership::Ownership;
use mockgen_core::lang::punctuation::{self, PunctuationId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
