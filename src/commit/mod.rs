//! Commit message generation: prompt, parsing and assembly.

pub mod kind;
pub mod message;
pub mod parse;
pub mod prompt;
pub mod ticket;

pub use kind::{CommitType, normalize_commit_type};
pub use message::{Message, assemble};
pub use parse::{FALLBACK_DESCRIPTION, Parts, fallback, parse, parse_strict};
pub use prompt::commit_prompt;
pub use ticket::{UNKNOWN_TICKET, extract_ticket};
