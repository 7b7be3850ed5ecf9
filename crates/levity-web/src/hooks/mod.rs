//! Custom hooks.

mod use_antigravity;

pub use use_antigravity::{AntigravityHandle, use_antigravity};
