//! Elm syntax tree and its layout on top of [`crate::pretty`].

pub mod print;
pub mod syntax;
