//! Core of the Noctyx portfolio page: the terminal interpreter, the social
//! overlay layout machine and the decorative scene math. Everything here is
//! plain Rust; the browser shell in `frontend` only renders it.

pub mod config;
pub mod content;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod mesh;
pub mod motion;
pub mod particles;
pub mod scene;
pub mod shell;
pub mod social;
pub mod terminal;
