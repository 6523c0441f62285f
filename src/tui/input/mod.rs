//! Input handling components.

pub mod text_input;
