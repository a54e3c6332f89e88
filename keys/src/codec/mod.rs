// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod keycode;
pub mod keycode_table;
pub mod keys;
pub mod raw_byte_parser;
pub mod repr_parser;

// Re-export.
pub use keycode::*;
pub use keycode_table::*;
pub use keys::*;
pub use raw_byte_parser::*;
pub use repr_parser::*;
