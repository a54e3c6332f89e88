// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod command_runner;
pub mod replay_script;
pub mod vim_editor;

// Re-export.
pub use command_runner::*;
pub use replay_script::*;
pub use vim_editor::*;
