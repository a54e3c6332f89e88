// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod inspect_workspace;
pub mod run_inspect;

// Re-export.
pub use inspect_workspace::*;
pub use run_inspect::*;
