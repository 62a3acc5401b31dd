//! Stagehand Core Library
//!
//! Provides the domain logic for the deployment-and-launch shim:
//! one-time provisioning gated by a completion store, child-environment
//! composition, and launch sequencing with exit-code propagation.

pub mod completion;
pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod launch;
pub mod ops;
pub mod paths;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{
        CopyOperation, EnvAction, EnvDirective, KvOperation, LauncherConfig,
    };

    // Completion gating
    pub use crate::completion::{CompletionStore, FileCompletionStore, MemoryCompletionStore};

    // Operation executors
    pub use crate::ops::{SettingsStore, TypedValue, ValueKind};

    // Environment composition
    pub use crate::env::ComposedEnv;

    // Launch sequencing
    pub use crate::launch::{LaunchPlan, Sequencer};

    // Errors
    pub use crate::error::{LaunchError, LaunchResult};

    // Context
    pub use crate::context::LaunchContext;
}
