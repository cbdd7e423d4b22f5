//! MAX Ladder Bot - Main Library
//!
//! Ties the workspace libraries together for the binaries.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (argument handling)
//! - **ladder**: Ladder calculation and the order driver (re-exported from workspace)
//! - **max_client**: MAX exchange REST client (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust,ignore
//! use max_ladder_bot::bin_common::{load_plan_path_from_env, parse_args};
//! use max_ladder_bot::ladder::{AppConfig, OrderDriver, StdConsole};
//! ```

// Re-export workspace libraries for convenience
pub use ladder;
pub use max_client;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;

    pub use cli::{history_args, load_plan_path_from_env, parse_args, plan_path, PLAN_PATH_VAR};
}
