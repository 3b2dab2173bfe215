//! # tmon
//!
//! Core of a terminal resource monitor: a counter delta/rate engine and an
//! ANSI frame compositor.
//!
//! The host samples the platform (CPU ticks, memory, mounts, block device
//! sectors, interface byte counters, processes, sensors, battery) into a
//! [`PlatformSnapshot`], then calls [`render`] once per tick. The core
//! differences the counters against the state blob from the previous tick,
//! lays out every panel and returns the frame text plus the next state blob.
//! Nothing in the core touches the terminal, the clock or the filesystem.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tmon::{render, FrameInput, PlatformSnapshot};
//!
//! let mut state = String::new();
//! loop {
//!     let snapshot = PlatformSnapshot::from_json(&sample_platform())?;
//!     let out = render(&FrameInput {
//!         viewport_width: 120,
//!         viewport_height: 40,
//!         previous_state: state,
//!         snapshot,
//!         ..Default::default()
//!     });
//!     print!("\x1b[H{}", out.frame_text);
//!     state = out.state_blob;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): the `tmon` binary, a headless renderer that reads a
//!   snapshot file and prints one frame

#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Error types.
pub mod error;

/// Platform snapshot input types.
pub mod snapshot;

/// Counter delta and rate engine.
pub mod engine;

/// Bounded sample histories.
pub mod history;

/// State carried between ticks.
pub mod state;

/// Process list scroll and selection.
pub mod selection;

// ============================================================================
// Rendering Modules
// ============================================================================

/// ANSI escape handling and visible width.
pub mod ansi;

/// Human-readable number formatting.
pub mod format;

/// Color themes.
pub mod theme;

/// Box drawing and panel composition.
pub mod layout;

/// Panels, meters and sparklines.
pub mod widgets;

/// Per-tick orchestration.
pub mod frame;

/// Host configuration file.
pub mod config;

pub use config::Config;
pub use error::{MonitorError, Result};
pub use frame::{render, FrameInput, FrameOutput};
pub use snapshot::PlatformSnapshot;
pub use state::PersistedState;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::engine::{RateContext, RateKind, RateResult, RateSource, SortKey};
    pub use crate::error::{MonitorError, Result};
    pub use crate::frame::{render, FrameInput, FrameOutput};
    pub use crate::layout::BorderStyle;
    pub use crate::snapshot::PlatformSnapshot;
    pub use crate::theme::Theme;
}
