//! coasterkit - track synthesis and ride mapping core for a roller coaster editor.
//!
//! # Architecture
//!
//! Layered modules with strict inward-only dependencies:
//!
//! - **sim**: Math primitives (Float3, Quaternion, Frame, LoopBasis)
//! - **track**: Point store, loop synthesis, Catmull-Rom curve, frame table
//! - **structure**: Rails, ties, supports and light markers derived from the frame table
//! - **ride**: Progress to placement mapping
//! - **session**: Editing session state and ride playback
//! - **ffi**: C FFI bindings
//!
//! # Usage
//!
//! ```ignore
//! use coasterkit::{session::CoasterSession, sim::Float3};
//! ```
//!
//! For C/C#/Unity, link the cdylib and use `coaster_*` FFI functions.

pub mod error;
pub mod ride;
pub mod session;
pub mod sim;
pub mod structure;
pub mod track;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types at crate root
pub use error::TrackError;
pub use ride::RideTransform;
pub use session::{CoasterMode, CoasterSession, SessionConfig};
pub use sim::{Float3, Frame, Quaternion};
pub use track::{PointId, TrackBuild, TrackPoint};
