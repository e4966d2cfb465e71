//! PTY-backed process spawning for Unix.
//!
//! This crate allocates a pseudoterminal, forks, and executes a target
//! program with the slave side as its controlling terminal and standard
//! streams, all in one indivisible forkpty(3) call.
//!
//! Key points:
//! - Spawning returns the child's pid and the PTY master descriptor;
//!   both belong to the caller from then on
//! - Window geometry can be updated on the master at any time (TIOCSWINSZ)
//! - No I/O, waiting, or signalling is done on the caller's behalf
//!
//! Reference: https://man7.org/linux/man-pages/man3/forkpty.3.html

mod child;
mod error;
mod pty;
mod size;

pub use child::{Child, EXEC_FAILED_STATUS};
pub use error::{Error, Result};
pub use pty::{available_bytes, resize, window_size};
pub use size::WindowSize;
