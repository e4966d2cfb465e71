//! Spawning a child process on a fresh PTY
//!
//! The PTY pair is allocated and the process forked by a single
//! forkpty(3) call, which also makes the slave the child's controlling
//! terminal and applies the initial window size. There is no separate
//! open-then-fork window in which a half-built PTY could leak.

use std::ffi::{CString, OsStr};
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd, RawFd};
use std::os::unix::ffi::OsStrExt;

use log::debug;
use nix::pty::{forkpty, ForkptyResult, Winsize};
use nix::unistd::{execve, Pid};

use crate::error::{Error, Result};
use crate::pty;
use crate::size::WindowSize;

/// Exit status of a spawned child whose exec failed.
///
/// The parent cannot distinguish this from the target program itself
/// exiting with the same status; callers that care should treat a child
/// exiting this way almost immediately as a failed exec.
pub const EXEC_FAILED_STATUS: i32 = 127;

/// A child process attached to a freshly allocated PTY.
///
/// Holds the master descriptor and the child's pid on the caller's
/// behalf. Dropping the handle closes the master (the caller closing
/// their own descriptor); it does not signal, wait on, or otherwise
/// touch the child. Reaping is the caller's job.
#[derive(Debug)]
pub struct Child {
    master: OwnedFd,
    pid: Pid,
}

impl Child {
    /// Allocate a PTY and spawn `program` on its slave side.
    ///
    /// # Arguments
    /// * `program` - path to the executable. Not validated here; a bad
    ///   path surfaces as the child exiting with [`EXEC_FAILED_STATUS`]
    /// * `args` - the full argument vector, passed to the program
    ///   verbatim; `args[0]` is conventionally the program name
    /// * `env` - the child's entire environment. An empty iterator gives
    ///   the child an empty environment; pass `std::env::vars()` to
    ///   inherit the caller's
    /// * `size` - initial window geometry, in place before the program
    ///   runs
    pub fn spawn<S, I, E, K, V>(program: S, args: I, env: E, size: WindowSize) -> Result<Self>
    where
        S: AsRef<OsStr>,
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = (K, V)>,
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        let program = cstring("program path", program.as_ref())?;
        let argv = args
            .into_iter()
            .map(|arg| cstring("argument", arg.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let envp = env
            .into_iter()
            .map(|(key, value)| {
                let mut entry = key.as_ref().as_bytes().to_vec();
                entry.push(b'=');
                entry.extend_from_slice(value.as_ref().as_bytes());
                CString::new(entry).map_err(|_| Error::NulByte("environment entry"))
            })
            .collect::<Result<Vec<_>>>()?;

        let ws = Winsize::from(size);

        // SAFETY: everything the child touches (program, argv, envp) was
        // built before the fork; between fork and exec the child calls
        // only execve and _exit, both async-signal-safe.
        match unsafe { forkpty(&ws, None) }.map_err(Error::Spawn)? {
            ForkptyResult::Parent { child, master } => {
                debug!(
                    "spawned child {} on pty master fd {}",
                    child,
                    master.as_raw_fd()
                );
                Ok(Self { master, pid: child })
            }
            ForkptyResult::Child => {
                let _ = execve(&program, &argv, &envp);
                // Exec failed and the process image may be half torn
                // down: leave at once, without unwinding and without
                // running atexit handlers inherited from the parent.
                unsafe { libc::_exit(EXEC_FAILED_STATUS) }
            }
        }
    }

    /// Spawn the user's shell as a login shell.
    ///
    /// Uses `$SHELL` (falling back to `/bin/bash`), passes the caller's
    /// environment through explicitly, and forces TERM to xterm-256color.
    pub fn spawn_shell(size: WindowSize) -> Result<Self> {
        let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/bash".to_string());
        let mut env: Vec<(String, String)> =
            std::env::vars().filter(|(key, _)| key != "TERM").collect();
        env.push(("TERM".to_string(), "xterm-256color".to_string()));
        Self::spawn(shell.as_str(), [shell.as_str(), "-l"], env, size)
    }

    /// Process id of the spawned child
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Borrow the PTY master descriptor
    pub fn master(&self) -> BorrowedFd<'_> {
        self.master.as_fd()
    }

    /// Consume the handle, releasing ownership of the master descriptor
    pub fn into_master(self) -> OwnedFd {
        self.master
    }

    /// Update the window geometry of the child's terminal
    pub fn resize(&self, size: WindowSize) -> Result<()> {
        pty::resize(&self.master, size)
    }

    /// Current window geometry of the child's terminal
    pub fn window_size(&self) -> Result<WindowSize> {
        pty::window_size(&self.master)
    }

    /// Bytes of child output queued on the master
    pub fn available_bytes(&self) -> Result<usize> {
        pty::available_bytes(&self.master)
    }
}

impl AsFd for Child {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.master.as_fd()
    }
}

impl AsRawFd for Child {
    fn as_raw_fd(&self) -> RawFd {
        self.master.as_raw_fd()
    }
}

fn cstring(what: &'static str, s: &OsStr) -> Result<CString> {
    CString::new(s.as_bytes()).map_err(|_| Error::NulByte(what))
}
