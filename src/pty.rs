//! Descriptor-level operations on a PTY master
//!
//! These work on any descriptor that refers to the master side of a
//! pseudoterminal, wherever the caller keeps it. Nothing here reads or
//! writes the terminal data stream; I/O on the master belongs to the
//! embedding application.

use std::os::fd::{AsFd, AsRawFd};

use nix::errno::Errno;
use nix::pty::Winsize;

use crate::error::{Error, Result};
use crate::size::WindowSize;

/// Update the kernel's window size for the terminal behind `master`.
///
/// The kernel delivers SIGWINCH to the foreground process group on the
/// slave side as part of the update; callers do not signal the child
/// themselves. Safe to repeat with the same geometry.
pub fn resize<F: AsFd>(master: F, size: WindowSize) -> Result<()> {
    let ws = Winsize::from(size);
    // SAFETY: TIOCSWINSZ reads a winsize through a valid pointer; the
    // descriptor stays open for the duration of the borrow.
    let res = unsafe {
        libc::ioctl(
            master.as_fd().as_raw_fd(),
            libc::TIOCSWINSZ as libc::c_ulong,
            &ws,
        )
    };
    Errno::result(res).map(drop).map_err(Error::SetWindowSize)
}

/// Read back the kernel's current window size for `master`.
pub fn window_size<F: AsFd>(master: F) -> Result<WindowSize> {
    let mut ws = Winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: TIOCGWINSZ writes a winsize through a valid pointer.
    let res = unsafe {
        libc::ioctl(
            master.as_fd().as_raw_fd(),
            libc::TIOCGWINSZ as libc::c_ulong,
            &mut ws,
        )
    };
    Errno::result(res).map_err(Error::GetWindowSize)?;
    Ok(WindowSize::from(ws))
}

/// Number of bytes queued on `master` that a read would return without
/// blocking.
pub fn available_bytes<F: AsFd>(master: F) -> Result<usize> {
    let mut count: libc::c_int = 0;
    // SAFETY: FIONREAD writes a c_int through a valid pointer.
    let res = unsafe {
        libc::ioctl(
            master.as_fd().as_raw_fd(),
            libc::FIONREAD as libc::c_ulong,
            &mut count,
        )
    };
    Errno::result(res).map_err(Error::AvailableBytes)?;
    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::child::Child;

    use std::thread;
    use std::time::Duration;

    use nix::sys::signal::{kill, Signal};
    use nix::sys::wait::waitpid;
    use nix::unistd::write;
    use proptest::prelude::*;

    /// A child that stays alive until torn down
    fn cat_child() -> Child {
        Child::spawn(
            "/bin/cat",
            ["cat"],
            std::iter::empty::<(&str, &str)>(),
            WindowSize::default(),
        )
        .unwrap()
    }

    fn teardown(child: Child) {
        let pid = child.pid();
        let _ = kill(pid, Signal::SIGKILL);
        let _ = waitpid(pid, None);
    }

    #[test]
    fn test_resize_idempotent() {
        let child = cat_child();
        let size = WindowSize::new(120, 40);
        resize(&child, size).unwrap();
        resize(&child, size).unwrap();
        assert_eq!(window_size(&child).unwrap(), size);
        teardown(child);
    }

    #[test]
    fn test_resize_non_tty_fd() {
        let file = std::fs::File::open("/dev/null").unwrap();
        assert!(resize(&file, WindowSize::default()).is_err());
    }

    #[test]
    fn test_available_bytes_sees_echoed_input() {
        let child = cat_child();
        // The line discipline echoes master-side input straight back, so
        // pending bytes show up even before cat responds.
        write(&child, b"ping\n").unwrap();
        thread::sleep(Duration::from_millis(100));
        assert!(child.available_bytes().unwrap() > 0);
        teardown(child);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn resize_applies_any_geometry(rows in 1u16..=300, cols in 1u16..=400) {
            let child = cat_child();
            let size = WindowSize::new(cols, rows);
            resize(&child, size).unwrap();
            let got = window_size(&child).unwrap();
            teardown(child);
            prop_assert_eq!(got, size);
        }
    }
}
