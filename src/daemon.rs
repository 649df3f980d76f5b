//! Detach from the controlling session. Called by the binary only after
//! every resource has been acquired, so setup failures still reach the
//! terminal.

use std::io;
use std::process;

/// Fork off the parent, start a new session, clear the umask, move to /
/// and point the standard streams at /dev/null. The parent half exits 0.
pub fn daemonize() -> io::Result<()> {
    // Already reparented to init, nothing to do.
    if unsafe { libc::getppid() } == 1 {
        return Ok(());
    }

    match unsafe { libc::fork() } {
        -1 => return Err(io::Error::last_os_error()),
        0 => {}
        _ => process::exit(0),
    }

    unsafe { libc::umask(0) };

    if unsafe { libc::setsid() } < 0 {
        return Err(io::Error::last_os_error());
    }

    // Do not keep the launch directory pinned.
    if unsafe { libc::chdir(b"/\0".as_ptr().cast()) } < 0 {
        return Err(io::Error::last_os_error());
    }

    let devnull = unsafe { libc::open(b"/dev/null\0".as_ptr().cast(), libc::O_RDWR) };
    if devnull < 0 {
        return Err(io::Error::last_os_error());
    }
    for fd in [libc::STDIN_FILENO, libc::STDOUT_FILENO, libc::STDERR_FILENO] {
        if unsafe { libc::dup2(devnull, fd) } < 0 {
            return Err(io::Error::last_os_error());
        }
    }
    if devnull > libc::STDERR_FILENO {
        unsafe { libc::close(devnull) };
    }

    Ok(())
}
