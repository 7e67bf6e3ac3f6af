use nix::sys::select::{select, FdSet};
use nix::sys::termios::{tcgetattr, tcsetattr, LocalFlags, SetArg, Termios};
use nix::sys::time::{TimeVal, TimeValLike};
use std::io::{self, Read};

/// Puts stdin into non-canonical, non-echo mode for as long as it lives, restoring the
/// original mode on drop. This is the only thing in the process that touches terminal
/// settings; every exit path (HALT, fatal opcode, image-load failure, SIGINT) goes through
/// either this guard's `Drop` or [`install_interrupt_handler`], which shares the same
/// original settings.
pub struct TerminalGuard {
    original: Termios,
}

impl TerminalGuard {
    pub fn acquire() -> nix::Result<Self> {
        let original = tcgetattr(libc::STDIN_FILENO)?;

        let mut raw = original.clone();
        raw.local_flags &= !(LocalFlags::ICANON | LocalFlags::ECHO);
        tcsetattr(libc::STDIN_FILENO, SetArg::TCSANOW, &raw)?;

        Ok(Self { original })
    }

    pub fn original(&self) -> Termios {
        self.original.clone()
    }

    pub fn restore(&self) {
        let _ = tcsetattr(libc::STDIN_FILENO, SetArg::TCSANOW, &self.original);
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Installs a Ctrl-C handler that restores the terminal and exits with a negative sentinel
/// status. Runs on its own thread (not a real signal handler), so it can safely call into
/// `tcsetattr` without worrying about async-signal-safety.
pub fn install_interrupt_handler(original: Termios) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        let _ = tcsetattr(libc::STDIN_FILENO, SetArg::TCSANOW, &original);
        println!();
        std::process::exit(-2);
    })
}

/// Non-blocking probe for whether a byte is waiting on stdin. Used by the memory subsystem
/// to implement the keyboard status register.
pub fn key_ready() -> bool {
    let mut readfds = FdSet::new();
    readfds.insert(libc::STDIN_FILENO);

    match select(None, &mut readfds, None, None, &mut TimeVal::zero()) {
        Ok(ready) => ready == 1,
        Err(_) => false,
    }
}

/// Blocking single-byte read from stdin. Used both to service a confirmed-ready KBSR poll
/// and directly by the GETC/IN trap handlers.
pub fn read_byte() -> u8 {
    let mut buffer = [0; 1];
    io::stdin()
        .read_exact(&mut buffer)
        .expect("unable to read from stdin");

    buffer[0]
}
