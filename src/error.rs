//! Error types for the RVA23 checker.
//!
//! Uses thiserror for deriving std::error::Error and miette for rich diagnostics.
//!
//! Only conditions that stop the check before a verdict exists are errors.
//! A missing baseline or a missing required extension is a
//! [`Verdict`](crate::profile::Verdict), since its message belongs on stdout.

use miette::Diagnostic;
use nix::errno::Errno;
use thiserror::Error;

/// Top-level error type for the application.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Kernel release could not be read or parsed
    #[error("Can't get kernel version number{}", release_suffix(.release))]
    #[diagnostic(
        code(rva23::system::version),
        help("Extension gating needs a release of the form MAJOR.MINOR[...], e.g. 6.15.0")
    )]
    VersionUnresolved {
        /// Raw release string, or `None` if the uname call itself failed.
        release: Option<String>,
    },

    /// Capability probe failed
    #[error("Hardware capability probe failed")]
    #[diagnostic(code(rva23::system::hwprobe))]
    Probe(#[from] #[diagnostic_source] ProbeError),
}

fn release_suffix(release: &Option<String>) -> String {
    match release {
        Some(r) => format!(" from release \"{r}\""),
        None => String::new(),
    }
}

/// Errors raised by the capability prober.
#[derive(Error, Debug, Diagnostic, Clone, Copy, PartialEq, Eq)]
pub enum ProbeError {
    /// The riscv_hwprobe system call returned an error
    #[error("sys_riscv_hwprobe failed: {0} (errno {code})", code = raw_errno(.0))]
    #[diagnostic(
        code(rva23::system::hwprobe::syscall),
        help("riscv_hwprobe is available on riscv64 Linux 6.4 and later")
    )]
    SyscallFailed(Errno),
}

fn raw_errno(errno: &Errno) -> i32 {
    *errno as i32
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
