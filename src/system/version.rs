//! Kernel version resolution.

use std::fmt;

use nix::errno::Errno;
use tracing::{debug, error, instrument, warn};

/// Kernel release packed into one orderable ordinal.
///
/// The major number occupies the upper 32 bits and the minor number the lower
/// 32 bits, so ordinary integer comparison orders releases by `(major, minor)`.
/// The all-zero value is [`KernelVersion::UNKNOWN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct KernelVersion(u64);

impl KernelVersion {
    /// Sentinel for "version could not be determined".
    ///
    /// As a minimum-version gate in the extension table it means the
    /// requirement is unconditional.
    pub const UNKNOWN: Self = Self(0);

    /// Builds the ordinal for `major.minor`.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self(((major as u64) << 32) | minor as u64)
    }

    /// Returns `false` for the [`UNKNOWN`](Self::UNKNOWN) sentinel.
    #[must_use]
    pub const fn is_known(self) -> bool {
        self.0 != 0
    }

    #[must_use]
    pub const fn major(self) -> u32 {
        (self.0 >> 32) as u32
    }

    #[must_use]
    pub const fn minor(self) -> u32 {
        self.0 as u32
    }

    /// Raw ordinal value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for KernelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}

/// Source of the kernel release identifier (`uname -r`).
pub trait KernelRelease {
    /// Returns the raw release string, e.g. `"6.15.0-rc1"`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the release cannot be read.
    fn release(&self) -> std::result::Result<String, Errno>;
}

/// Reads the release of the running kernel via the `uname` syscall.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uname;

impl KernelRelease for Uname {
    fn release(&self) -> std::result::Result<String, Errno> {
        let uname = nix::sys::utsname::uname()?;
        Ok(uname.release().to_string_lossy().into_owned())
    }
}

/// Resolve the running kernel's version.
///
/// Prints the raw release to stdout as `Kernel release <release>`.
/// Any failure, whether reading or parsing, yields [`KernelVersion::UNKNOWN`].
#[instrument(skip(source))]
pub fn resolve<S: KernelRelease + ?Sized>(source: &S) -> KernelVersion {
    resolve_release(source).1
}

/// Like [`resolve`], but also hands back the raw release string for
/// reporting. The string is `None` if the source itself failed.
pub(crate) fn resolve_release<S: KernelRelease + ?Sized>(
    source: &S,
) -> (Option<String>, KernelVersion) {
    match read_release(source) {
        Some(release) => {
            let version = parse_release(&release);
            (Some(release), version)
        }
        None => (None, KernelVersion::UNKNOWN),
    }
}

/// Read and echo the release string. `None` if the source failed.
fn read_release<S: KernelRelease + ?Sized>(source: &S) -> Option<String> {
    match source.release() {
        Ok(release) => {
            println!("Kernel release {release}");
            Some(release)
        }
        Err(e) => {
            error!("uname failed: {e}");
            None
        }
    }
}

/// Parse a kernel release string into a [`KernelVersion`].
///
/// Only the first two `.`-separated fields are used and both must be plain
/// decimal numbers that fit in 32 bits. Anything else, including suffixes
/// glued to the minor field (`"6.8-generic"`), resolves to
/// [`KernelVersion::UNKNOWN`].
#[must_use]
pub fn parse_release(release: &str) -> KernelVersion {
    let mut parts = release.split('.');

    let (Some(major), Some(minor)) = (parts.next(), parts.next()) else {
        warn!("Kernel release {release:?} has fewer than two fields");
        return KernelVersion::UNKNOWN;
    };

    match (parse_field(major), parse_field(minor)) {
        (Some(major), Some(minor)) => {
            let version = KernelVersion::new(major, minor);
            debug!(%version, ordinal = version.as_u64(), "Parsed kernel release");
            version
        }
        _ => {
            warn!("Kernel release {release:?} has a non-numeric major or minor field");
            KernelVersion::UNKNOWN
        }
    }
}

fn parse_field(field: &str) -> Option<u32> {
    // u32::from_str also accepts a leading '+'
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
