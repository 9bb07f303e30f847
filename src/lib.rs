//! RVA23 Check - does this RISC-V host implement the RVA23 baseline?
//!
//! This crate asks the Linux kernel, through `riscv_hwprobe(2)`, which ISA
//! extensions the CPU exposes and compares the answer with the RVA23 profile.
//! Some extensions are only reported by newer kernels, so each requirement
//! carries a minimum kernel version below which its absence is not held
//! against the host.
//!
//! # Platform Requirements
//!
//! - riscv64 Linux with `riscv_hwprobe` (6.4+)
//!
//! On any other target the probe fails with `ENOSYS`.
//!
//! # Example
//!
//! ```no_run
//! use rva23_check::{check, system};
//!
//! fn main() -> miette::Result<()> {
//!     let report = check::run(&system::Uname, &system::LinuxHwProbe)?;
//!     println!("{}", report.verdict);
//!     Ok(())
//! }
//! ```

pub mod check;
pub mod error;
pub mod profile;
pub mod system;

// Re-export commonly used types
pub use check::CheckReport;
pub use error::{Error, ProbeError, Result};
pub use profile::Verdict;
