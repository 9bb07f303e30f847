//! Host system queries.
//!
//! This module reads the running kernel's release and asks the kernel which
//! RISC-V extensions the CPU exposes.

mod hwprobe;
mod version;

pub use hwprobe::{
    HwProbe, HwProbePair, KEY_BASE_BEHAVIOR, KEY_IMA_EXT_0, LinuxHwProbe, ProbeResult, probe,
};
pub(crate) use version::resolve_release;
pub use version::{KernelRelease, KernelVersion, Uname, parse_release, resolve};
