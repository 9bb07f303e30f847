//! RISC-V hardware capability probing via `riscv_hwprobe(2)`.

use nix::errno::Errno;
use tracing::{debug, instrument};

use crate::error::ProbeError;
use crate::profile::{BaseBehavior, ImaExt0};

/// Key for the base behavior word (`RISCV_HWPROBE_KEY_BASE_BEHAVIOR`).
pub const KEY_BASE_BEHAVIOR: i64 = 3;

/// Key for the first extension bitmask word (`RISCV_HWPROBE_KEY_IMA_EXT_0`).
pub const KEY_IMA_EXT_0: i64 = 4;

/// One key/value pair, laid out as the kernel's `struct riscv_hwprobe`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HwProbePair {
    pub key: i64,
    pub value: u64,
}

impl HwProbePair {
    /// A request for `key` with the value zeroed.
    #[must_use]
    pub const fn request(key: i64) -> Self {
        Self { key, value: 0 }
    }
}

/// The OS capability-discovery interface.
///
/// Implementations fill each pair's `value` in place; responses correspond to
/// requests by position.
pub trait HwProbe {
    /// # Errors
    ///
    /// Returns the OS error code when the interface rejects the request.
    fn hwprobe(&self, pairs: &mut [HwProbePair]) -> std::result::Result<(), Errno>;
}

/// The real `riscv_hwprobe` system call.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxHwProbe;

impl HwProbe for LinuxHwProbe {
    fn hwprobe(&self, pairs: &mut [HwProbePair]) -> std::result::Result<(), Errno> {
        sys::riscv_hwprobe(pairs)
    }
}

#[cfg(all(target_os = "linux", target_arch = "riscv64"))]
#[allow(unsafe_code)]
mod sys {
    use nix::errno::Errno;
    use nix::libc;

    use super::HwProbePair;

    const SYS_RISCV_HWPROBE: libc::c_long = 258;

    /// Probe across all online CPUs (empty cpu set, no flags).
    pub(super) fn riscv_hwprobe(pairs: &mut [HwProbePair]) -> Result<(), Errno> {
        // SAFETY: `pairs` is a live, exclusively borrowed slice of
        // `#[repr(C)]` key/value pairs matching `struct riscv_hwprobe`, and the
        // count passed is its length. A zero cpusetsize with a null cpu set
        // asks about all CPUs, so the kernel reads nothing else.
        let ret = unsafe {
            libc::syscall(
                SYS_RISCV_HWPROBE,
                pairs.as_mut_ptr(),
                pairs.len(),
                0_usize,
                std::ptr::null_mut::<libc::c_ulong>(),
                0_u32,
            )
        };
        Errno::result(ret).map(drop)
    }
}

#[cfg(not(all(target_os = "linux", target_arch = "riscv64")))]
mod sys {
    use nix::errno::Errno;

    use super::HwProbePair;

    pub(super) fn riscv_hwprobe(_pairs: &mut [HwProbePair]) -> Result<(), Errno> {
        Err(Errno::ENOSYS)
    }
}

/// Bitmasks returned by one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeResult {
    pub base_behavior: BaseBehavior,
    pub ima_ext_0: ImaExt0,
}

impl ProbeResult {
    /// Builds a result from raw words, keeping bits with no known name.
    #[must_use]
    pub const fn from_bits(base_behavior: u64, ima_ext_0: u64) -> Self {
        Self {
            base_behavior: BaseBehavior::from_bits_retain(base_behavior),
            ima_ext_0: ImaExt0::from_bits_retain(ima_ext_0),
        }
    }
}

/// Query base behavior and extension word 0 in a single call.
///
/// # Errors
///
/// Returns [`ProbeError::SyscallFailed`] if the interface reports an error.
/// There is no retry and no partial result.
#[instrument(skip(prober))]
pub fn probe<P: HwProbe + ?Sized>(prober: &P) -> std::result::Result<ProbeResult, ProbeError> {
    let mut pairs = [
        HwProbePair::request(KEY_BASE_BEHAVIOR),
        HwProbePair::request(KEY_IMA_EXT_0),
    ];

    prober
        .hwprobe(&mut pairs)
        .map_err(ProbeError::SyscallFailed)?;

    let [base, ext] = pairs;
    debug!(
        base_behavior = %format!("{:#x}", base.value),
        ima_ext_0 = %format!("{:#x}", ext.value),
        "riscv_hwprobe returned"
    );

    Ok(ProbeResult::from_bits(base.value, ext.value))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Answers each key from a table and records what it was asked.
    struct Recording {
        base: u64,
        ext: u64,
        seen: RefCell<Vec<HwProbePair>>,
    }

    impl HwProbe for Recording {
        fn hwprobe(&self, pairs: &mut [HwProbePair]) -> std::result::Result<(), Errno> {
            self.seen.borrow_mut().extend_from_slice(pairs);
            for pair in pairs.iter_mut() {
                pair.value = match pair.key {
                    KEY_BASE_BEHAVIOR => self.base,
                    KEY_IMA_EXT_0 => self.ext,
                    _ => 0,
                };
            }
            Ok(())
        }
    }

    struct Failing(Errno);

    impl HwProbe for Failing {
        fn hwprobe(&self, _pairs: &mut [HwProbePair]) -> std::result::Result<(), Errno> {
            Err(self.0)
        }
    }

    #[test]
    fn test_pair_layout_matches_kernel_struct() {
        assert_eq!(std::mem::size_of::<HwProbePair>(), 16);
        assert_eq!(std::mem::align_of::<HwProbePair>(), 8);
    }

    #[test]
    fn test_probe_sends_two_zeroed_requests_in_order() {
        let prober = Recording {
            base: 1,
            ext: 0xdead_beef,
            seen: RefCell::new(Vec::new()),
        };
        probe(&prober).expect("probe should succeed");

        assert_eq!(
            *prober.seen.borrow(),
            vec![
                HwProbePair::request(KEY_BASE_BEHAVIOR),
                HwProbePair::request(KEY_IMA_EXT_0),
            ]
        );
    }

    #[test]
    fn test_probe_maps_responses_by_slot() {
        let prober = Recording {
            base: 1,
            ext: 0x4000_0000_0000_0001,
            seen: RefCell::new(Vec::new()),
        };
        let result = probe(&prober).expect("probe should succeed");

        assert_eq!(result.base_behavior.bits(), 1);
        assert_eq!(result.ima_ext_0.bits(), 0x4000_0000_0000_0001);
        assert!(result.base_behavior.contains(BaseBehavior::IMA));
        assert!(result.ima_ext_0.contains(ImaExt0::ZCLSD));
    }

    #[test]
    fn test_probe_keeps_unknown_bits() {
        let prober = Recording {
            base: 0b11,
            ext: u64::MAX,
            seen: RefCell::new(Vec::new()),
        };
        let result = probe(&prober).expect("probe should succeed");
        assert_eq!(result.base_behavior.bits(), 0b11);
        assert_eq!(result.ima_ext_0.bits(), u64::MAX);
    }

    #[test]
    fn test_probe_failure_surfaces_errno() {
        let err = probe(&Failing(Errno::EINVAL)).expect_err("probe should fail");
        assert_eq!(err, ProbeError::SyscallFailed(Errno::EINVAL));
    }

    #[cfg(not(all(target_os = "linux", target_arch = "riscv64")))]
    #[test]
    fn test_linux_hwprobe_unavailable_off_riscv() {
        let err = probe(&LinuxHwProbe).expect_err("no riscv_hwprobe on this arch");
        assert_eq!(err, ProbeError::SyscallFailed(Errno::ENOSYS));
    }

    #[cfg(all(target_os = "linux", target_arch = "riscv64"))]
    #[test]
    fn test_linux_hwprobe_real() {
        let result = probe(&LinuxHwProbe);
        assert!(result.is_ok(), "riscv_hwprobe failed: {result:?}");
    }
}
