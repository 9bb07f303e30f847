//! Requirement evaluation against a probed extension word.

use std::fmt;

use tracing::{debug, instrument};

use super::extensions::{BaseBehavior, ExtensionDescriptor, ImaExt0, RVA23};
use crate::system::{KernelVersion, ProbeResult};

/// Outcome of checking one host against the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every applicable required extension is present.
    AllSupported,
    /// The IMA base behavior bit is absent; no extension was examined.
    BaselineUnsupported,
    /// The first applicable required extension, in table order, that is absent.
    Missing(&'static str),
}

impl Verdict {
    #[must_use]
    pub fn is_supported(self) -> bool {
        matches!(self, Self::AllSupported)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllSupported => f.write_str("All required extensions supported"),
            Self::BaselineUnsupported => f.write_str("RISC-V base is NOT supported."),
            Self::Missing(label) => write!(f, "{label} NOT supported"),
        }
    }
}

/// Check the base behavior word first, then the extension word.
#[must_use]
pub fn assess(probe: &ProbeResult, version: KernelVersion) -> Verdict {
    if !probe.base_behavior.contains(BaseBehavior::IMA) {
        debug!(
            base_behavior = %format!("{:#x}", probe.base_behavior.bits()),
            "IMA base behavior not reported"
        );
        return Verdict::BaselineUnsupported;
    }
    evaluate(probe.ima_ext_0, version)
}

/// Evaluate `ext` against the [`RVA23`] table.
#[must_use]
pub fn evaluate(ext: ImaExt0, version: KernelVersion) -> Verdict {
    evaluate_with(RVA23, ext, version)
}

/// Walk `table` in order and stop at the first applicable required
/// extension whose bit is clear.
///
/// Entries gated above `version` are skipped even when required.
#[instrument(skip(table, ext), fields(ext = %format!("{:#x}", ext.bits())))]
#[must_use]
pub fn evaluate_with(
    table: &[ExtensionDescriptor],
    ext: ImaExt0,
    version: KernelVersion,
) -> Verdict {
    table
        .iter()
        .find(|d| d.applies_to(version) && !ext.contains(d.bit))
        .map_or(Verdict::AllSupported, |d| Verdict::Missing(d.label))
}

/// Per-extension result used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionStatus {
    /// Bit is set.
    Present,
    /// Required, applicable, and the bit is clear.
    Missing,
    /// Not required and the bit is clear.
    Optional,
    /// Required, but the running kernel is older than the entry's gate.
    NotYetReportable,
}

impl fmt::Display for ExtensionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Present => "present",
            Self::Missing => "missing",
            Self::Optional => "absent (optional)",
            Self::NotYetReportable => "absent (not reported before gate)",
        })
    }
}

/// Status of every [`RVA23`] entry, in table order.
///
/// Unlike [`evaluate`] this does not stop at the first missing extension.
pub fn statuses(
    ext: ImaExt0,
    version: KernelVersion,
) -> impl Iterator<Item = (&'static ExtensionDescriptor, ExtensionStatus)> {
    RVA23.iter().map(move |d| {
        let status = if ext.contains(d.bit) {
            ExtensionStatus::Present
        } else if !d.required {
            ExtensionStatus::Optional
        } else if d.applies_to(version) {
            ExtensionStatus::Missing
        } else {
            ExtensionStatus::NotYetReportable
        };
        (d, status)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::extensions::{LINUX_6_15, LINUX_6_19};

    fn all_required() -> ImaExt0 {
        RVA23
            .iter()
            .filter(|d| d.required)
            .fold(ImaExt0::empty(), |acc, d| acc | d.bit)
    }

    #[test]
    fn test_all_required_bits_pass_on_new_kernel() {
        assert_eq!(
            evaluate(all_required(), KernelVersion::new(6, 19)),
            Verdict::AllSupported
        );
    }

    #[test]
    fn test_optional_bits_do_not_matter() {
        let ext = all_required() - ImaExt0::ZBC - ImaExt0::ZTSO - ImaExt0::ZCLSD;
        assert_eq!(
            evaluate(ext, KernelVersion::new(7, 0)),
            Verdict::AllSupported
        );
    }

    #[test]
    fn test_empty_word_reports_first_entry() {
        assert_eq!(
            evaluate(ImaExt0::empty(), KernelVersion::new(6, 15)),
            Verdict::Missing("F and D")
        );
    }

    #[test]
    fn test_early_exit_reports_first_in_table_order() {
        let ext = all_required() - ImaExt0::ZKT - ImaExt0::ZCB;
        assert_eq!(
            evaluate(ext, KernelVersion::new(6, 15)),
            Verdict::Missing("Zkt")
        );
    }

    #[test]
    fn test_reordering_table_changes_reported_label() {
        let zkt = ExtensionDescriptor::required(ImaExt0::ZKT, "Zkt");
        let zcb = ExtensionDescriptor::required(ImaExt0::ZCB, "Zcb");
        let version = KernelVersion::new(6, 15);

        assert_eq!(
            evaluate_with(&[zkt, zcb], ImaExt0::empty(), version),
            Verdict::Missing("Zkt")
        );
        assert_eq!(
            evaluate_with(&[zcb, zkt], ImaExt0::empty(), version),
            Verdict::Missing("Zcb")
        );
    }

    #[test]
    fn test_gated_extension_skipped_on_older_kernel() {
        let ext = all_required() - ImaExt0::ZICNTR;
        assert_eq!(
            evaluate(ext, KernelVersion::new(6, 14)),
            Verdict::AllSupported
        );
        assert_eq!(evaluate(ext, LINUX_6_15), Verdict::Missing("Zicntr"));
    }

    #[test]
    fn test_zicbop_gated_at_6_19() {
        let ext = all_required() - ImaExt0::ZICBOP;
        assert_eq!(
            evaluate(ext, KernelVersion::new(6, 18)),
            Verdict::AllSupported
        );
        assert_eq!(evaluate(ext, LINUX_6_19), Verdict::Missing("Zicbop"));
    }

    #[test]
    fn test_unknown_version_only_applies_ungated_rows() {
        let ext = all_required() - ImaExt0::SUPM - ImaExt0::ZIHPM;
        assert_eq!(
            evaluate(ext, KernelVersion::UNKNOWN),
            Verdict::AllSupported
        );
    }

    #[test]
    fn test_baseline_gate_ignores_extension_word() {
        for ext in [0, u64::MAX, all_required().bits()] {
            let probe = ProbeResult::from_bits(0, ext);
            assert_eq!(
                assess(&probe, KernelVersion::new(6, 15)),
                Verdict::BaselineUnsupported
            );
        }
        let probe = ProbeResult::from_bits(0b10, u64::MAX);
        assert_eq!(
            assess(&probe, KernelVersion::new(6, 15)),
            Verdict::BaselineUnsupported
        );
    }

    #[test]
    fn test_assess_with_baseline_delegates() {
        let probe = ProbeResult::from_bits(1, (all_required() - ImaExt0::V).bits());
        assert_eq!(
            assess(&probe, KernelVersion::new(6, 15)),
            Verdict::Missing("V")
        );
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let ext = all_required() - ImaExt0::ZAWRS;
        let version = KernelVersion::new(6, 15);
        let first = evaluate(ext, version);
        for _ in 0..8 {
            assert_eq!(evaluate(ext, version), first);
        }
    }

    #[test]
    fn test_verdict_text() {
        assert_eq!(
            Verdict::AllSupported.to_string(),
            "All required extensions supported"
        );
        assert_eq!(
            Verdict::BaselineUnsupported.to_string(),
            "RISC-V base is NOT supported."
        );
        assert_eq!(
            Verdict::Missing("Zicntr").to_string(),
            "Zicntr NOT supported"
        );
        assert!(Verdict::AllSupported.is_supported());
        assert!(!Verdict::Missing("C").is_supported());
    }

    #[test]
    fn test_statuses_cover_table_without_stopping() {
        let ext = all_required() - ImaExt0::C - ImaExt0::ZICNTR - ImaExt0::ZICBOP;
        let listed: Vec<_> = statuses(ext, KernelVersion::new(6, 15)).collect();
        assert_eq!(listed.len(), RVA23.len());

        let status_of = |label: &str| {
            listed
                .iter()
                .find(|(d, _)| d.label == label)
                .map(|(_, s)| *s)
                .expect("label in table")
        };
        assert_eq!(status_of("C"), ExtensionStatus::Missing);
        assert_eq!(status_of("Zicntr"), ExtensionStatus::Missing);
        assert_eq!(status_of("Zicbop"), ExtensionStatus::NotYetReportable);
        assert_eq!(status_of("Zbc"), ExtensionStatus::Optional);
        assert_eq!(status_of("Zba"), ExtensionStatus::Present);
    }
}
