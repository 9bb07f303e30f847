//! End-to-end check: resolve the kernel version, probe, then judge.

use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::profile::{self, Verdict};
use crate::system::{self, HwProbe, KernelRelease, KernelVersion, ProbeResult};

/// Everything one run learned about the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Raw kernel release string.
    pub release: String,
    /// Version parsed from `release`; always known.
    pub version: KernelVersion,
    /// Bitmasks returned by the probe.
    pub probe: ProbeResult,
    pub verdict: Verdict,
}

/// Run the whole check.
///
/// The kernel version is resolved first; if it is unknown the prober is never
/// invoked.
///
/// # Errors
///
/// Returns [`Error::VersionUnresolved`] if the release cannot be read or
/// parsed, and [`Error::Probe`] if the capability probe fails. A host that
/// lacks the baseline or a required extension is not an error; see
/// [`CheckReport::verdict`].
#[instrument(skip_all)]
pub fn run<S, P>(source: &S, prober: &P) -> Result<CheckReport>
where
    S: KernelRelease + ?Sized,
    P: HwProbe + ?Sized,
{
    let (release, version) = match system::resolve_release(source) {
        (Some(release), version) if version.is_known() => (release, version),
        (release, _) => return Err(Error::VersionUnresolved { release }),
    };
    info!(%version, "Resolved kernel version");

    let probe = system::probe(prober)?;
    let verdict = profile::assess(&probe, version);
    debug!(%verdict, "Evaluation finished");

    Ok(CheckReport {
        release,
        version,
        probe,
        verdict,
    })
}
