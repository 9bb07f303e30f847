//! The RVA23 profile and how a probed host is judged against it.
//!
//! # Example
//!
//! ```
//! use rva23_check::profile::{self, ImaExt0, Verdict};
//! use rva23_check::system::KernelVersion;
//!
//! let verdict = profile::evaluate(ImaExt0::FD | ImaExt0::C, KernelVersion::new(6, 15));
//! assert_eq!(verdict, Verdict::Missing("V"));
//! ```

mod evaluate;
mod extensions;

pub use evaluate::{ExtensionStatus, Verdict, assess, evaluate, evaluate_with, statuses};
pub use extensions::{
    BaseBehavior, ExtensionDescriptor, ImaExt0, LINUX_6_13, LINUX_6_15, LINUX_6_19, RVA23,
};
