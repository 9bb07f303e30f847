//! RISC-V hwprobe bit definitions and the RVA23 requirement table.

use bitflags::bitflags;

use crate::system::KernelVersion;

bitflags! {
    /// Bits of the `RISCV_HWPROBE_KEY_BASE_BEHAVIOR` word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BaseBehavior: u64 {
        /// RV32I/RV64I with M and A, as in the user ISA 2.2 / privileged 1.10 specs.
        const IMA = 1 << 0;
    }
}

bitflags! {
    /// Bits of the `RISCV_HWPROBE_KEY_IMA_EXT_0` word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ImaExt0: u64 {
        const FD = 1 << 0;
        const C = 1 << 1;
        const V = 1 << 2;
        const ZBA = 1 << 3;
        const ZBB = 1 << 4;
        const ZBS = 1 << 5;
        const ZICBOZ = 1 << 6;
        const ZBC = 1 << 7;
        const ZBKB = 1 << 8;
        const ZBKC = 1 << 9;
        const ZBKX = 1 << 10;
        const ZKND = 1 << 11;
        const ZKNE = 1 << 12;
        const ZKNH = 1 << 13;
        const ZKSED = 1 << 14;
        const ZKSH = 1 << 15;
        const ZKT = 1 << 16;
        const ZVBB = 1 << 17;
        const ZVBC = 1 << 18;
        const ZVKB = 1 << 19;
        const ZVKG = 1 << 20;
        const ZVKNED = 1 << 21;
        const ZVKNHA = 1 << 22;
        const ZVKNHB = 1 << 23;
        const ZVKSED = 1 << 24;
        const ZVKSH = 1 << 25;
        const ZVKT = 1 << 26;
        const ZFH = 1 << 27;
        const ZFHMIN = 1 << 28;
        const ZIHINTNTL = 1 << 29;
        const ZVFH = 1 << 30;
        const ZVFHMIN = 1 << 31;
        const ZFA = 1 << 32;
        const ZTSO = 1 << 33;
        const ZACAS = 1 << 34;
        const ZICOND = 1 << 35;
        const ZIHINTPAUSE = 1 << 36;
        const ZVE32X = 1 << 37;
        const ZVE32F = 1 << 38;
        const ZVE64X = 1 << 39;
        const ZVE64F = 1 << 40;
        const ZVE64D = 1 << 41;
        const ZIMOP = 1 << 42;
        const ZCA = 1 << 43;
        const ZCB = 1 << 44;
        const ZCD = 1 << 45;
        const ZCF = 1 << 46;
        const ZCMOP = 1 << 47;
        const ZAWRS = 1 << 48;
        const SUPM = 1 << 49;
        const ZICNTR = 1 << 50;
        const ZIHPM = 1 << 51;
        const ZFBFMIN = 1 << 52;
        const ZVFBFMIN = 1 << 53;
        const ZVFBFWMA = 1 << 54;
        const ZICBOM = 1 << 55;
        const ZAAMO = 1 << 56;
        const ZALRSC = 1 << 57;
        const ZABHA = 1 << 58;
        const ZALASR = 1 << 59;
        const ZICBOP = 1 << 60;
        const ZILSD = 1 << 61;
        const ZCLSD = 1 << 62;
    }
}

/// First kernel that reports Supm.
pub const LINUX_6_13: KernelVersion = KernelVersion::new(6, 13);
/// First kernel that reports Zicntr, Zihpm, Zaamo, Zalrsc and Zicbom.
pub const LINUX_6_15: KernelVersion = KernelVersion::new(6, 15);
/// First kernel that reports Zicbop.
pub const LINUX_6_19: KernelVersion = KernelVersion::new(6, 19);

/// One row of the requirement table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionDescriptor {
    /// Single bit in the extension word.
    pub bit: ImaExt0,
    /// Name printed when the extension is missing.
    pub label: &'static str,
    /// Whether the profile mandates the extension.
    pub required: bool,
    /// Oldest kernel expected to report the bit. [`KernelVersion::UNKNOWN`]
    /// means the requirement always applies.
    pub min_kernel: KernelVersion,
}

impl ExtensionDescriptor {
    #[must_use]
    pub const fn required(bit: ImaExt0, label: &'static str) -> Self {
        Self {
            bit,
            label,
            required: true,
            min_kernel: KernelVersion::UNKNOWN,
        }
    }

    #[must_use]
    pub const fn required_since(
        bit: ImaExt0,
        label: &'static str,
        min_kernel: KernelVersion,
    ) -> Self {
        Self {
            bit,
            label,
            required: true,
            min_kernel,
        }
    }

    #[must_use]
    pub const fn optional(bit: ImaExt0, label: &'static str) -> Self {
        Self {
            bit,
            label,
            required: false,
            min_kernel: KernelVersion::UNKNOWN,
        }
    }

    /// Whether the requirement binds on a kernel of `version`.
    #[must_use]
    pub fn applies_to(&self, version: KernelVersion) -> bool {
        self.required && (!self.min_kernel.is_known() || version >= self.min_kernel)
    }
}

/// The RVA23 requirement table, in evaluation order.
///
/// Evaluation stops at the first missing entry, so the order decides which
/// label gets reported. The Zve64d row carries the published label `Zfe64d`.
pub static RVA23: &[ExtensionDescriptor] = &[
    ExtensionDescriptor::required(ImaExt0::FD, "F and D"),
    ExtensionDescriptor::required(ImaExt0::C, "C"),
    ExtensionDescriptor::required(ImaExt0::V, "V"),
    ExtensionDescriptor::required(ImaExt0::ZBA, "Zba"),
    ExtensionDescriptor::required(ImaExt0::ZBB, "Zbb"),
    ExtensionDescriptor::required(ImaExt0::ZBS, "Zbs"),
    ExtensionDescriptor::required(ImaExt0::ZICBOZ, "Zicboz"),
    ExtensionDescriptor::optional(ImaExt0::ZBC, "Zbc"),
    ExtensionDescriptor::optional(ImaExt0::ZBKB, "Zbkb"),
    ExtensionDescriptor::optional(ImaExt0::ZBKC, "Zbkc"),
    ExtensionDescriptor::optional(ImaExt0::ZBKX, "Zbkx"),
    ExtensionDescriptor::optional(ImaExt0::ZKND, "Zknd"),
    ExtensionDescriptor::optional(ImaExt0::ZKNE, "Zkne"),
    ExtensionDescriptor::optional(ImaExt0::ZKNH, "Zknh"),
    ExtensionDescriptor::optional(ImaExt0::ZKSED, "Zksed"),
    ExtensionDescriptor::optional(ImaExt0::ZKSH, "Zksh"),
    ExtensionDescriptor::required(ImaExt0::ZKT, "Zkt"),
    ExtensionDescriptor::required(ImaExt0::ZVBB, "Zvbb"),
    ExtensionDescriptor::optional(ImaExt0::ZVBC, "Zvbc"),
    ExtensionDescriptor::required(ImaExt0::ZVKB, "Zvkb"),
    ExtensionDescriptor::optional(ImaExt0::ZVKG, "Zvkg"),
    ExtensionDescriptor::optional(ImaExt0::ZVKNED, "Zvkned"),
    ExtensionDescriptor::optional(ImaExt0::ZVKNHA, "Zvknha"),
    ExtensionDescriptor::optional(ImaExt0::ZVKNHB, "Zvknhb"),
    ExtensionDescriptor::optional(ImaExt0::ZVKSED, "Zvksed"),
    ExtensionDescriptor::optional(ImaExt0::ZVKSH, "Zvksh"),
    ExtensionDescriptor::required(ImaExt0::ZVKT, "Zvkt"),
    ExtensionDescriptor::optional(ImaExt0::ZFH, "Zfh"),
    ExtensionDescriptor::required(ImaExt0::ZFHMIN, "Zfhmin"),
    ExtensionDescriptor::required(ImaExt0::ZIHINTNTL, "Zihintntl"),
    ExtensionDescriptor::optional(ImaExt0::ZVFH, "Zvfh"),
    ExtensionDescriptor::required(ImaExt0::ZVFHMIN, "Zvfhmin"),
    ExtensionDescriptor::required(ImaExt0::ZFA, "Zfa"),
    ExtensionDescriptor::optional(ImaExt0::ZTSO, "Ztso"),
    ExtensionDescriptor::optional(ImaExt0::ZACAS, "Zacas"),
    ExtensionDescriptor::required_since(ImaExt0::ZICNTR, "Zicntr", LINUX_6_15),
    ExtensionDescriptor::required(ImaExt0::ZICOND, "Zicond"),
    ExtensionDescriptor::required(ImaExt0::ZIHINTPAUSE, "Zihintpause"),
    ExtensionDescriptor::required_since(ImaExt0::ZIHPM, "Zihpm", LINUX_6_15),
    ExtensionDescriptor::required(ImaExt0::ZVE32X, "Zve32x"),
    ExtensionDescriptor::required(ImaExt0::ZVE32F, "Zve32f"),
    ExtensionDescriptor::required(ImaExt0::ZVE64X, "Zve64x"),
    ExtensionDescriptor::required(ImaExt0::ZVE64F, "Zve64f"),
    ExtensionDescriptor::required(ImaExt0::ZVE64D, "Zfe64d"),
    ExtensionDescriptor::required(ImaExt0::ZIMOP, "Zimop"),
    ExtensionDescriptor::required(ImaExt0::ZCA, "Zca"),
    ExtensionDescriptor::required(ImaExt0::ZCB, "Zcb"),
    ExtensionDescriptor::required(ImaExt0::ZCD, "Zcd"),
    ExtensionDescriptor::optional(ImaExt0::ZCF, "Zcf"),
    ExtensionDescriptor::required(ImaExt0::ZCMOP, "Zcmop"),
    ExtensionDescriptor::required(ImaExt0::ZAWRS, "Zawrs"),
    ExtensionDescriptor::required_since(ImaExt0::ZAAMO, "Zaamo", LINUX_6_15),
    ExtensionDescriptor::required_since(ImaExt0::ZALRSC, "Zalrsc", LINUX_6_15),
    ExtensionDescriptor::required_since(ImaExt0::SUPM, "Supm", LINUX_6_13),
    ExtensionDescriptor::optional(ImaExt0::ZFBFMIN, "Zfbfmin"),
    ExtensionDescriptor::optional(ImaExt0::ZVFBFMIN, "Zvfbfmin"),
    ExtensionDescriptor::optional(ImaExt0::ZVFBFWMA, "Zvfbfwma"),
    ExtensionDescriptor::required_since(ImaExt0::ZICBOM, "Zicbom", LINUX_6_15),
    ExtensionDescriptor::optional(ImaExt0::ZABHA, "Zabha"),
    ExtensionDescriptor::optional(ImaExt0::ZALASR, "Zalasr"),
    ExtensionDescriptor::required_since(ImaExt0::ZICBOP, "Zicbop", LINUX_6_19),
    ExtensionDescriptor::optional(ImaExt0::ZILSD, "Zilsd"),
    ExtensionDescriptor::optional(ImaExt0::ZCLSD, "Zclsd"),
];
