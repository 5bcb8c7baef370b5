use std::arch::asm;

use super::{FloatingPointUnit, flags_from_status};
use crate::{FloatingPointFlags, RoundingMode, ScopeOptions};

// FPCR trap enables: IOE, DZE, OFE, UFE, IXE and IDE.
const FPCR_TRAP_ENABLES: u64 = (0x1F << 8) | (1 << 15);
const FPCR_FLUSH_TO_ZERO: u64 = 1 << 24;
const FPCR_ROUNDING_SHIFT: u64 = 22;
// FPSR cumulative flags: IOC, DZC, OFC, UFC, IXC and IDC.
const FPSR_FLAGS: u64 = 0x1F | (1 << 7);

/// ARMv8 floating-point control (FPCR) and status (FPSR) registers.
pub(crate) struct Armv8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Environment {
    fpcr: u64,
    fpsr: u64,
}

fn read_fpcr() -> u64 {
    let fpcr: u64;
    unsafe {
        asm!("mrs {}, fpcr", out(reg) fpcr, options(nomem, nostack, preserves_flags));
    }
    fpcr
}

fn read_fpsr() -> u64 {
    let fpsr: u64;
    unsafe {
        asm!("mrs {}, fpsr", out(reg) fpsr, options(nomem, nostack, preserves_flags));
    }
    fpsr
}

fn write_fpcr(fpcr: u64) {
    unsafe {
        asm!("msr fpcr, {}", in(reg) fpcr, options(nostack, preserves_flags));
    }
}

fn write_fpsr(fpsr: u64) {
    unsafe {
        asm!("msr fpsr, {}", in(reg) fpsr, options(nostack, preserves_flags));
    }
}

const fn rounding_bits(mode: RoundingMode) -> u64 {
    match mode {
        RoundingMode::TiesToEven => 0b00,
        RoundingMode::Upward => 0b01,
        RoundingMode::Downward => 0b10,
        RoundingMode::TowardZero => 0b11,
    }
}

impl FloatingPointUnit for Armv8 {
    type Environment = Environment;

    const SUPPORTED: bool = true;

    fn save() -> Environment {
        Environment {
            fpcr: read_fpcr(),
            fpsr: read_fpsr(),
        }
    }

    fn restore(environment: &Environment) {
        write_fpcr(environment.fpcr);
        write_fpsr(environment.fpsr);
    }

    fn prepare(environment: &Environment, options: &ScopeOptions) {
        let mut fpcr = environment.fpcr & !FPCR_TRAP_ENABLES;
        if options.flush_subnormals_to_zero {
            fpcr |= FPCR_FLUSH_TO_ZERO;
        } else {
            fpcr &= !FPCR_FLUSH_TO_ZERO;
        }
        if let Some(mode) = options.rounding {
            fpcr = (fpcr & !(0b11 << FPCR_ROUNDING_SHIFT))
                | (rounding_bits(mode) << FPCR_ROUNDING_SHIFT);
        }
        write_fpcr(fpcr);
        write_fpsr(environment.fpsr & !FPSR_FLAGS);
    }

    fn raised() -> FloatingPointFlags {
        flags_from_status((read_fpsr() & 0x1F) as u32)
    }
}
