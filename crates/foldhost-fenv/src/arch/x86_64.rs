use std::arch::asm;

use super::{FloatingPointUnit, flags_from_status};
use crate::{FloatingPointFlags, RoundingMode, ScopeOptions};

// MXCSR: flags in bits 0-5, masks in bits 7-12.
const MXCSR_FLAGS: u32 = 0x003F;
const MXCSR_MASKS: u32 = 0x1F80;
const MXCSR_DAZ: u32 = 1 << 6;
const MXCSR_FTZ: u32 = 1 << 15;
const MXCSR_ROUNDING_SHIFT: u32 = 13;

// x87 control word: masks in bits 0-5, rounding in bits 10-11.
const X87_MASKS: u16 = 0x003F;
const X87_ROUNDING_SHIFT: u16 = 10;
// x87 status word: flags in bits 0-5, error summary and busy bits.
const X87_STATUS_EXCEPTIONS: u16 = 0x80BF;

/// SSE control and status plus the legacy x87 environment.
///
/// Rust computes `f32` and `f64` on SSE, while `long double` arithmetic runs
/// on the x87 unit, so both are saved and prepared together.
pub(crate) struct SseX87;

/// The 28-byte layout `fnstenv` writes in 32-bit operand mode.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct X87Environment {
    control: u16,
    _reserved0: u16,
    status: u16,
    _reserved1: u16,
    tag: u16,
    _reserved2: u16,
    instruction_offset: u32,
    instruction_selector: u16,
    opcode: u16,
    operand_offset: u32,
    operand_selector: u16,
    _reserved3: u16,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Environment {
    mxcsr: u32,
    x87: X87Environment,
}

// Instruction and operand pointers change with every x87 instruction.
impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        self.mxcsr == other.mxcsr
            && self.x87.control == other.x87.control
            && self.x87.status == other.x87.status
            && self.x87.tag == other.x87.tag
    }
}

fn read_mxcsr() -> u32 {
    let mut mxcsr = 0_u32;
    unsafe {
        asm!(
            "stmxcsr [{}]",
            in(reg) &raw mut mxcsr,
            options(nostack, preserves_flags),
        );
    }
    mxcsr
}

fn write_mxcsr(mxcsr: u32) {
    unsafe {
        asm!(
            "ldmxcsr [{}]",
            in(reg) &raw const mxcsr,
            options(nostack, preserves_flags, readonly),
        );
    }
}

fn load_x87(environment: &X87Environment) {
    unsafe {
        asm!(
            "fldenv [{}]",
            in(reg) environment as *const X87Environment,
            options(nostack, preserves_flags, readonly),
        );
    }
}

const fn rounding_bits(mode: RoundingMode) -> u16 {
    match mode {
        RoundingMode::TiesToEven => 0b00,
        RoundingMode::Downward => 0b01,
        RoundingMode::Upward => 0b10,
        RoundingMode::TowardZero => 0b11,
    }
}

impl FloatingPointUnit for SseX87 {
    type Environment = Environment;

    const SUPPORTED: bool = true;

    fn save() -> Environment {
        let mut x87 = X87Environment::default();
        unsafe {
            asm!(
                "fnstenv [{}]",
                in(reg) &raw mut x87,
                options(nostack, preserves_flags),
            );
        }
        // fnstenv masks every x87 exception as a side effect.
        load_x87(&x87);
        Environment {
            mxcsr: read_mxcsr(),
            x87,
        }
    }

    fn restore(environment: &Environment) {
        write_mxcsr(environment.mxcsr);
        load_x87(&environment.x87);
    }

    fn prepare(environment: &Environment, options: &ScopeOptions) {
        let mut mxcsr = (environment.mxcsr | MXCSR_MASKS) & !MXCSR_FLAGS;
        if options.flush_subnormals_to_zero {
            mxcsr |= MXCSR_FTZ | MXCSR_DAZ;
        } else {
            mxcsr &= !(MXCSR_FTZ | MXCSR_DAZ);
        }
        let mut x87 = environment.x87;
        x87.control |= X87_MASKS;
        x87.status &= !X87_STATUS_EXCEPTIONS;
        if let Some(mode) = options.rounding {
            let bits = rounding_bits(mode);
            mxcsr = (mxcsr & !(0b11 << MXCSR_ROUNDING_SHIFT))
                | (u32::from(bits) << MXCSR_ROUNDING_SHIFT);
            x87.control =
                (x87.control & !(0b11 << X87_ROUNDING_SHIFT)) | (bits << X87_ROUNDING_SHIFT);
        }
        write_mxcsr(mxcsr);
        load_x87(&x87);
    }

    fn raised() -> FloatingPointFlags {
        let status: u16;
        unsafe {
            asm!("fnstsw ax", out("ax") status, options(nomem, nostack, preserves_flags));
        }
        let raw = (read_mxcsr() | u32::from(status)) & MXCSR_FLAGS;
        // Drop the denormal-operand bit so the rest line up with FPSR.
        flags_from_status((raw & 1) | ((raw >> 1) & 0b1_1110))
    }
}
