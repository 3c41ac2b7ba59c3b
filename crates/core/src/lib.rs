//! SM83 instruction core and supporting primitives.

pub mod cpu_sm83;
pub mod logging;

/// A CPU-like component that can be stepped; returns cycles consumed.
pub trait Cpu {
    type Error: std::error::Error + Send + Sync + 'static;

    fn reset(&mut self);

    /// Execute one instruction, returning its cost in machine cycles.
    fn step(&mut self) -> Result<u32, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_sm83::{CpuError, CpuSm83, FlatMemory};

    fn run_until_error<C: Cpu>(cpu: &mut C, limit: usize) -> (u64, Option<C::Error>) {
        let mut total = 0u64;
        for _ in 0..limit {
            match cpu.step() {
                Ok(cycles) => total += cycles as u64,
                Err(e) => return (total, Some(e)),
            }
        }
        (total, None)
    }

    #[test]
    fn test_cpu_trait_drives_sm83() {
        let mut mem = FlatMemory::new();
        // NOP; LD A,0x42; invalid
        mem.load(0x0100, &[0x00, 0x3E, 0x42, 0xDD]);
        let mut cpu = CpuSm83::new(mem);

        let (cycles, err) = run_until_error(&mut cpu, 10);
        assert_eq!(cycles, 3);
        assert_eq!(
            err,
            Some(CpuError::InvalidOpcode {
                opcode: 0xDD,
                prefixed: false,
                addr: 0x0103
            })
        );

        Cpu::reset(&mut cpu);
        assert_eq!(cpu.regs.pc(), 0x0100);
        assert_eq!(cpu.cycles, 0);
    }

    #[test]
    fn test_cpu_error_display() {
        let err = CpuError::InvalidOpcode {
            opcode: 0xD3,
            prefixed: false,
            addr: 0x1234,
        };
        assert_eq!(
            err.to_string(),
            "invalid opcode 0xD3 (prefixed: false) at 0x1234"
        );
    }
}
