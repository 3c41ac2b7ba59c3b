//! Instruction handlers, grouped by family.
//!
//! Every handler advances PC past its own opcode byte(s) and immediates and
//! returns the instruction's cost in M-cycles.

mod arith;
mod bits;
mod control;
mod load;
mod logic;
mod rotate;
mod stack;
mod system;
