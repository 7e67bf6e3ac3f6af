use crate::error::FatalOpcode;
use crate::instruction::Instruction;
use crate::instruction::Register::*;
use crate::sign_extend::SignExtend;
use crate::state::{Condition, State};
use crate::traps;

/// Fetches the word at PC, advances PC by one (wrapping), decodes it, and executes it.
/// Returns a [`FatalOpcode`] if the decoded instruction is RTI or the reserved opcode.
pub fn step(state: &mut State) -> Result<(), FatalOpcode> {
    let address = state.pc;
    let word = state.memory.read(address);
    state.pc = state.pc.wrapping_add(1);

    let instruction = Instruction::decode(word);
    execute(state, instruction, word, address)
}

fn execute(
    state: &mut State,
    instruction: Instruction,
    word: u16,
    fetch_address: u16,
) -> Result<(), FatalOpcode> {
    match instruction {
        // BR - Conditional Branch
        //
        // The condition codes specified by the state of bits [11:9] are tested. If any of the
        // condition codes tested is set, the program branches to the location specified by
        // adding the sign-extended PCoffset9 field to the incremented PC.
        Instruction::BR(condition, pc_offset) => {
            if (condition.n && state.condition == Condition::Neg)
                || (condition.z && state.condition == Condition::Zro)
                || (condition.p && state.condition == Condition::Pos)
            {
                state.pc = state.pc.wrapping_add(pc_offset.sign_extend(9));
            }
        }

        // ADD - Addition
        //
        // If the immediate flag is clear, the second source operand comes from SR2. If it is
        // set, the second source operand is the sign-extended imm5 field. In both cases the
        // result is stored in DR and the condition codes are updated.
        Instruction::ADD(r0, r1, r2) => {
            let value = state
                .registers
                .read(r1)
                .wrapping_add(state.registers.read(r2));

            state.registers.write(r0, value);
            state.update_flags(r0);
        }
        Instruction::ADDIMM(r0, r1, immediate_value) => {
            let value = state
                .registers
                .read(r1)
                .wrapping_add(immediate_value.sign_extend(5));

            state.registers.write(r0, value);
            state.update_flags(r0);
        }

        // LD - Load
        //
        // An address is computed by sign-extending bits [8:0] and adding it to the incremented
        // PC. The contents of memory at this address are loaded into DR.
        Instruction::LD(r0, pc_offset) => {
            let address = state.pc.wrapping_add(pc_offset.sign_extend(9));
            let value = state.memory.read(address);

            state.registers.write(r0, value);
            state.update_flags(r0);
        }

        // ST - Store
        //
        // The contents of SR are stored at the address formed by sign-extending bits [8:0] and
        // adding it to the incremented PC.
        Instruction::ST(r0, pc_offset) => {
            let address = state.pc.wrapping_add(pc_offset.sign_extend(9));

            state.memory.write(address, state.registers.read(r0));
        }

        // JSR / JSRR - Jump to Subroutine
        //
        // The incremented PC is saved in R7. Then PC is loaded either with the base register's
        // contents (JSRR) or with the incremented PC plus a sign-extended 11-bit offset (JSR).
        Instruction::JSR(pc_offset) => {
            let return_address = state.pc;
            state.pc = state.pc.wrapping_add(pc_offset.sign_extend(11));
            state.registers.write(R7, return_address);
        }
        Instruction::JSRR(r0) => {
            let return_address = state.pc;
            state.pc = state.registers.read(r0);
            state.registers.write(R7, return_address);
        }

        // AND - Bit-wise Logical AND
        //
        // Same field layout as ADD, but the result is a bit-wise AND rather than a sum.
        Instruction::AND(r0, r1, r2) => {
            let value = state.registers.read(r1) & state.registers.read(r2);
            state.registers.write(r0, value);
            state.update_flags(r0);
        }
        Instruction::ANDIMM(immediate_value, r0, r1) => {
            let value = state.registers.read(r1) & immediate_value.sign_extend(5);
            state.registers.write(r0, value);
            state.update_flags(r0);
        }

        // LDR - Load Base+offset
        //
        // An address is computed by sign-extending bits [5:0] and adding it to the contents of
        // the base register. The contents of memory at this address are loaded into DR.
        Instruction::LDR(r0, r1, offset) => {
            let address = state.registers.read(r1).wrapping_add(offset.sign_extend(6));
            let value = state.memory.read(address);

            state.registers.write(r0, value);
            state.update_flags(r0);
        }

        // STR - Store Base+offset
        //
        // The contents of SR are stored at the address formed by sign-extending bits [5:0] and
        // adding it to the contents of the base register.
        Instruction::STR(sr, base_r, offset) => {
            let address = state
                .registers
                .read(base_r)
                .wrapping_add(offset.sign_extend(6));
            let value = state.registers.read(sr);

            state.memory.write(address, value);
        }

        Instruction::UNUSED => {
            return Err(FatalOpcode {
                opcode: word,
                address: fetch_address,
            });
        }

        // NOT - Bit-Wise Complement
        //
        // The bit-wise complement of SR is stored in DR.
        Instruction::NOT(r0, r1) => {
            state.registers.write(r0, !state.registers.read(r1));
            state.update_flags(r0);
        }

        // LDI - Load Indirect
        //
        // An address is computed by sign-extending bits [8:0] and adding it to the incremented
        // PC. What is stored in memory at this address is the address of the value loaded
        // into DR.
        Instruction::LDI(dr, pc_offset) => {
            let address = state
                .memory
                .read(state.pc.wrapping_add(pc_offset.sign_extend(9)));
            let value = state.memory.read(address);

            state.registers.write(dr, value);
            state.update_flags(dr);
        }

        // STI - Store Indirect
        //
        // Bits [8:0] are sign-extended and added to the incremented PC. What is in memory at
        // this address is the address to which SR's contents are stored.
        Instruction::STI(r0, pc_offset) => {
            let address = state.pc.wrapping_add(pc_offset.sign_extend(9));
            let address = state.memory.read(address);

            state.memory.write(address, state.registers.read(r0));
        }

        // JMP / RET - Jump
        //
        // PC is loaded unconditionally with the contents of the base register. RET is JMP R7.
        Instruction::JMP(r0) => {
            state.pc = state.registers.read(r0);
        }

        Instruction::RESERVED => {
            return Err(FatalOpcode {
                opcode: word,
                address: fetch_address,
            });
        }

        // LEA - Load Effective Address
        //
        // The address formed by sign-extending bits [8:0] and adding it to the incremented PC
        // is loaded into DR. Unlike LD, this never reads memory: the address itself is the
        // value.
        Instruction::LEA(r0, pc_offset) => {
            let address = state.pc.wrapping_add(pc_offset.sign_extend(9));
            state.registers.write(r0, address);
            state.update_flags(r0);
        }

        // TRAP - System Call
        //
        // R7 is loaded with the incremented PC so the service routine can return to the
        // instruction following TRAP. Dispatch on the low 8 bits to the service layer.
        Instruction::TRAP(trap_vector) => {
            state.registers.write(R7, state.pc);
            traps::execute(state, trap_vector);
        }
    }

    Ok(())
}
