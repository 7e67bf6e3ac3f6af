use crate::host;
use crate::instruction::Register::R0;
use crate::state::State;
use crate::trap_vector::TrapVector;
use std::io::{self, Write};

/// Executes one TRAP service routine. R7 has already been loaded with the return address by
/// the caller; TRAP itself never touches the condition flags except as a side effect of the
/// register writes GETC and IN perform.
pub fn execute(state: &mut State, trap_vector: TrapVector) {
    match trap_vector {
        // Read a single character from the keyboard. The character is not echoed
        // onto the console. Its ASCII code is copied into R0. The high eight bits
        // of R0 are cleared.
        TrapVector::GETC => {
            state.registers.write(R0, u16::from(host::read_byte()));
            state.update_flags(R0);
        }

        // Write a character in R0[7:0] to the console display.
        TrapVector::OUT => {
            print!("{}", char::from(state.registers.read(R0) as u8));
            io::stdout().flush().unwrap();
        }

        // Write a string of ASCII characters to the console display. The characters
        // are contained in consecutive memory locations, one character per memory
        // location, starting with the address specified in R0. Writing terminates with
        // the occurrence of x0000 in a memory location.
        TrapVector::PUTS => {
            let mut address = state.registers.read(R0);

            loop {
                let word = state.memory.read(address);
                if word == 0 {
                    break;
                }
                print!("{}", char::from(word as u8));
                address = address.wrapping_add(1);
            }

            io::stdout().flush().unwrap();
        }

        // Print a prompt on the screen and read a single character from the keyboard.
        // The character is echoed onto the console monitor, and its ASCII code is
        // copied into R0. The high eight bits of R0 are cleared.
        TrapVector::IN => {
            print!("Enter a character: ");
            io::stdout().flush().unwrap();

            let byte = host::read_byte();
            print!("{}", char::from(byte));
            io::stdout().flush().unwrap();

            state.registers.write(R0, u16::from(byte));
            state.update_flags(R0);
        }

        // Write a string of ASCII characters to the console. The characters are
        // contained in consecutive memory locations, two characters per memory
        // location, starting with the address specified in R0. The ASCII code
        // contained in bits [7:0] of a memory location is written to the console
        // first. Then the ASCII code contained in bits [15:8] of that memory location
        // is written to the console, if it is nonzero. Writing terminates with the
        // occurrence of x0000 in a memory location.
        TrapVector::PUTSP => {
            let mut address = state.registers.read(R0);

            loop {
                let word = state.memory.read(address);
                if word == 0 {
                    break;
                }

                let low = (word & 0xff) as u8;
                print!("{}", char::from(low));

                let high = (word >> 8) as u8;
                if high != 0 {
                    print!("{}", char::from(high));
                }

                address = address.wrapping_add(1);
            }

            io::stdout().flush().unwrap();
        }

        // Halt execution and print a message on the console.
        TrapVector::HALT => {
            println!("HALT");
            io::stdout().flush().unwrap();
            state.running = false;
        }

        // No service routine is bound to this vector. The reference behavior is to do
        // nothing and fall through to the instruction after TRAP.
        TrapVector::Unknown(_) => {}
    }
}
