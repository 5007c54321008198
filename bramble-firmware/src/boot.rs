//! AArch64 entry point
//!
//! The VideoCore firmware loads the image at 0x80000 and jumps to
//! `_start`. Only the boot core continues: it sets up the stack, clears
//! BSS and calls `kernel_main`. Interrupts stay masked throughout.

use core::arch::global_asm;

global_asm!(
    r#"
.section .text.boot
.global _start

_start:
    // Cortex-A76 reports MT=1, so the core number lives in Aff1
    mrs     x0, mpidr_el1
    ubfx    x0, x0, #8, #8
    cbnz    x0, .Lpark

    // Stack grows down from the load address
    ldr     x1, =__stack_top
    mov     sp, x1

    // Clear BSS
    ldr     x0, =__bss_start
    ldr     x1, =__bss_end
.Lclear_bss:
    cmp     x0, x1
    b.ge    .Lbss_done
    str     xzr, [x0], #8
    b       .Lclear_bss
.Lbss_done:

    bl      kernel_main

    // kernel_main never returns; halt if it does
.Lpark:
    wfe
    b       .Lpark
"#
);

/// Halt the calling core
pub fn halt() -> ! {
    loop {
        // SAFETY: wfe only waits for an event, no memory effects
        unsafe { core::arch::asm!("wfe", options(nomem, nostack, preserves_flags)) };
    }
}
