//! Example that demonstrates the exact usage shown in the README.md file.
//!
//! This shows how to check for CPUID and count the processors of the host.

use cpu_probe::{Cpuid, Selectors};

fn main() {
    println!("=== cpu_probe README Example ===");

    if let Some(cpuid) = Cpuid::detect() {
        let registers = cpuid.query(Selectors::for_leaf(0));
        println!("Highest basic CPUID leaf: {}", registers.eax);
    } else {
        println!("CPUID is not available on this processor");
    }

    let online = cpu_probe::online_processor_count();
    let configured = cpu_probe::configured_processor_count();

    println!("Online processors: {online}");
    println!("Configured processors: {configured}");

    println!("README example completed successfully!");
}
