//! Prints what this package can find out about the host.
//!
//! Decoding of the vendor string and feature bits happens here, on the caller side, since the
//! package returns CPUID output registers verbatim.
//!
//! Pass `--verbose` to see which operating system facility answered each question.

use argh::FromArgs;
use cpu_probe::{BUILD_TARGET_ARCHITECTURE, Cpuid, Registers, Selectors};
use tracing::Level;

/// Prints what cpu_probe can find out about the host.
#[derive(FromArgs)]
struct Args {
    /// log every facility the processor counts are requested from
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn vendor_string(leaf0: Registers) -> String {
    let bytes: Vec<u8> = [leaf0.ebx, leaf0.edx, leaf0.ecx]
        .iter()
        .flat_map(|r| r.to_le_bytes())
        .collect();

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Leaf 1 EDX bit 28: the package may contain more than one logical processor.
const HARDWARE_THREADING_BIT: u32 = 1 << 28;

/// Highest extended leaf that a restricted basic range still claims to cover.
const LAST_BRAND_STRING_LEAF: u32 = 0x8000_0004;

/// Some firmware caps the basic leaf range at 4 (a BIOS "limit CPUID" setting) while the extended
/// range reaches past the brand string leaves. Basic leaves above 4 are then unreliable.
fn is_restricted(max_basic_leaf: u32, max_extended_leaf: u32) -> bool {
    max_basic_leaf <= 4 && max_extended_leaf > LAST_BRAND_STRING_LEAF
}

fn has_hardware_threading(leaf1: Registers) -> bool {
    (leaf1.edx & HARDWARE_THREADING_BIT) != 0
}

fn main() {
    let args: Args = argh::from_env();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::TRACE } else { Level::WARN })
        .init();

    println!("architecture          : {BUILD_TARGET_ARCHITECTURE}");

    match Cpuid::detect() {
        Some(cpuid) => {
            let leaf0 = cpuid.query(Selectors::for_leaf(0));

            println!("cpuid present         : true");
            println!("vendor                : {}", vendor_string(leaf0));
            println!("highest basic leaf    : {:#x}", leaf0.eax);

            let extended = cpuid.query(Selectors::for_leaf(0x8000_0000));
            let restricted = is_restricted(leaf0.eax, extended.eax);
            println!("cpuid restricted      : {restricted}");

            if !restricted {
                let leaf1 = cpuid.query(Selectors::for_leaf(1));
                println!(
                    "hardware threading    : {}",
                    has_hardware_threading(leaf1)
                );
            }
        }
        None => {
            println!("cpuid present         : false");
        }
    }

    match cpu_probe::try_online_processor_count() {
        Ok(count) => println!("online processors     : {count}"),
        Err(e) => println!("online processors     : unknown ({e})"),
    }

    match cpu_probe::try_configured_processor_count() {
        Ok(count) => println!("configured processors : {count}"),
        Err(e) => println!("configured processors : unknown ({e})"),
    }
}
