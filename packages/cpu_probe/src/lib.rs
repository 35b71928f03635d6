#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Bootstrap-time facts about the processor a program is running on.
//!
//! Software that sizes itself to the host (a scheduler, a worker pool, a benchmark harness) needs
//! two things before it can make decisions: to know whether it may safely ask the processor to
//! identify itself via the `CPUID` instruction, and to know how many processors the operating
//! system exposes. This package answers both questions with primitives that talk directly to the
//! processor and the operating system.
//!
//! This is part of the [Folo project](https://github.com/folo-rs/folo) that provides mechanisms for
//! high-performance hardware-aware programming in Rust.
//!
//! # Identifying the processor
//!
//! On 64-bit x86 processors `CPUID` is always available. On 32-bit x86 it is not guaranteed and
//! must be probed by toggling bits in the flags register, which [`have_cpuid()`] does for you.
//! On other architectures the instruction does not exist and [`have_cpuid()`] returns `false`.
//!
//! The output registers are returned verbatim. Interpreting them (vendor strings, feature bits,
//! topology) is up to the caller.
//!
//! ```
//! use cpu_probe::{Cpuid, Selectors};
//!
//! if let Some(cpuid) = Cpuid::detect() {
//!     let registers = cpuid.query(Selectors::for_leaf(0));
//!
//!     let vendor: Vec<u8> = [registers.ebx, registers.edx, registers.ecx]
//!         .iter()
//!         .flat_map(|r| r.to_le_bytes())
//!         .collect();
//!
//!     println!("Processor vendor: {}", String::from_utf8_lossy(&vendor));
//!     println!("Highest basic leaf: {}", registers.eax);
//! } else {
//!     println!("CPUID is not available on this processor");
//! }
//! ```
//!
//! # Counting processors
//!
//! ```
//! let online = cpu_probe::online_processor_count();
//! let configured = cpu_probe::configured_processor_count();
//!
//! // Zero means the operating system could not tell us.
//! if online == 0 {
//!     println!("Processor count unknown, assuming a single processor");
//! } else {
//!     println!("{online} processors online out of {configured} configured");
//! }
//! ```
//!
//! The operating system is asked through a fixed chain of facilities. If the preferred facility
//! is not implemented by the host, the next one in the chain is tried:
//!
//! | Operating system | Facilities, in order |
//! |---|---|
//! | macOS, iOS | `sysconf`, `sysctl(CTL_HW, HW_AVAILCPU)`, `sysctlbyname("hw.ncpu")`, `sysctlnametomib("hw.ncpu")` |
//! | FreeBSD | `sysconf`, `sysctl(CTL_HW, HW_NCPU)`, `sysctlbyname("hw.ncpu")`, `sysctlnametomib("hw.ncpu")` |
//! | Linux and other Unix | `sysconf` |
//! | Windows | `GetSystemInfo` |
//! | anything else | `std::thread::available_parallelism()` |
//!
//! The configured count uses `sysconf(_SC_NPROCESSORS_CONF)` on Unix and falls back to the online
//! count when that is not available, which under-reports on hosts with offline processors.
//!
//! Use [`try_online_processor_count()`] and [`try_configured_processor_count()`] if you need to
//! know why a count could not be determined.
//!
//! # Diagnostics
//!
//! Every step of the facility chain emits [`tracing`](https://docs.rs/tracing) events at the
//! `debug` level. Install a subscriber to see which facility answered.
//!
//! # Operating system compatibility
//!
//! This package is tested on the following operating systems:
//!
//! * Windows 11 and newer
//! * Ubuntu 24.04 and newer
//!
//! The macOS and FreeBSD chains are compiled from the same platform APIs but are not actively
//! tested.

mod arch;
mod counts;
mod error;
mod facility;
mod instruction;
mod pal;

pub use arch::{ArchitectureClass, BUILD_TARGET_ARCHITECTURE};
pub use counts::*;
pub use error::*;
pub use facility::*;
pub use instruction::*;
