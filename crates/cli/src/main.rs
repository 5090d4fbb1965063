//! `regio`: peek and poke SoC registers through `/dev/mem`.
//!
//! This binary is a thin caller of `at91io-core`. It performs:
//! 1. **Read:** Print one or more 32-bit registers.
//! 2. **Write:** Store `ADDR,VAL` pairs in command-line order.
//! 3. **Modify:** Clear and set bits in one register, writing only on change.
//!
//! All accesses share one page cache, so consecutive registers in the same
//! 4 KiB page cost a single `mmap`. There is no locking against other
//! processes doing the same.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::process::ExitCode;

use at91io_core::MapError;
use at91io_core::common::{PhysAddr, parse_u32};
use at91io_core::config::{AccessConfig, ConfigError};
use at91io_core::mem::{PageMapCache, PhysMemory};
use clap::{ArgAction, Parser, Subcommand};
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "regio",
    author,
    version,
    about = "Read and write SAMA5/AT91 peripheral registers via /dev/mem",
    long_about = "Read and write 32-bit SoC registers through a page-cached /dev/mem mapping.\n\nAddresses and values are hex with a 0x prefix, or decimal.\n\nExamples:\n  regio read 0xfc038004 0xfc038008\n  regio write 0xfc038018,0x1\n  regio modify 0xfc038004 --clear 0x7 --set 0x1"
)]
struct Cli {
    /// JSON access configuration (device, sync, min_addr).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Physical-memory device; overrides the configuration.
    #[arg(short, long, global = true)]
    device: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the value of each register.
    Read {
        /// Register addresses.
        #[arg(required = true, value_parser = parse_addr)]
        addrs: Vec<PhysAddr>,
    },

    /// Write each ADDR,VAL pair, in order.
    Write {
        /// Register writes as ADDR,VAL.
        #[arg(required = true, value_parser = parse_pair)]
        pairs: Vec<RegWrite>,
    },

    /// Clear then set bits in a register; writes only if the value changes.
    Modify {
        /// Register address.
        #[arg(value_parser = parse_addr)]
        addr: PhysAddr,

        /// Bits to clear.
        #[arg(long, default_value = "0", value_parser = parse_u32)]
        clear: u32,

        /// Bits to set.
        #[arg(long, default_value = "0", value_parser = parse_u32)]
        set: u32,
    },
}

/// One `ADDR,VAL` store requested on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RegWrite {
    addr: PhysAddr,
    val: u32,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("address {addr} is below the configured minimum {min:#x}")]
    BelowMinimum { addr: PhysAddr, min: u32 },

    #[error("register {addr}: {source}")]
    Access {
        addr: PhysAddr,
        #[source]
        source: MapError,
    },

    #[error(transparent)]
    Release(MapError),
}

fn parse_addr(s: &str) -> Result<PhysAddr, String> {
    let addr = s
        .parse::<PhysAddr>()
        .map_err(|e: ParseIntError| format!("bad address {s:?}: {e}"))?;
    if addr.is_word_aligned() {
        Ok(addr)
    } else {
        Err(format!("address {addr} is not 4-byte aligned"))
    }
}

fn parse_pair(s: &str) -> Result<RegWrite, String> {
    let (addr, val) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ADDR,VAL, got {s:?}"))?;
    Ok(RegWrite {
        addr: parse_addr(addr)?,
        val: parse_u32(val).map_err(|e| format!("bad value {val:?}: {e}"))?,
    })
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<AccessConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => AccessConfig::load(path)?,
        None => AccessConfig::default(),
    };
    if let Some(device) = &cli.device {
        config.device.clone_from(device);
    }
    Ok(config)
}

/// Addresses the command will touch, in access order.
fn targets(command: &Command) -> Vec<PhysAddr> {
    match command {
        Command::Read { addrs } => addrs.clone(),
        Command::Write { pairs } => pairs.iter().map(|w| w.addr).collect(),
        Command::Modify { addr, .. } => vec![*addr],
    }
}

fn check_bounds(config: &AccessConfig, command: &Command) -> Result<(), CliError> {
    match targets(command).into_iter().find(|addr| !config.permits(*addr)) {
        Some(addr) => Err(CliError::BelowMinimum {
            addr,
            min: config.min_addr,
        }),
        None => Ok(()),
    }
}

/// Runs the register sequence, returning the lines to print.
fn execute<M: PhysMemory>(
    cache: &mut PageMapCache<M>,
    command: &Command,
) -> Result<Vec<String>, CliError> {
    let mut out = Vec::new();
    let mut regs = cache.regs();
    match command {
        Command::Read { addrs } => {
            for &addr in addrs {
                let val = regs
                    .read32(addr)
                    .map_err(|source| CliError::Access { addr, source })?;
                out.push(format!("{addr}: {val:#010x}"));
            }
        }
        Command::Write { pairs } => {
            for &RegWrite { addr, val } in pairs {
                regs.write32(addr, val)
                    .map_err(|source| CliError::Access { addr, source })?;
            }
        }
        Command::Modify { addr, clear, set } => {
            let addr = *addr;
            let update = regs
                .update32(addr, *clear, *set)
                .map_err(|source| CliError::Access { addr, source })?;
            let note = if update.written() { "" } else { " (unchanged)" };
            out.push(format!("{addr}: {:#010x}{note}", update.new));
        }
    }
    Ok(out)
}

/// Executes the command, then releases the mapping even if it failed.
fn run_with<M: PhysMemory>(mem: M, command: &Command) -> Result<Vec<String>, CliError> {
    let mut cache = PageMapCache::new(mem);
    let result = execute(&mut cache, command);
    let released = cache.release().map_err(CliError::Release);
    debug!(stats = %cache.stats(), "register sequence finished");
    match (result, released) {
        (Ok(out), Ok(())) => Ok(out),
        (Err(err), Ok(())) | (Ok(_), Err(err)) => Err(err),
        (Err(err), Err(release_err)) => {
            error!(%release_err, "release after failed sequence");
            Err(err)
        }
    }
}

fn run(cli: &Cli) -> Result<Vec<String>, CliError> {
    let config = load_config(cli)?;
    check_bounds(&config, &cli.command)?;
    let mem = config.open_device().map_err(|source| CliError::Open {
        path: config.device.clone(),
        source,
    })?;
    info!(device = %config.device.display(), "device opened");
    run_with(mem, &cli.command)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "command failed");
            eprintln!("regio: {err}");
            ExitCode::FAILURE
        }
    }
}
