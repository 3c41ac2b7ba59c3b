mod frame;

use anyhow::{Context, Result};
use clap::Parser;
use sm83_core::cpu_sm83::{CpuConfig, CpuSm83, FlatMemory, ResetState};
use sm83_core::logging::{LogCategory, LogConfig, LogLevel};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use frame::{FrameScheduler, CYCLES_PER_FRAME};

#[derive(Parser, Debug)]
#[command(name = "sm83", about = "Run a raw SM83 program image headless")]
struct Args {
    /// Raw image to load into the 64 KiB address space
    image: PathBuf,

    /// Load address (decimal or 0x-prefixed hex); execution starts here
    /// unless --post-boot is given
    #[arg(long, default_value = "0x0000", value_parser = parse_addr)]
    base: u16,

    /// Number of frames to run
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Start from the DMG post-boot register values (PC=0x0100)
    #[arg(long, default_value_t = false)]
    post_boot: bool,

    /// Write the final CPU snapshot to this file as JSON
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Global core log level: off, error, warn, info, debug, trace
    #[arg(long, value_parser = parse_level)]
    log_level: Option<LogLevel>,

    /// Core log level for instruction execution
    #[arg(long, value_parser = parse_level)]
    log_cpu: Option<LogLevel>,

    /// Core log level for IME/HALT/interrupt events
    #[arg(long, value_parser = parse_level)]
    log_interrupts: Option<LogLevel>,

    /// Maximum core log messages per category per second
    #[arg(long)]
    log_rate_limit: Option<usize>,

    /// Suppress the per-frame summary
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn parse_addr(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| format!("invalid address '{}': {}", s, e))
}

fn parse_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::from_str(s).ok_or_else(|| format!("unknown log level '{}'", s))
}

fn configure_logging(args: &Args) {
    let config = LogConfig::global();
    if let Some(level) = args.log_level {
        config.set_global_level(level);
    }
    if let Some(level) = args.log_cpu {
        config.set_level(LogCategory::CPU, level);
    }
    if let Some(level) = args.log_interrupts {
        config.set_level(LogCategory::Interrupts, level);
    }
    if let Some(limit) = args.log_rate_limit {
        config.set_rate_limit(limit);
    }
}

fn build_cpu(args: &Args, image: &[u8]) -> CpuSm83<FlatMemory> {
    let mut memory = FlatMemory::new();
    let loaded = memory.load(args.base, image);
    if loaded < image.len() {
        log::warn!(
            "image truncated: {} of {} bytes fit at {:#06X}",
            loaded,
            image.len(),
            args.base
        );
    }

    let reset = if args.post_boot {
        ResetState::PostBoot
    } else {
        ResetState::PowerOn
    };
    let mut cpu = CpuSm83::with_config(memory, CpuConfig { reset });
    if !args.post_boot {
        cpu.regs.set_pc(args.base);
    }
    cpu
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    configure_logging(&args);

    let image = fs::read(&args.image)
        .with_context(|| format!("failed to read image {}", args.image.display()))?;
    log::info!("loaded {} ({} bytes)", args.image.display(), image.len());

    let mut cpu = build_cpu(&args, &image);
    let mut scheduler = FrameScheduler::new(CYCLES_PER_FRAME);

    let mut fault = None;
    for fnum in 1..=args.frames {
        match scheduler.run_frame(&mut cpu) {
            Ok(report) => {
                log::debug!(
                    "frame {}: {} cycles carried into next frame",
                    fnum,
                    scheduler.overshoot()
                );
                if !args.quiet {
                    println!(
                        "Frame {}: {} instructions, {} cycles, PC={:04X}",
                        fnum,
                        report.instructions,
                        report.cycles,
                        cpu.regs.pc()
                    );
                }
            }
            Err(err) => {
                log::error!("frame {}: {}", fnum, err);
                fault = Some(err);
                break;
            }
        }
    }

    let snapshot = cpu.snapshot();
    println!(
        "Ran {} frame(s), {} cycles; AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} PC={:04X}",
        scheduler.frames(),
        snapshot.cycles,
        snapshot.af,
        snapshot.bc,
        snapshot.de,
        snapshot.hl,
        snapshot.sp,
        snapshot.pc
    );

    if let Some(path) = args.dump.as_ref() {
        let mut f = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write!(f, "{}", serde_json::to_string_pretty(&snapshot)?)?;
    }

    match fault {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
