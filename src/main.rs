//! Command-line driver: loads a program image, then runs or disassembles it.
//!
//! Exit statuses: 0 on HLT, 1 when the file cannot be loaded, 2 on bad
//! arguments, 3 on an unimplemented instruction, 4 on an out-of-bounds fetch
//! or data access.

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use lib8080::{
    disassemble, format_listing, DisassemblyOptions, ExecutionError, ImageError, ImageMemory,
    MemoryBus, Quirks, CPU,
};
use log::{info, LevelFilter};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(version, about = "Intel 8080 interpreter", long_about = None)]
struct Arguments {
    /// Program image to load at address 0
    file: PathBuf,

    /// Print a disassembly listing instead of running the program
    #[arg(short, long)]
    disassemble: bool,

    /// Legacy control transfers: land one byte past the target and leave SP
    /// unchanged on RET
    #[arg(long)]
    legacy: bool,

    /// Log every executed instruction
    #[arg(long)]
    trace: bool,

    /// Print the machine state when execution stops
    #[arg(long)]
    dump: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("could not open file {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not load {path}: {source}")]
    Image { path: PathBuf, source: ImageError },

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::File { .. } | CliError::Image { .. } => 1,
            CliError::Execution(ExecutionError::UnimplementedInstruction { .. }) => 3,
            CliError::Execution(
                ExecutionError::OutOfBoundsFetch { .. } | ExecutionError::OutOfBoundsAccess { .. },
            ) => 4,
        }
    }
}

fn main() -> ExitCode {
    let args = Arguments::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.trace {
        logger.filter_level(LevelFilter::Trace);
    }
    logger.init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(report(&err, &mut io::stderr())),
    }
}

/// Writes `err` to `out` once and returns the exit status for it.
fn report(err: &CliError, out: &mut impl Write) -> u8 {
    // Nothing sensible is left to do if stderr itself is gone
    let _ = writeln!(out, "{}", err);
    err.exit_code()
}

fn run(args: &Arguments) -> Result<(), CliError> {
    let image = fs::read(&args.file).map_err(|source| CliError::File {
        path: args.file.clone(),
        source,
    })?;
    let memory = ImageMemory::from_image(image).map_err(|source| CliError::Image {
        path: args.file.clone(),
        source,
    })?;
    info!("loaded {} bytes from {}", memory.size(), args.file.display());

    if args.disassemble {
        let options = DisassemblyOptions {
            hex_dump: true,
            mark_unimplemented: true,
            ..Default::default()
        };
        let listing = disassemble(memory.as_slice(), options);
        print!("{}", format_listing(&listing, &options));
        return Ok(());
    }

    let quirks = if args.legacy {
        Quirks::legacy()
    } else {
        Quirks::exact()
    };
    let mut cpu = CPU::with_quirks(memory, quirks);
    let outcome = cpu.run();

    info!("stopped after {} instructions", cpu.steps());
    if args.dump {
        dump(&cpu);
    }

    outcome.map_err(CliError::from)
}

fn dump<M: MemoryBus>(cpu: &CPU<M>) {
    println!(
        "A={:02X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} PC={:04X}",
        cpu.a(),
        cpu.bc(),
        cpu.de(),
        cpu.hl(),
        cpu.sp(),
        cpu.pc()
    );
    println!(
        "Z={} S={} P={} CY={} AC={} steps={}",
        cpu.flag_z() as u8,
        cpu.flag_s() as u8,
        cpu.flag_p() as u8,
        cpu.flag_cy() as u8,
        cpu.flag_ac() as u8,
        cpu.steps()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arguments(extra: &[&str]) -> Arguments {
        let mut argv = vec!["i8080"];
        argv.extend_from_slice(extra);
        Arguments::try_parse_from(argv).unwrap()
    }

    fn write_image(name: &str, bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("i8080-{}-{}", std::process::id(), name));
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_parse_flags() {
        let args = arguments(&["prog.bin", "-d", "--legacy"]);
        assert_eq!(args.file, PathBuf::from("prog.bin"));
        assert!(args.disassemble);
        assert!(args.legacy);
        assert!(!args.trace);
        assert!(!args.dump);
    }

    #[test]
    fn test_missing_file_argument_is_rejected() {
        assert!(Arguments::try_parse_from(["i8080"]).is_err());
    }

    #[test]
    fn test_missing_file_exits_with_1() {
        let args = arguments(&["/nonexistent/program.bin"]);
        let err = run(&args).unwrap_err();

        assert!(matches!(err, CliError::File { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_empty_image_exits_with_1() {
        let path = write_image("empty.bin", &[]);
        let args = arguments(&[path.to_str().unwrap()]);

        let err = run(&args).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(err, CliError::Image { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_halting_program_succeeds() {
        // INR A; INR A; HLT
        let path = write_image("halt.bin", &[0x3C, 0x3C, 0x76]);
        let args = arguments(&[path.to_str().unwrap()]);

        let result = run(&args);
        fs::remove_file(&path).unwrap();

        assert!(result.is_ok());
    }

    #[test]
    fn test_unimplemented_exits_with_3() {
        // INR A; STAX B
        let path = write_image("stax.bin", &[0x3C, 0x02]);
        let args = arguments(&[path.to_str().unwrap()]);

        let err = run(&args).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert_eq!(err.to_string(), "unimplemented instruction 0x02 at 0x0001");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_report_prints_error_once() {
        let err = CliError::Execution(ExecutionError::UnimplementedInstruction {
            opcode: 0x02,
            pc: 0x0001,
        });
        let mut out = Vec::new();

        assert_eq!(report(&err, &mut out), 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "unimplemented instruction 0x02 at 0x0001\n"
        );
    }

    #[test]
    fn test_running_off_the_end_exits_with_4() {
        let path = write_image("inr.bin", &[0x3C]);
        let args = arguments(&[path.to_str().unwrap()]);

        let err = run(&args).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_disassemble_does_not_execute() {
        // STAX B would stop execution with status 3
        let path = write_image("listing.bin", &[0x02, 0x76]);
        let args = arguments(&[path.to_str().unwrap(), "--disassemble"]);

        let result = run(&args);
        fs::remove_file(&path).unwrap();

        assert!(result.is_ok());
    }
}
