use clap::Parser;
use dmgcore::cartridge::Cartridge;
use dmgcore::gameboy::GameBoy;
use log::{error, LevelFilter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dmgcore", about = "Runs a Game Boy cartridge on the LR35902 core", long_about = None)]
struct Args {
    /// Path to a .gb/.gbc image or a .zip archive containing one
    rom: PathBuf,

    /// Maximum number of instructions to execute
    #[arg(short, long, default_value_t = 1_000_000)]
    steps: usize,

    /// One of off, error, warn, info, debug, trace
    #[arg(short, long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    /// Print the cartridge header and exit
    #[arg(long)]
    header_only: bool,
}

fn setup_logger(level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}][{}] {}", record.level(), record.target(), message)))
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = setup_logger(args.log_level) {
        eprintln!("Failed to set up logging: {}", e);
    }

    let cartridge = match Cartridge::from_path(&args.rom) {
        Ok(cartridge) => cartridge,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    println!("{}", cartridge.header());
    if args.header_only {
        return;
    }

    let mut gb = GameBoy::new(cartridge);
    if let Err(e) = gb.run(args.steps) {
        error!("{}\n{}", e, gb.cpu());
        std::process::exit(1);
    }
    println!("{}", gb.cpu());
}
