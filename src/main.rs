use log::debug;
use medea::config::Config;
use medea::container::Program;
use medea::decompress::{decompress, read_entire_file};
use medea::listing::{hexdump, Instructions};
use medea::vm::MachineState;
use medea::MedeaError;
use std::env;

const DEFAULT_IMAGE: &str = "challenge.mctf";

fn usage(program: &str) {
    eprintln!("Usage: {} [options] [image]", program);
    eprintln!("\nOptions:");
    eprintln!("  -c, --config <file>  Read options from a TOML file");
    eprintln!("  --capacity <bytes>   Maximum decompressed size");
    eprintln!("  --no-summary         Skip the image summary");
    eprintln!("  --no-sections        Skip the section list");
    eprintln!("  --no-hexdump         Skip the SCODE hex dump");
    eprintln!("  --no-listing         Skip the SCODE listing");
    eprintln!("  -h, --help           Show this help message");
    eprintln!("\nImage defaults to {}", DEFAULT_IMAGE);
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    let mut config_path = None;
    let mut capacity = None;
    let mut skip_summary = false;
    let mut skip_sections = false;
    let mut skip_hexdump = false;
    let mut skip_listing = false;
    let mut filename = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Missing value for {}", args[i]);
                    usage(&args[0]);
                    std::process::exit(1);
                }
            }
            "--capacity" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<usize>() {
                        Ok(bytes) => capacity = Some(bytes),
                        Err(_) => {
                            eprintln!("Invalid capacity: {}", args[i + 1]);
                            usage(&args[0]);
                            std::process::exit(1);
                        }
                    }
                    i += 1;
                } else {
                    eprintln!("Missing value for {}", args[i]);
                    usage(&args[0]);
                    std::process::exit(1);
                }
            }
            "--no-summary" => skip_summary = true,
            "--no-sections" => skip_sections = true,
            "--no-hexdump" => skip_hexdump = true,
            "--no-listing" => skip_listing = true,
            "-h" | "--help" => {
                usage(&args[0]);
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                filename = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                usage(&args[0]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => Config::load(path).unwrap_or_else(|e| fail(e)),
        None => Config::default(),
    };
    if let Some(bytes) = capacity {
        config.capacity = bytes;
    }
    config.summary &= !skip_summary;
    config.sections &= !skip_sections;
    config.hexdump &= !skip_hexdump;
    config.listing &= !skip_listing;
    debug!("Config: {:?}", config);

    let filename = filename.unwrap_or_else(|| DEFAULT_IMAGE.to_string());
    if let Err(e) = run(&filename, &config) {
        fail(e);
    }
}

fn fail(e: MedeaError) -> ! {
    eprintln!("Error [{}]: {}", e.stage(), e);
    std::process::exit(1);
}

fn run(filename: &str, config: &Config) -> medea::Result<()> {
    let file = read_entire_file(filename)?;
    if config.summary {
        println!("=== COMPRESSED ===");
        println!("siz    = {}", file.len());
        println!("header = {}", file.header());
    }

    let decompressed = decompress(&file, config.magic_len, config.capacity)?;
    if config.summary {
        println!("=== DECOMPRESSED ===");
        println!("siz    = {}", decompressed.len());
        println!("header = {}", decompressed.header());
    }

    let program = Program::parse(decompressed.as_bytes())?;
    debug!("Reset state: {}", MachineState::new(&program));

    if config.sections {
        println!();
        println!("=== SECTIONS ===");
        println!();
        for section in program.sections() {
            println!("{}", section);
        }
    }

    let code = program.code()?;
    if config.hexdump {
        println!();
        println!("=== SCODE HEXDUMP ===");
        println!();
        println!("{}", hexdump(code));
    }

    if config.listing {
        println!();
        println!("=== SCODE LISTING ===");
        println!();
        for entry in Instructions::new(code) {
            let (_, instruction) = entry?;
            println!("{}", instruction);
        }
    }

    Ok(())
}
