use race_core::Catalog;
use race_sim::{circle_script, run_race, RaceOutcome, RaceReport, RaceScript};
use std::env;
use std::fs;
use std::time::Instant;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    println!("🏁 Race Session Simulator");
    println!("{}", "=".repeat(70));
    println!();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "simulate" => {
            if args.len() < 3 {
                eprintln!(
                    "Usage: {} simulate <script_file> [--levels <file>] [output_file]",
                    args[0]
                );
                std::process::exit(1);
            }

            let script_file = &args[2];

            // Parse optional --levels flag
            let mut levels_file: Option<&str> = None;
            let mut output_file_idx = 3;

            if args.len() > 3 && (args[3] == "--levels" || args[3] == "-l") {
                if args.len() < 5 {
                    eprintln!("❌ Error: --levels requires a file path");
                    std::process::exit(1);
                }
                levels_file = Some(&args[4]);
                output_file_idx = 5;
            }

            let output_file = args.get(output_file_idx).map(|s| s.as_str());

            simulate_command(script_file, levels_file, output_file);
        }

        "generate" => {
            if args.len() < 3 {
                eprintln!(
                    "Usage: {} generate <output_file> [--level N] [--car N] [--seconds F]",
                    args[0]
                );
                std::process::exit(1);
            }

            let output_file = &args[2];

            let mut level = 0usize;
            let mut car = 0usize;
            let mut seconds = 30.0f32;

            let mut i = 3;
            while i + 1 < args.len() {
                match args[i].as_str() {
                    "--level" => level = parse_arg(&args[i + 1], "--level"),
                    "--car" => car = parse_arg(&args[i + 1], "--car"),
                    "--seconds" => seconds = parse_arg(&args[i + 1], "--seconds"),
                    other => {
                        eprintln!("❌ Unknown option: {}", other);
                        std::process::exit(1);
                    }
                }
                i += 2;
            }

            generate_command(output_file, level, car, seconds);
        }

        "--help" | "-h" => {
            print_usage(&args[0]);
            std::process::exit(0);
        }

        _ => {
            eprintln!("❌ Unknown command: {}", command);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [options]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  simulate <script_file> [--levels <file>] [output_file]");
    eprintln!("      Replay a recorded stick script through the race session");
    eprintln!("      - script_file: JSON file containing the input script");
    eprintln!("      - --levels: Optional level/car catalog file");
    eprintln!("                  Default: the bundled catalog");
    eprintln!("      - output_file: Optional file to save the report (JSON)");
    eprintln!("                     Defaults to: race-report_level<N>_<timestamp>.json");
    eprintln!();
    eprintln!("  generate <output_file> [--level N] [--car N] [--seconds F]");
    eprintln!("      Write a script that circles the track at full throttle");
    eprintln!();
    eprintln!("Example workflow:");
    eprintln!("  1. Generate a script: {} generate lap.json --level 0 --car 2", program);
    eprintln!("  2. Simulate it:       {} simulate lap.json", program);
}

fn parse_arg<T: std::str::FromStr>(value: &str, flag: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("❌ Error: invalid value '{}' for {}", value, flag);
        std::process::exit(1);
    })
}

fn load_catalog(levels_file: Option<&str>) -> Catalog {
    match levels_file {
        None => race_sim::default_catalog(),
        Some(path) => {
            let raw = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("❌ Error reading catalog '{}': {}", path, e);
                std::process::exit(1);
            });
            serde_json::from_str(&raw).unwrap_or_else(|e| {
                eprintln!("❌ Error parsing catalog JSON: {}", e);
                std::process::exit(1);
            })
        }
    }
}

fn simulate_command(script_file: &str, levels_file: Option<&str>, output_file: Option<&str>) {
    println!("📋 Simulating race script");
    println!("  Script file: {}", script_file);
    println!();

    let raw = fs::read_to_string(script_file).unwrap_or_else(|e| {
        eprintln!("❌ Error reading file '{}': {}", script_file, e);
        std::process::exit(1);
    });

    let script: RaceScript = serde_json::from_str(&raw).unwrap_or_else(|e| {
        eprintln!("❌ Error parsing JSON: {}", e);
        std::process::exit(1);
    });

    let catalog = load_catalog(levels_file);

    println!("📦 Loaded {} frames from script", script.frames.len());
    println!("  Level: {}  Car: {}", script.level, script.car);
    println!();

    let start = Instant::now();
    let report = run_race(&script, &catalog).unwrap_or_else(|e| {
        eprintln!();
        eprintln!("❌ Simulation failed: {}", e);
        std::process::exit(1);
    });
    let duration = start.elapsed();

    println!("  Simulation time: {:.2}s", duration.as_secs_f64());
    println!();
    println!(
        "{} Outcome: {}",
        match report.outcome {
            RaceOutcome::Success => "✅",
            RaceOutcome::Failure => "❌",
            RaceOutcome::Incomplete => "⏱",
        },
        match report.outcome {
            RaceOutcome::Success => "RACE WON",
            RaceOutcome::Failure => "RACE LOST",
            RaceOutcome::Incomplete => "UNDECIDED (script ended mid-race)",
        }
    );
    println!("  Time remaining: {}s", report.seconds_remaining);
    println!("  Laps remaining: {}", report.laps_remaining);
    println!("  Frames run: {}", report.frames_run);
    println!();

    let default_filename = format!(
        "race-report_level{}_{}.json",
        script.level,
        chrono::Utc::now().timestamp()
    );
    let file_to_save = output_file.unwrap_or(&default_filename);

    match save_report(&report, file_to_save) {
        Ok(_) => {
            println!("💾 Report saved to: {}", file_to_save);
            println!("{}", "=".repeat(70));
        }
        Err(e) => {
            eprintln!("❌ Error saving report: {}", e);
            std::process::exit(1);
        }
    }
}

fn generate_command(output_file: &str, level: usize, car: usize, seconds: f32) {
    println!("📋 Generating circling script");
    println!("  Level: {}  Car: {}  Duration: {}s", level, car, seconds);
    println!();

    let catalog = race_sim::default_catalog();

    let script = circle_script(level, car, &catalog, seconds, 60.0).unwrap_or_else(|e| {
        eprintln!("❌ Script generation failed: {}", e);
        std::process::exit(1);
    });

    let json = serde_json::to_string_pretty(&script).unwrap_or_else(|e| {
        eprintln!("❌ Error serializing script: {}", e);
        std::process::exit(1);
    });

    match fs::write(output_file, json) {
        Ok(_) => {
            println!("✅ Wrote {} frames", script.frames.len());
            println!("💾 Script saved to: {}", output_file);
            println!("{}", "=".repeat(70));
        }
        Err(e) => {
            eprintln!("❌ Error saving script: {}", e);
            std::process::exit(1);
        }
    }
}

fn save_report(report: &RaceReport, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}
