// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::{anyhow, Context, Result};
use keywheel::circle::Circle;
use keywheel::config::Settings;
use keywheel::music::{
    diatonic_chords, normalize_accidentals, resolve, resolve_key, spell_chord, spell_interval,
    ChordShape, ChordSize, ResolutionPolicy, Scale, ScaleType,
};
use std::env;
use tracing::{info, Level};

fn print_usage() {
    println!("KEYWHEEL - Spelled scales on the circle of fifths");
    println!();
    println!("Usage: keywheel [--verbose] COMMAND");
    println!();
    println!("Commands:");
    println!("  --scale TONIC [TYPE]          Spell a scale (default: major)");
    println!("  --interval NOTE INTERVAL      Spell the note an interval above NOTE");
    println!("  --resolve TONIC [POLICY]      Settle a compound tonic such as F#/Gb");
    println!("  --chord ROOT SHAPE            Spell a chord (maj, min, dim, aug, maj7, min7, 7, m7b5, dim7)");
    println!("  --chords TONIC [TYPE]         List the diatonic seventh chords of a scale");
    println!("  --circle TONIC [TYPE] [POLICY]  Show circle labels and scale placement");
    println!("  --config FILE                 Show the key described by a settings file");
    println!("  --help, -h                    Show this help message");
    println!();
    println!("Policies: fewest, sharp, flat");
    println!("Accidentals may be typed as # and b (e.g. F#, Bb).");
    println!();
    println!("Examples:");
    println!("  keywheel --scale Eb minor");
    println!("  keywheel --interval G# aug4");
    println!("  keywheel --resolve F#/Gb flat");
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Required positional argument, already normalized to accidental glyphs
fn arg(args: &[String], index: usize, what: &str) -> Result<String> {
    args.get(index)
        .map(|s| normalize_accidentals(s))
        .ok_or_else(|| anyhow!("{} requires {}", args[0], what))
}

/// Required positional argument taken as typed, for file paths
fn raw_arg<'a>(args: &'a [String], index: usize, what: &str) -> Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} requires {}", args[0], what))
}

fn scale_type_arg(args: &[String], index: usize) -> Result<ScaleType> {
    match args.get(index) {
        Some(s) => Ok(s.parse()?),
        None => Ok(ScaleType::Major),
    }
}

fn policy_arg(args: &[String], index: usize) -> Result<ResolutionPolicy> {
    match args.get(index) {
        Some(s) => Ok(s.parse()?),
        None => Ok(ResolutionPolicy::default()),
    }
}

fn print_scale(scale: &Scale) {
    println!("{}: {}", scale, scale.spellings().join(" "));
}

fn print_circle(circle: &Circle) {
    println!("{}", circle.header());
    for (position, label) in circle.labels().iter().enumerate() {
        let note = circle.notes()[position]
            .map(|n| n.to_string())
            .unwrap_or_default();
        println!("{:>2}  {:<8} {}", position, label, note);
    }
}

fn run(args: &[String]) -> Result<()> {
    match args[0].as_str() {
        "--scale" => {
            let tonic = arg(args, 1, "a tonic")?;
            let scale = Scale::new(&tonic, scale_type_arg(args, 2)?)?;
            print_scale(&scale);
        }
        "--interval" => {
            let note = arg(args, 1, "a note")?;
            let interval = arg(args, 2, "an interval")?;
            println!("{}", spell_interval(&note, &interval)?);
        }
        "--resolve" => {
            let tonic = arg(args, 1, "a tonic")?;
            let policy = policy_arg(args, 2)?;
            let scale = resolve(&tonic, policy)?;
            info!(%tonic, %policy, resolved = %scale.tonic(), "resolved tonic");
            print_scale(&scale);
        }
        "--chord" => {
            let root = arg(args, 1, "a root")?;
            let shape: ChordShape = arg(args, 2, "a chord shape")?.parse()?;
            let chord = spell_chord(&root, shape)?;
            let notes: Vec<String> = chord.notes().iter().map(|n| n.to_string()).collect();
            println!("{}: {}", chord, notes.join(" "));
        }
        "--chords" => {
            let tonic = arg(args, 1, "a tonic")?;
            let scale = Scale::new(&tonic, scale_type_arg(args, 2)?)?;
            println!("{}", scale);
            for (degree, chord) in diatonic_chords(&scale, ChordSize::Tetrad) {
                println!("{:<10} {}", chord.roman_numeral(degree), chord);
            }
        }
        "--circle" => {
            let tonic = arg(args, 1, "a tonic")?;
            let key = resolve_key(&tonic, scale_type_arg(args, 2)?, policy_arg(args, 3)?)?;
            print_circle(&Circle::new(key)?);
        }
        "--config" => {
            let path = raw_arg(args, 1, "a settings file")?;
            let settings = Settings::load(path)?;
            settings
                .validate()
                .with_context(|| format!("Invalid settings in {}", path))?;
            info!(key = %settings.key, policy = %settings.resolution, "loaded settings");
            let major = resolve(&settings.key, settings.resolution)?;
            let scale = settings
                .registry()
                .get_scale(&major.tonic().to_string(), &settings.scale)?;
            print_scale(&scale);
        }
        "--help" | "-h" => {
            print_usage();
        }
        other => {
            eprintln!("Unknown option: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    args.retain(|a| a != "--verbose" && a != "-v");
    init_logging(verbose);

    if args.is_empty() {
        println!("KEYWHEEL - Spelled scales on the circle of fifths");
        println!("Run with --help for usage information");
        return Ok(());
    }

    run(&args)
}
