use std::path::PathBuf;

use clap::Parser;

use bolo2mc::nbt::Framing;
use bolo2mc::{schematic, MapRecord};

mod bin_util;

#[derive(Parser)]
#[command(name = "bolo2mc")]
#[command(about = "Convert a Bolo map into a Minecraft schematic")]
struct Args {
    /// Bolo map file to convert
    map: PathBuf,

    #[arg(short, long, default_value = "out.schematic")]
    output: PathBuf,

    /// Write an uncompressed tag stream instead of gzip
    #[arg(long)]
    raw: bool,

    /// Don't print the tag tree
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    bin_util::init_tracing();
    let args = Args::parse();

    eprintln!("Opening {}", args.map.display());
    let map = MapRecord::open(&args.map)?;
    eprintln!(
        "{} pillboxes, {} bases, {} start squares, {} tiles",
        map.pillboxes.len(),
        map.bases.len(),
        map.start_squares.len(),
        map.grid.len()
    );

    let file = schematic::to_schematic(&map);
    if !args.quiet {
        println!("{}", file.pretty());
    }

    let framing = if args.raw { Framing::Raw } else { Framing::Gzip };
    file.save(&args.output, framing)?;
    eprintln!("Wrote {}", args.output.display());
    Ok(())
}
