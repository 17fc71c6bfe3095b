use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use bolo2mc::MapRecord;

mod bin_util;

#[derive(Parser)]
#[command(name = "bmap-text")]
#[command(about = "Print a Bolo map as text, one character per tile")]
struct Args {
    /// Bolo map file to print
    map: PathBuf,

    /// Print the decoded map as JSON instead
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    bin_util::init_tracing();
    let args = Args::parse();

    let map = MapRecord::open(&args.map)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &map)?;
        writeln!(out)?;
    } else {
        out.write_all(map.grid.to_text().as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
