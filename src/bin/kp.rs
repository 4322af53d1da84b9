//! kp: Kortprojektion. Apply a map projection to coordinates read from
//! files, or from stdin.
//!
//! Input lines hold longitude and latitude, in degrees, or easting and northing,
//! for the inverse projection. Text following a `#` is ignored.
//!
//! Example:
//! ```sh
//! echo 150 -75 | kp "stere lat_0=-90 lat_ts=-71 lon_0=-100 ellps=intl"
//! ```
use anyhow::Context as _;
use clap::Parser;
use kort::authoring::builtin_names;
use kort::authoring::parse_proj;
use kort::prelude::*;
use log::{debug, trace, warn};
use std::io::BufRead;

#[derive(Parser, Debug)]
#[command(name = "kp")]
#[command(author, version, about = "kp: Apply map projections to coordinates", long_about = None)]
struct Cli {
    /// The projection definition, e.g. "aea lat_1=29.5 lat_2=45.5"
    operation: Option<String>,

    /// Inverse operation
    #[arg(long = "inv")]
    inverse: bool,

    /// Read the definition as a PROJ string, e.g. "+proj=stere +lat_0=90"
    #[arg(long)]
    proj: bool,

    /// Number of decimals in the output
    #[arg(short = 'd', long)]
    decimals: Option<usize>,

    /// Report fwd-inv roundtrip deviation
    #[arg(short, long)]
    roundtrip: bool,

    /// Echo input to output
    #[arg(short, long)]
    echo: bool,

    /// List the built in projections and ellipsoids, then exit
    #[arg(long)]
    list: bool,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// The files to operate on. Reads stdin if none are given
    args: Vec<String>,
}

fn main() -> Result<(), anyhow::Error> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    trace!("This is kp");

    if options.list {
        println!("Projections:");
        for name in builtin_names() {
            println!("    {name}");
        }
        println!("Ellipsoids:");
        for (name, description) in Ellipsoid::builtin_names() {
            println!("    {name:<12}{description}");
        }
        return Ok(());
    }

    let Some(operation) = &options.operation else {
        anyhow::bail!("kp: missing projection definition (try kp --help)");
    };
    let definition = if options.proj {
        parse_proj(operation)?
    } else {
        operation.clone()
    };
    debug!("definition: {definition}");

    // Plain, rather than Minimal, gives access to macros stored in files
    let ctx = Plain::new();
    let op = Op::new(&definition, &ctx)?;
    debug!("instantiated as {}", op.descriptor.variant);

    let args = if options.args.is_empty() {
        vec!["-".to_string()]
    } else {
        options.args.clone()
    };

    for arg in &args {
        if arg == "-" {
            process(std::io::stdin().lock(), &op, &options)?;
            continue;
        }
        let file = std::fs::File::open(arg).with_context(|| format!("cannot open '{arg}'"))?;
        process(std::io::BufReader::new(file), &op, &options)?;
    }
    Ok(())
}

// Transform the coordinates of one input stream
fn process(reader: impl BufRead, op: &Op, options: &Cli) -> Result<(), anyhow::Error> {
    let direction = if options.inverse { Inv } else { Fwd };
    let reverse = if options.inverse { Fwd } else { Inv };

    // Short form of "forward and not inverted, or inverse and inverted"
    let geographical_input = op.descriptor.inverted == options.inverse;

    let mut lines = Vec::new();
    let mut operands = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let content = line.split('#').next().unwrap_or_default().trim();
        let mut elements = content.split_whitespace();
        let (Some(first), Some(second)) = (elements.next(), elements.next()) else {
            if !content.is_empty() {
                warn!("skipping line with less than 2 coordinates: '{line}'");
            }
            continue;
        };
        let first: f64 = first
            .parse()
            .with_context(|| format!("bad coordinate in '{line}'"))?;
        let second: f64 = second
            .parse()
            .with_context(|| format!("bad coordinate in '{line}'"))?;

        operands.push(if geographical_input {
            Coor2D::gis(first, second)
        } else {
            Coor2D::raw(first, second)
        });
        lines.push(line);
    }

    let mut results = operands.clone();
    let successes = op.apply(&mut results, direction);
    if successes < results.len() {
        warn!("{} of {} points failed", results.len() - successes, results.len());
    }

    let mut roundtrip = results.clone();
    if options.roundtrip {
        op.apply(&mut roundtrip, reverse);
    }

    let decimals = options
        .decimals
        .unwrap_or(if geographical_input { 5 } else { 10 });
    for (i, line) in lines.iter().enumerate() {
        if options.echo {
            println!("# {line}");
        }
        let mut coord = results[i];
        if !geographical_input {
            coord = coord.to_degrees();
        }
        print!("{:.decimals$} {:.decimals$}", coord[0], coord[1]);

        // Deviation in the input units: metres or degrees
        if options.roundtrip {
            let mut deviation = Coor2D::raw(
                roundtrip[i][0] - operands[i][0],
                roundtrip[i][1] - operands[i][1],
            );
            if geographical_input {
                deviation = deviation.to_degrees();
            }
            print!("  {:.3e} {:.3e}", deviation[0], deviation[1]);
        }
        println!();
    }
    Ok(())
}
