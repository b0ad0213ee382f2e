//! Main Program for Catshuffle
//! Run with `--help` for more instruction

// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Error};
use catshuffle::{CatMapParams, RasterBuffer};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use sha2::{Digest, Sha256};

#[derive(Parser, Debug)]
#[command(author, version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scramble a square P6 image
    Scramble(Transform),

    /// Restore an image scrambled with the same iteration count
    Unscramble(Transform),

    /// Scramble, write, re-read and unscramble, then check the result
    Roundtrip {
        /// Input file
        input: PathBuf,

        /// Scrambled file
        #[arg(short = 's', long)]
        scrambled: PathBuf,

        /// Restored output file
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Number of map iterations
        #[arg(short = 'n', long, default_value_t = 3)]
        iterations: u64,
    },
}

#[derive(Args, Debug)]
struct Transform {
    /// Input file
    input: PathBuf,

    /// Output file
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Number of map iterations
    #[arg(short = 'n', long, default_value_t = 3)]
    iterations: u64,
}

fn read(path: &Path) -> Result<RasterBuffer, Error> {
    let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    RasterBuffer::decode(&bytes).with_context(|| format!("cannot decode {}", path.display()))
}

fn write(path: &Path, buffer: &RasterBuffer) -> Result<(), Error> {
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    buffer
        .write_to(BufWriter::new(file))
        .with_context(|| format!("cannot write {}", path.display()))
}

fn report_period(buffer: &RasterBuffer, iterations: u64) {
    if !buffer.is_square() {
        return;
    }
    let period = catshuffle::period(buffer.width());
    info!(
        "map period for {0}x{0} is {1}, effective iterations {2}",
        buffer.width(),
        period,
        iterations % period
    );
    if iterations % period == 0 {
        warn!("iteration count is a multiple of the period, output equals input");
    }
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Scramble(args) => {
            let im = read(&args.input)?;
            report_period(&im, args.iterations);
            let out = catshuffle::scramble(&im, &CatMapParams::new(args.iterations))?;
            write(&args.output, &out)?;
            info!("scrambled {} -> {}", args.input.display(), args.output.display());
        }
        Command::Unscramble(args) => {
            let im = read(&args.input)?;
            report_period(&im, args.iterations);
            let out = catshuffle::unscramble(&im, &CatMapParams::new(args.iterations))?;
            write(&args.output, &out)?;
            info!("unscrambled {} -> {}", args.input.display(), args.output.display());
        }
        Command::Roundtrip {
            input,
            scrambled,
            output,
            iterations,
        } => {
            let params = CatMapParams::new(iterations);
            let im = read(&input)?;
            report_period(&im, iterations);

            write(&scrambled, &catshuffle::scramble(&im, &params)?)?;
            let restored = catshuffle::unscramble(&read(&scrambled)?, &params)?;
            write(&output, &restored)?;

            let expected = Sha256::digest(im.encode());
            let actual = Sha256::digest(restored.encode());
            info!("sha256 original {:x}", expected);
            info!("sha256 restored {:x}", actual);
            if expected != actual {
                bail!("restored image differs from {}", input.display());
            }
            info!("scrambling and unscrambling completed");
        }
    }

    Ok(())
}
