// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::error::Error;
use std::path::PathBuf;

use clap::{crate_version, Parser, Subcommand};
use truesampler::config::load_corpus;
use truesampler::notes::corpus_programs;
use truesampler::sampler::{BarTrueSampler, TrueSampler};
use truesampler::tensor::Tensor;
use truesampler::verify;

#[derive(Parser)]
#[clap(
    author = "Michael Wilson",
    version = crate_version!(),
    about = "Draws pitch class training batches from MIDI note tables."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lists the programs found in a corpus, in channel order.
    Programs {
        /// The path to the corpus file.
        corpus_path: String,
    },
    /// Verifies that every program in a corpus can be drawn.
    Verify {
        /// The path to the corpus file.
        corpus_path: String,
    },
    /// Draws batches from a corpus and prints a summary of each.
    Draw {
        /// The path to the corpus file.
        corpus_path: String,
        /// Seed for the random source. Draws are reproducible for a given seed.
        #[arg[short, long]]
        seed: Option<u64>,
        /// The number of batches to draw.
        #[arg[short, long, default_value_t = 1]]
        count: usize,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Programs { corpus_path } => {
            let corpus = load_corpus(&PathBuf::from(&corpus_path))?;
            let programs = corpus_programs(&corpus.tables);

            if programs.is_empty() {
                println!("No programs found in {}.", corpus_path);
                return Ok(());
            }

            println!("Programs (count: {}):", programs.len());
            for (channel, program) in programs.iter().enumerate() {
                println!("- channel {}: program {}", channel, program.as_int());
            }
        }
        Commands::Verify { corpus_path } => {
            let corpus = load_corpus(&PathBuf::from(&corpus_path))?;

            let report = verify::check_corpus(&corpus.tables, &corpus.config);
            verify::print_report(&report, &corpus.names);
            if report.has_errors() {
                return Err(format!("verification of {} failed", corpus_path).into());
            }
        }
        Commands::Draw {
            corpus_path,
            seed,
            count,
        } => {
            let corpus = load_corpus(&PathBuf::from(&corpus_path))?;
            let mut sampler = match seed {
                Some(seed) => BarTrueSampler::from_seed(corpus.tables, corpus.config, seed),
                None => BarTrueSampler::from_entropy(corpus.tables, corpus.config),
            };

            let mut combined: Option<Tensor> = None;
            for index in 0..count {
                let tensor = sampler.draw();
                println!("Draw {}: {}", index, tensor);
                for (channel, program) in sampler.programs().iter().enumerate() {
                    println!(
                        "  program {:>3}: {:>5.1}% of steps active",
                        program.as_int(),
                        channel_activity(&tensor, channel) * 100.0
                    );
                }

                combined = Some(match combined {
                    Some(previous) => previous.concat(&tensor, 0)?,
                    None => tensor,
                });
            }

            if let Some(combined) = combined {
                println!("\nCombined: {}", combined);
            }
        }
    }

    Ok(())
}

/// The fraction of (batch, step) rows in the channel with at least one active pitch class.
fn channel_activity(tensor: &Tensor, channel: usize) -> f64 {
    let [batch_size, _, steps, _] = tensor.shape();
    if batch_size * steps == 0 {
        return 0.0;
    }

    let active = (0..batch_size)
        .flat_map(|batch| (0..steps).map(move |step| (batch, step)))
        .filter(|(batch, step)| {
            tensor
                .row(*batch, channel, *step)
                .iter()
                .any(|v| *v != 0.0)
        })
        .count();
    active as f64 / (batch_size * steps) as f64
}
