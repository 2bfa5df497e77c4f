use clap::{Parser, Subcommand};
use log::{info, warn, LevelFilter};
use phash_core::processing::batch::FileHash;
use phash_core::{
    cross_correlate, digest_files, hash_files, image_hash_from_file, logging, Config, LogLevel,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phash")]
#[command(about = "Perceptual hashes and similarity checks for image files")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to rotating files in this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the DCT hash of each image
    Hash {
        /// Images to hash
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Hamming distance between the DCT hashes of two images
    Distance { first: PathBuf, second: PathBuf },

    /// Cross-correlate the radial digests of two images
    Correlate {
        first: PathBuf,
        second: PathBuf,

        /// Gaussian blur standard deviation
        #[arg(long)]
        sigma: Option<f64>,

        /// Gamma exponent
        #[arg(long)]
        gamma: Option<f64>,

        /// Number of projection lines
        #[arg(long)]
        lines: Option<usize>,

        /// Peak coefficient required for a match
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "phash.json")]
        path: PathBuf,
    },
}

fn init_logging(cli: &Cli, config: &Config) -> Result<(), anyhow::Error> {
    let level = match cli.verbose {
        0 => LevelFilter::from(config.log_level),
        1 => LevelFilter::from(LogLevel::Debug),
        _ => LevelFilter::from(LogLevel::Trace),
    };

    match &cli.log_dir {
        Some(dir) => logging::init_logger(dir, level)
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?,
        None => env_logger::Builder::new()
            .filter_level(level)
            .parse_env(logging::LOG_LEVEL_ENV)
            .init(),
    }
    Ok(())
}

/// Print each hash, failing if any file could not be hashed
fn print_hashes(results: Vec<FileHash>) -> Result<(), anyhow::Error> {
    let total = results.len();
    let mut failures = 0;
    for result in results {
        match result.hash {
            Ok(hash) => println!("{}  {}", hash, result.path.display()),
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", result.path.display(), e);
            }
        }
    }

    if failures > 0 {
        warn!("{} of {} files could not be hashed", failures, total);
        anyhow::bail!("{} of {} files could not be hashed", failures, total);
    }
    Ok(())
}

fn main() -> Result<(), anyhow::Error> {
    // Parse command line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    init_logging(&cli, &config)?;

    match cli.command {
        Commands::Hash { files } => print_hashes(hash_files(&files)),

        Commands::Distance { first, second } => {
            let a = image_hash_from_file(&first)?;
            let b = image_hash_from_file(&second)?;
            let distance = a.distance(&b);
            let verdict = if a.is_similar(&b, config.hamming_threshold) {
                "similar"
            } else {
                "different"
            };
            println!("{} ({})", distance, verdict);
            Ok(())
        }

        Commands::Correlate {
            first,
            second,
            sigma,
            gamma,
            lines,
            threshold,
        } => {
            // Command line arguments override the configuration
            let mut config = config;
            config.sigma = sigma.unwrap_or(config.sigma);
            config.gamma = gamma.unwrap_or(config.gamma);
            config.num_lines = lines.unwrap_or(config.num_lines);
            config.correlation_threshold = threshold.unwrap_or(config.correlation_threshold);
            config.validate()?;

            let mut digests = digest_files(&[first, second], &config.digest_builder());
            let b = digests.pop().map(|d| d.digest);
            let a = digests.pop().map(|d| d.digest);
            let (a, b) = match (a, b) {
                (Some(a), Some(b)) => (a?, b?),
                _ => anyhow::bail!("expected two digests"),
            };

            let result = cross_correlate(&a, &b, config.correlation_threshold)?;
            info!("{} vs {}: {:?}", a.id(), b.id(), result);
            println!(
                "peak {:.4} at line shift {} ({})",
                result.peak,
                result.offset,
                if result.is_match { "match" } else { "no match" }
            );
            Ok(())
        }

        Commands::GenerateConfig { path } => {
            let config = Config::default();
            config.save_to_file(&path)?;
            println!("Configuration file generated at: {}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phash_core::{Error, ImageHash};

    #[test]
    fn test_partial_failure_is_an_error() {
        let results = vec![
            FileHash {
                path: PathBuf::from("good.png"),
                hash: Ok(ImageHash(42)),
            },
            FileHash {
                path: PathBuf::from("missing.png"),
                hash: Err(Error::HashComputation("unreadable".to_string())),
            },
        ];
        assert!(print_hashes(results).is_err());
    }

    #[test]
    fn test_all_hashed_is_ok() {
        let results = vec![FileHash {
            path: PathBuf::from("good.png"),
            hash: Ok(ImageHash(42)),
        }];
        assert!(print_hashes(results).is_ok());
    }
}
