use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use imageset_density::{run, RunOptions};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Asset catalog directory holding the .imageset folders
    #[arg(value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Show progress to stderr
    #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
    progress: bool,

    /// Don't print the summary line
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let started = Instant::now();
    let summary = run(&cli.root, RunOptions { progress: cli.progress })?;

    if !cli.quiet {
        println!(
            "Renamed {} of {} images across {} image sets ({} manifests rewritten) in {:.2?}",
            summary.renamed(),
            summary.images,
            summary.image_sets,
            summary.manifests_rewritten,
            started.elapsed()
        );
    }
    Ok(())
}
