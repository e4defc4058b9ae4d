use crate::platform::PlatformSet;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "densify")]
#[command(about = "Convert raster images into per-platform density buckets")]
#[command(version)]
pub struct Cli {
    /// Source directory to scan for raster images
    pub src: PathBuf,

    /// Destination root for the converted output tree
    #[arg(short, long)]
    pub dst: PathBuf,

    /// Target platform convention (android, ios or all)
    #[arg(short, long, default_value = "all")]
    pub platform: PlatformSet,

    /// Density factor the source images are authored at (default: 3.0)
    #[arg(long)]
    pub scale: Option<f32>,

    /// Number of parallel conversion workers (default: logical CPU count)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Skip configuration validation
    #[arg(long)]
    pub skip_validation: bool,

    /// Print the finish report as JSON
    #[arg(long)]
    pub json: bool,

    /// Log each converted file
    #[arg(short, long)]
    pub verbose: bool,
}
