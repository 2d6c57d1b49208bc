use std::path::PathBuf;

use clap::{value_parser, ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Deterministic synthetic datasets for cache-warming benchmarks",
    long_about = "Generates, verifies, and deletes seeded pseudo-random file hierarchies whose \
                  bytes are identical on every machine and every run.",
    after_help = "Examples:\n  seedbed generate ./dataset --size-gb 2\n  seedbed verify ./dataset --size-gb 2 --content\n  seedbed --json delete ./dataset"
)]
pub struct SeedbedCli {
    #[arg(
        short,
        long,
        help = "Suppress human output (errors still print to stderr)",
        global = true
    )]
    pub quiet: bool,
    #[arg(short, long, action = ArgAction::Count, help = "Increase logging (-vv reaches trace)")]
    pub verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v/-q", global = true)]
    pub trace: bool,
    #[arg(
        long,
        help = "Emit {status,message,details} JSON envelopes",
        global = true
    )]
    pub json: bool,
    #[arg(long, help = "Disable colored human output", global = true)]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: CommandCli,
}

#[derive(Subcommand, Debug)]
pub enum CommandCli {
    #[command(
        about = "Generate the fixed-shape dataset tree under BASE_DIR.",
        override_usage = "seedbed generate <BASE_DIR> --size-gb N [--seed SEED] [--jobs N]",
        after_help = "Examples:\n  seedbed generate ./dataset --size-gb 1\n  seedbed generate ./dataset --size-gb 4 --jobs 8\n  seedbed generate ./dataset --size-gb 1 --dry-run\n"
    )]
    Generate(GenerateArgs),
    #[command(
        about = "Check an existing tree for the expected files and sizes.",
        override_usage = "seedbed verify <BASE_DIR> --size-gb N [--seed SEED] [--content]",
        after_help = "Examples:\n  seedbed verify ./dataset --size-gb 1\n  seedbed verify ./dataset --size-gb 1 --content\n"
    )]
    Verify(VerifyArgs),
    #[command(
        about = "Remove a dataset tree (an absent tree is fine).",
        after_help = "Example:\n  seedbed delete ./dataset\n"
    )]
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(
        value_name = "BASE_DIR",
        value_parser = value_parser!(PathBuf),
        help = "Directory the tree is created under (created if absent)"
    )]
    pub base_dir: PathBuf,
    #[arg(
        long = "size-gb",
        value_name = "N",
        value_parser = value_parser!(u32).range(1..=255),
        help = "Dataset size in GiB: one top-level directory per GiB (255 max so per-file seeds stay unique)"
    )]
    pub size_gb: u32,
    #[arg(
        long,
        value_name = "SEED",
        value_parser = parse_seed,
        default_value = "0xDEADBEEF",
        help = "Master seed, decimal or 0x-prefixed hex (changing it changes every byte)"
    )]
    pub seed: u32,
    #[arg(
        long,
        value_name = "N",
        help = "Generation worker threads (defaults to available cores, capped at 16)"
    )]
    pub jobs: Option<usize>,
    #[arg(long, help = "Report the plan without writing anything")]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[arg(
        value_name = "BASE_DIR",
        value_parser = value_parser!(PathBuf),
        help = "Directory holding the tree to check"
    )]
    pub base_dir: PathBuf,
    #[arg(
        long = "size-gb",
        value_name = "N",
        value_parser = value_parser!(u32).range(1..=255),
        help = "Size the tree was generated with"
    )]
    pub size_gb: u32,
    #[arg(
        long,
        value_name = "SEED",
        value_parser = parse_seed,
        default_value = "0xDEADBEEF",
        help = "Master seed the tree was generated with"
    )]
    pub seed: u32,
    #[arg(
        long,
        help = "Also recompare every byte against the seeded stream (slow but catches corruption)"
    )]
    pub content: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(
        value_name = "BASE_DIR",
        value_parser = value_parser!(PathBuf),
        help = "Directory to remove recursively"
    )]
    pub base_dir: PathBuf,
}

fn parse_seed(raw: &str) -> Result<u32, String> {
    let raw = raw.trim();
    let parsed = if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        raw.parse::<u32>()
    };
    parsed.map_err(|_| format!("invalid seed `{raw}` (expected a u32, decimal or 0x-prefixed hex)"))
}
