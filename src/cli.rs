use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "hes-report",
    version,
    about = "Home Energy Score report extraction tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Parse(ParseArgs),
    Catalog(CatalogArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Report PDF, run through pdftotext.
    #[arg(long, required_unless_present = "text", conflicts_with = "text")]
    pub pdf: Option<PathBuf>,

    /// Already extracted report text.
    #[arg(long)]
    pub text: Option<PathBuf>,

    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Keep pdftotext column layout (helps the line-based priority fallback).
    #[arg(long, default_value_t = false)]
    pub layout: bool,

    #[arg(long, default_value_t = false)]
    pub compact: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    #[arg(long)]
    pub output: Option<PathBuf>,
}
