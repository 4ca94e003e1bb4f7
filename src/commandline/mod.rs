use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use quadgen::il::{GeneratorConfig, RenderStyle, DEFAULT_CAPACITY};

#[derive(Debug, Parser)]
#[clap(about = "Emit and render three-address code")]
pub struct Options {
    #[clap(subcommand)]
    pub operation: Operation,
    #[clap(short, long, default_value_t = 1)]
    pub verbose: usize,
}

#[derive(Debug, Subcommand)]
pub enum Operation {
    /// Emit a listing of raw quads and render it
    Render {
        file: PathBuf,
        #[clap(flatten)]
        output: OutputOptions,
    },
    /// Emit a built-in sample program and render it
    Sample {
        /// Number of loop iterations in the sample
        #[clap(short, long, default_value_t = 3)]
        iterations: usize,
        #[clap(flatten)]
        output: OutputOptions,
    },
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    #[clap(short, long)]
    /// Write the listing to a file instead of stdout
    pub output: Option<PathBuf>,
    #[clap(short, long, default_value_t = DEFAULT_CAPACITY)]
    /// Number of quad slots, including the reserved slot 0
    capacity: usize,
    #[clap(long)]
    /// Do not limit the number of quads
    unbounded: bool,
    #[clap(long)]
    /// Print branches as `IF a REL b GOTO n`
    split_branches: bool,
}

impl OutputOptions {
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            capacity: (!self.unbounded).then_some(self.capacity),
        }
    }

    pub fn render_style(&self) -> RenderStyle {
        if self.split_branches {
            RenderStyle::SplitBranches
        } else {
            RenderStyle::Verbatim
        }
    }
}
