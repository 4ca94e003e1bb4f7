use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::Path,
    process,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use quadgen::il::{
    actions::{self, begin_repeat, binary, end_repeat},
    reader::read_quads,
    Attributes, CodeGenerator, Quad,
};

use commandline::{Operation, Options, OutputOptions};

mod commandline;

fn main() {
    let options = Options::parse();

    if let Err(err) = stderrlog::new().verbosity(options.verbose).init() {
        eprintln!("Failed to initialise logging: {}", err);
    }

    if let Err(err) = run(options) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run(options: Options) -> Result<()> {
    match options.operation {
        Operation::Render { file, output } => {
            let source = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let quads = read_quads(&source)?;
            info!("Read {} quads from {}", quads.len(), file.display());

            let mut cg = CodeGenerator::with_config(output.generator_config());
            cg.init();
            for raw in quads {
                cg.emit(Quad::classify(raw))?;
            }
            write_listing(&cg, &output)
        }
        Operation::Sample { iterations, output } => {
            let mut cg = CodeGenerator::with_config(output.generator_config());
            emit_sample(&mut cg, iterations)?;
            write_listing(&cg, &output)
        }
    }
}

/// A counted loop summing `i * 0.5`, followed by an array store and a call.
fn emit_sample(cg: &mut CodeGenerator, iterations: usize) -> Result<()> {
    cg.init();

    let sum = Attributes::float("sum");
    let index = Attributes::int("i");
    actions::assign(cg, &sum, &Attributes::int("0"))?;
    actions::assign(cg, &index, &Attributes::int("0"))?;

    let repeat = begin_repeat(cg, &Attributes::int(iterations))?;
    let step = binary(cg, "MUL", &index, &Attributes::float("0.5"))?;
    let total = binary(cg, "ADD", &sum, &step)?;
    actions::assign(cg, &sum, &total)?;
    let next = binary(cg, "ADD", &index, &Attributes::int("1"))?;
    actions::assign(cg, &index, &next)?;
    end_repeat(cg, &repeat)?;

    cg.emit(Quad::array_set("out", "0", "sum"))?;
    let first = cg.new_temp();
    cg.emit(Quad::array_get(first.clone(), "out", "0"))?;
    cg.emit(Quad::param(first))?;
    cg.emit(Quad::call("print", 1))?;
    cg.emit(Quad::Halt)?;

    info!("Emitted {} quads", cg.listing().len());
    Ok(())
}

fn write_listing(cg: &CodeGenerator, output: &OutputOptions) -> Result<()> {
    let style = output.render_style();
    match &output.output {
        Some(path) => {
            let file = create(path)?;
            cg.render_with(BufWriter::new(file), style)?;
            info!("Wrote listing to {}", path.display());
        }
        None => {
            cg.render_with(io::stdout().lock(), style)?;
        }
    }
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("Failed to create {}", path.display()))
}
