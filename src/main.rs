use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing_chrome::{ChromeLayerBuilder, FlushGuard};
use tracing_subscriber::prelude::*;

use isa6502::{
    catalog::CATALOG,
    instruction::INSTRUCTION_SET,
    syntax::{matcher::parse_operand, render::render_operand_string},
};

#[derive(Parser)]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[clap(long)]
    #[clap(help = "Enable chrome tracing")]
    #[clap(long_help = "Enable chrome tracing which on program exit will generate
a json file to be opened with a chrome tracing compatible
viewer.")]
    trace: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[clap(about = "List the addressing modes")]
    #[clap(aliases = &["m", "amodes"])]
    Modes,
    #[clap(about = "List the instruction set")]
    #[clap(aliases = &["i", "insts"])]
    Instructions,
    #[clap(about = "Format a mode's assembly syntax, optionally with an operand")]
    #[clap(aliases = &["r"])]
    Render(RenderArgs),
    #[clap(about = "Match operand text to an addressing mode")]
    #[clap(aliases = &["p"])]
    Parse(ParseArgs),
}

#[derive(Args)]
struct RenderArgs {
    #[clap(help = "Three letter addressing mode code, e.g. ABS")]
    mode: String,
    #[clap(help = "Operand text to substitute for the placeholder")]
    operand: Option<String>,
}

#[derive(Args)]
struct ParseArgs {
    #[clap(help = "Operand text as typed after a mnemonic, e.g. '(4A,X)'")]
    text: String,
}

fn modes() {
    println!("aix  code  len  syntax      description");
    for (aix, mode) in CATALOG.modes().iter().enumerate().skip(1) {
        println!(
            "{:3}  {}   {:3}  {:10}  {}",
            aix, mode.code, mode.bytes, mode.syntax, mode.description
        );
    }
}

fn instructions() {
    println!("iix  name  flags     description");
    for (iix, ins) in INSTRUCTION_SET.instructions().iter().enumerate().skip(1) {
        println!(
            "{:3}  {}   {}  {}",
            iix, ins.mnemonic, ins.flags, ins.description
        );
    }
}

fn render(args: &RenderArgs) -> Result<()> {
    let aix = CATALOG.find(&args.mode);
    if aix == isa6502::catalog::SENTINEL {
        bail!("Unknown addressing mode '{}'", args.mode);
    }
    let mode = CATALOG.get(aix);
    println!("{}", render_operand_string(mode, args.operand.as_deref()));
    Ok(())
}

fn parse(args: &ParseArgs) -> Result<()> {
    let matched = parse_operand(&CATALOG, &args.text);
    if !matched.is_match() {
        bail!("Unrecognized addressing mode syntax: '{}'", args.text);
    }
    let mode = CATALOG.get(matched.aix);
    println!("{}  operand '{}'", mode.code, matched.operand);
    Ok(())
}

pub fn trace() -> FlushGuard {
    let (chrome_layer, guard) = ChromeLayerBuilder::new().build();
    tracing_subscriber::registry().with(chrome_layer).init();

    guard
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _trace_guard = if cli.trace { Some(trace()) } else { None };

    match &cli.command {
        Command::Modes => {
            modes();
            Ok(())
        }
        Command::Instructions => {
            instructions();
            Ok(())
        }
        Command::Render(args) => render(args),
        Command::Parse(args) => parse(args),
    }
}
