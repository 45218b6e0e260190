use std::process;

use clap::Parser;
use colored::Colorize;
use rustig::{
    cli::Args, run::run_with_options, Assembler, ShortReadPolicy, SimplifyOptions,
};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if !args.quiet {
        println!("{}: {}", "k-size".bold(), args.k.to_string().blue().bold());
        println!(
            "{}: {}",
            "reads".bold(),
            args.input.display().to_string().underline().bold().blue()
        );
        println!(
            "{}: {}",
            "contigs".bold(),
            args.output
                .as_ref()
                .map_or_else(|| "stdout".to_string(), |p| p.display().to_string())
                .blue()
                .bold()
        );
        println!();
    }

    let assembler = Assembler::new()
        .k(args.k)
        .unwrap_or_else(|e| {
            eprintln!(
                "{}\n {}",
                "Problem with k-mer size:".blue().bold(),
                e.to_string().blue()
            );
            process::exit(1);
        })
        .simplify_options(SimplifyOptions {
            max_tip_hops: args.max_tip_hops,
            max_bubble_hops: args.max_bubble_hops,
            max_rounds: args.max_rounds,
        })
        .short_reads(if args.skip_short_reads {
            ShortReadPolicy::Skip
        } else {
            ShortReadPolicy::Error
        })
        .min_len(args.min_len);

    if let Err(e) = run_with_options(
        &args.input,
        args.output.as_deref(),
        &assembler,
        args.input_format,
        args.format,
    ) {
        eprintln!(
            "{}\n {}",
            "Assembly error:".blue().bold(),
            e.to_string().blue()
        );
        process::exit(1);
    }
}
