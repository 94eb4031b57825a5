//! Generates the binomial and trinomial coefficient tables and prints them as source literals.

use std::fs;
use std::io::{self, Write as _};
use std::path::PathBuf;

use bernstein_coefficients::emit::{self, ElementWidth, EmitError, EmitOptions, Format, TableKind};
use bernstein_coefficients::{
    CoefficientError, DEFAULT_MAX_DEGREE, MAX_EXACT_DEGREE, binomial_table, generate_tables,
    trinomial_table,
};
use clap::{Parser, ValueEnum};
use snafu::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "make-coefficients",
    version,
    about = "Generate binomial and trinomial coefficient tables for Bezier curves and triangles"
)]
struct Cli {
    /// Highest polynomial degree in the tables
    #[arg(
        long,
        short = 'n',
        default_value_t = DEFAULT_MAX_DEGREE,
        value_parser = clap::value_parser!(u8).range(0..=MAX_EXACT_DEGREE as i64)
    )]
    max_degree: u8,

    /// Which tables to generate
    #[arg(long, value_enum, default_value_t = TableArg::Both)]
    table: TableArg,

    /// Output syntax
    #[arg(long, short, value_enum, default_value_t = FormatArg::C)]
    format: FormatArg,

    /// Element type of the emitted arrays
    #[arg(long, short, value_enum, default_value_t = WidthArg::U16)]
    width: WidthArg,

    /// Write to FILE instead of stdout
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum TableArg {
    Binomial,
    Trinomial,
    Both,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum FormatArg {
    C,
    Rust,
    Plain,
}

impl FormatArg {
    fn as_format(self) -> Format {
        match self {
            FormatArg::C => Format::C,
            FormatArg::Rust => Format::Rust,
            FormatArg::Plain => Format::Plain,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum WidthArg {
    U8,
    U16,
    U32,
    U64,
}

impl WidthArg {
    fn as_width(self) -> ElementWidth {
        match self {
            WidthArg::U8 => ElementWidth::U8,
            WidthArg::U16 => ElementWidth::U16,
            WidthArg::U32 => ElementWidth::U32,
            WidthArg::U64 => ElementWidth::U64,
        }
    }
}

#[derive(Debug, Snafu)]
enum CliError {
    #[snafu(display("Could not generate coefficient tables"))]
    Generate { source: CoefficientError },

    #[snafu(display("Could not render coefficient tables"))]
    Render { source: EmitError },

    #[snafu(display("Could not write {}", path.display()))]
    WriteFile { path: PathBuf, source: io::Error },

    #[snafu(display("Could not write to stdout"))]
    WriteStdout { source: io::Error },
}

#[snafu::report]
fn main() -> Result<(), CliError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    log::debug!("{cli:?}");

    let options = EmitOptions {
        format: cli.format.as_format(),
        width: cli.width.as_width(),
    };

    // Render everything before touching the destination so a failure never leaves partial output.
    let mut rendered = Vec::new();
    match cli.table {
        TableArg::Both => {
            let tables = generate_tables(cli.max_degree).context(GenerateSnafu)?;
            emit::write_tables(&mut rendered, &tables, options).context(RenderSnafu)?;
        }
        TableArg::Binomial => {
            let table = binomial_table(cli.max_degree).context(GenerateSnafu)?;
            emit::write_table(&mut rendered, TableKind::Binomial, &table, options)
                .context(RenderSnafu)?;
        }
        TableArg::Trinomial => {
            let table = trinomial_table(cli.max_degree).context(GenerateSnafu)?;
            emit::write_table(&mut rendered, TableKind::Trinomial, &table, options)
                .context(RenderSnafu)?;
        }
    }

    match cli.output {
        Some(path) => {
            fs::write(&path, &rendered).context(WriteFileSnafu { path: &path })?;
            log::info!("Wrote {} bytes to {}", rendered.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&rendered).context(WriteStdoutSnafu)?;
            stdout.flush().context(WriteStdoutSnafu)?;
        }
    }
    Ok(())
}
