//! Rendering of finished coefficient tables as source literals or plain text.
//!
//! This is purely presentation: values and layout come from the table unchanged, only narrowed
//! to the requested element width. A value that does not fit is an error for the whole table,
//! so nothing is rendered from a table that cannot be represented exactly.

use std::{fmt, io};

use snafu::prelude::*;

use crate::{CoefficientTable, CoefficientTables};

const INDENT: &str = "    ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
    Binomial,
    Trinomial,
}

impl TableKind {
    fn c_name(self) -> &'static str {
        match self {
            TableKind::Binomial => "binomial_coefficient",
            TableKind::Trinomial => "trinomial_coefficient",
        }
    }

    fn max_degree_name(self) -> &'static str {
        match self {
            TableKind::Binomial => "BINOMIAL_COEFFICIENT_TABLE_MAX_N",
            TableKind::Trinomial => "TRINOMIAL_COEFFICIENT_TABLE_MAX_N",
        }
    }

    fn rust_name(self) -> &'static str {
        match self {
            TableKind::Binomial => "BINOMIAL_COEFFICIENTS",
            TableKind::Trinomial => "TRINOMIAL_COEFFICIENTS",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Binomial => f.write_str("binomial"),
            TableKind::Trinomial => f.write_str("trinomial"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// `static const` C array with one brace level per dimension.
    #[default]
    C,
    /// `pub const` Rust array.
    Rust,
    /// Whitespace-separated rows, with a blank line between degree blocks of 3D tables.
    Plain,
}

/// Integer type of the emitted array elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ElementWidth {
    U8,
    #[default]
    U16,
    U32,
    U64,
}

impl ElementWidth {
    pub fn max_value(self) -> u64 {
        match self {
            ElementWidth::U8 => u8::MAX as u64,
            ElementWidth::U16 => u16::MAX as u64,
            ElementWidth::U32 => u32::MAX as u64,
            ElementWidth::U64 => u64::MAX,
        }
    }

    /// Narrowest width able to hold `value`.
    pub fn smallest_fitting(value: u64) -> Self {
        [ElementWidth::U8, ElementWidth::U16, ElementWidth::U32]
            .into_iter()
            .find(|width| value <= width.max_value())
            .unwrap_or(ElementWidth::U64)
    }

    fn c_type(self) -> &'static str {
        match self {
            ElementWidth::U8 => "uint8_t",
            ElementWidth::U16 => "uint16_t",
            ElementWidth::U32 => "uint32_t",
            ElementWidth::U64 => "uint64_t",
        }
    }

    fn rust_type(self) -> &'static str {
        match self {
            ElementWidth::U8 => "u8",
            ElementWidth::U16 => "u16",
            ElementWidth::U32 => "u32",
            ElementWidth::U64 => "u64",
        }
    }
}

impl fmt::Display for ElementWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rust_type())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmitOptions {
    pub format: Format,
    pub width: ElementWidth,
}

#[derive(Debug, Snafu)]
pub enum EmitError {
    #[snafu(display(
        "{} coefficient {} at {:?} does not fit in {}",
        table,
        value,
        coord,
        width
    ))]
    ValueTooWide {
        table: TableKind,
        value: u64,
        coord: Vec<usize>,
        width: ElementWidth,
    },

    #[snafu(display("Failed to write {} table", table))]
    Write {
        table: TableKind,
        source: io::Error,
    },
}

/// A table checked against its element width, ready to be displayed.
pub struct TableLiteral<'a, const NDIM: usize> {
    kind: TableKind,
    table: &'a CoefficientTable<NDIM>,
    options: EmitOptions,
}

impl<'a, const NDIM: usize> TableLiteral<'a, NDIM> {
    pub fn new(
        kind: TableKind,
        table: &'a CoefficientTable<NDIM>,
        options: EmitOptions,
    ) -> Result<Self, EmitError> {
        let max = options.width.max_value();
        if let Some((index, &value)) = table
            .as_slice()
            .iter()
            .enumerate()
            .find(|&(_, &value)| value > max)
        {
            return ValueTooWideSnafu {
                table: kind,
                value,
                coord: unflat_index(index, table.width(), NDIM),
                width: options.width,
            }
            .fail();
        }
        Ok(Self {
            kind,
            table,
            options,
        })
    }

    fn write_c_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max_name = self.kind.max_degree_name();
        writeln!(f, "#define {} {}", max_name, self.table.max_degree())?;
        write!(
            f,
            "static const {} {}",
            self.options.width.c_type(),
            self.kind.c_name()
        )?;
        for _ in 0..NDIM {
            write!(f, "[{max_name} + 1]")?;
        }
        writeln!(f, " = {{")
    }

    fn write_rust_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max_name = self.kind.max_degree_name();
        writeln!(f, "pub const {}: usize = {};", max_name, self.table.max_degree())?;
        let mut array_type = self.options.width.rust_type().to_string();
        for _ in 0..NDIM {
            array_type = format!("[{array_type}; {max_name} + 1]");
        }
        writeln!(f, "pub const {}: {} = [", self.kind.rust_name(), array_type)
    }

    // Writes one nested initializer for `cells`, which spans `dims` dimensions.
    fn write_block(
        &self,
        f: &mut fmt::Formatter<'_>,
        cells: &[u64],
        dims: usize,
        depth: usize,
        degree_label: Option<usize>,
    ) -> fmt::Result {
        let (open, close) = match self.options.format {
            Format::C => ('{', '}'),
            _ => ('[', ']'),
        };
        let indent = INDENT.repeat(depth);

        if dims <= 1 {
            write!(f, "{indent}{open}")?;
            write_values(f, cells, ", ")?;
            write!(f, "{close},")?;
            if let Some(n) = degree_label {
                write!(f, " // n={n}")?;
            }
            return writeln!(f);
        }

        write!(f, "{indent}{open}")?;
        if let Some(n) = degree_label {
            write!(f, " // n={n}")?;
        }
        writeln!(f)?;
        let chunk = cells.len() / self.table.width();
        for sub in cells.chunks_exact(chunk) {
            self.write_block(f, sub, dims - 1, depth + 1, None)?;
        }
        writeln!(f, "{indent}{close},")
    }

    fn write_plain(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows_per_block = self.table.num_rows() / self.table.width();
        for (r, row) in self.table.rows().enumerate() {
            if NDIM > 2 && r > 0 && r % rows_per_block == 0 {
                writeln!(f)?;
            }
            write_values(f, row, " ")?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<const NDIM: usize> fmt::Display for TableLiteral<'_, NDIM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let closing = match self.options.format {
            Format::Plain => return self.write_plain(f),
            Format::C => {
                self.write_c_header(f)?;
                "};"
            }
            Format::Rust => {
                self.write_rust_header(f)?;
                "];"
            }
        };

        let block_len = self.table.strides()[0];
        for (n, block) in self.table.as_slice().chunks_exact(block_len).enumerate() {
            let label = (NDIM > 2).then_some(n);
            self.write_block(f, block, NDIM - 1, 1, label)?;
        }
        writeln!(f, "{closing}")
    }
}

fn write_values(f: &mut fmt::Formatter<'_>, values: &[u64], separator: &str) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

fn unflat_index(index: usize, width: usize, ndim: usize) -> Vec<usize> {
    let mut coord = vec![0usize; ndim];
    let mut remainder = index;
    for d in (0..ndim).rev() {
        coord[d] = remainder % width;
        remainder /= width;
    }
    coord
}

pub fn write_table<const NDIM: usize>(
    out: &mut impl io::Write,
    kind: TableKind,
    table: &CoefficientTable<NDIM>,
    options: EmitOptions,
) -> Result<(), EmitError> {
    let literal = TableLiteral::new(kind, table, options)?;
    log::debug!(
        "Writing {} table of degree {} as {:?} {}",
        kind,
        table.max_degree(),
        options.format,
        options.width
    );
    write!(out, "{literal}").context(WriteSnafu { table: kind })
}

/// Writes the binomial table then the trinomial table, separated by a blank line.
///
/// Both tables are checked against the element width before either is written.
pub fn write_tables(
    out: &mut impl io::Write,
    tables: &CoefficientTables,
    options: EmitOptions,
) -> Result<(), EmitError> {
    let binomial = TableLiteral::new(TableKind::Binomial, &tables.binomial, options)?;
    let trinomial = TableLiteral::new(TableKind::Trinomial, &tables.trinomial, options)?;
    writeln!(out, "{binomial}").context(WriteSnafu {
        table: TableKind::Binomial,
    })?;
    write!(out, "{trinomial}").context(WriteSnafu {
        table: TableKind::Trinomial,
    })
}
