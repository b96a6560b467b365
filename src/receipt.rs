//! Receipt
//!
//! Terminal rendering of a basket: one row per grocery item showing where it
//! is bought and what it costs, followed by the store list and total.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{basket::Basket, solvers::BasketOutcome};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Writes a basket or search outcome as a table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Receipt {
    colors: bool,
}

impl Receipt {
    /// Plain output without ANSI escapes.
    pub fn plain() -> Self {
        Self { colors: false }
    }

    /// Output with ANSI colors for terminals.
    pub fn colored() -> Self {
        Self { colors: true }
    }

    /// Write a search outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_outcome(
        self,
        mut out: impl io::Write,
        outcome: &BasketOutcome<'_>,
    ) -> Result<(), ReceiptError> {
        match outcome {
            BasketOutcome::Found(basket) => self.write_to(out, basket),
            BasketOutcome::Infeasible => {
                writeln!(out, "\n No combination of stores covers the whole list.\n")
                    .map_err(|_err| ReceiptError::IO)
            }
            BasketOutcome::PartialTimeout { evaluated, total } => {
                let total = total.map_or_else(|| "?".to_string(), |total| total.to_string());

                writeln!(
                    out,
                    "\n Search stopped after {evaluated} of {total} store combinations; no result.\n"
                )
                .map_err(|_err| ReceiptError::IO)
            }
        }
    }

    /// Write a basket.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(
        self,
        mut out: impl io::Write,
        basket: &Basket<'_>,
    ) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Size", "Store", "Unit Price", "Qty", "Total"]);

        for (idx, assignment) in basket.iter().enumerate() {
            let item = assignment.item();
            let quote = assignment.quote();

            builder.push_record([
                format!("#{:<3}", idx + 1),
                item.name().to_string(),
                quote.size().or(item.size()).unwrap_or_default().to_string(),
                assignment.retailer().to_string(),
                format!("{}", quote.unit_price()),
                item.quantity().to_string(),
                format!("{}", assignment.line_cost()),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        table.with(theme);
        table.modify(Columns::new(4..), Alignment::right());

        if self.colors {
            table.modify(Rows::first(), Color::BOLD);
            table.modify(Columns::one(3), Color::FG_CYAN);
        }

        let table_str = if self.colors {
            dim_borders(&table.to_string())
        } else {
            table.to_string()
        };

        writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)?;

        self.write_summary(&mut out, basket)
    }

    fn write_summary(
        self,
        out: &mut impl io::Write,
        basket: &Basket<'_>,
    ) -> Result<(), ReceiptError> {
        let stores = basket.stores().join(", ");
        let total = basket.total();

        let (bold, reset) = if self.colors {
            ("\x1b[1m", "\x1b[0m")
        } else {
            ("", "")
        };

        writeln!(out, " Stores: {stores}").map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " {bold}Total:{reset}  {bold}{total}{reset}")
            .map_err(|_err| ReceiptError::IO)?;
        writeln!(out).map_err(|_err| ReceiptError::IO)
    }
}

const DIM: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

fn is_border(ch: char) -> bool {
    matches!(ch, '\u{2500}'..='\u{257F}')
}

/// Greys out the table frame so the prices stand out.
///
/// Each unbroken run of box-drawing characters gets one escape pair.
fn dim_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() * 2);
    let mut chars = table.chars().peekable();

    while let Some(ch) = chars.next() {
        if !is_border(ch) {
            out.push(ch);
            continue;
        }

        out.push_str(DIM);
        out.push(ch);

        while let Some(next) = chars.next_if(|next| is_border(*next)) {
            out.push(next);
        }

        out.push_str(RESET);
    }

    out
}
