//! Report dispatch: external node or board layout.

use crate::board::BoardIdentifier;
use crate::config::ReportConfig;
use crate::error::{Error, Result};
use crate::external::NodeRegistry;
use crate::gpio::PinStateReader;
use crate::layout::BoardLayout;
use crate::pins::PinTableSource;
use crate::render::Renderer;
use log::{debug, warn};
use std::io::{self, Write};

/// Everything one pin report needs, borrowed from the caller.
///
/// The registry and configuration are read, never modified, so they stay
/// the same for the whole report.
pub struct Readall<'a> {
    board: &'a dyn BoardIdentifier,
    tables: &'a dyn PinTableSource,
    reader: &'a dyn PinStateReader,
    nodes: &'a NodeRegistry,
    config: ReportConfig,
}

impl<'a> Readall<'a> {
    pub fn new(
        board: &'a dyn BoardIdentifier,
        tables: &'a dyn PinTableSource,
        reader: &'a dyn PinStateReader,
        nodes: &'a NodeRegistry,
        config: ReportConfig,
    ) -> Self {
        Readall {
            board,
            tables,
            reader,
            nodes,
            config,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Writes the pin report to `out`.
    ///
    /// A registered external node takes over the whole report and the board
    /// is not identified at all. Otherwise the layout and the pin table are
    /// both chosen from the identified board. An unrecognized board, or one
    /// without a pin table, produces a single diagnostic line instead of a
    /// table. Only failures writing to `out` are returned as errors.
    pub fn generate_report(&self, out: &mut dyn Write) -> Result<()> {
        if let Some(node) = self.nodes.current() {
            return node.render(out);
        }

        let info = self.board.identify();
        debug!("Identified board: {:?}", info);

        let selected = BoardLayout::select(&info, &self.config).and_then(|layout| {
            let variant = self.config.resolve_orange_pi_variant()?;
            let pins = self
                .tables
                .table_for(&info, variant)
                .ok_or(Error::NoPinTable { model: info.model })?;
            Ok((layout, pins))
        });

        let (layout, pins) = match selected {
            Ok(selected) => selected,
            Err(
                e @ (Error::UnknownBoardModel { .. }
                | Error::VariantNotConfigured
                | Error::UnknownVariant(_)
                | Error::NoPinTable { .. }),
            ) => {
                warn!("No report layout: {}", e);
                writeln!(out, "Oops - {}", e)?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        Renderer::new(pins, self.reader, self.config.numbering).render_layout(&layout, out)
    }

    /// Writes the pin report to standard output.
    pub fn print_report(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.generate_report(&mut out)?;
        out.flush()?;
        Ok(())
    }
}
