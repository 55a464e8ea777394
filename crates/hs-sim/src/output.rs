//! CSV hop export.

use std::io::Write;

use csv::Writer;
use thiserror::Error;

use hs_core::{NodeId, Step};
use hs_graph::SimulationGraph;

use crate::{Hop, SimObserver};

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// A [`SimObserver`] that writes one `participant,from,to,timestamp` row per
/// hop.
///
/// Observer hooks cannot fail, so the first write error is stored; check it
/// with [`take_error`](Self::take_error) after the run.
pub struct HopCsvObserver<W: Write> {
    writer:     Writer<W>,
    last_error: Option<OutputError>,
}

impl<W: Write> HopCsvObserver<W> {
    /// Wrap `inner` and write the header row.
    pub fn new(inner: W) -> OutputResult<Self> {
        let mut writer = Writer::from_writer(inner);
        writer.write_record(["participant", "from", "to", "timestamp"])?;
        Ok(Self { writer, last_error: None })
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

fn node_key(graph: &SimulationGraph, node: NodeId) -> String {
    graph
        .key(node)
        .map_or_else(|| node.0.to_string(), str::to_owned)
}

impl<W: Write> SimObserver for HopCsvObserver<W> {
    fn on_hop(&mut self, participant: &str, hop: &Hop, graph: &SimulationGraph) {
        let result = self
            .writer
            .write_record([
                participant.to_owned(),
                node_key(graph, hop.from),
                node_key(graph, hop.to),
                hop.timestamp.to_string(),
            ])
            .map_err(OutputError::from);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_step: Step) {
        let result = self.writer.flush().map_err(OutputError::from);
        self.store_err(result);
    }
}
