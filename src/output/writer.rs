use std::io::{self, BufWriter, Write};
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use serde_json::{Map, Value};
use tracing::debug;

use super::{OutputFormat, Record};

/// Drains rows from a channel into a sink on its own thread.
pub struct RecordWriter;

impl RecordWriter {
    /// Spawns the writer. It exits once every sender is dropped and returns
    /// the number of rows written.
    pub fn run(
        rx: Receiver<Record>,
        sink: Box<dyn Write + Send>,
        format: OutputFormat,
        columns: &'static [&'static str],
    ) -> io::Result<JoinHandle<io::Result<u64>>> {
        std::thread::Builder::new()
            .name("writer".into())
            .spawn(move || -> io::Result<u64> {
                let mut out = RowSink::open(sink, format, columns)?;

                let mut rows = 0u64;
                while let Ok(record) = rx.recv() {
                    out.write(columns, record)?;
                    rows += 1;
                }
                out.flush()?;
                debug!(rows, "writer finished");
                Ok(rows)
            })
    }
}

enum RowSink {
    Csv(csv::Writer<Box<dyn Write + Send>>),
    Json(BufWriter<Box<dyn Write + Send>>),
}

impl RowSink {
    /// CSV sinks get their header row here.
    fn open(sink: Box<dyn Write + Send>, format: OutputFormat, columns: &[&str]) -> io::Result<Self> {
        match format {
            OutputFormat::Csv => {
                let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(sink);
                wtr.write_record(columns)?;
                Ok(RowSink::Csv(wtr))
            }
            OutputFormat::Json => Ok(RowSink::Json(BufWriter::new(sink))),
        }
    }

    fn write(&mut self, columns: &[&str], record: Record) -> io::Result<()> {
        if record.len() != columns.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("row has {} values for {} columns", record.len(), columns.len()),
            ));
        }
        match self {
            RowSink::Csv(wtr) => {
                wtr.serialize(&record.0)?;
                Ok(())
            }
            RowSink::Json(out) => {
                let object: Map<String, Value> = columns
                    .iter()
                    .map(|c| c.to_string())
                    .zip(record.0)
                    .collect();
                serde_json::to_writer(&mut *out, &object)?;
                writeln!(out)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            RowSink::Csv(wtr) => wtr.flush(),
            RowSink::Json(out) => out.flush(),
        }
    }
}
