use super::OutputWriter;
use crate::errors::Result;
use crate::schema::ComponentCommands;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_results(&mut self, results: &[ComponentCommands]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, results)?;
        writeln!(self.writer)?;
        Ok(())
    }
}
