use super::OutputWriter;
use crate::errors::Result;
use crate::schema::ComponentCommands;
use std::io::Write;

pub struct YamlWriter<W: Write> {
    writer: W,
}

impl<W: Write> YamlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for YamlWriter<W> {
    fn write_results(&mut self, results: &[ComponentCommands]) -> Result<()> {
        serde_yaml::to_writer(&mut self.writer, results)?;
        Ok(())
    }
}
