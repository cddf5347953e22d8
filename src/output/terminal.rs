use super::OutputWriter;
use crate::errors::Result;
use crate::schema::{CommandTypeShape, ComponentCommands};
use colored::*;
use std::io::Write;

/// Human-readable summary, one line per command
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_component(&mut self, component: &ComponentCommands) -> Result<()> {
        writeln!(
            self.writer,
            "{} {} ({})",
            component.type_name.bold().blue(),
            format!("[{} commands]", component.commands.len()).dimmed(),
            component.path.display()
        )?;
        for command in &component.commands {
            writeln!(self.writer, "  {}", format_command(command))?;
        }
        Ok(())
    }
}

fn format_command(command: &CommandTypeShape) -> String {
    let parameters: Vec<String> = command
        .parameters
        .iter()
        .map(|p| format!("{}: {}", p.name, p.kind.to_string().cyan()))
        .collect();
    let marker = if command.optional { "?" } else { "" };
    format!("{}{}({})", command.name.green(), marker, parameters.join(", "))
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_results(&mut self, results: &[ComponentCommands]) -> Result<()> {
        for component in results {
            self.write_component(component)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample;

    #[test]
    fn test_terminal_lists_every_command() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_results(&sample())
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("NativeCommands [2 commands]"));
        assert!(text.contains("  focus(durationMs: Int32)"));
        assert!(text.contains("  blur?()"));
    }
}
