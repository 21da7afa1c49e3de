use std::io::{Read, Write};
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::config::GenerationConfig;

/// Narrow seam to an external text generator: prompt in, free text out.
///
/// Implementations block with no retry; callers fall back to the
/// deterministic advice they already hold when a call fails.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("no generation command configured")]
    NoCommand,
    #[error("failed to spawn generator: {0}")]
    Spawn(String),
    #[error("generator i/o failed: {0}")]
    Io(String),
    #[error("generator exited with status {0}")]
    Status(i32),
    #[error("generator produced no output")]
    EmptyOutput,
}

/// Pipes the prompt through a configured external command's stdin and reads
/// its stdout.
pub struct CommandGenerator {
    command: String,
    args: Vec<String>,
}

impl CommandGenerator {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Option<Self> {
        config
            .command
            .as_ref()
            .map(|command| Self::new(command.clone(), config.args.clone()))
    }
}

impl TextGenerator for CommandGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        if self.command.is_empty() {
            return Err(GenerateError::NoCommand);
        }

        let mut cmd = Command::new(&self.command);
        if !self.args.is_empty() {
            cmd.args(&self.args);
        }
        cmd.stdin(Stdio::piped()).stdout(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|err| GenerateError::Spawn(err.to_string()))?;
        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| GenerateError::Io("stdin".into()))?;
            stdin
                .write_all(prompt.as_bytes())
                .map_err(|err| GenerateError::Io(err.to_string()))?;
        }

        let mut output = String::new();
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| GenerateError::Io("stdout".into()))?;
        stdout
            .read_to_string(&mut output)
            .map_err(|err| GenerateError::Io(err.to_string()))?;

        let status = child.wait().map_err(|err| GenerateError::Io(err.to_string()))?;
        if !status.success() {
            return Err(GenerateError::Status(status.code().unwrap_or(-1)));
        }
        if output.trim().is_empty() {
            return Err(GenerateError::EmptyOutput);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let generator = CommandGenerator::new("definitely-not-a-real-binary-xyz", vec![]);
        assert!(matches!(
            generator.generate("hello"),
            Err(GenerateError::Spawn(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn cat_echoes_the_prompt_back() {
        let generator = CommandGenerator::new("cat", vec![]);
        let output = generator.generate("REPLACE: A -> B — reason: test").unwrap();
        assert!(output.contains("REPLACE: A -> B"));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_a_status_error() {
        let generator = CommandGenerator::new("false", vec![]);
        assert!(matches!(
            generator.generate("hello"),
            Err(GenerateError::Status(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn silent_success_is_an_empty_output_error() {
        let generator = CommandGenerator::new("true", vec![]);
        assert!(matches!(
            generator.generate("hello"),
            Err(GenerateError::EmptyOutput)
        ));
    }
}
