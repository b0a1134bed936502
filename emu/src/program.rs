//! # Program Loader
//!
//! Turns source text into the list of instruction lines and the label table.
//!
//! ```text
//!     MOV R0, #3      ; comment, dropped
//! loop:               ; label alone, points to the next instruction
//!     SUBS R0, R0, #1
//! done: NOP           ; label and instruction on the same line
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

use thiserror::Error;

const COMMENT: char = ';';
const LABEL_SEPARATOR: char = ':';

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("Error opening file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<String>,
    labels: HashMap<String, usize>,
}

impl Program {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProgramError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ProgramError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::parse(&source))
    }

    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut program = Self::default();

        for line in source.lines() {
            let line = line
                .split_once(COMMENT)
                .map_or(line, |(code, _)| code)
                .trim();

            if line.is_empty() {
                continue;
            }

            match line.split_once(LABEL_SEPARATOR) {
                Some((label, instruction)) => {
                    program.define_label(label.trim());

                    let instruction = instruction.trim();
                    if !instruction.is_empty() {
                        program.instructions.push(instruction.to_owned());
                    }
                }
                None => program.instructions.push(line.to_owned()),
            }
        }

        tracing::debug!(
            "loaded {} instructions, {} labels",
            program.instructions.len(),
            program.labels.len()
        );

        program
    }

    fn define_label(&mut self, label: &str) {
        let target = self.instructions.len();
        if let Some(previous) = self.labels.insert(label.to_owned(), target) {
            tracing::warn!("label '{label}' redefined ({previous} -> {target})");
        }
    }

    #[must_use]
    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    #[must_use]
    pub const fn labels(&self) -> &HashMap<String, usize> {
        &self.labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
