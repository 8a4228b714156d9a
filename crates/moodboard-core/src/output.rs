//! Output formatting for boards: JSON, JSON Lines and HTML.
//!
//! JSON writes the whole [`Board`]; JSON Lines streams one image record per
//! line for piping into other tools; HTML renders a standalone page.

use serde::Serialize;
use std::io::{self, Write};

use crate::render;
use crate::types::Board;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The board as one JSON object
    Json,
    /// One image record per line (newline-delimited JSON)
    JsonLines,
    /// Standalone HTML page
    Html,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::JsonLines => "jsonl",
            Self::Html => "html",
        }
    }
}

/// A writer that serializes boards in the chosen format.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    items_written: usize,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// `pretty` only affects the JSON format.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            items_written: 0,
        }
    }

    /// Write a single serializable value as JSON, ignoring the format.
    pub fn write_json<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, item).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
        }
        writeln!(self.writer)?;
        self.items_written += 1;
        Ok(())
    }

    /// Write a board in the configured format.
    pub fn write_board(&mut self, board: &Board) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(board)?,
            OutputFormat::JsonLines => {
                // JSONL is never pretty-printed (one object per line)
                for image in &board.images {
                    serde_json::to_writer(&mut self.writer, image).map_err(io::Error::other)?;
                    writeln!(self.writer)?;
                    self.items_written += 1;
                }
            }
            OutputFormat::Html => {
                let html = render::page(board).map_err(io::Error::other)?;
                self.writer.write_all(html.as_bytes())?;
                self.items_written += 1;
            }
        }
        Ok(())
    }

    /// Number of JSON values (or pages) written.
    pub fn items_written(&self) -> usize {
        self.items_written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Consume the writer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
