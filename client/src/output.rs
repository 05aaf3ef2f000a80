//! Streaming JSON output.

use crate::error::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes items as a pretty-printed JSON array, one item at a time.
///
/// Nothing is buffered beyond the underlying writer, so partial output is a
/// prefix of a valid array until [`JsonArrayWriter::finish`] closes it.
pub struct JsonArrayWriter<W: Write> {
    writer: W,
    count: usize,
}

impl<W: Write> JsonArrayWriter<W> {
    pub fn new(mut writer: W) -> Result<Self> {
        writer.write_all(b"[")?;
        Ok(Self { writer, count: 0 })
    }

    pub fn write_item<T: Serialize>(&mut self, item: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(item)?;
        if self.count > 0 {
            self.writer.write_all(b",")?;
        }
        for line in json.lines() {
            self.writer.write_all(b"\n  ")?;
            self.writer.write_all(line.as_bytes())?;
        }
        self.count += 1;
        Ok(())
    }

    /// Items written so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Close the array and flush.
    pub fn finish(mut self) -> Result<W> {
        if self.count > 0 {
            self.writer.write_all(b"\n")?;
        }
        self.writer.write_all(b"]\n")?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Open the output destination: the given file, or stdout.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn empty_array() {
        let out = JsonArrayWriter::new(Vec::new()).unwrap().finish().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }

    #[test]
    fn items_form_a_valid_array() {
        let mut writer = JsonArrayWriter::new(Vec::new()).unwrap();
        writer.write_item(&json!({"productId": "1", "tags": ["a", "b"]})).unwrap();
        writer.write_item(&json!({"productId": "2"})).unwrap();
        assert_eq!(writer.count(), 2);

        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert!(out.starts_with("[\n  {\n    \"productId\": \"1\""));

        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[1]["productId"], "2");
    }
}
