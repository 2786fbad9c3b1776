use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::SonoError;

/// Anything that yields acquisition frames one at a time
pub trait FrameSource: Send {
    /// Next frame, or `None` when the source is exhausted
    fn next_frame(&mut self) -> anyhow::Result<Option<Vec<f64>>>;
}

/// Frames stored as text, one frame per line
///
/// Samples are separated by commas and/or whitespace. Blank lines and
/// lines starting with `#` are skipped.
pub struct TextFrameSource<R> {
    reader: R,
    line_number: usize,
    line: String,
}

impl TextFrameSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TextFrameSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            line: String::new(),
        }
    }
}

/// Parse one line of samples
///
/// `line_number` is only used for error reporting.
pub fn parse_frame_line(line: &str, line_number: usize) -> Result<Vec<f64>, SonoError> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f64>().map_err(|_| SonoError::FrameParse {
                line: line_number,
                message: format!("invalid sample '{}'", token),
            })
        })
        .collect()
}

impl<R: BufRead + Send> FrameSource for TextFrameSource<R> {
    fn next_frame(&mut self) -> anyhow::Result<Option<Vec<f64>>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let trimmed = self.line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            return Ok(Some(parse_frame_line(trimmed, self.line_number)?));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_frames() {
        let text = "# frames\n1, 2, 3\n\n4 5\t6\n-1.5e2,0.25\n";
        let mut source = TextFrameSource::new(Cursor::new(text));

        assert_eq!(source.next_frame().unwrap(), Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(source.next_frame().unwrap(), Some(vec![4.0, 5.0, 6.0]));
        assert_eq!(source.next_frame().unwrap(), Some(vec![-150.0, 0.25]));
        assert_eq!(source.next_frame().unwrap(), None);
    }

    #[test]
    fn test_reports_line_number() {
        let text = "1,2\n# comment\n3,x\n";
        let mut source = TextFrameSource::new(Cursor::new(text));
        source.next_frame().unwrap();

        let err = source.next_frame().unwrap_err();
        match err.downcast_ref::<SonoError>() {
            Some(SonoError::FrameParse { line, message }) => {
                assert_eq!(*line, 3);
                assert!(message.contains('x'));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_frame_line_empty() {
        assert!(parse_frame_line(" , ,", 1).unwrap().is_empty());
    }
}
