use csv::{ReaderBuilder, Trim};

const BOM: char = '\u{feff}';

/// One CSV record and the file line it starts on (1-based).
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub line: u64,
    pub fields: Vec<String>,
}

/// Split CSV text into rows of trimmed fields.
///
/// Fields are comma-separated; double quotes protect embedded commas and
/// newlines, and `""` inside quotes is a literal quote. Malformed quoting
/// yields whatever boundaries the reader settles on rather than an error.
/// Rows whose fields are all blank are dropped.
pub fn parse_rows(text: &str) -> Vec<Row> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut lines = LineCounter::new(text.as_bytes());
    reader
        .records()
        .filter_map(|record| match record {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("Skipping unreadable CSV row: {e}");
                None
            }
        })
        .map(|record| Row {
            line: lines.line_at(record.position().map_or(0, |pos| pos.byte())),
            fields: record.iter().map(str::to_string).collect(),
        })
        .filter(|row| row.fields.iter().any(|f| !f.is_empty()))
        .collect()
}

/// Maps record start offsets to 1-based line numbers. Offsets must be
/// visited in increasing order.
struct LineCounter<'a> {
    bytes: &'a [u8],
    offset: usize,
    line: u64,
}

impl<'a> LineCounter<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, byte: u64) -> u64 {
        let mut start = usize::try_from(byte).unwrap_or(usize::MAX).min(self.bytes.len());
        // The reader skips empty lines between records; the record itself
        // begins after them.
        while matches!(self.bytes.get(start), Some(b'\n' | b'\r')) {
            start += 1;
        }
        if start > self.offset {
            self.line += self.bytes[self.offset..start]
                .iter()
                .filter(|b| **b == b'\n')
                .count() as u64;
            self.offset = start;
        }
        self.line
    }
}
