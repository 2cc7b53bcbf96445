use std::io::{self, Write};

/// Writes the fixed-width scalar and array records that every block of the
/// document is serialized through. Consumers locate fields by name and
/// parse values positionally, so the widths, type tags, and per-type record
/// lengths here are wire contracts.
pub struct RecordWriter<W: Write> {
    out: W,
}

impl<W: Write> RecordWriter<W> {
    /// Items per data line, by element type.
    const INT_RECORD: usize = 6;
    const REAL_RECORD: usize = 5;
    const TEXT_RECORD: usize = 5;
    const LOGICAL_RECORD: usize = 72;

    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// 72-character left-justified document title line.
    pub fn title(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "{title:<72}")
    }

    /// Calculation type, method, and basis label in 10+30+30 columns.
    pub fn method_line(&mut self, calc_type: &str, method: &str, basis: &str) -> io::Result<()> {
        writeln!(self.out, "{calc_type:<10}{method:<30}{basis:<30}")
    }

    pub fn scalar_int(&mut self, name: &str, value: i64) -> io::Result<()> {
        writeln!(self.out, "{name:<40}   I     {value:>12}")
    }

    // Real scalars are tagged `I` in the files consumers already parse;
    // they key on the field name, not the tag.
    pub fn scalar_real(&mut self, name: &str, value: f64) -> io::Result<()> {
        writeln!(self.out, "{name:<40}   I     {}", scientific(value, 22, 15))
    }

    pub fn scalar_text(&mut self, name: &str, value: &str) -> io::Result<()> {
        writeln!(self.out, "{name:<40}   C     {value:<12}")
    }

    pub fn scalar_logical(&mut self, name: &str, value: bool) -> io::Result<()> {
        writeln!(self.out, "{name:<40}   L     {}", logical(value))
    }

    pub fn array_int(&mut self, name: &str, elements: &[i64]) -> io::Result<()> {
        self.array_header(name, 'I', elements.len())?;
        self.data_lines(elements, Self::INT_RECORD, |value| format!("{value:>12}"))
    }

    pub fn array_real(&mut self, name: &str, elements: &[f64]) -> io::Result<()> {
        self.array_header(name, 'R', elements.len())?;
        self.data_lines(elements, Self::REAL_RECORD, |value| scientific(*value, 16, 8))
    }

    pub fn array_text(&mut self, name: &str, elements: &[&str]) -> io::Result<()> {
        self.array_header(name, 'C', elements.len())?;
        self.data_lines(elements, Self::TEXT_RECORD, |value| format!("{value:<12}"))
    }

    // Logical arrays are tagged `C` as well, matching the files in the wild.
    pub fn array_logical(&mut self, name: &str, elements: &[bool]) -> io::Result<()> {
        self.array_header(name, 'C', elements.len())?;
        self.data_lines(elements, Self::LOGICAL_RECORD, |value| {
            logical(*value).to_string()
        })
    }

    fn array_header(&mut self, name: &str, tag: char, count: usize) -> io::Result<()> {
        writeln!(self.out, "{name:<40}   {tag}   N={count:>12}")
    }

    /// Chunks `elements` into full lines of `record_size` fields; the last
    /// line holds the remainder. An empty slice produces no lines at all.
    /// Contents are written as given, no validation against the header.
    fn data_lines<T>(
        &mut self,
        elements: &[T],
        record_size: usize,
        mut field: impl FnMut(&T) -> String,
    ) -> io::Result<()> {
        for chunk in elements.chunks(record_size) {
            let line: String = chunk.iter().map(&mut field).collect();
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }
}

fn logical(value: bool) -> char {
    if value {
        'T'
    } else {
        'F'
    }
}

/// Scientific notation in the fixed layout consumers parse: one leading
/// digit, `precision` fractional digits, lowercase `e`, a signed exponent
/// of at least two digits, right-justified in `width` columns.
fn scientific(value: f64, width: usize, precision: usize) -> String {
    let formatted = format!("{value:.precision$e}");
    // `{:e}` renders exponents bare (`e0`, `e-4`); rewrite as `e+00`.
    let (mantissa, exponent) = formatted
        .split_once('e')
        .expect("`{:e}` output always contains an exponent");
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{:>width$}", format!("{mantissa}e{sign}{digits:0>2}"))
}
