use crate::ParcelnetError;
use csv::{QuoteStyle, StringRecord};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use std::{
    collections::HashMap,
    fs::File,
    io::{Read, Write},
    path::Path,
};

/// opens a CSV file with headers. files ending in `.gz` are decompressed.
pub fn open_reader(file: &str) -> Result<csv::Reader<Box<dyn Read>>, ParcelnetError> {
    let f = File::open(file).map_err(|e| {
        ParcelnetError::CsvReadError(String::from(file), csv::Error::from(e))
    })?;
    let inner: Box<dyn Read> = if file.ends_with(".gz") {
        Box::new(GzDecoder::new(f))
    } else {
        Box::new(f)
    };
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(inner);
    Ok(reader)
}

/// maps each header name to its column index
pub fn header_lookup<R: Read>(
    reader: &mut csv::Reader<R>,
    file: &str,
) -> Result<HashMap<String, usize>, ParcelnetError> {
    let headers = reader
        .headers()
        .map_err(|e| ParcelnetError::CsvReadError(String::from(file), e))?;
    let lookup = headers
        .iter()
        .enumerate()
        .map(|(i, s)| (s.trim().to_string(), i))
        .collect::<HashMap<_, _>>();
    Ok(lookup)
}

/// finds the index of a required column
pub fn column_index(
    headers: &HashMap<String, usize>,
    column: &str,
    file: &str,
) -> Result<usize, ParcelnetError> {
    headers.get(column).copied().ok_or_else(|| {
        ParcelnetError::ConfigurationError(format!("file {file} missing '{column}' column"))
    })
}

/// gets a trimmed field from a row by column index
pub fn get_field<'a>(
    row: &'a StringRecord,
    idx: usize,
    column: &str,
) -> Result<&'a str, String> {
    row.get(idx)
        .map(str::trim)
        .ok_or_else(|| format!("row missing value for column '{column}' at index {idx}"))
}

/// destination of a CSV writer. gzip output must be finished explicitly so that
/// failures writing the trailer are reported.
pub enum OutputSink {
    Plain(File),
    Gzip(GzEncoder<File>),
}

impl OutputSink {
    pub fn finish(self) -> std::io::Result<()> {
        match self {
            OutputSink::Plain(mut f) => f.flush(),
            OutputSink::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            OutputSink::Plain(f) => f.write(buf),
            OutputSink::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            OutputSink::Plain(f) => f.flush(),
            OutputSink::Gzip(encoder) => encoder.flush(),
        }
    }
}

/// creates a CSV writer and writes the header row right away, so a file with no
/// rows still carries its header. files ending in `.gz` are gzip compressed.
/// parent directories are created as needed. an existing file is only replaced
/// when `overwrite` is set.
pub fn create_writer(
    file: &str,
    header: &[&str],
    overwrite: bool,
) -> Result<csv::Writer<OutputSink>, ParcelnetError> {
    let filepath = Path::new(file);
    if filepath.exists() && !overwrite {
        return Err(ParcelnetError::OutputExists(String::from(file)));
    }
    if let Some(parent) = filepath.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            std::fs::create_dir_all(parent).map_err(|e| {
                let msg = format!(
                    "error building output directory '{}': {e}",
                    parent.to_str().unwrap_or_default()
                );
                ParcelnetError::ConfigurationError(msg)
            })?;
        }
    }
    let f = File::create(filepath)?;
    let sink = if file.ends_with(".gz") {
        OutputSink::Gzip(GzEncoder::new(f, Compression::default()))
    } else {
        OutputSink::Plain(f)
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(sink);
    writer
        .write_record(header)
        .map_err(|e| ParcelnetError::CsvWriteError(String::from(file), e))?;
    Ok(writer)
}

/// flushes a writer from [`create_writer`] and finishes its compression stream.
pub fn finish_writer(
    writer: csv::Writer<OutputSink>,
    file: &str,
) -> Result<(), ParcelnetError> {
    let sink = writer.into_inner().map_err(|e| {
        ParcelnetError::CsvWriteError(String::from(file), csv::Error::from(e.into_error()))
    })?;
    sink.finish()?;
    Ok(())
}
