//! Feature table reader.

use std::io::{self, BufRead};

use thiserror::Error;

use super::{Feature, FeatureTable, Interval, Kind, Qualifier};
use crate::endpoint::{self, Endpoint};

const HEADER_PREFIX: &str = ">Feature";
const DELIMITER: char = '\t';

pub struct Reader<R> {
    inner: R,
}

impl<R> Reader<R>
where
    R: BufRead,
{
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Reads a single feature table.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferry::feature_table;
    ///
    /// let data = b">Feature sq0\n1\t8\tgene\n\t\t\tgene\tNDLS\n";
    /// let mut reader = feature_table::Reader::new(&data[..]);
    ///
    /// let table = reader.read_feature_table()?;
    /// assert_eq!(table.reference_sequence_name(), "sq0");
    /// assert_eq!(table.features().len(), 1);
    /// # Ok::<_, feature_table::reader::ReadError>(())
    /// ```
    pub fn read_feature_table(&mut self) -> Result<FeatureTable, ReadError> {
        let mut buf = String::new();
        let mut line_number = 0;

        let mut reference_sequence_name = None;
        let mut features: Vec<Feature> = Vec::new();

        loop {
            buf.clear();

            if read_line(&mut self.inner, &mut buf)? == 0 {
                break;
            }

            line_number += 1;

            let result = parse_line(&buf).and_then(|line| {
                apply_line(line, &mut reference_sequence_name, &mut features)
            });

            result.map_err(|kind| ReadError::Parse(ParseError { line_number, kind }))?;
        }

        let reference_sequence_name = reference_sequence_name.ok_or(ReadError::MissingHeader)?;

        Ok(FeatureTable::new(reference_sequence_name, features))
    }
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error")]
    Io(#[from] io::Error),
    #[error("missing >Feature header")]
    MissingHeader,
    #[error("invalid feature table")]
    Parse(#[from] ParseError),
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("invalid line {line_number}")]
pub struct ParseError {
    line_number: usize,
    #[source]
    kind: ParseErrorKind,
}

impl ParseError {
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParseErrorKind {
    #[error("missing sequence name")]
    MissingName,
    #[error("unexpected second >Feature header")]
    DuplicateHeader,
    #[error("unexpected line")]
    UnexpectedLine,
    #[error("missing endpoint")]
    MissingEndpoint,
    #[error("invalid endpoint")]
    InvalidEndpoint(#[source] endpoint::ParseError),
    #[error("line does not follow a feature")]
    MissingFeature,
    #[error("missing qualifier key")]
    MissingQualifierKey,
}

enum Line<'a> {
    Blank,
    Header(&'a str),
    Interval(Interval, Option<Kind>),
    Qualifier(Qualifier),
}

fn read_line<R>(reader: &mut R, buf: &mut String) -> io::Result<usize>
where
    R: BufRead,
{
    const LINE_FEED: char = '\n';
    const CARRIAGE_RETURN: char = '\r';

    match reader.read_line(buf)? {
        0 => Ok(0),
        n => {
            if buf.ends_with(LINE_FEED) {
                buf.pop();

                if buf.ends_with(CARRIAGE_RETURN) {
                    buf.pop();
                }
            }

            Ok(n)
        }
    }
}

fn parse_line(s: &str) -> Result<Line<'_>, ParseErrorKind> {
    if s.trim().is_empty() {
        Ok(Line::Blank)
    } else if let Some(t) = s.strip_prefix(HEADER_PREFIX) {
        parse_header(t).map(Line::Header)
    } else if s.starts_with(DELIMITER) {
        parse_qualifier(s).map(Line::Qualifier)
    } else {
        parse_interval(s).map(|(interval, kind)| Line::Interval(interval, kind))
    }
}

fn parse_header(s: &str) -> Result<&str, ParseErrorKind> {
    // `>Featurefoo` is not a header.
    if !s.is_empty() && !s.starts_with(char::is_whitespace) {
        return Err(ParseErrorKind::UnexpectedLine);
    }

    s.split_whitespace()
        .next()
        .ok_or(ParseErrorKind::MissingName)
}

fn parse_qualifier(s: &str) -> Result<Qualifier, ParseErrorKind> {
    let t = s.trim_start_matches(DELIMITER);

    let (key, value) = match t.split_once(DELIMITER) {
        Some((key, value)) => (key.trim(), Some(value.trim())),
        None => (t.trim(), None),
    };

    if key.is_empty() {
        return Err(ParseErrorKind::MissingQualifierKey);
    }

    let value = value.filter(|v| !v.is_empty()).map(String::from);

    Ok(Qualifier::new(key, value))
}

fn parse_interval(s: &str) -> Result<(Interval, Option<Kind>), ParseErrorKind> {
    let mut fields = s.split(DELIMITER);

    let start = parse_endpoint(&mut fields)?;
    let end = parse_endpoint(&mut fields)?;

    let kind = fields
        .next()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| match t.parse::<Kind>() {
            Ok(kind) => kind,
            Err(e) => match e {},
        });

    Ok((Interval::new(start, end), kind))
}

fn parse_endpoint<'a, I>(fields: &mut I) -> Result<Endpoint, ParseErrorKind>
where
    I: Iterator<Item = &'a str>,
{
    fields
        .next()
        .ok_or(ParseErrorKind::MissingEndpoint)
        .and_then(|t| t.parse().map_err(ParseErrorKind::InvalidEndpoint))
}

fn apply_line(
    line: Line<'_>,
    reference_sequence_name: &mut Option<String>,
    features: &mut Vec<Feature>,
) -> Result<(), ParseErrorKind> {
    match line {
        Line::Blank => Ok(()),
        Line::Header(name) => {
            if reference_sequence_name.is_some() {
                Err(ParseErrorKind::DuplicateHeader)
            } else {
                *reference_sequence_name = Some(name.into());
                Ok(())
            }
        }
        Line::Interval(interval, Some(kind)) => {
            let name = reference_sequence_name
                .as_ref()
                .ok_or(ParseErrorKind::UnexpectedLine)?;

            let feature = Feature::new(name.clone(), kind, vec![interval], Vec::new());
            features.push(feature);

            Ok(())
        }
        Line::Interval(interval, None) => {
            let feature = features.last_mut().ok_or(ParseErrorKind::MissingFeature)?;
            feature.intervals_mut().push(interval);
            Ok(())
        }
        Line::Qualifier(qualifier) => {
            let feature = features.last_mut().ok_or(ParseErrorKind::MissingFeature)?;
            feature.qualifiers_mut().push(qualifier);
            Ok(())
        }
    }
}
