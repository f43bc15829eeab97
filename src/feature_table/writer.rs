use std::{
    fmt::Write as _,
    io::{self, Write},
};

use super::{Feature, FeatureTable};
use crate::endpoint::Endpoint;

pub struct Writer<W> {
    inner: W,
    exclusions: Vec<String>,
}

impl<W> Writer<W>
where
    W: Write,
{
    pub fn new(inner: W) -> Self {
        Self::with_exclusions(inner, Vec::new())
    }

    /// Creates a writer that omits any line containing one of `exclusions`.
    pub fn with_exclusions(inner: W, exclusions: Vec<String>) -> Self {
        Self { inner, exclusions }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_feature_table(&mut self, table: &FeatureTable) -> io::Result<()> {
        self.write_line(&format!(">Feature {}", table.reference_sequence_name()))?;

        for feature in table.features() {
            self.write_feature(feature)?;
        }

        writeln!(self.inner)?;

        Ok(())
    }

    fn write_feature(&mut self, feature: &Feature) -> io::Result<()> {
        for (i, interval) in feature.intervals().iter().enumerate() {
            let mut line = String::new();

            push_endpoint(&mut line, interval.start())?;
            line.push('\t');
            push_endpoint(&mut line, interval.end())?;

            if i == 0 {
                line.push('\t');
                write!(line, "{}", feature.kind()).map_err(io::Error::other)?;
            }

            self.write_line(&line)?;
        }

        for qualifier in feature.qualifiers() {
            let line = match qualifier.value() {
                Some(value) => format!("\t\t\t{}\t{value}", qualifier.key()),
                None => format!("\t\t\t{}", qualifier.key()),
            };

            self.write_line(&line)?;
        }

        Ok(())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        if self.is_excluded(line) {
            return Ok(());
        }

        writeln!(self.inner, "{line}")
    }

    fn is_excluded(&self, line: &str) -> bool {
        self.exclusions
            .iter()
            .any(|pattern| line.contains(pattern.as_str()))
    }
}

fn push_endpoint(buf: &mut String, endpoint: Endpoint) -> io::Result<()> {
    if !endpoint.coordinate().is_resolved() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "unresolved endpoint",
        ));
    }

    write!(buf, "{endpoint}").map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use noodles::core::{position::TryFromIntError, Position};

    use super::*;
    use crate::{
        endpoint::{Coordinate, Edge},
        feature_table::{Interval, Kind, Qualifier},
    };

    fn build_endpoint(edge: Edge, n: usize) -> Result<Endpoint, TryFromIntError> {
        Position::try_from(n).map(|position| Endpoint::new(Coordinate::Resolved(position), edge))
    }

    fn build_table() -> Result<FeatureTable, TryFromIntError> {
        Ok(FeatureTable::new(
            String::from("sq1"),
            vec![
                Feature::new(
                    String::from("sq1"),
                    Kind::Other(String::from("gene")),
                    vec![Interval::new(
                        build_endpoint(Edge::AtLeast, 1)?,
                        build_endpoint(Edge::Exact, 150)?,
                    )],
                    vec![Qualifier::new("gene", Some(String::from("NP")))],
                ),
                Feature::new(
                    String::from("sq1"),
                    Kind::CodingSequence,
                    vec![
                        Interval::new(
                            build_endpoint(Edge::Exact, 1)?,
                            build_endpoint(Edge::Exact, 60)?,
                        ),
                        Interval::new(
                            build_endpoint(Edge::Exact, 90)?,
                            build_endpoint(Edge::AtMost, 150)?,
                        ),
                    ],
                    vec![
                        Qualifier::new("product", Some(String::from("nucleoprotein"))),
                        Qualifier::new("protein_id", Some(String::from("gb|AAA00000.1|"))),
                        Qualifier::new("ribosomal_slippage", None),
                    ],
                ),
            ],
        ))
    }

    #[test]
    fn test_write_feature_table() -> Result<(), Box<dyn std::error::Error>> {
        let table = build_table()?;

        let mut writer = Writer::new(Vec::new());
        writer.write_feature_table(&table)?;

        let actual = writer.get_ref();
        let expected = b"\
>Feature sq1
<1\t150\tgene
\t\t\tgene\tNP
1\t60\tCDS
90\t>150
\t\t\tproduct\tnucleoprotein
\t\t\tprotein_id\tgb|AAA00000.1|
\t\t\tribosomal_slippage

";

        assert_eq!(&actual[..], &expected[..]);

        Ok(())
    }

    #[test]
    fn test_write_feature_table_with_exclusions() -> Result<(), Box<dyn std::error::Error>> {
        let table = build_table()?;

        let mut writer = Writer::with_exclusions(Vec::new(), vec![String::from("protein_id")]);
        writer.write_feature_table(&table)?;

        let actual = String::from_utf8(writer.into_inner())?;

        assert!(!actual.contains("protein_id"));
        assert!(actual.contains("\t\t\tproduct\tnucleoprotein\n"));
        assert!(actual.ends_with("\t\t\tribosomal_slippage\n\n"));

        Ok(())
    }

    #[test]
    fn test_write_feature_table_with_unresolved_endpoint() -> Result<(), Box<dyn std::error::Error>>
    {
        let table = FeatureTable::new(
            String::from("sq1"),
            vec![Feature::new(
                String::from("sq1"),
                Kind::CodingSequence,
                vec![Interval::new(
                    Endpoint::unresolved(),
                    build_endpoint(Edge::Exact, 60)?,
                )],
                Vec::new(),
            )],
        );

        let mut writer = Writer::new(Vec::new());

        assert!(matches!(
            writer.write_feature_table(&table),
            Err(e) if e.kind() == io::ErrorKind::InvalidInput
        ));

        Ok(())
    }
}
