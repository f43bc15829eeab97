mod common;

use std::fs;

use ferry::{commands::transfer, Policy};

use self::common::working_prefix;

fn exclusions() -> Vec<String> {
    vec![String::from("protein_id")]
}

#[test]
fn test_transfer_with_clipping() -> anyhow::Result<()> {
    let working_prefix = working_prefix("transfer-with-clipping")?;
    let dst = working_prefix.join("sample0.tbl");

    transfer(
        "tests/fixtures/segment0.fa",
        "tests/fixtures/segment0.tbl",
        None,
        Policy::new(true, false),
        &exclusions(),
        &dst,
    )?;

    let actual = fs::read_to_string(dst)?;

    let expected = "\
>Feature sample0
<1\t12\tCDS
\t\t\tproduct\tnucleoprotein
\t\t\tnote\tsequencing did not capture complete CDS
4\t9\tmisc_feature
\t\t\tnote\tstem loop
14\t2\tCDS
\t\t\tproduct\tglycoprotein

";

    assert_eq!(actual, expected);

    Ok(())
}

#[test]
fn test_transfer_without_clipping() -> anyhow::Result<()> {
    let working_prefix = working_prefix("transfer-without-clipping")?;
    let dst = working_prefix.join("sample0.tbl");

    transfer(
        "tests/fixtures/segment0.fa",
        "tests/fixtures/segment0.tbl",
        None,
        Policy::default(),
        &exclusions(),
        &dst,
    )?;

    let actual = fs::read_to_string(dst)?;

    let expected = "\
>Feature sample0
4\t9\tmisc_feature
\t\t\tnote\tstem loop
14\t2\tCDS
\t\t\tproduct\tglycoprotein

";

    assert_eq!(actual, expected);

    Ok(())
}

#[test]
fn test_transfer_with_target() -> anyhow::Result<()> {
    let working_prefix = working_prefix("transfer-with-target")?;
    let dst = working_prefix.join("sample1.tbl");

    transfer(
        "tests/fixtures/segment0.multi.fa",
        "tests/fixtures/segment0.tbl",
        Some("sample1"),
        Policy::new(true, false),
        &[],
        &dst,
    )?;

    let actual = fs::read_to_string(dst)?;

    let expected = "\
>Feature sample1
1\t>21\tgene
\t\t\tgene\tNDLS
4\t18\tCDS
\t\t\tproduct\tnucleoprotein
\t\t\tprotein_id\tAAA00001.1
10\t15\tmisc_feature
\t\t\tnote\tstem loop
20\t8\tCDS
\t\t\tproduct\tglycoprotein

";

    assert_eq!(actual, expected);

    Ok(())
}

#[test]
fn test_transfer_with_ambiguous_target() -> anyhow::Result<()> {
    let working_prefix = working_prefix("transfer-with-ambiguous-target")?;
    let dst = working_prefix.join("out.tbl");

    let result = transfer(
        "tests/fixtures/segment0.multi.fa",
        "tests/fixtures/segment0.tbl",
        None,
        Policy::default(),
        &exclusions(),
        &dst,
    );

    assert!(result.is_err());
    assert!(!dst.exists());

    Ok(())
}

#[test]
fn test_transfer_with_missing_reference_sequence() -> anyhow::Result<()> {
    let working_prefix = working_prefix("transfer-with-missing-reference-sequence")?;
    let dst = working_prefix.join("out.tbl");

    let result = transfer(
        "tests/fixtures/segment1.fa",
        "tests/fixtures/segment0.tbl",
        None,
        Policy::default(),
        &exclusions(),
        &dst,
    );

    assert!(result.is_err());

    Ok(())
}
