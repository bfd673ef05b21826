use anyhow::{bail, Result};

/// Two-digit years above this belong to the 1900s, the rest to the 2000s.
/// arXiv started in 1991, so `91`..`99` are the only 20th century prefixes.
pub const CENTURY_PIVOT: i32 = 90;

/// Label of the first submitted revision
pub const FIRST_VERSION: &str = "v1";

/// Year and month encoded in an arXiv identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: i32,
}

/// The numeric part of an id: `hep-th/9912001` -> `9912001`, `0801.0001` unchanged
pub fn numeric_part(id: &str) -> &str {
    match id.split_once('/') {
        Some((_, number)) => number,
        None => id,
    }
}

/// Expand a two-digit year using [`CENTURY_PIVOT`]
pub fn expand_year(yy: i32) -> i32 {
    if yy > CENTURY_PIVOT {
        1900 + yy
    } else {
        2000 + yy
    }
}

/// Parse the `YYMM` prefix of an arXiv id into a year and month
pub fn parse_year_month(id: &str) -> Result<YearMonth> {
    let number = numeric_part(id);

    let prefix = match number.get(..4) {
        Some(p) if p.bytes().all(|b| b.is_ascii_digit()) => p,
        _ => bail!("Identifier '{}' does not start with a YYMM prefix", id),
    };

    let yy: i32 = prefix[..2].parse()?;
    let month: i32 = prefix[2..].parse()?;

    if !(1..=12).contains(&month) {
        bail!("Identifier '{}' has invalid month {:02}", id, month);
    }

    Ok(YearMonth {
        year: expand_year(yy),
        month,
    })
}

/// One row of the version table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRow {
    pub id: String,
    pub version: String,
    pub year: Option<i32>,
    pub month: Option<i32>,
}

/// Version rows for a paper. Only the first version carries a date.
pub fn version_rows<'a, I>(id: &str, labels: I) -> Result<Vec<VersionRow>>
where
    I: IntoIterator<Item = &'a str>,
{
    let date = parse_year_month(id)?;

    Ok(labels
        .into_iter()
        .map(|label| {
            let first = label == FIRST_VERSION;
            VersionRow {
                id: id.to_string(),
                version: label.to_string(),
                year: first.then_some(date.year),
                month: first.then_some(date.month),
            }
        })
        .collect())
}
