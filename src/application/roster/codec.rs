//! CSV roster codec
//!
//! Wire format, one header line then one line per horse:
//!
//! ```text
//! name,breed,type,status,age,price,weightKg,heightCm,microchipId,acquisitionDate
//! Arrow,Arabian,GORACOKRWISTY,ZDROWY,3,12000.00,510.0,163.0,CHIP-99,2024-05-01
//! ```
//!
//! Fields containing `,` or `"` are wrapped in `"` with inner quotes doubled.
//! This module is pure: it knows nothing about stables or storage.

use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use thiserror::Error;

use crate::domain::{Horse, HorseCondition, HorseType, NewHorse};

pub const HEADER: &str =
    "name,breed,type,status,age,price,weightKg,heightCm,microchipId,acquisitionDate";
pub const FIELD_COUNT: usize = 10;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("expected at least 10 fields, got {0}")]
    TooFewFields(usize),

    #[error("invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },
}

/// A decoded data line, tagged with its 1-based line number in the input.
#[derive(Debug, Clone)]
pub struct RosterRow {
    pub line: usize,
    pub result: Result<NewHorse, RowError>,
}

// ── Encoding ───────────────────────────────────────────────────

pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains(',') || value.contains('"') {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

pub fn encode_horse(h: &Horse) -> String {
    format!(
        "{},{},{},{},{},{:.2},{:.1},{:.1},{},{}",
        escape_field(h.name()),
        escape_field(h.breed()),
        h.horse_type().code(),
        h.status().code(),
        h.age(),
        h.price(),
        h.weight_kg(),
        h.height_cm(),
        escape_field(h.microchip_id()),
        h.acquisition_date().format(DATE_FORMAT),
    )
}

/// Write the header and one line per horse, in the order given.
/// Returns the number of data lines written.
pub fn write_roster<W: Write>(out: &mut W, horses: &[Horse]) -> io::Result<usize> {
    writeln!(out, "{}", HEADER)?;
    for h in horses {
        writeln!(out, "{}", encode_horse(h))?;
    }
    out.flush()?;
    Ok(horses.len())
}

// ── Decoding ───────────────────────────────────────────────────

/// Split one CSV line, honouring quoted sections and `""` escapes.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == ',' {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);
    fields
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, RowError> {
    value.trim().parse::<T>().map_err(|_| RowError::InvalidField {
        field,
        value: value.to_string(),
    })
}

/// `YYYY-MM-DD` at midnight UTC; anything unparseable becomes "now".
pub fn parse_date_or_now(value: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
        .unwrap_or_else(Utc::now)
}

/// Turn split fields into horse attributes. Entity validation (blank
/// names, negative prices, ...) is left to `Horse::new`.
pub fn decode_fields(fields: &[String]) -> Result<NewHorse, RowError> {
    if fields.len() < FIELD_COUNT {
        return Err(RowError::TooFewFields(fields.len()));
    }

    let horse_type: HorseType = parse_field("type", &fields[2])?;
    let status: HorseCondition = parse_field("status", &fields[3])?;

    Ok(NewHorse {
        name: fields[0].clone(),
        breed: fields[1].clone(),
        horse_type,
        status,
        age: parse_field("age", &fields[4])?,
        price: parse_field("price", &fields[5])?,
        weight_kg: parse_field("weightKg", &fields[6])?,
        height_cm: parse_field("heightCm", &fields[7])?,
        microchip_id: Some(fields[8].clone()),
        acquisition_date: Some(parse_date_or_now(&fields[9])),
    })
}

/// Read a whole roster. The first line is the header and is skipped
/// unread; blank lines are ignored.
pub fn read_roster<R: BufRead>(input: R) -> io::Result<Vec<RosterRow>> {
    let mut rows = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        if idx == 0 || line.trim().is_empty() {
            continue;
        }
        let line = line.strip_suffix('\r').unwrap_or(&line);
        rows.push(RosterRow {
            line: idx + 1,
            result: decode_fields(&split_line(line)),
        });
    }
    Ok(rows)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn horse(name: &str, breed: &str, microchip: &str) -> Horse {
        Horse::new(
            1,
            NewHorse {
                name: name.into(),
                breed: breed.into(),
                horse_type: HorseType::HotBlooded,
                status: HorseCondition::Healthy,
                age: 3,
                price: 12000.0,
                weight_kg: 510.0,
                height_cm: 163.0,
                microchip_id: Some(microchip.into()),
                acquisition_date: Some(Utc.with_ymd_and_hms(2024, 5, 1, 15, 30, 0).unwrap()),
            },
        )
        .unwrap()
    }

    #[test]
    fn escape_only_when_needed() {
        assert_eq!(escape_field("Arrow"), "Arrow");
        assert_eq!(escape_field("Bell, Jr."), "\"Bell, Jr.\"");
        assert_eq!(escape_field("The \"Kid\""), "\"The \"\"Kid\"\"\"");
        assert_eq!(escape_field(""), "");
    }

    #[test]
    fn encode_matches_wire_format() {
        let h = horse("Arrow", "Arabian", "CHIP-99");
        assert_eq!(
            encode_horse(&h),
            "Arrow,Arabian,GORACOKRWISTY,ZDROWY,3,12000.00,510.0,163.0,CHIP-99,2024-05-01"
        );
    }

    #[test]
    fn write_roster_emits_header_first() {
        let mut out = Vec::new();
        let n = write_roster(&mut out, &[horse("Bell, Jr.", "Quarter Horse", "")]).unwrap();
        assert_eq!(n, 1);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            format!(
                "{}\n\"Bell, Jr.\",Quarter Horse,GORACOKRWISTY,ZDROWY,3,12000.00,510.0,163.0,,2024-05-01\n",
                HEADER
            )
        );
    }

    #[test]
    fn split_respects_quotes() {
        assert_eq!(
            split_line(r#""Bell, Jr.",Quarter Horse,"say ""hi""",,x"#),
            vec!["Bell, Jr.", "Quarter Horse", "say \"hi\"", "", "x"]
        );
        assert_eq!(split_line(""), vec![""]);
    }

    #[test]
    fn decode_rejects_short_rows() {
        let fields = split_line("Arrow,Arabian,GORACOKRWISTY");
        assert_eq!(decode_fields(&fields).unwrap_err(), RowError::TooFewFields(3));
    }

    #[test]
    fn decode_reports_bad_numbers_and_enums() {
        let fields = split_line("Arrow,Arabian,UNICORN,ZDROWY,3,1.00,500.0,160.0,,2024-05-01");
        assert!(matches!(
            decode_fields(&fields),
            Err(RowError::InvalidField { field: "type", .. })
        ));

        let fields = split_line("Arrow,Arabian,KUC,ZDROWY,three,1.00,500.0,160.0,,2024-05-01");
        assert!(matches!(
            decode_fields(&fields),
            Err(RowError::InvalidField { field: "age", .. })
        ));
    }

    #[test]
    fn bad_date_falls_back_to_now() {
        let before = Utc::now();
        let fields = split_line("Arrow,Arabian,KUC,CHORY,3,1.00,500.0,160.0,,01/05/2024");
        let attrs = decode_fields(&fields).unwrap();
        assert!(attrs.acquisition_date.unwrap() >= before);
        assert_eq!(attrs.status, HorseCondition::Sick);
    }

    #[test]
    fn read_roster_skips_header_and_blank_lines() {
        let input = format!(
            "{}\r\nArrow,Arabian,KUC,ZDROWY,3,1.00,500.0,160.0,C1,2024-05-01\r\n\n   \nshort,row\n",
            HEADER
        );
        let rows = read_roster(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].line, 2);
        let attrs = rows[0].result.as_ref().unwrap();
        assert_eq!(attrs.microchip_id.as_deref(), Some("C1"));
        let date = attrs.acquisition_date.unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 5, 1));

        assert_eq!(rows[1].line, 5);
        assert_eq!(rows[1].result.as_ref().unwrap_err(), &RowError::TooFewFields(2));
    }

    #[test]
    fn read_roster_of_empty_input_is_empty() {
        assert!(read_roster("".as_bytes()).unwrap().is_empty());
        assert!(read_roster(HEADER.as_bytes()).unwrap().is_empty());
    }
}
