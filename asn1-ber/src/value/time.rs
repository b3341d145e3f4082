//! UTCTime and GeneralizedTime accessors
//!
//! Both are ASCII timestamps. UTCTime carries a two-digit year
//! (`YYMMDDhhmm[ss][Z|±hhmm]`) with a pivot at 70: a first year digit of 7
//! or below lands in 20xx, above in 19xx. GeneralizedTime carries a
//! four-digit year and optionally fractional seconds; a comma is accepted as
//! the decimal mark and normalized away before parsing.
//!
//! Decoded values are normalized to UTC.

use asn1_core::{Asn1Error, Asn1Result};
use chrono::offset::LocalResult;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::element::Element;
use crate::tag::Construction;
use crate::value::reassembled_content;

fn two_digits(bytes: &[u8], position: usize, type_name: &'static str) -> Asn1Result<u32> {
    let pair = &bytes[position..position + 2];
    for (i, &octet) in pair.iter().enumerate() {
        if !octet.is_ascii_digit() {
            return Err(Asn1Error::ValueCharacters { type_name, octet, position: position + i });
        }
    }
    Ok((pair[0] - b'0') as u32 * 10 + (pair[1] - b'0') as u32)
}

/// Parse a trailing `Z` or `±hh[mm]` zone designator into offset seconds
///
/// An empty suffix means UTC.
fn zone_offset(suffix: &[u8], type_name: &'static str) -> Asn1Result<i32> {
    match suffix {
        [] | [b'Z'] => Ok(0),
        [sign @ (b'+' | b'-'), rest @ ..] if rest.len() == 2 || rest.len() == 4 => {
            let hours = two_digits(rest, 0, type_name)?;
            let minutes = if rest.len() == 4 { two_digits(rest, 2, type_name)? } else { 0 };
            if hours > 23 || minutes > 59 {
                return Err(Asn1Error::Value { type_name, detail: "time zone offset out of range" });
            }
            let seconds = (hours * 3600 + minutes * 60) as i32;
            Ok(if *sign == b'-' { -seconds } else { seconds })
        }
        _ => Err(Asn1Error::Value { type_name, detail: "malformed time zone designator" }),
    }
}

fn resolve(
    naive: NaiveDateTime,
    offset_seconds: i32,
    type_name: &'static str,
) -> Asn1Result<DateTime<Utc>> {
    let offset = FixedOffset::east_opt(offset_seconds)
        .ok_or(Asn1Error::Value { type_name, detail: "time zone offset out of range" })?;
    match offset.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        _ => Err(Asn1Error::Value { type_name, detail: "time does not exist in its zone" }),
    }
}

fn parse_utc_time(bytes: &[u8]) -> Asn1Result<DateTime<Utc>> {
    const TYPE: &str = "UTCTime";
    if bytes.len() < 10 || bytes.len() > 17 {
        return Err(Asn1Error::ValueSize { type_name: TYPE, min: 10, max: 17, actual: bytes.len() });
    }
    let yy = two_digits(bytes, 0, TYPE)?;
    let year = if bytes[0] <= b'7' { 2000 + yy } else { 1900 + yy };
    let month = two_digits(bytes, 2, TYPE)?;
    let day = two_digits(bytes, 4, TYPE)?;
    let hour = two_digits(bytes, 6, TYPE)?;
    let minute = two_digits(bytes, 8, TYPE)?;

    let mut position = 10;
    let mut second = 0;
    if bytes.len() >= position + 2 && bytes[position].is_ascii_digit() {
        second = two_digits(bytes, position, TYPE)?;
        position += 2;
    }
    let offset_seconds = zone_offset(&bytes[position..], TYPE)?;

    let naive = NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or(Asn1Error::Value { type_name: TYPE, detail: "calendar value out of range" })?;
    resolve(naive, offset_seconds, TYPE)
}

fn parse_generalized_time(bytes: &[u8]) -> Asn1Result<DateTime<Utc>> {
    const TYPE: &str = "GeneralizedTime";
    if bytes.len() < 10 {
        return Err(Asn1Error::Length { type_name: TYPE, detail: "content shorter than ten characters" });
    }
    let year = two_digits(bytes, 0, TYPE)? * 100 + two_digits(bytes, 2, TYPE)?;
    let month = two_digits(bytes, 4, TYPE)?;
    let day = two_digits(bytes, 6, TYPE)?;
    let hour = two_digits(bytes, 8, TYPE)?;

    let mut position = 10;
    let mut minute = 0;
    let mut second = 0;
    let mut seconds_given = false;
    if bytes.len() >= position + 2 && bytes[position].is_ascii_digit() {
        minute = two_digits(bytes, position, TYPE)?;
        position += 2;
        if bytes.len() >= position + 2 && bytes[position].is_ascii_digit() {
            second = two_digits(bytes, position, TYPE)?;
            position += 2;
            seconds_given = true;
        }
    }

    let mut nanoseconds = 0u32;
    if bytes.get(position) == Some(&b'.') || bytes.get(position) == Some(&b',') {
        if !seconds_given {
            // Fractional hours and minutes are legacy forms left unsupported.
            return Err(Asn1Error::Value {
                type_name: TYPE,
                detail: "fraction requires a seconds field",
            });
        }
        position += 1;
        let start = position;
        while bytes.get(position).is_some_and(u8::is_ascii_digit) {
            position += 1;
        }
        if position == start {
            return Err(Asn1Error::Value { type_name: TYPE, detail: "empty fraction" });
        }
        let mut scaled = 0u64;
        for (i, &digit) in bytes[start..position].iter().take(9).enumerate() {
            scaled += (digit - b'0') as u64 * 10u64.pow(8 - i as u32);
        }
        nanoseconds = scaled as u32;
    }
    let offset_seconds = zone_offset(&bytes[position..], TYPE)?;

    let naive = NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|date| date.and_hms_nano_opt(hour, minute, second, nanoseconds))
        .ok_or(Asn1Error::Value { type_name: TYPE, detail: "calendar value out of range" })?;
    resolve(naive, offset_seconds, TYPE)
}

impl Element {
    /// Read the content as a UTCTime, normalized to UTC
    ///
    /// # Errors
    ///
    /// `ValueSize` outside 10-17 characters, `ValueCharacters` on
    /// non-digits where digits belong, `Value` on impossible calendar
    /// values or malformed zone designators.
    pub fn utc_time(&self) -> Asn1Result<DateTime<Utc>> {
        let bytes = reassembled_content(self, "UTCTime")?;
        parse_utc_time(&bytes)
    }

    /// Store a UTCTime as `YYMMDDhhmmssZ`
    pub fn set_utc_time(&mut self, value: &DateTime<Utc>) {
        self.construction = Construction::Primitive;
        self.content = value.format("%y%m%d%H%M%SZ").to_string().into_bytes();
    }

    /// Read the content as a GeneralizedTime, normalized to UTC
    ///
    /// # Errors
    ///
    /// `Length` below ten characters; otherwise as [`Element::utc_time`].
    pub fn generalized_time(&self) -> Asn1Result<DateTime<Utc>> {
        let bytes = reassembled_content(self, "GeneralizedTime")?;
        parse_generalized_time(&bytes)
    }

    /// Store a GeneralizedTime as `YYYYMMDDhhmmssZ`
    pub fn set_generalized_time(&mut self, value: &DateTime<Utc>) {
        self.construction = Construction::Primitive;
        self.content = value.format("%Y%m%d%H%M%SZ").to_string().into_bytes();
    }
}
