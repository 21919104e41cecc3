use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::types::{Cell, DateSystem};
use crate::error::DateDecodeError;

const SECONDS_PER_DAY: f64 = 86_400.0;
/// First serial of the year 10000 in the 1900 date system.
const MAX_SERIAL_1900: f64 = 2_958_466.0;
/// Day offset between the 1900 and 1904 epochs.
pub const EPOCH_1904_OFFSET: f64 = 1_462.0;
/// Days 1..61 of the 1900 system straddle the phantom 29 February 1900.
const AMBIGUOUS_DAYS_1900: std::ops::Range<f64> = 1.0..61.0;

/// Time of day carried by a date serial; the date part is dropped.
pub fn decode_time_of_day(serial: f64, system: DateSystem) -> Result<NaiveTime, DateDecodeError> {
    if !serial.is_finite() {
        return Err(DateDecodeError::NotFinite(serial));
    }
    if serial < 0.0 {
        return Err(DateDecodeError::Negative(serial));
    }

    let max_serial = match system {
        DateSystem::Windows1900 => MAX_SERIAL_1900,
        DateSystem::Mac1904 => MAX_SERIAL_1900 - EPOCH_1904_OFFSET,
    };
    if serial >= max_serial {
        return Err(DateDecodeError::TooLarge(serial));
    }

    let days = serial.trunc();
    if system == DateSystem::Windows1900 && AMBIGUOUS_DAYS_1900.contains(&days) {
        return Err(DateDecodeError::Ambiguous(serial));
    }

    // Rounding can land on midnight of the following day.
    let seconds = (((serial - days) * SECONDS_PER_DAY).round() as u32) % 86_400;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
        .ok_or(DateDecodeError::TooLarge(serial))
}

/// Epoch a reader used for `serial`, judged from the date it decoded it to.
pub fn date_system_from_decoded(serial: f64, decoded: NaiveDateTime) -> DateSystem {
    let Some(epoch_1900) = NaiveDate::from_ymd_opt(1899, 12, 30) else {
        return DateSystem::Windows1900;
    };
    let shift = (decoded.date() - epoch_1900).num_days() as f64 - serial.trunc();
    if shift > EPOCH_1904_OFFSET / 2.0 {
        DateSystem::Mac1904
    } else {
        DateSystem::Windows1900
    }
}

pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// Text shown for a cell in the HTML table.
pub fn render_cell(cell: &Cell, system: DateSystem) -> Result<String, DateDecodeError> {
    Ok(match cell {
        Cell::Float(f) => format_float(*f),
        Cell::DateTime(serial) => decode_time_of_day(*serial, system)?
            .format("%H:%M:%S")
            .to_string(),
        other => other.to_string(),
    })
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_drop_fraction() {
        assert_eq!(format_float(4.0), "4");
        assert_eq!(format_float(4.5), "4.5");
        assert_eq!(format_float(-12.0), "-12");
        assert_eq!(render_cell(&Cell::Float(4.0), DateSystem::Windows1900).unwrap(), "4");
        assert_eq!(render_cell(&Cell::Float(4.5), DateSystem::Windows1900).unwrap(), "4.5");
    }

    #[test]
    fn race_durations_render_as_clock_time() {
        // 1:02:03 as a fraction of a day
        let serial = (3600.0 + 120.0 + 3.0) / 86_400.0;
        assert_eq!(
            render_cell(&Cell::DateTime(serial), DateSystem::Windows1900).unwrap(),
            "01:02:03"
        );
        let dated = 43_831.0 + serial;
        assert_eq!(
            render_cell(&Cell::DateTime(dated), DateSystem::Mac1904).unwrap(),
            "01:02:03"
        );
    }

    #[test]
    fn rounding_up_to_midnight_wraps() {
        let serial = 0.999_999_9;
        let time = decode_time_of_day(serial, DateSystem::Windows1900).unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn undecodable_serials_are_errors() {
        assert_eq!(
            decode_time_of_day(-1.0, DateSystem::Windows1900),
            Err(DateDecodeError::Negative(-1.0))
        );
        assert_eq!(
            decode_time_of_day(30.5, DateSystem::Windows1900),
            Err(DateDecodeError::Ambiguous(30.5))
        );
        assert!(decode_time_of_day(30.5, DateSystem::Mac1904).is_ok());
        assert_eq!(
            decode_time_of_day(3_000_000.0, DateSystem::Windows1900),
            Err(DateDecodeError::TooLarge(3_000_000.0))
        );
        assert!(matches!(
            decode_time_of_day(f64::NAN, DateSystem::Windows1900),
            Err(DateDecodeError::NotFinite(_))
        ));
    }

    #[test]
    fn epoch_is_read_from_decoded_dates() {
        let at = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(6, 0, 0).unwrap();
        // 2020-01-01 is serial 43831 from 1900 and 42369 from 1904.
        assert_eq!(date_system_from_decoded(43_831.25, at(2020, 1, 1)), DateSystem::Windows1900);
        assert_eq!(date_system_from_decoded(42_369.25, at(2020, 1, 1)), DateSystem::Mac1904);
        assert_eq!(date_system_from_decoded(0.25, at(1899, 12, 30)), DateSystem::Windows1900);
        assert_eq!(date_system_from_decoded(0.25, at(1904, 1, 1)), DateSystem::Mac1904);
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<b>Tom & \"Jerry\"</b>"), "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;");
    }
}
