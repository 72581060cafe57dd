use super::super::{cursor::Cursor, error::Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Convert one BCD-encoded byte to decimal 0..=99
#[inline]
pub fn bcd_to_dec(b: u8) -> u8 {
    ((b >> 4) & 0x0F) * 10 + (b & 0x0F)
}

/// Two-digit BCD year to a full year: below 89 is 20xx, otherwise 19xx.
#[inline]
pub fn bcd_year(b: u8) -> u16 {
    let yy = bcd_to_dec(b) as u16;
    if yy < 89 {
        2000 + yy
    } else {
        1900 + yy
    }
}

/// BCD DATE_AND_TIME, in its 8-byte form or the 10-byte form that leads
/// with a reserved byte and the century.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct S7Timestamp {
    /// BCD century byte of the 10-byte form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub century: Option<u8>,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
    /// 1 = Sunday .. 7 = Saturday
    pub weekday: u8,
    /// `None` when the fields do not form a valid calendar time, e.g. an
    /// all-zero "not yet gone" marker
    pub datetime: Option<NaiveDateTime>,
}

impl S7Timestamp {
    pub const LEN: usize = 8;
    pub const LEN_WITH_CENTURY: usize = 10;

    /// Read the 8-byte form.
    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let b: [u8; 8] = cur.read_array()?;
        Ok(Self::from_bytes(None, &b))
    }

    /// Read the 10-byte form: reserved, century, then the 8-byte form.
    pub fn decode_with_century(cur: &mut Cursor<'_>) -> Result<Self> {
        let head: [u8; 2] = cur.read_array()?;
        let b: [u8; 8] = cur.read_array()?;
        Ok(Self::from_bytes(Some(head[1]), &b))
    }

    fn from_bytes(century: Option<u8>, b: &[u8; 8]) -> Self {
        let year = bcd_year(b[0]);
        let month = bcd_to_dec(b[1]);
        let day = bcd_to_dec(b[2]);
        let hour = bcd_to_dec(b[3]);
        let minute = bcd_to_dec(b[4]);
        let second = bcd_to_dec(b[5]);
        let millisecond = bcd_to_dec(b[6]) as u16 * 10 + ((b[7] >> 4) & 0x0F) as u16;
        let weekday = b[7] & 0x0F;
        let datetime = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32).and_then(
            |d| d.and_hms_milli_opt(hour as u32, minute as u32, second as u32, millisecond as u32),
        );
        Self {
            century,
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
            weekday,
            datetime,
        }
    }

    /// All-zero timestamps mark a state that has not happened yet.
    pub fn is_zero(&self) -> bool {
        self.year == 2000
            && self.month == 0
            && self.day == 0
            && self.hour == 0
            && self.minute == 0
            && self.second == 0
            && self.millisecond == 0
    }
}

/// 6-byte S7 time: milliseconds since midnight and days since 1984-01-01.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct S7Time6 {
    pub millis: u32,
    pub days: u16,
    pub datetime: Option<NaiveDateTime>,
}

impl S7Time6 {
    pub const LEN: usize = 6;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let millis = cur.read_u32()?;
        let days = cur.read_u16()?;
        Ok(Self {
            millis,
            days,
            datetime: time6_to_datetime(millis, days),
        })
    }
}

fn time6_to_datetime(millis: u32, days: u16) -> Option<NaiveDateTime> {
    let date =
        NaiveDate::from_ymd_opt(1984, 1, 1)?.checked_add_signed(Duration::days(days as i64))?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(
        millis / 1000,
        (millis % 1000) * 1_000_000,
    )?;
    Some(date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts8(year: u8) -> [u8; 8] {
        // 2014-03-21 13:45:30.123, weekday 6
        [year, 0x03, 0x21, 0x13, 0x45, 0x30, 0x12, 0x36]
    }

    #[test]
    fn test_century_heuristic() {
        assert_eq!(bcd_year(0x14), 2014);
        assert_eq!(bcd_year(0x95), 1995);
        assert_eq!(bcd_year(0x88), 2088);
        assert_eq!(bcd_year(0x89), 1989);
        assert_eq!(bcd_year(0x00), 2000);
        assert_eq!(bcd_year(0x99), 1999);
    }

    #[test]
    fn test_decode_8_byte_form() {
        let buf = ts8(0x14);
        let mut cur = Cursor::new(&buf);
        let ts = S7Timestamp::decode(&mut cur).unwrap();
        assert_eq!(ts.century, None);
        assert_eq!((ts.year, ts.month, ts.day), (2014, 3, 21));
        assert_eq!((ts.hour, ts.minute, ts.second), (13, 45, 30));
        assert_eq!(ts.millisecond, 123);
        assert_eq!(ts.weekday, 6);
        let dt = ts.datetime.unwrap();
        assert_eq!(dt.to_string(), "2014-03-21 13:45:30.123");
        assert!(cur.is_empty());
    }

    #[test]
    fn test_decode_10_byte_form_keeps_century() {
        let mut buf = vec![0x00, 0x19];
        buf.extend_from_slice(&ts8(0x95));
        let mut cur = Cursor::new(&buf);
        let ts = S7Timestamp::decode_with_century(&mut cur).unwrap();
        assert_eq!(ts.century, Some(0x19));
        assert_eq!(ts.year, 1995);
        assert_eq!(cur.offset(), 10);
    }

    #[test]
    fn test_zero_timestamp_has_no_datetime() {
        let buf = [0u8; 8];
        let ts = S7Timestamp::decode(&mut Cursor::new(&buf)).unwrap();
        assert!(ts.is_zero());
        assert!(ts.datetime.is_none());
    }

    #[test]
    fn test_time6() {
        // 1 hour after midnight, 1 day after epoch
        let buf = [0x00, 0x36, 0xEE, 0x80, 0x00, 0x01];
        let t = S7Time6::decode(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(t.millis, 3_600_000);
        assert_eq!(t.days, 1);
        assert_eq!(t.datetime.unwrap().to_string(), "1984-01-02 01:00:00");
    }
}
