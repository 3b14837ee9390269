//! Alarm register codec.
//!
//! Every alarm comparison field carries a mask bit in bit 7 of its
//! register (1 = the field is ignored by the match). A periodicity is a
//! contiguous run of unmasked fields from seconds up to its named
//! granularity, so the encoder works from an additive table of compared
//! fields rather than accumulating bits case by case.
//!
//! Alarm 1 is four registers (seconds, minutes, hours, day/date), six on
//! parts that add month and year match registers. Alarm 2 starts at the
//! minutes register and never has seconds, month or year.

use crate::datetime::{
  bcd_to_bin, bin_to_bcd, decode_hours, encode_hours, HourFormat, RtcDateTime, EPOCH_YEAR,
};
use crate::Error;

// Set in an alarm register when its field does not participate in the match
const ALARM_MASK_BIT: u8 = 1 << 7;
// Day/date selector in the day/date register: 1 = weekday match, 0 = date match
const DY_DT_BIT: u8 = 1 << 6;
// Month register of the 6-byte alarm block: month mask (A1M5) and year mask (A1M6)
const MONTH_MASK_BIT: u8 = 1 << 7;
const YEAR_MASK_BIT: u8 = 1 << 6;

const ALARM_HOURS_MASK: u8 = 0x7F;
const ALARM_WEEKDAY_MASK: u8 = 0x07;
const ALARM_DAY_MASK: u8 = 0x3F;
const ALARM_MONTH_MASK: u8 = 0x1F;

/// Alarm slot selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alarm {
  One,
  Two,
}

/// Alarm periodicity.
///
/// Each step compares one more calendar field than the previous one.
/// `Yearly` and `OneTime` need the month/year match registers that only
/// alarm 1 of the MAX31329 and MAX31343 provides; alarm 2 additionally
/// has no seconds register, so its finest periodicity is `EveryMinute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmPeriod {
  /// Once per second
  EverySecond,
  /// Seconds match
  EveryMinute,
  /// Minutes and seconds match
  Hourly,
  /// Hours, minutes and seconds match
  Daily,
  /// Weekday and time match
  Weekly,
  /// Date and time match
  Monthly,
  /// Month, date and time match
  Yearly,
  /// Year, month, date and time match
  OneTime,
}

// Comparison field flags
const MATCH_SECONDS: u8 = 1 << 0;
const MATCH_MINUTES: u8 = 1 << 1;
const MATCH_HOURS: u8 = 1 << 2;
const MATCH_DAY_DATE: u8 = 1 << 3;
const MATCH_MONTH: u8 = 1 << 4;
const MATCH_YEAR: u8 = 1 << 5;

impl AlarmPeriod {
  /// The set of fields this periodicity compares: every entry is the
  /// previous entry plus the field named by its own granularity.
  const fn match_fields(self) -> u8 {
    match self {
      AlarmPeriod::EverySecond => 0,
      AlarmPeriod::EveryMinute => MATCH_SECONDS,
      AlarmPeriod::Hourly => MATCH_SECONDS | MATCH_MINUTES,
      AlarmPeriod::Daily => MATCH_SECONDS | MATCH_MINUTES | MATCH_HOURS,
      AlarmPeriod::Weekly | AlarmPeriod::Monthly => {
        MATCH_SECONDS | MATCH_MINUTES | MATCH_HOURS | MATCH_DAY_DATE
      }
      AlarmPeriod::Yearly => {
        MATCH_SECONDS | MATCH_MINUTES | MATCH_HOURS | MATCH_DAY_DATE | MATCH_MONTH
      }
      AlarmPeriod::OneTime => {
        MATCH_SECONDS | MATCH_MINUTES | MATCH_HOURS | MATCH_DAY_DATE | MATCH_MONTH | MATCH_YEAR
      }
    }
  }

  /// Weekly alarms compare the weekday; monthly and coarser compare the
  /// date. Finer periodicities leave the selector at its weekday default
  /// with the whole field masked.
  const fn matches_weekday(self) -> bool {
    !matches!(self, AlarmPeriod::Monthly | AlarmPeriod::Yearly | AlarmPeriod::OneTime)
  }
}

/// Reject periodicities the slot or chip cannot express, before any bus
/// traffic happens on their behalf.
pub(crate) fn check_period_support<E>(
  alarm: Alarm,
  period: AlarmPeriod,
  has_month_year: bool,
) -> Result<(), Error<E>> {
  match period {
    AlarmPeriod::EverySecond if alarm == Alarm::Two => Err(Error::UnsupportedPeriod),
    AlarmPeriod::Yearly | AlarmPeriod::OneTime
      if alarm == Alarm::Two || !has_month_year =>
    {
      Err(Error::UnsupportedPeriod)
    }
    _ => Ok(()),
  }
}

/// Encode an alarm into its register block, `[sec, min, hrs, day_date,
/// month, year]`. The caller writes `bytes[..alarm1_len]` for alarm 1 or
/// `bytes[1..4]` for alarm 2.
///
/// `format` selects the hours packing and must reflect the hour mode the
/// clock itself runs in, so the comparator sees matching encodings.
pub(crate) fn encode_alarm_block<E>(
  alarm: Alarm,
  time: &RtcDateTime,
  period: AlarmPeriod,
  format: HourFormat,
  has_month_year: bool,
) -> Result<[u8; 6], Error<E>> {
  check_period_support(alarm, period, has_month_year)?;

  let fields = period.match_fields();
  let day_match = period.matches_weekday();

  let mut sec = bin_to_bcd(time.second);
  if fields & MATCH_SECONDS == 0 {
    sec |= ALARM_MASK_BIT;
  }

  let mut min = bin_to_bcd(time.minute);
  if fields & MATCH_MINUTES == 0 {
    min |= ALARM_MASK_BIT;
  }

  let mut hrs = encode_hours(time.hour, format);
  if fields & MATCH_HOURS == 0 {
    hrs |= ALARM_MASK_BIT;
  }

  // The alarm weekday is stored 0-based, unlike the 1-based clock register
  let mut day_date = if day_match {
    DY_DT_BIT | bin_to_bcd(time.weekday)
  } else {
    bin_to_bcd(time.day)
  };
  if fields & MATCH_DAY_DATE == 0 {
    day_date |= ALARM_MASK_BIT;
  }

  let mut month = 0;
  let mut year = 0;
  if has_month_year && alarm == Alarm::One {
    month = bin_to_bcd(time.month);
    if fields & MATCH_MONTH == 0 {
      month |= MONTH_MASK_BIT;
    }
    if fields & MATCH_YEAR == 0 {
      month |= YEAR_MASK_BIT;
    }
    // the alarm year register has no century bit: 2000..=2099 only
    if time.year >= EPOCH_YEAR && time.year < EPOCH_YEAR + 100 {
      year = bin_to_bcd((time.year - EPOCH_YEAR) as u8);
    } else if fields & MATCH_YEAR != 0 {
      return Err(Error::InvalidDate);
    }
  }

  Ok([sec, min, hrs, day_date, month, year])
}

/// Decode an alarm register block back into a time and periodicity.
/// For alarm 2 the caller zeroes the seconds byte before calling.
///
/// The periodicity scan runs from the finest granularity to the
/// coarsest, each matching condition overwriting the last, so the most
/// specific unmasked field wins but a coarser day/date or month/year
/// condition can still override. This reproduces the decode order the
/// chip family's vendor drivers have always used; it is kept observable
/// behavior rather than a documented hardware contract.
pub(crate) fn decode_alarm_block(
  alarm: Alarm,
  block: &[u8; 6],
  has_month_year: bool,
) -> (RtcDateTime, AlarmPeriod) {
  let mut time = RtcDateTime::default();

  time.second = bcd_to_bin(block[0] & !ALARM_MASK_BIT);
  time.minute = bcd_to_bin(block[1] & !ALARM_MASK_BIT);
  time.hour = decode_hours(block[2] & ALARM_HOURS_MASK);

  let day_match = block[3] & DY_DT_BIT != 0;
  if day_match {
    // weekday alarm: the date field has no stored value
    time.weekday = bcd_to_bin(block[3] & ALARM_WEEKDAY_MASK);
    time.day = 0;
  } else {
    time.day = bcd_to_bin(block[3] & ALARM_DAY_MASK);
    time.weekday = 0;
  }

  let month_year = has_month_year && alarm == Alarm::One;
  if month_year {
    time.month = bcd_to_bin(block[4] & ALARM_MONTH_MASK);
    time.year = EPOCH_YEAR + bcd_to_bin(block[5]) as u16;
  }

  let mut period = match alarm {
    Alarm::One => AlarmPeriod::EverySecond,
    Alarm::Two => AlarmPeriod::EveryMinute,
  };
  if alarm == Alarm::One && block[0] & ALARM_MASK_BIT == 0 {
    period = AlarmPeriod::EveryMinute;
  }
  if block[1] & ALARM_MASK_BIT == 0 {
    period = AlarmPeriod::Hourly;
  }
  if block[2] & ALARM_MASK_BIT == 0 {
    period = AlarmPeriod::Daily;
  }
  if block[3] & ALARM_MASK_BIT == 0 {
    period = AlarmPeriod::Weekly;
  }
  if !day_match {
    period = AlarmPeriod::Monthly;
  }
  if month_year {
    if block[4] & MONTH_MASK_BIT == 0 {
      period = AlarmPeriod::Yearly;
    }
    if block[4] & YEAR_MASK_BIT == 0 {
      period = AlarmPeriod::OneTime;
    }
  }

  (time, period)
}
