#![cfg_attr(not(test), no_std)]


pub use rtcc::{
  DateTimeAccess, NaiveDate, NaiveDateTime, Datelike, Timelike,
};


use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, Read, WriteRead};

mod alarm;
mod datetime;
pub mod registers;

pub use crate::alarm::{Alarm, AlarmPeriod};
pub use crate::datetime::{HourFormat, RtcDateTime, EPOCH_YEAR};

use crate::alarm::{check_period_support, decode_alarm_block, encode_alarm_block};
use crate::datetime::{decode_clock_block, encode_clock_block, HOURS_F12_BIT};
use crate::registers::{ChipRegisters, Field};

// Alarm interrupt enable/flag bits, shared by the whole family
const A1_BIT: u8 = 1 << 0;
const A2_BIT: u8 = 1 << 1;

// Clock synchronization delay codes (MAX31341)
const SYNC_DELAY_1SEC: u8 = 0b00;
const SYNC_DELAY_100MS: u8 = 0b01;
const SYNC_DELAY_10MS: u8 = 0b10;

// The SET_RTC transfer latch must be held in each state for at least this long
const SET_RTC_HOLD_MS: u8 = 10;

// Largest register burst we ever issue (a full NVRAM window)
const MAX_WRITE_BURST: usize = 64;

/// Driver error type. Register-level operations fail fast and are never
/// retried internally; after a `Bus` error the caller decides whether to
/// retry or to `release` and reinitialize the bus.
#[derive(Debug)]
pub enum Error<E> {
  /// Bus transport failure, including short transfers (surfaced by the HAL)
  Bus(E),
  /// Out of range argument, or a register this chip variant does not have
  InvalidArgument,
  /// Year outside the two supported centuries
  InvalidDate,
  /// Periodicity not available on this alarm slot or chip
  UnsupportedPeriod,
  /// A temperature conversion is already in progress
  Busy,
}

/// Chip variant selection. All variants share one driver; everything that
/// differs between them is carried by a register layout table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chip {
  Max31328,
  Max31329,
  Max31341,
  Max31343,
}

impl Chip {
  pub const fn registers(&self) -> &'static ChipRegisters {
    match self {
      Chip::Max31328 => &registers::MAX31328,
      Chip::Max31329 => &registers::MAX31329,
      Chip::Max31341 => &registers::MAX31341,
      Chip::Max31343 => &registers::MAX31343,
    }
  }
}

/// Countdown timer tick rate (TFS field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerFrequency {
  Hz1024 = 0b00,
  Hz256 = 0b01,
  Hz64 = 0b10,
  Hz16 = 0b11,
}

/// Square wave output frequency code.
/// The codes match the MAX31328/MAX31341 RS field; on the MAX31329 and
/// MAX31343 the same two low bits select the clock output rate per their
/// data sheet tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareWaveFrequency {
  Hz1 = 0b00,
  Hz4098 = 0b01,
  Hz8192 = 0b10,
  Hz32768 = 0b11,
}

/// External clock input frequency (CLKIN/CLKSEL field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClkinFrequency {
  Hz1 = 0b00,
  Hz50 = 0b01,
  Hz60 = 0b10,
  Hz32768 = 0b11,
}

/// Device power source selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerSupply {
  /// The circuit decides between VCC and VBACKUP
  Auto,
  Vcc,
  Backup,
}

/// Power fail comparator threshold voltage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerFailThreshold {
  V1_3 = 0b00,
  V1_7 = 0b01,
  V2_0 = 0b10,
  V2_2 = 0b11,
}

impl PowerFailThreshold {
  fn from_code(code: u8) -> Self {
    match code & 0b11 {
      0b00 => PowerFailThreshold::V1_3,
      0b01 => PowerFailThreshold::V1_7,
      0b10 => PowerFailThreshold::V2_0,
      _ => PowerFailThreshold::V2_2,
    }
  }
}

/// Trickle charger path: resistor value and diode drop between the
/// supply and the backup cell. The 4-bit codes are common to all parts
/// with a charger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TricklePath {
  NoConnection = 0x00,
  /// 3 kOhm in series with a Schottky diode
  Ohm3kSchottky = 0x08,
  Ohm6kSchottky = 0x0A,
  Ohm11kSchottky = 0x0B,
  /// 3 kOhm in series with a standard diode plus a Schottky diode
  Ohm3kDiodeSchottky = 0x0C,
  Ohm6kDiodeSchottky = 0x0E,
  Ohm11kDiodeSchottky = 0x0F,
}

/// Interrupt sources that can be routed to the interrupt pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
  Alarm1,
  Alarm2,
  Timer,
}

/// Decoded interrupt/status flags. Flags a part does not have read as false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status {
  pub alarm1_triggered: bool,
  pub alarm2_triggered: bool,
  pub timer_triggered: bool,
  pub osc_stopped: bool,
  pub power_fail: bool,
}

/// Named configuration options in one view. Options a chip variant does
/// not have are `None` on read and must be `None` on write.
///
/// `square_wave_frequency` holds the raw frequency field code (see
/// [`SquareWaveFrequency`] for the common values).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigSet {
  pub oscillator_enabled: bool,
  pub square_wave_frequency: u8,
  pub i2c_timeout: Option<bool>,
  pub data_retention: Option<bool>,
  pub external_clock_enabled: Option<bool>,
  pub supply: Option<PowerSupply>,
  pub powerfail_threshold: Option<PowerFailThreshold>,
}

/// MAX3134x family Real Time Clock (RTC) driver for the
/// MAX31328, MAX31329, MAX31341 and MAX31343,
/// rust no_std driver (utilizes the embedded_hal i2c interface).
///
/// Every operation is a one-shot transaction against the device: the
/// driver keeps no register cache and no state beyond the bus handle, so
/// any call is idempotent given the same device register contents.
pub struct Max3134x<I2C, D> {
  i2c: I2C,
  delay: D,
  regs: &'static ChipRegisters,
  mux_addr: u8,
  mux_chan: u8,
}

impl<I2C, D, E> Max3134x<I2C, D>
  where
    I2C: Write<Error = E> + Read<Error = E> + WriteRead<Error = E>,
    D: DelayMs<u8>,
{

  /// New driver instance, assumes that there is no i2c mux
  /// sitting between the RTC and the host.
  pub fn new(chip: Chip, i2c: I2C, delay: D) -> Self {
    Max3134x {
      i2c,
      delay,
      regs: chip.registers(),
      mux_addr: 0u8,
      mux_chan: 0u8,
    }
  }

  /// Allows the caller to create a new driver instance with
  /// an i2c mux between the RTC and the host.
  /// - `mux_addr` : the i2c address of the mux itself
  /// - `mux_chan` : the mux channel assigned to the RTC
  pub fn new_with_mux(chip: Chip, i2c: I2C, delay: D, mux_addr: u8, mux_chan: u8) -> Self {
    Max3134x {
      i2c,
      delay,
      regs: chip.registers(),
      mux_addr,
      mux_chan,
    }
  }

  /// Give back the bus and delay, for example to reinitialize the bus
  /// after a transport error.
  pub fn release(self) -> (I2C, D) {
    (self.i2c, self.delay)
  }

  // If using an i2c mux, tell the mux to select our channel
  fn select_mux_channel(&mut self) -> Result<(), Error<E>> {
    if self.mux_addr != 0u8 {
      self.i2c.write(self.mux_addr, &[self.mux_chan]).map_err(Error::Bus)
    }
    else {
      Ok(())
    }
  }

  fn write_register(&mut self, reg: u8, data: u8) -> Result<(), Error<E>> {
    self.select_mux_channel()?;
    self.i2c.write(self.regs.address, &[reg, data]).map_err(Error::Bus)
  }

  // write a block of registers in a single bus burst
  fn write_registers(&mut self, reg: u8, data: &[u8]) -> Result<(), Error<E>> {
    if data.len() > MAX_WRITE_BURST {
      return Err(Error::InvalidArgument);
    }
    self.select_mux_channel()?;
    let mut buf = [0u8; MAX_WRITE_BURST + 1];
    buf[0] = reg;
    buf[1..=data.len()].copy_from_slice(data);
    self.i2c.write(self.regs.address, &buf[..data.len() + 1]).map_err(Error::Bus)
  }

  fn read_register(&mut self, reg: u8) -> Result<u8, Error<E>> {
    self.select_mux_channel()?;
    let mut buf = [0];
    self.i2c.write_read(self.regs.address, &[reg], &mut buf).map_err(Error::Bus)?;
    Ok(buf[0])
  }

  // read a block of registers all at once
  fn read_registers(&mut self, reg: u8, read_buf: &mut [u8]) -> Result<(), Error<E>> {
    self.select_mux_channel()?;
    self.i2c.write_read(self.regs.address, &[reg], read_buf).map_err(Error::Bus)
  }

  // set specific bits in a register:
  // all bits must be high that you wish to set
  fn set_reg_bits(&mut self, reg: u8, bits: u8) -> Result<(), Error<E>> {
    let mut reg_val = self.read_register(reg)?;
    reg_val |= bits;
    self.write_register(reg, reg_val)
  }

  // clear specific bits in a register:
  // all bits must be high that you wish to be cleared
  fn clear_reg_bits(&mut self, reg: u8, bits: u8) -> Result<(), Error<E>> {
    let mut reg_val = self.read_register(reg)?;
    reg_val &= !(bits);
    self.write_register(reg, reg_val)
  }

  fn read_field(&mut self, field: Field) -> Result<u8, Error<E>> {
    let reg_val = self.read_register(field.reg)?;
    Ok(field.get(reg_val))
  }

  // read-modify-write of one named bit field, preserving every other bit
  // of its register byte
  fn update_field(&mut self, field: Field, value: u8) -> Result<(), Error<E>> {
    let reg_val = self.read_register(field.reg)?;
    self.write_register(field.reg, field.put(reg_val, value))
  }

  /// Read the current date and time in a single burst,
  /// so a mid-read second rollover cannot tear the result.
  pub fn get_time(&mut self) -> Result<RtcDateTime, Error<E>> {
    let mut block = [0u8; 7];
    self.read_registers(self.regs.clock, &mut block)?;
    Ok(decode_clock_block(&block))
  }

  /// Set the date and time as a single burst write of the clock block.
  /// `format` selects the on-device hours encoding; the input is always
  /// 24-hour. Fails with `InvalidDate` for years outside 2000..=2199.
  ///
  /// On the MAX31341 this also runs the SET_RTC transfer latch sequence
  /// that moves the written block into the timekeeping core.
  pub fn set_time(&mut self, time: &RtcDateTime, format: HourFormat) -> Result<(), Error<E>> {
    let block = encode_clock_block(time, format)?;
    self.write_registers(self.regs.clock, &block)?;

    if let Some(latch) = self.regs.set_rtc_latch {
      let mut val = self.read_register(latch.reg)?;
      val = latch.put(val, 0);
      self.write_register(latch.reg, val)?;
      self.delay.delay_ms(SET_RTC_HOLD_MS);

      val = latch.put(val, 1);
      self.write_register(latch.reg, val)?;
      // the latch must be kept high at least 10ms
      self.delay.delay_ms(SET_RTC_HOLD_MS);

      val = latch.put(val, 0);
      self.write_register(latch.reg, val)?;
    }

    Ok(())
  }

  /// The hour format the clock is currently running in, read from the
  /// format flag in the hours register.
  pub fn hour_format(&mut self) -> Result<HourFormat, Error<E>> {
    let hours = self.read_register(self.regs.clock + 2)?;
    if hours & HOURS_F12_BIT != 0 {
      Ok(HourFormat::Hour12)
    } else {
      Ok(HourFormat::Hour24)
    }
  }

  /// Program an alarm. Only the fields of `time` at and below the
  /// periodicity's granularity take part in the match: a `Weekly` alarm
  /// compares the weekday (0..=6, Sunday = 0), `Monthly` and coarser
  /// compare the day of the month. Alarm hours are packed in whatever
  /// hour format the clock itself is running, so the comparator sees
  /// matching encodings.
  ///
  /// Returns `UnsupportedPeriod` instead of degrading when the slot or
  /// chip cannot express the periodicity (see [`AlarmPeriod`]).
  pub fn set_alarm(
    &mut self,
    alarm: Alarm,
    time: &RtcDateTime,
    period: AlarmPeriod,
  ) -> Result<(), Error<E>> {
    let has_month_year = self.regs.alarm1_len == 6;
    check_period_support(alarm, period, has_month_year)?;

    let format = self.hour_format()?;
    let block = encode_alarm_block(alarm, time, period, format, has_month_year)?;
    match alarm {
      Alarm::One => self.write_registers(self.regs.alarm1, &block[..self.regs.alarm1_len]),
      Alarm::Two => self.write_registers(self.regs.alarm2, &block[1..4]),
    }
  }

  /// Read back an alarm: its target time, periodicity, and whether its
  /// interrupt is enabled. In the returned time only the fields the
  /// periodicity compares are meaningful; the inactive one of
  /// weekday/day is zero.
  pub fn get_alarm(
    &mut self,
    alarm: Alarm,
  ) -> Result<(RtcDateTime, AlarmPeriod, bool), Error<E>> {
    let has_month_year = self.regs.alarm1_len == 6;
    let mut block = [0u8; 6];
    match alarm {
      Alarm::One => {
        let len = self.regs.alarm1_len;
        self.read_registers(self.regs.alarm1, &mut block[..len])?;
      }
      Alarm::Two => {
        // no seconds register; block[0] stays zero
        self.read_registers(self.regs.alarm2, &mut block[1..4])?;
      }
    }
    let (time, period) = decode_alarm_block(alarm, &block, has_month_year);

    let int_en = self.read_register(self.regs.int_en)?;
    let enabled = match alarm {
      Alarm::One => int_en & A1_BIT != 0,
      Alarm::Two => int_en & A2_BIT != 0,
    };

    Ok((time, period, enabled))
  }

  fn int_bits(&self, int: Interrupt) -> Result<u8, Error<E>> {
    match int {
      Interrupt::Alarm1 => Ok(A1_BIT),
      Interrupt::Alarm2 => Ok(A2_BIT),
      Interrupt::Timer => {
        let tie = self.regs.tie.ok_or(Error::InvalidArgument)?;
        Ok(tie.mask())
      }
    }
  }

  /// Enable interrupt output for the given source
  pub fn irq_enable(&mut self, int: Interrupt) -> Result<(), Error<E>> {
    let bits = self.int_bits(int)?;
    if let Some(intcn) = self.regs.intcn {
      // route the shared pin to interrupt output rather than square wave
      self.update_field(intcn, 1)?;
    }
    self.set_reg_bits(self.regs.int_en, bits)
  }

  /// Disable interrupt output for the given source
  pub fn irq_disable(&mut self, int: Interrupt) -> Result<(), Error<E>> {
    let bits = self.int_bits(int)?;
    self.clear_reg_bits(self.regs.int_en, bits)
  }

  /// Read the interrupt/status flags
  pub fn status(&mut self) -> Result<Status, Error<E>> {
    let val = self.read_register(self.regs.int_status)?;
    Ok(Status {
      alarm1_triggered: val & A1_BIT != 0,
      alarm2_triggered: val & A2_BIT != 0,
      // flag bits sit at the same positions as their enable bits
      timer_triggered: self.regs.tie.map_or(false, |tie| val & (1 << tie.pos) != 0),
      osc_stopped: self.regs.osf.get(val) != 0,
      power_fail: self.regs.pfail.map_or(false, |f| f.get(val) != 0),
    })
  }

  /// Clear latched interrupt flags. Most of the family clears the status
  /// register on read; the MAX31328 wants the alarm flags written back low.
  pub fn clear_interrupts(&mut self) -> Result<(), Error<E>> {
    let val = self.read_register(self.regs.int_status)?;
    if self.regs.status_write_to_clear {
      self.write_register(self.regs.int_status, val & !(A1_BIT | A2_BIT))?;
    }
    Ok(())
  }

  /// Enable the RTC oscillator
  pub fn rtc_start(&mut self) -> Result<(), Error<E>> {
    let on = if self.regs.osc_enable_low { 0 } else { 1 };
    self.update_field(self.regs.osc_enable, on)
  }

  /// Disable the RTC oscillator
  pub fn rtc_stop(&mut self) -> Result<(), Error<E>> {
    let off = if self.regs.osc_enable_low { 1 } else { 0 };
    self.update_field(self.regs.osc_enable, off)
  }

  /// Put the device into its reset state
  pub fn sw_reset_assert(&mut self) -> Result<(), Error<E>> {
    let reset = self.regs.reset.ok_or(Error::InvalidArgument)?;
    self.update_field(reset, if self.regs.reset_low { 0 } else { 1 })
  }

  /// Release the device from its reset state
  pub fn sw_reset_release(&mut self) -> Result<(), Error<E>> {
    let reset = self.regs.reset.ok_or(Error::InvalidArgument)?;
    self.update_field(reset, if self.regs.reset_low { 1 } else { 0 })
  }

  /// Select the square wave / clock output frequency, enabling the
  /// output where the part has a separate enable bit.
  pub fn set_square_wave_frequency(&mut self, freq: SquareWaveFrequency) -> Result<(), Error<E>> {
    let mut val = self.read_register(self.regs.sqw_freq.reg)?;
    val = self.regs.sqw_freq.put(val, freq as u8);
    if let Some(intcn) = self.regs.intcn {
      // the shared pin outputs the square wave only with INTCN low
      val = intcn.put(val, 0);
    }
    if let Some(enable) = self.regs.sqw_enable {
      val = enable.put(val, 1);
    }
    self.write_register(self.regs.sqw_freq.reg, val)
  }

  /// Select the external clock input frequency. On the MAX31341 the
  /// clock synchronization delay is reprogrammed to suit: slower input
  /// clocks need a wider sync window.
  pub fn set_clkin_frequency(&mut self, freq: ClkinFrequency) -> Result<(), Error<E>> {
    let field = self.regs.clkin_freq.ok_or(Error::InvalidArgument)?;
    self.update_field(field, freq as u8)?;

    if let Some(sync) = self.regs.clock_sync {
      let code = if freq == ClkinFrequency::Hz1 {
        SYNC_DELAY_1SEC
      } else {
        SYNC_DELAY_100MS
      };
      self.update_field(sync, code)?;
    }
    Ok(())
  }

  /// Switch between the external clock input and the internal oscillator
  pub fn enable_external_clock(&mut self, enable: bool) -> Result<(), Error<E>> {
    let field = self.regs.clkin_enable.ok_or(Error::InvalidArgument)?;
    self.update_field(field, enable as u8)?;

    if let Some(sync) = self.regs.clock_sync {
      let code = if enable { SYNC_DELAY_1SEC } else { SYNC_DELAY_10MS };
      self.update_field(sync, code)?;
    }
    Ok(())
  }

  /// Select the device power source
  pub fn supply_select(&mut self, supply: PowerSupply) -> Result<(), Error<E>> {
    let manual = self.regs.supply_manual.ok_or(Error::InvalidArgument)?;
    let vbackup = self.regs.supply_vbackup.ok_or(Error::InvalidArgument)?;

    let mut val = self.read_register(manual.reg)?;
    match supply {
      PowerSupply::Auto => {
        val = manual.put(val, 0);
      }
      PowerSupply::Vcc => {
        val = manual.put(val, 1);
        val = vbackup.put(val, 0);
      }
      PowerSupply::Backup => {
        val = manual.put(val, 1);
        val = vbackup.put(val, 1);
      }
    }
    self.write_register(manual.reg, val)
  }

  /// Set the power fail comparator threshold
  pub fn powerfail_threshold(&mut self, threshold: PowerFailThreshold) -> Result<(), Error<E>> {
    let field = self.regs.powerfail_threshold.ok_or(Error::InvalidArgument)?;
    self.update_field(field, threshold as u8)
  }

  /// Configure the trickle charger path and enable charging
  pub fn trickle_charger_enable(&mut self, path: TricklePath) -> Result<(), Error<E>> {
    let trickle = self.regs.trickle.ok_or(Error::InvalidArgument)?;
    let mut val = path as u8;
    if let Some(enable) = trickle.enable {
      val = enable.put(val, trickle.enable_code);
    }
    self.write_register(trickle.reg, val)
  }

  /// Disable the trickle charger, leaving the path selection alone where
  /// the part has a separate enable field.
  pub fn trickle_charger_disable(&mut self) -> Result<(), Error<E>> {
    let trickle = self.regs.trickle.ok_or(Error::InvalidArgument)?;
    match trickle.enable {
      Some(enable) => self.update_field(enable, 0),
      // no enable field: a cleared path code disconnects the charger
      None => self.write_register(trickle.reg, 0),
    }
  }

  /// Enter or leave data retention mode. The MAX31341 pairs the
  /// retention bit with stopping the oscillator.
  pub fn set_data_retention_mode(&mut self, enable: bool) -> Result<(), Error<E>> {
    let field = self.regs.data_retention.ok_or(Error::InvalidArgument)?;
    if self.regs.data_retention_stops_osc {
      if enable {
        self.rtc_stop()?;
      } else {
        self.rtc_start()?;
      }
    }
    self.update_field(field, enable as u8)
  }

  /// Read all named configuration options in one set
  pub fn get_configuration(&mut self) -> Result<ConfigSet, Error<E>> {
    let osc_raw = self.read_field(self.regs.osc_enable)?;
    let oscillator_enabled = (osc_raw != 0) ^ self.regs.osc_enable_low;

    let square_wave_frequency = self.read_field(self.regs.sqw_freq)?;

    let i2c_timeout = match self.regs.i2c_timeout {
      Some(field) => Some(self.read_field(field)? != 0),
      None => None,
    };
    let data_retention = match self.regs.data_retention {
      Some(field) => Some(self.read_field(field)? != 0),
      None => None,
    };
    let external_clock_enabled = match self.regs.clkin_enable {
      Some(field) => Some(self.read_field(field)? != 0),
      None => None,
    };

    let supply = match (self.regs.supply_manual, self.regs.supply_vbackup) {
      (Some(manual), Some(vbackup)) => {
        let val = self.read_register(manual.reg)?;
        Some(if manual.get(val) == 0 {
          PowerSupply::Auto
        } else if vbackup.get(val) == 0 {
          PowerSupply::Vcc
        } else {
          PowerSupply::Backup
        })
      }
      _ => None,
    };

    let powerfail_threshold = match self.regs.powerfail_threshold {
      Some(field) => Some(PowerFailThreshold::from_code(self.read_field(field)?)),
      None => None,
    };

    Ok(ConfigSet {
      oscillator_enabled,
      square_wave_frequency,
      i2c_timeout,
      data_retention,
      external_clock_enabled,
      supply,
      powerfail_threshold,
    })
  }

  /// Apply a configuration set. Each option is its own read-modify-write;
  /// options set on a chip that lacks them fail with `InvalidArgument`.
  pub fn set_configuration(&mut self, config: &ConfigSet) -> Result<(), Error<E>> {
    if config.oscillator_enabled {
      self.rtc_start()?;
    } else {
      self.rtc_stop()?;
    }

    self.update_field(self.regs.sqw_freq, config.square_wave_frequency)?;

    if let Some(enable) = config.i2c_timeout {
      let field = self.regs.i2c_timeout.ok_or(Error::InvalidArgument)?;
      self.update_field(field, enable as u8)?;
    }
    if let Some(enable) = config.data_retention {
      let field = self.regs.data_retention.ok_or(Error::InvalidArgument)?;
      self.update_field(field, enable as u8)?;
    }
    if let Some(enable) = config.external_clock_enabled {
      let field = self.regs.clkin_enable.ok_or(Error::InvalidArgument)?;
      self.update_field(field, enable as u8)?;
    }
    if let Some(supply) = config.supply {
      self.supply_select(supply)?;
    }
    if let Some(threshold) = config.powerfail_threshold {
      self.powerfail_threshold(threshold)?;
    }
    Ok(())
  }

  /// Initialize the countdown timer without starting it: the timer is
  /// held (TE low, TPAUSE high) while the repeat mode, tick rate and
  /// initial count are programmed.
  pub fn timer_init(
    &mut self,
    initial_value: u8,
    repeat: bool,
    freq: TimerFrequency,
  ) -> Result<(), Error<E>> {
    let timer = self.regs.timer.ok_or(Error::InvalidArgument)?;

    let mut val = self.read_register(timer.config)?;
    val = timer.te.put(val, 0);
    val = timer.tpause.put(val, 1);
    val = timer.trpt.put(val, repeat as u8);
    val = timer.tfs.put(val, freq as u8);
    self.write_register(timer.config, val)?;

    self.write_register(timer.init, initial_value)
  }

  // Every timer state transition is one read-modify-write of the
  // TE/TPAUSE pair so the two bits change together.
  fn timer_transition(&mut self, te: u8, tpause: u8) -> Result<(), Error<E>> {
    let timer = self.regs.timer.ok_or(Error::InvalidArgument)?;
    let mut val = self.read_register(timer.config)?;
    val = timer.te.put(val, te);
    val = timer.tpause.put(val, tpause);
    self.write_register(timer.config, val)
  }

  /// Start the countdown. Entering from the stopped state reloads the
  /// initial count; from paused it keeps the preserved count (the
  /// hardware reload triggers on the rising edge of TE only).
  pub fn timer_start(&mut self) -> Result<(), Error<E>> {
    self.timer_transition(1, 0)
  }

  /// Pause the countdown, preserving the current count
  pub fn timer_pause(&mut self) -> Result<(), Error<E>> {
    self.timer_transition(1, 1)
  }

  /// Resume a paused countdown from the preserved count
  pub fn timer_continue(&mut self) -> Result<(), Error<E>> {
    self.timer_transition(1, 0)
  }

  /// Stop the countdown
  pub fn timer_stop(&mut self) -> Result<(), Error<E>> {
    self.timer_transition(0, 1)
  }

  /// Read the current countdown value
  pub fn timer_value(&mut self) -> Result<u8, Error<E>> {
    let timer = self.regs.timer.ok_or(Error::InvalidArgument)?;
    self.read_register(timer.count)
  }

  /// Battery-backed RAM size in bytes; 0 when the part has none
  pub fn nvram_size(&self) -> usize {
    self.regs.nvram.map_or(0, |region| region.len())
  }

  /// Read from battery-backed RAM. The whole range must fit the window.
  pub fn nvram_read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), Error<E>> {
    let region = self.regs.nvram.ok_or(Error::InvalidArgument)?;
    if offset + buf.len() > region.len() {
      return Err(Error::InvalidArgument);
    }
    if buf.is_empty() {
      return Ok(());
    }
    self.read_registers(region.start + offset as u8, buf)
  }

  /// Write to battery-backed RAM in a single burst
  pub fn nvram_write(&mut self, offset: usize, data: &[u8]) -> Result<(), Error<E>> {
    let region = self.regs.nvram.ok_or(Error::InvalidArgument)?;
    if offset + data.len() > region.len() {
      return Err(Error::InvalidArgument);
    }
    if data.is_empty() {
      return Ok(());
    }
    self.write_registers(region.start + offset as u8, data)
  }

  /// Kick off a one-shot temperature conversion.
  /// Fails with `Busy` while the previous conversion is still running.
  pub fn start_temp_conversion(&mut self) -> Result<(), Error<E>> {
    let temp = self.regs.temp.ok_or(Error::InvalidArgument)?;
    if let Some(busy) = temp.busy {
      if self.read_field(busy)? != 0 {
        return Err(Error::Busy);
      }
    }
    self.update_field(temp.oneshot, 1)
  }

  /// Whether the last requested conversion has finished
  /// (the one-shot bit self-clears when the result registers update)
  pub fn is_temp_ready(&mut self) -> Result<bool, Error<E>> {
    let temp = self.regs.temp.ok_or(Error::InvalidArgument)?;
    Ok(self.read_field(temp.oneshot)? == 0)
  }

  /// Latest die temperature in degrees Celsius, 0.25 degC per LSB
  pub fn temperature(&mut self) -> Result<f32, Error<E>> {
    let temp = self.regs.temp.ok_or(Error::InvalidArgument)?;
    let mut buf = [0u8; 2];
    self.read_registers(temp.msb, &mut buf)?;

    // upper 8 bits in the MSB register, lower 2 in bits 7:6 of the LSB
    let count = (((buf[0] as u16) << 2) | ((buf[1] >> 6) as u16)) & 0x3FF;

    // 10-bit two's complement
    if count & (1 << 9) != 0 {
      let magnitude = ((count ^ 0x3FF) + 1) & 0x3FF;
      Ok(-0.25 * magnitude as f32)
    } else {
      Ok(0.25 * count as f32)
    }
  }

}

impl<I2C, D, E> DateTimeAccess for Max3134x<I2C, D>
  where
    I2C: Write<Error = E> + Read<Error = E> + WriteRead<Error = E>,
    D: DelayMs<u8>,
{
  type Error = Error<E>;

  fn datetime(&mut self) -> Result<NaiveDateTime, Self::Error> {
    self.get_time()?.to_datetime().ok_or(Error::InvalidDate)
  }

  /// Writes the datetime in 24-hour format. Years outside the supported
  /// two centuries are rejected with `InvalidDate`.
  fn set_datetime(&mut self, datetime: &NaiveDateTime) -> Result<(), Self::Error> {
    self.set_time(&RtcDateTime::from_datetime(datetime), HourFormat::Hour24)
  }

}

#[cfg(test)]
mod tests {
  use super::*;
  use embedded_hal_mock::delay::MockNoop;
  use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTrans};
  use std::vec;

  const MAX31341_ADDR: u8 = 0x69;
  const MAX31343_ADDR: u8 = 0x68;
  const MAX31328_ADDR: u8 = 0x68;

  fn sample_time() -> RtcDateTime {
    RtcDateTime {
      second: 30,
      minute: 15,
      hour: 14,
      weekday: 3,
      day: 20,
      month: 6,
      year: 2023,
    }
  }

  #[test]
  fn test_get_time() {
    let expectations = [
      I2cTrans::write_read(
        MAX31341_ADDR,
        vec![0x06],
        vec![0x30, 0x15, 0x14, 0x04, 0x20, 0x06, 0x23],
      ),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31341, mock, MockNoop::new());
    assert_eq!(rtc.get_time().unwrap(), sample_time());
  }

  #[test]
  fn test_set_time_simple() {
    // the MAX31343 writes the clock block and is done
    let expectations = [
      I2cTrans::write(
        MAX31343_ADDR,
        vec![0x06, 0x30, 0x15, 0x14, 0x04, 0x20, 0x06, 0x23],
      ),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31343, mock, MockNoop::new());
    rtc.set_time(&sample_time(), HourFormat::Hour24).unwrap();
  }

  #[test]
  fn test_set_time_max31341_latch_sequence() {
    // the MAX31341 follows the block write with the SET_RTC toggle:
    // clear, raise (held 10ms), clear
    let expectations = [
      I2cTrans::write(
        MAX31341_ADDR,
        vec![0x06, 0x30, 0x15, 0x14, 0x04, 0x20, 0x06, 0x23],
      ),
      I2cTrans::write_read(MAX31341_ADDR, vec![0x01], vec![0b0000_0010]),
      I2cTrans::write(MAX31341_ADDR, vec![0x01, 0b0000_0000]),
      I2cTrans::write(MAX31341_ADDR, vec![0x01, 0b0000_0010]),
      I2cTrans::write(MAX31341_ADDR, vec![0x01, 0b0000_0000]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31341, mock, MockNoop::new());
    rtc.set_time(&sample_time(), HourFormat::Hour24).unwrap();
  }

  #[test]
  fn test_set_time_rejects_pre_epoch_year() {
    let mock = I2cMock::new(&[]);
    let mut rtc = Max3134x::new(Chip::Max31341, mock, MockNoop::new());
    let time = RtcDateTime { year: 1999, month: 1, day: 1, ..RtcDateTime::default() };
    assert!(matches!(
      rtc.set_time(&time, HourFormat::Hour24),
      Err(Error::InvalidDate)
    ));
  }

  #[test]
  fn test_set_alarm_daily() {
    let expectations = [
      // hour format probe of the clock hours register
      I2cTrans::write_read(MAX31341_ADDR, vec![0x08], vec![0x00]),
      // sec/min/hrs compared, day/date masked (weekday selector default)
      I2cTrans::write(MAX31341_ADDR, vec![0x0D, 0x30, 0x15, 0x14, 0xC3]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31341, mock, MockNoop::new());
    rtc.set_alarm(Alarm::One, &sample_time(), AlarmPeriod::Daily).unwrap();
  }

  #[test]
  fn test_set_alarm2_starts_at_minutes_register() {
    let expectations = [
      I2cTrans::write_read(MAX31341_ADDR, vec![0x08], vec![0x00]),
      I2cTrans::write(MAX31341_ADDR, vec![0x11, 0x15, 0x14, 0xC3]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31341, mock, MockNoop::new());
    rtc.set_alarm(Alarm::Two, &sample_time(), AlarmPeriod::Daily).unwrap();
  }

  #[test]
  fn test_set_alarm_onetime_uses_month_year_registers() {
    let expectations = [
      I2cTrans::write_read(MAX31343_ADDR, vec![0x08], vec![0x00]),
      I2cTrans::write(
        MAX31343_ADDR,
        vec![0x0D, 0x30, 0x15, 0x14, 0x20, 0x06, 0x23],
      ),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31343, mock, MockNoop::new());
    rtc.set_alarm(Alarm::One, &sample_time(), AlarmPeriod::OneTime).unwrap();
  }

  #[test]
  fn test_unsupported_alarm_periods_fail_without_bus_traffic() {
    let mock = I2cMock::new(&[]);
    let mut rtc = Max3134x::new(Chip::Max31341, mock, MockNoop::new());
    // no seconds register on alarm 2
    assert!(matches!(
      rtc.set_alarm(Alarm::Two, &sample_time(), AlarmPeriod::EverySecond),
      Err(Error::UnsupportedPeriod)
    ));
    // no month/year match registers on the MAX31341
    assert!(matches!(
      rtc.set_alarm(Alarm::One, &sample_time(), AlarmPeriod::Yearly),
      Err(Error::UnsupportedPeriod)
    ));
    assert!(matches!(
      rtc.set_alarm(Alarm::One, &sample_time(), AlarmPeriod::OneTime),
      Err(Error::UnsupportedPeriod)
    ));
  }

  #[test]
  fn test_get_alarm() {
    let expectations = [
      I2cTrans::write_read(
        MAX31341_ADDR,
        vec![0x0D],
        vec![0x30, 0x15, 0x14, 0xC3],
      ),
      // A1IE set in the interrupt enable register
      I2cTrans::write_read(MAX31341_ADDR, vec![0x04], vec![0x01]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31341, mock, MockNoop::new());
    let (time, period, enabled) = rtc.get_alarm(Alarm::One).unwrap();
    assert_eq!(period, AlarmPeriod::Daily);
    assert!(enabled);
    assert_eq!(time.second, 30);
    assert_eq!(time.minute, 15);
    assert_eq!(time.hour, 14);
    // weekday alarm selector active: the date field reads as zero
    assert_eq!(time.weekday, 3);
    assert_eq!(time.day, 0);
  }

  #[test]
  fn test_rmw_preserves_neighbor_bits() {
    // square wave frequency lands in CFG1 bits 2:1 on the MAX31341;
    // neighbors all high must survive the write...
    let expectations = [
      I2cTrans::write_read(MAX31341_ADDR, vec![0x00], vec![0b1111_1001]),
      I2cTrans::write(MAX31341_ADDR, vec![0x00, 0b1111_1111]),
      // ...and neighbors all low as well
      I2cTrans::write_read(MAX31341_ADDR, vec![0x00], vec![0b0000_0000]),
      I2cTrans::write(MAX31341_ADDR, vec![0x00, 0b0000_0110]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31341, mock, MockNoop::new());
    rtc.set_square_wave_frequency(SquareWaveFrequency::Hz32768).unwrap();
    rtc.set_square_wave_frequency(SquareWaveFrequency::Hz32768).unwrap();
  }

  #[test]
  fn test_timer_init_and_transitions() {
    // MAX31343: TFS bits 1:0, TRPT bit 2, TPAUSE bit 3, TE bit 4
    let expectations = [
      // init: TE low, TPAUSE high, repeat on, 16Hz
      I2cTrans::write_read(MAX31343_ADDR, vec![0x05], vec![0x00]),
      I2cTrans::write(MAX31343_ADDR, vec![0x05, 0b0000_1111]),
      I2cTrans::write(MAX31343_ADDR, vec![0x17, 32]),
      // start: TE high, TPAUSE low
      I2cTrans::write_read(MAX31343_ADDR, vec![0x05], vec![0b0000_1111]),
      I2cTrans::write(MAX31343_ADDR, vec![0x05, 0b0001_0111]),
      // pause: TE high, TPAUSE high
      I2cTrans::write_read(MAX31343_ADDR, vec![0x05], vec![0b0001_0111]),
      I2cTrans::write(MAX31343_ADDR, vec![0x05, 0b0001_1111]),
      // continue: TE high, TPAUSE low
      I2cTrans::write_read(MAX31343_ADDR, vec![0x05], vec![0b0001_1111]),
      I2cTrans::write(MAX31343_ADDR, vec![0x05, 0b0001_0111]),
      // stop: TE low, TPAUSE high
      I2cTrans::write_read(MAX31343_ADDR, vec![0x05], vec![0b0001_0111]),
      I2cTrans::write(MAX31343_ADDR, vec![0x05, 0b0000_1111]),
      // count readback
      I2cTrans::write_read(MAX31343_ADDR, vec![0x16], vec![17]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31343, mock, MockNoop::new());
    rtc.timer_init(32, true, TimerFrequency::Hz16).unwrap();
    rtc.timer_start().unwrap();
    rtc.timer_pause().unwrap();
    rtc.timer_continue().unwrap();
    rtc.timer_stop().unwrap();
    assert_eq!(rtc.timer_value().unwrap(), 17);
  }

  #[test]
  fn test_timer_absent_on_max31328() {
    let mock = I2cMock::new(&[]);
    let mut rtc = Max3134x::new(Chip::Max31328, mock, MockNoop::new());
    assert!(matches!(rtc.timer_start(), Err(Error::InvalidArgument)));
    assert!(matches!(
      rtc.timer_init(10, false, TimerFrequency::Hz64),
      Err(Error::InvalidArgument)
    ));
  }

  #[test]
  fn test_nvram_access() {
    let expectations = [
      I2cTrans::write_read(MAX31341_ADDR, vec![0x16], vec![1, 2, 3, 4]),
      I2cTrans::write(MAX31341_ADDR, vec![0x18, 0xAA, 0xBB]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31341, mock, MockNoop::new());

    assert_eq!(rtc.nvram_size(), 64);
    let mut buf = [0u8; 4];
    rtc.nvram_read(0, &mut buf).unwrap();
    assert_eq!(buf, [1, 2, 3, 4]);
    rtc.nvram_write(2, &[0xAA, 0xBB]).unwrap();
  }

  #[test]
  fn test_nvram_bounds() {
    let mock = I2cMock::new(&[]);
    let mut rtc = Max3134x::new(Chip::Max31341, mock, MockNoop::new());
    let mut buf = [0u8; 8];
    assert!(matches!(rtc.nvram_read(60, &mut buf), Err(Error::InvalidArgument)));
    assert!(matches!(rtc.nvram_write(64, &[0]), Err(Error::InvalidArgument)));

    // no NVRAM at all on the MAX31328
    let mock = I2cMock::new(&[]);
    let mut rtc = Max3134x::new(Chip::Max31328, mock, MockNoop::new());
    assert_eq!(rtc.nvram_size(), 0);
    assert!(matches!(rtc.nvram_read(0, &mut buf), Err(Error::InvalidArgument)));
  }

  #[test]
  fn test_trickle_charger_variants() {
    // MAX31341: the path code alone enables charging
    let expectations = [
      I2cTrans::write(MAX31341_ADDR, vec![0x57, 0x08]),
      I2cTrans::write(MAX31341_ADDR, vec![0x57, 0x00]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31341, mock, MockNoop::new());
    rtc.trickle_charger_enable(TricklePath::Ohm3kSchottky).unwrap();
    rtc.trickle_charger_disable().unwrap();

    // MAX31343: the TCHE field wants the enable code 0b0101
    let expectations = [
      I2cTrans::write(MAX31343_ADDR, vec![0x19, 0x58]),
      I2cTrans::write_read(MAX31343_ADDR, vec![0x19], vec![0x58]),
      I2cTrans::write(MAX31343_ADDR, vec![0x19, 0x08]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31343, mock, MockNoop::new());
    rtc.trickle_charger_enable(TricklePath::Ohm3kSchottky).unwrap();
    rtc.trickle_charger_disable().unwrap();
  }

  #[test]
  fn test_supply_select() {
    let expectations = [
      I2cTrans::write_read(MAX31341_ADDR, vec![0x56], vec![0b0000_1000]),
      I2cTrans::write(MAX31341_ADDR, vec![0x56, 0b0000_0100]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31341, mock, MockNoop::new());
    rtc.supply_select(PowerSupply::Vcc).unwrap();
  }

  #[test]
  fn test_irq_enable_max31328_sets_intcn() {
    let expectations = [
      // INTCN routes the pin to interrupt output
      I2cTrans::write_read(MAX31328_ADDR, vec![0x0E], vec![0x00]),
      I2cTrans::write(MAX31328_ADDR, vec![0x0E, 0b0000_0100]),
      // then A1IE is set
      I2cTrans::write_read(MAX31328_ADDR, vec![0x0E], vec![0b0000_0100]),
      I2cTrans::write(MAX31328_ADDR, vec![0x0E, 0b0000_0101]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31328, mock, MockNoop::new());
    rtc.irq_enable(Interrupt::Alarm1).unwrap();
  }

  #[test]
  fn test_timer_irq_absent_on_max31328() {
    let mock = I2cMock::new(&[]);
    let mut rtc = Max3134x::new(Chip::Max31328, mock, MockNoop::new());
    assert!(matches!(rtc.irq_enable(Interrupt::Timer), Err(Error::InvalidArgument)));
  }

  #[test]
  fn test_status_and_clear() {
    // MAX31343 status: A1F and OSF set
    let expectations = [
      I2cTrans::write_read(MAX31343_ADDR, vec![0x00], vec![0b0100_0001]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31343, mock, MockNoop::new());
    let status = rtc.status().unwrap();
    assert!(status.alarm1_triggered);
    assert!(!status.alarm2_triggered);
    assert!(status.osc_stopped);

    // the MAX31328 clears alarm flags by writing them back low
    let expectations = [
      I2cTrans::write_read(MAX31328_ADDR, vec![0x0F], vec![0b1000_0011]),
      I2cTrans::write(MAX31328_ADDR, vec![0x0F, 0b1000_0000]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31328, mock, MockNoop::new());
    rtc.clear_interrupts().unwrap();
  }

  #[test]
  fn test_temperature_read() {
    let expectations = [
      // +25.25 degC: count = 101
      I2cTrans::write_read(MAX31328_ADDR, vec![0x11], vec![0x19, 0x40]),
      // -24.75 degC
      I2cTrans::write_read(MAX31328_ADDR, vec![0x11], vec![0b1110_0111, 0b0100_0000]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31328, mock, MockNoop::new());
    assert_eq!(rtc.temperature().unwrap(), 25.25);
    assert_eq!(rtc.temperature().unwrap(), -24.75);
  }

  #[test]
  fn test_temp_conversion_busy() {
    let expectations = [
      // BSY set: conversion refused
      I2cTrans::write_read(MAX31328_ADDR, vec![0x0F], vec![0b0000_0100]),
      // BSY clear: CONV gets set read-modify-write
      I2cTrans::write_read(MAX31328_ADDR, vec![0x0F], vec![0x00]),
      I2cTrans::write_read(MAX31328_ADDR, vec![0x0E], vec![0x00]),
      I2cTrans::write(MAX31328_ADDR, vec![0x0E, 0b0010_0000]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31328, mock, MockNoop::new());
    assert!(matches!(rtc.start_temp_conversion(), Err(Error::Busy)));
    rtc.start_temp_conversion().unwrap();
  }

  #[test]
  fn test_get_configuration_max31328() {
    let expectations = [
      // EOSC# low: oscillator running
      I2cTrans::write_read(MAX31328_ADDR, vec![0x0E], vec![0x00]),
      // RS = 0b11
      I2cTrans::write_read(MAX31328_ADDR, vec![0x0E], vec![0b0001_1000]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31328, mock, MockNoop::new());
    let config = rtc.get_configuration().unwrap();
    assert!(config.oscillator_enabled);
    assert_eq!(config.square_wave_frequency, 0b11);
    assert_eq!(config.i2c_timeout, None);
    assert_eq!(config.data_retention, None);
    assert_eq!(config.supply, None);
    assert_eq!(config.powerfail_threshold, None);
  }

  #[test]
  fn test_set_configuration_max31341() {
    let config = ConfigSet {
      oscillator_enabled: true,
      square_wave_frequency: 0b01,
      i2c_timeout: None,
      data_retention: None,
      external_clock_enabled: None,
      supply: None,
      powerfail_threshold: None,
    };
    let expectations = [
      // oscillator on: OSCONZ cleared
      I2cTrans::write_read(MAX31341_ADDR, vec![0x00], vec![0b0000_1000]),
      I2cTrans::write(MAX31341_ADDR, vec![0x00, 0b0000_0000]),
      // square wave code into the RS field
      I2cTrans::write_read(MAX31341_ADDR, vec![0x00], vec![0b0000_0000]),
      I2cTrans::write(MAX31341_ADDR, vec![0x00, 0b0000_0010]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31341, mock, MockNoop::new());
    rtc.set_configuration(&config).unwrap();

    // options a chip does not have are rejected, not ignored
    let mock = I2cMock::new(&[
      I2cTrans::write_read(MAX31328_ADDR, vec![0x0E], vec![0x00]),
      I2cTrans::write(MAX31328_ADDR, vec![0x0E, 0x00]),
      I2cTrans::write_read(MAX31328_ADDR, vec![0x0E], vec![0x00]),
      I2cTrans::write(MAX31328_ADDR, vec![0x0E, 0b0000_1000]),
    ]);
    let mut rtc = Max3134x::new(Chip::Max31328, mock, MockNoop::new());
    let config = ConfigSet { i2c_timeout: Some(true), ..config };
    assert!(matches!(
      rtc.set_configuration(&config),
      Err(Error::InvalidArgument)
    ));
  }

  #[test]
  fn test_datetime_access_trait() {
    let expectations = [
      I2cTrans::write(
        MAX31343_ADDR,
        vec![0x06, 0x30, 0x15, 0x14, 0x03, 0x20, 0x06, 0x23],
      ),
      I2cTrans::write_read(
        MAX31343_ADDR,
        vec![0x06],
        vec![0x30, 0x15, 0x14, 0x03, 0x20, 0x06, 0x23],
      ),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new(Chip::Max31343, mock, MockNoop::new());

    let dt = NaiveDate::from_ymd_opt(2023, 6, 20)
      .unwrap()
      .and_hms_opt(14, 15, 30)
      .unwrap();
    rtc.set_datetime(&dt).unwrap();
    assert_eq!(rtc.datetime().unwrap(), dt);
  }

  #[test]
  fn test_mux_channel_selected_before_transactions() {
    let expectations = [
      I2cTrans::write(0x70, vec![0x04]),
      I2cTrans::write_read(
        MAX31341_ADDR,
        vec![0x06],
        vec![0x30, 0x15, 0x14, 0x04, 0x20, 0x06, 0x23],
      ),
    ];
    let mock = I2cMock::new(&expectations);
    let mut rtc = Max3134x::new_with_mux(Chip::Max31341, mock, MockNoop::new(), 0x70, 0x04);
    assert_eq!(rtc.get_time().unwrap(), sample_time());
  }

}
