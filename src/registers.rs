//! Per-chip register layout tables.
//!
//! The MAX3134x parts share one register vocabulary (BCD clock block,
//! two alarms with per-field mask bits, countdown timer, trickle charger)
//! but scatter it across different addresses and bit positions. Everything
//! chip-specific lives here as data; the driver logic in the rest of the
//! crate is shared.

/// A named bit field within a single register byte:
/// register address, bit offset of the least significant bit, width in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
  pub reg: u8,
  pub pos: u8,
  pub width: u8,
}

impl Field {
  pub const fn mask(&self) -> u8 {
    (((1u16 << self.width) - 1) as u8) << self.pos
  }

  /// Extract this field's value from a raw register byte
  pub const fn get(&self, byte: u8) -> u8 {
    (byte & self.mask()) >> self.pos
  }

  /// Return `byte` with this field replaced by `value`, all other bits kept
  pub const fn put(&self, byte: u8, value: u8) -> u8 {
    (byte & !self.mask()) | ((value << self.pos) & self.mask())
  }
}

/// Countdown timer register set.
///
/// TE and TPAUSE select the timer state together:
/// TE=0 stopped, TE=1/TPAUSE=0 running, TE=1/TPAUSE=1 paused.
/// The hardware reloads the initial count when TE rises from the
/// stopped state only.
#[derive(Debug, Clone, Copy)]
pub struct TimerRegs {
  pub config: u8,
  pub count: u8,
  pub init: u8,
  pub te: Field,
  pub tpause: Field,
  pub trpt: Field,
  pub tfs: Field,
}

/// Battery-backup RAM window (inclusive register address range).
#[derive(Debug, Clone, Copy)]
pub struct NvramRegion {
  pub start: u8,
  pub end: u8,
}

impl NvramRegion {
  pub const fn len(&self) -> usize {
    (self.end - self.start) as usize + 1
  }
}

/// Trickle charger register. The 4-bit path code (resistor + diode
/// selection) is common to all parts that have a charger; how charging is
/// enabled is not:
/// - MAX31329 has a dedicated enable bit (`enable` is 1 bit wide, code 1)
/// - MAX31343 wants the code 0b0101 in the TCHE field (4 bits wide)
/// - MAX31341 has no enable field at all, the path code alone enables
#[derive(Debug, Clone, Copy)]
pub struct TrickleRegs {
  pub reg: u8,
  pub enable: Option<Field>,
  pub enable_code: u8,
}

/// On-die temperature sensor registers (MAX31328, MAX31343).
#[derive(Debug, Clone, Copy)]
pub struct TempRegs {
  /// MSB register; LSB follows at the next address
  pub msb: u8,
  /// One-shot conversion trigger; reads back 0 once the result is ready
  pub oneshot: Field,
  /// Busy flag checked before starting a conversion, where the part has one
  pub busy: Option<Field>,
}

/// Register layout descriptor for one chip variant.
///
/// `Option` fields are capabilities: `None` means the part simply does not
/// have that register, and the corresponding driver call returns
/// `Error::InvalidArgument`.
#[derive(Debug)]
pub struct ChipRegisters {
  /// Fixed 7-bit i2c bus address
  pub address: u8,

  /// First register of the 7-byte clock block (seconds..year)
  pub clock: u8,
  /// First register of alarm 1 (seconds)
  pub alarm1: u8,
  /// Alarm 1 block length: 4, or 6 where month/year match registers exist
  pub alarm1_len: usize,
  /// First register of alarm 2 (minutes; alarm 2 has no seconds register)
  pub alarm2: u8,

  /// Interrupt enable register; A1IE is bit 0, A2IE is bit 1 on all parts
  pub int_en: u8,
  /// Interrupt/status flag register
  pub int_status: u8,
  /// Timer interrupt enable/flag position, where the part has a timer IRQ
  pub tie: Option<Field>,
  /// Oscillator stop flag
  pub osf: Field,
  /// Power fail / analog interrupt flag
  pub pfail: Option<Field>,
  /// MAX31328 clears flags by writing them back to zero; the newer parts
  /// clear the whole status register on read
  pub status_write_to_clear: bool,
  /// Interrupt/square-wave routing bit driven alongside A1IE/A2IE (MAX31328)
  pub intcn: Option<Field>,

  /// Oscillator enable bit
  pub osc_enable: Field,
  /// Set when the enable bit is inverted (EOSC#/OSCONZ: 1 stops the clock)
  pub osc_enable_low: bool,

  /// Square wave / clock output frequency selection
  pub sqw_freq: Field,
  /// Clock output enable, on parts where the frequency field alone is not enough
  pub sqw_enable: Option<Field>,

  /// External clock input frequency selection
  pub clkin_freq: Option<Field>,
  /// External clock input enable
  pub clkin_enable: Option<Field>,
  /// Clock synchronization delay (MAX31341), reprogrammed with CLKIN changes
  pub clock_sync: Option<Field>,

  pub i2c_timeout: Option<Field>,
  pub data_retention: Option<Field>,
  /// MAX31341 pairs data retention mode with stopping the oscillator
  pub data_retention_stops_osc: bool,

  /// Software reset bit
  pub reset: Option<Field>,
  /// Set when reset asserts low (MAX31341 SWRST#)
  pub reset_low: bool,

  /// Manual supply selection enable (DMAN_SEL)
  pub supply_manual: Option<Field>,
  /// Backup supply selection (D_VBACK_SEL), valid under manual selection
  pub supply_vbackup: Option<Field>,
  /// Power fail / comparator threshold voltage selection
  pub powerfail_threshold: Option<Field>,

  pub trickle: Option<TrickleRegs>,
  pub timer: Option<TimerRegs>,
  pub nvram: Option<NvramRegion>,
  pub temp: Option<TempRegs>,

  /// MAX31341 SET_RTC transfer latch, toggled after writing the clock block
  pub set_rtc_latch: Option<Field>,
}

/// MAX31328: DS3231-compatible part. Clock block at 0x00, no countdown
/// timer, no NVRAM, no trickle charger; temperature sensor at 0x11.
pub const MAX31328: ChipRegisters = ChipRegisters {
  address: 0x68,
  clock: 0x00,
  alarm1: 0x07,
  alarm1_len: 4,
  alarm2: 0x0B,
  int_en: 0x0E,
  int_status: 0x0F,
  tie: None,
  osf: Field { reg: 0x0F, pos: 7, width: 1 },
  pfail: None,
  status_write_to_clear: true,
  intcn: Some(Field { reg: 0x0E, pos: 2, width: 1 }),
  osc_enable: Field { reg: 0x0E, pos: 7, width: 1 },
  osc_enable_low: true, // EOSC#
  sqw_freq: Field { reg: 0x0E, pos: 3, width: 2 },
  sqw_enable: None,
  clkin_freq: None,
  clkin_enable: None,
  clock_sync: None,
  i2c_timeout: None,
  data_retention: None,
  data_retention_stops_osc: false,
  reset: None,
  reset_low: false,
  supply_manual: None,
  supply_vbackup: None,
  powerfail_threshold: None,
  trickle: None,
  timer: None,
  nvram: None,
  temp: Some(TempRegs {
    msb: 0x11,
    oneshot: Field { reg: 0x0E, pos: 5, width: 1 }, // CONV
    busy: Some(Field { reg: 0x0F, pos: 2, width: 1 }), // BSY
  }),
  set_rtc_latch: None,
};

/// MAX31329: clock block at 0x06, 6-byte alarm 1 (month/year match),
/// countdown timer, 64-byte NVRAM, trickle charger with an enable bit.
pub const MAX31329: ChipRegisters = ChipRegisters {
  address: 0x68,
  clock: 0x06,
  alarm1: 0x0D,
  alarm1_len: 6,
  alarm2: 0x13,
  int_en: 0x01,
  int_status: 0x00,
  tie: Some(Field { reg: 0x01, pos: 2, width: 1 }),
  osf: Field { reg: 0x00, pos: 6, width: 1 },
  pfail: Some(Field { reg: 0x00, pos: 5, width: 1 }),
  status_write_to_clear: false,
  intcn: None,
  osc_enable: Field { reg: 0x03, pos: 0, width: 1 }, // ENOSC
  osc_enable_low: false,
  sqw_freq: Field { reg: 0x04, pos: 5, width: 2 }, // CLKO_HZ
  sqw_enable: Some(Field { reg: 0x04, pos: 7, width: 1 }), // ENCLKO
  clkin_freq: Some(Field { reg: 0x04, pos: 0, width: 2 }),
  clkin_enable: Some(Field { reg: 0x04, pos: 2, width: 1 }),
  clock_sync: None,
  i2c_timeout: Some(Field { reg: 0x03, pos: 1, width: 1 }),
  data_retention: Some(Field { reg: 0x03, pos: 2, width: 1 }),
  data_retention_stops_osc: false,
  reset: Some(Field { reg: 0x02, pos: 0, width: 1 }),
  reset_low: false,
  supply_manual: Some(Field { reg: 0x18, pos: 0, width: 1 }),
  supply_vbackup: Some(Field { reg: 0x18, pos: 1, width: 1 }),
  powerfail_threshold: Some(Field { reg: 0x18, pos: 2, width: 2 }),
  trickle: Some(TrickleRegs {
    reg: 0x19,
    enable: Some(Field { reg: 0x19, pos: 7, width: 1 }),
    enable_code: 1,
  }),
  timer: Some(TimerRegs {
    config: 0x05,
    count: 0x16,
    init: 0x17,
    te: Field { reg: 0x05, pos: 4, width: 1 },
    tpause: Field { reg: 0x05, pos: 3, width: 1 },
    trpt: Field { reg: 0x05, pos: 2, width: 1 },
    tfs: Field { reg: 0x05, pos: 0, width: 2 },
  }),
  nvram: Some(NvramRegion { start: 0x22, end: 0x61 }),
  temp: None,
  set_rtc_latch: None,
};

/// MAX31341: clock block at 0x06, 4-byte alarm 1, countdown timer with
/// TPAUSE at bit 5, 64-byte NVRAM at 0x16, trickle charger without an
/// enable bit, and the SET_RTC transfer latch protocol.
pub const MAX31341: ChipRegisters = ChipRegisters {
  address: 0x69,
  clock: 0x06,
  alarm1: 0x0D,
  alarm1_len: 4,
  alarm2: 0x11,
  int_en: 0x04,
  int_status: 0x05,
  tie: Some(Field { reg: 0x04, pos: 2, width: 1 }),
  osf: Field { reg: 0x05, pos: 6, width: 1 },
  pfail: Some(Field { reg: 0x05, pos: 5, width: 1 }), // ANA_IF
  status_write_to_clear: false,
  intcn: None,
  osc_enable: Field { reg: 0x00, pos: 3, width: 1 }, // OSCONZ
  osc_enable_low: true,
  sqw_freq: Field { reg: 0x00, pos: 1, width: 2 }, // RS
  sqw_enable: None,
  clkin_freq: Some(Field { reg: 0x00, pos: 4, width: 2 }), // CLKSEL
  clkin_enable: Some(Field { reg: 0x00, pos: 7, width: 1 }), // ECLK
  clock_sync: Some(Field { reg: 0x58, pos: 0, width: 2 }),
  i2c_timeout: Some(Field { reg: 0x01, pos: 3, width: 1 }),
  data_retention: Some(Field { reg: 0x01, pos: 6, width: 1 }),
  data_retention_stops_osc: true,
  reset: Some(Field { reg: 0x00, pos: 0, width: 1 }), // SWRST#
  reset_low: true,
  supply_manual: Some(Field { reg: 0x56, pos: 2, width: 1 }),
  supply_vbackup: Some(Field { reg: 0x56, pos: 3, width: 1 }),
  powerfail_threshold: Some(Field { reg: 0x01, pos: 4, width: 2 }), // BREF
  trickle: Some(TrickleRegs {
    reg: 0x57,
    enable: None,
    enable_code: 0,
  }),
  timer: Some(TimerRegs {
    config: 0x03,
    count: 0x14,
    init: 0x15,
    te: Field { reg: 0x03, pos: 4, width: 1 },
    tpause: Field { reg: 0x03, pos: 5, width: 1 },
    trpt: Field { reg: 0x03, pos: 2, width: 1 },
    tfs: Field { reg: 0x03, pos: 0, width: 2 },
  }),
  nvram: Some(NvramRegion { start: 0x16, end: 0x55 }),
  temp: None,
  set_rtc_latch: Some(Field { reg: 0x01, pos: 1, width: 1 }),
};

/// MAX31343: clock block at 0x06, 6-byte alarm 1, countdown timer,
/// 64-byte NVRAM, TCHE-coded trickle charger, temperature sensor at 0x1A.
pub const MAX31343: ChipRegisters = ChipRegisters {
  address: 0x68,
  clock: 0x06,
  alarm1: 0x0D,
  alarm1_len: 6,
  alarm2: 0x13,
  int_en: 0x01,
  int_status: 0x00,
  tie: Some(Field { reg: 0x01, pos: 2, width: 1 }),
  osf: Field { reg: 0x00, pos: 6, width: 1 },
  pfail: Some(Field { reg: 0x00, pos: 5, width: 1 }),
  status_write_to_clear: false,
  intcn: None,
  osc_enable: Field { reg: 0x03, pos: 1, width: 1 }, // ENOSC
  osc_enable_low: false,
  sqw_freq: Field { reg: 0x04, pos: 0, width: 3 }, // SQW_HZ
  sqw_enable: None,
  clkin_freq: None,
  clkin_enable: None,
  clock_sync: None,
  i2c_timeout: Some(Field { reg: 0x03, pos: 3, width: 1 }),
  data_retention: Some(Field { reg: 0x03, pos: 4, width: 1 }),
  data_retention_stops_osc: false,
  reset: Some(Field { reg: 0x02, pos: 0, width: 1 }),
  reset_low: false,
  supply_manual: Some(Field { reg: 0x18, pos: 2, width: 1 }),
  supply_vbackup: Some(Field { reg: 0x18, pos: 3, width: 1 }),
  powerfail_threshold: Some(Field { reg: 0x18, pos: 4, width: 2 }),
  trickle: Some(TrickleRegs {
    reg: 0x19,
    enable: Some(Field { reg: 0x19, pos: 4, width: 4 }), // TCHE
    enable_code: 0b0101,
  }),
  timer: Some(TimerRegs {
    config: 0x05,
    count: 0x16,
    init: 0x17,
    te: Field { reg: 0x05, pos: 4, width: 1 },
    tpause: Field { reg: 0x05, pos: 3, width: 1 },
    trpt: Field { reg: 0x05, pos: 2, width: 1 },
    tfs: Field { reg: 0x05, pos: 0, width: 2 },
  }),
  nvram: Some(NvramRegion { start: 0x22, end: 0x61 }),
  temp: Some(TempRegs {
    msb: 0x1A,
    oneshot: Field { reg: 0x1C, pos: 6, width: 1 },
    busy: None,
  }),
  set_rtc_latch: None,
};
