extern crate max3134x_rtc;

use linux_embedded_hal::{Delay, I2cdev};
use max3134x_rtc::{Chip, Max3134x, TimerFrequency};

use std::thread::sleep;
use std::time::Duration;

/// Example driving the countdown timer through its whole state machine:
/// stopped -> running -> paused -> running -> stopped.
///  Assumptions:
///  - The host this example runs on behaves like a Raspberry Pi 3+ running linux
///  - The device is attached to i2c1 on the host

fn main() {
  let i2c_bus = I2cdev::new("/dev/i2c-1").expect("Failed to open I2C device");
  let mut rtc = Max3134x::new(Chip::Max31343, i2c_bus, Delay {});

  // 64 ticks at 16 Hz: four seconds per lap, repeating
  rtc.timer_init(64, true, TimerFrequency::Hz16).unwrap();

  rtc.timer_start().unwrap();
  sleep(Duration::from_secs(1));

  rtc.timer_pause().unwrap();
  let paused_at = rtc.timer_value().unwrap();
  println!("paused at count {}", paused_at);

  // the count must hold still while paused
  sleep(Duration::from_secs(1));
  let still = rtc.timer_value().unwrap();
  println!("after a second of pause: {}", still);

  rtc.timer_continue().unwrap();
  sleep(Duration::from_secs(1));
  let resumed = rtc.timer_value().unwrap();
  println!("after resuming: {}", resumed);

  rtc.timer_stop().unwrap();
}
