extern crate max3134x_rtc;

use linux_embedded_hal::{Delay, I2cdev};
use chrono::Utc;
use max3134x_rtc::{Alarm, AlarmPeriod, Chip, HourFormat, Interrupt, Max3134x, RtcDateTime};
use rtcc::DateTimeAccess;

use std::thread::sleep;
use std::time::Duration;

/// Example arming a daily alarm one minute ahead and polling for the flag.
///  Assumptions:
///  - The host this example runs on behaves like a Raspberry Pi 3+ running linux
///  - The device is attached to i2c1 on the host

fn main() {
  let i2c_bus = I2cdev::new("/dev/i2c-1").expect("Failed to open I2C device");
  let mut rtc = Max3134x::new(Chip::Max31343, i2c_bus, Delay {});

  let sys_dt = Utc::now().naive_utc();
  rtc.set_datetime(&sys_dt).unwrap();

  // clear any stale alarm flags before arming
  rtc.clear_interrupts().unwrap();

  let alarm_dt = sys_dt + Duration::from_secs(60);
  let alarm_time = RtcDateTime::from_datetime(&alarm_dt);
  rtc.set_alarm(Alarm::One, &alarm_time, AlarmPeriod::Daily).unwrap();
  rtc.irq_enable(Interrupt::Alarm1).unwrap();

  let (readback, period, enabled) = rtc.get_alarm(Alarm::One).unwrap();
  println!(
    "alarm armed for {:02}:{:02}:{:02} period {:?} enabled {}",
    readback.hour, readback.minute, readback.second, period, enabled
  );

  loop {
    let status = rtc.status().unwrap();
    if status.alarm1_triggered {
      println!("alarm fired at {}", rtc.datetime().unwrap());
      rtc.clear_interrupts().unwrap();
      break;
    }
    sleep(Duration::from_millis(500));
  }

  // check the hour format helper against the register we just wrote
  let format = rtc.hour_format().unwrap();
  assert_eq!(format, HourFormat::Hour24);
}
