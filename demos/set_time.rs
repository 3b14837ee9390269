extern crate max3134x_rtc;

use linux_embedded_hal::{Delay, I2cdev};
use chrono::Utc;
use max3134x_rtc::{Chip, Max3134x};
use rtcc::DateTimeAccess;

/// Example setting and reading back the RTC date and time.
///  Assumptions:
///  - The host this example runs on behaves like a Raspberry Pi 3+ running linux
///  - The device is attached to i2c1 on the host
///
/// The following was tested by enabling i2c-1 on a Raspberry Pi 3+
///  using `sudo raspi-config`
///  and connecting the SDA, SCL, GND, and 3.3V pins from RPi to the RTC

fn main() {
  // Initialize the I2C bus (device)
  let i2c_bus = I2cdev::new("/dev/i2c-1").expect("Failed to open I2C device");

  // Create an instance of the driver -- pick the chip variant on your board
  let mut rtc = Max3134x::new(Chip::Max31343, i2c_bus, Delay {});

  // use the set_datetime method to ensure all the timekeeping registers on
  // the rtc are aligned to the same values
  let sys_dt = Utc::now().naive_utc();
  rtc.set_datetime(&sys_dt).unwrap();

  let rtc_dt = rtc.datetime().unwrap();
  println!("sys {}\r\nrtc {}\r\n", sys_dt, rtc_dt);

  let time = rtc.get_time().unwrap();
  println!(
    "raw fields: {:02}:{:02}:{:02} weekday {} day {} month {} year {}",
    time.hour, time.minute, time.second, time.weekday, time.day, time.month, time.year
  );
}
