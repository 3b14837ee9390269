extern crate max3134x_rtc;

use linux_embedded_hal::{Delay, I2cdev};
use chrono::Duration;
use max3134x_rtc::{Chip, Max3134x, PowerSupply, TricklePath};

/// Example enabling/disabling backup power supply trickle charging.
///  Assumptions:
///  - The host this example runs on behaves like a Raspberry Pi 3+ running linux
///  - The device is attached to i2c1 on the host

fn main() {
  let i2c_bus = I2cdev::new("/dev/i2c-1").expect("Failed to open I2C device");
  let mut rtc = Max3134x::new(Chip::Max31343, i2c_bus, Delay {});

  // let the device pick between VCC and the backup cell
  rtc.supply_select(PowerSupply::Auto).unwrap();

  // enable trickle charging through 3 kOhm and a Schottky diode
  rtc.trickle_charger_enable(TricklePath::Ohm3kSchottky).unwrap();
  let config = rtc.get_configuration().unwrap();
  println!("charging, config: {:?}", config);

  // charge for three seconds
  let dur = Duration::seconds(3);
  println!("charging backup for {}", dur);
  std::thread::sleep(dur.to_std().unwrap());

  rtc.trickle_charger_disable().unwrap();
  println!("trickle charging disabled");
}
