//! RP1 GPIO controller
//!
//! Each pin owns a status/control register pair at
//! `base + pin * 8`. Only the function-select field of the control
//! register is driven here. The RP1 software-I/O block that actually sets
//! and samples pin levels is not modeled, so level access reports
//! [`GpioError::Unsupported`] instead of pretending to succeed.

use bramble_hal::{FunctionSelect, GpioController, GpioError, Monotonic, RegisterBus};

use crate::map::{GPIO_COUNT, GPIO_CTRL, GPIO_PIN_STRIDE, GPIO_STATUS, LED_ACTIVITY};

/// RP1 GPIO bank
pub struct Rp1Gpio<B> {
    bus: B,
    base: usize,
}

impl<B: RegisterBus> Rp1Gpio<B> {
    /// Bind the controller at `base`
    pub const fn new(bus: B, base: usize) -> Self {
        Self { bus, base }
    }

    /// Probe the controller by reading pin 0's status
    ///
    /// Pin functions are set up by the bootloader; nothing is written.
    pub fn init(&mut self) -> u32 {
        self.bus.read32(self.base + GPIO_STATUS)
    }

    /// Address of a per-pin register
    fn reg(&self, pin: u8, offset: usize) -> Result<usize, GpioError> {
        if pin >= GPIO_COUNT {
            return Err(GpioError::InvalidPin);
        }
        Ok(self.base + usize::from(pin) * GPIO_PIN_STRIDE + offset)
    }

    /// Current function-select code of a pin
    pub fn function(&self, pin: u8) -> Result<FunctionSelect, GpioError> {
        let ctrl = self.bus.read32(self.reg(pin, GPIO_CTRL)?);
        Ok(FunctionSelect::new(ctrl as u8))
    }

    /// One blink cycle of the activity LED (200 ms)
    pub fn blink_activity_led<M: Monotonic>(&mut self, clock: &M) -> Result<(), GpioError> {
        self.blink(LED_ACTIVITY, clock)
    }
}

impl<B: RegisterBus> GpioController for Rp1Gpio<B> {
    fn set_function(&mut self, pin: u8, function: FunctionSelect) -> Result<(), GpioError> {
        let addr = self.reg(pin, GPIO_CTRL)?;
        self.bus.modify32(addr, |ctrl| function.apply(ctrl));
        Ok(())
    }

    fn set(&mut self, pin: u8, _high: bool) -> Result<(), GpioError> {
        self.reg(pin, GPIO_STATUS)?;
        Err(GpioError::Unsupported)
    }

    fn get(&self, pin: u8) -> Result<bool, GpioError> {
        self.reg(pin, GPIO_STATUS)?;
        Err(GpioError::Unsupported)
    }

    fn status(&self, pin: u8) -> Result<u32, GpioError> {
        Ok(self.bus.read32(self.reg(pin, GPIO_STATUS)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{GPIO_BASE, LED_POWER};
    use crate::testutil::{FakeBus, StepClock};
    use bramble_hal::gpio::FUNCSEL_MASK;
    use proptest::prelude::*;

    fn ctrl_addr(pin: u8) -> usize {
        GPIO_BASE + usize::from(pin) * 8 + 4
    }

    fn gpio(bus: &FakeBus) -> Rp1Gpio<&FakeBus> {
        Rp1Gpio::new(bus, GPIO_BASE)
    }

    #[test]
    fn test_register_addresses() {
        let bus = FakeBus::new();
        let mut gpio = gpio(&bus);

        gpio.set_function(LED_ACTIVITY, FunctionSelect::SIO).unwrap();
        gpio.status(LED_POWER).unwrap();

        assert_eq!(bus.writes().as_slice(), &[(0x1f_000d_00ec, 5)]);
        assert_eq!(bus.read_count(0x1f_000d_00ec), 1);
        assert_eq!(bus.read_count(0x1f_000d_00f8), 1);
    }

    #[test]
    fn test_set_function_preserves_upper_bits() {
        let bus = FakeBus::new();
        bus.set(ctrl_addr(14), 0x0000_3083);

        gpio(&bus).set_function(14, FunctionSelect::UART).unwrap();

        assert_eq!(bus.value(ctrl_addr(14)), 0x0000_3082);
    }

    #[test]
    fn test_function_readback() {
        let bus = FakeBus::new();
        bus.set(ctrl_addr(3), 0xABCD_EF05);
        assert_eq!(gpio(&bus).function(3), Ok(FunctionSelect::SIO));
    }

    #[test]
    fn test_output_and_input_write_same_code() {
        let bus = FakeBus::new();
        let mut gpio = gpio(&bus);

        gpio.set_output(7).unwrap();
        let as_output = bus.value(ctrl_addr(7));
        gpio.set_input(7).unwrap();
        let as_input = bus.value(ctrl_addr(7));

        assert_eq!(as_output, as_input);
        assert_eq!(as_output & FUNCSEL_MASK, 5);
    }

    #[test]
    fn test_invalid_pin_touches_nothing() {
        let bus = FakeBus::new();
        let mut gpio = gpio(&bus);

        assert_eq!(gpio.set_function(GPIO_COUNT, FunctionSelect::SIO), Err(GpioError::InvalidPin));
        assert_eq!(gpio.status(200), Err(GpioError::InvalidPin));
        assert_eq!(gpio.set(GPIO_COUNT, true), Err(GpioError::InvalidPin));
        assert_eq!(gpio.get(255), Err(GpioError::InvalidPin));
        assert_eq!(bus.transactions(), 0);
    }

    #[test]
    fn test_level_access_is_unsupported() {
        let bus = FakeBus::new();
        let mut gpio = gpio(&bus);

        assert_eq!(gpio.set(LED_ACTIVITY, true), Err(GpioError::Unsupported));
        assert_eq!(gpio.get(LED_ACTIVITY), Err(GpioError::Unsupported));
        assert_eq!(bus.transactions(), 0);
    }

    #[test]
    fn test_led_on_configures_then_reports_unsupported() {
        let bus = FakeBus::new();
        bus.set(ctrl_addr(LED_ACTIVITY), 0x0000_0080);

        assert_eq!(gpio(&bus).led_on(LED_ACTIVITY), Err(GpioError::Unsupported));
        assert_eq!(bus.value(ctrl_addr(LED_ACTIVITY)), 0x0000_0085);
    }

    #[test]
    fn test_blink_activity_led_full_cycle() {
        let bus = FakeBus::new();
        let clock = StepClock::new(0, 250);

        let result = gpio(&bus).blink_activity_led(&clock);

        assert_eq!(result, Err(GpioError::Unsupported));
        // Pin configured twice (on, then off)
        assert_eq!(bus.writes_to(ctrl_addr(LED_ACTIVITY)).as_slice(), &[5, 5]);
        // Last tick handed out ends the second 100 ms delay
        assert!(clock.peek() - 250 >= 200_000);
    }

    #[test]
    fn test_init_probes_pin_zero() {
        let bus = FakeBus::new();
        bus.set(GPIO_BASE, 0x0400_0000);
        assert_eq!(gpio(&bus).init(), 0x0400_0000);
        assert!(bus.writes().is_empty());
    }

    proptest! {
        #[test]
        fn prop_set_function_only_touches_funcsel(
            pin in 0u8..GPIO_COUNT,
            f in 0u8..32,
            before in any::<u32>(),
        ) {
            let bus = FakeBus::new();
            bus.set(ctrl_addr(pin), before);

            gpio(&bus).set_function(pin, FunctionSelect::new(f)).unwrap();

            let after = bus.value(ctrl_addr(pin));
            prop_assert_eq!(after & !FUNCSEL_MASK, before & !FUNCSEL_MASK);
            prop_assert_eq!(after & FUNCSEL_MASK, u32::from(f));
        }
    }
}
