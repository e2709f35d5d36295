use avr_device::atmega128a::USART0;
use core::convert::Infallible;

use crate::hal::Uart;

/// Status console on USART0. Formatted output goes through `ufmt`.
pub struct SerialConsole {
    uart: Uart<USART0>,
}

impl SerialConsole {
    pub fn new() -> Self {
        Self { uart: Uart::new() }
    }

    pub fn write_str(&mut self, s: &str) {
        self.uart.write_str(s);
    }

    pub fn write_line(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }
}

impl ufmt::uWrite for SerialConsole {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.uart.write_str(s);
        Ok(())
    }
}

impl Default for SerialConsole {
    fn default() -> Self {
        Self::new()
    }
}
