// UART Transport zum LoRa-Modul
//
// Nutzt die embedded-io-async Traits des Async-UART-Treibers.

use embassy_time::{Duration, with_timeout};
use embedded_io_async::{Read, Write};
use esp_core::{SerialError, SerialTransport};
use esp_hal::Async;
use esp_hal::uart::Uart;

pub struct UartTransport {
    uart: Uart<'static, Async>,
}

impl UartTransport {
    pub fn new(uart: Uart<'static, Async>) -> Self {
        Self { uart }
    }
}

impl SerialTransport for UartTransport {
    async fn write_all(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        Write::write_all(&mut self.uart, bytes)
            .await
            .map_err(|_| SerialError::Io)?;
        Write::flush(&mut self.uart)
            .await
            .map_err(|_| SerialError::Io)
    }

    async fn read_byte(&mut self, timeout_ms: u64) -> Result<u8, SerialError> {
        let mut byte = [0u8; 1];
        let read = with_timeout(
            Duration::from_millis(timeout_ms),
            Read::read(&mut self.uart, &mut byte),
        )
        .await;

        match read {
            Ok(Ok(1)) => Ok(byte[0]),
            Ok(_) => Err(SerialError::Io),
            Err(_) => Err(SerialError::Timeout),
        }
    }
}
