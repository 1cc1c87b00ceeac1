//! SPI binding of the bus capability.
//!
//! The PN532 SPI link runs in mode 0, LSB first; configure the bus
//! peripheral accordingly. Chip select is owned by the bus configuration,
//! not by this layer.

use embedded_hal::spi::SpiBus;

use super::BusTransport;

/// [`BusTransport`] over an exclusively-owned [`SpiBus`].
#[derive(Debug)]
pub struct SpiTransport<SPI> {
    spi: SPI,
}

impl<SPI> SpiTransport<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Give the bus peripheral back.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiBus> BusTransport for SpiTransport<SPI> {
    type Error = SPI::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes)?;
        self.spi.flush()
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.spi.read(buf)
    }
}
