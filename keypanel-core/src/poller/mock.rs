//! Scripted I2C bus for poller tests

use heapless::Deque;
use keypanel_hal::I2cBus;

/// Bus that returns a fixed port value, or scripted values in order
pub(crate) struct MockBus {
    /// Value returned once the script is empty; `None` means NACK
    pub port: Option<u8>,
    pub script: Deque<Option<u8>, 32>,
    pub reads: usize,
    pub writes: usize,
    pub last_address: Option<u8>,
}

impl MockBus {
    pub fn new(port: u8) -> Self {
        Self {
            port: Some(port),
            script: Deque::new(),
            reads: 0,
            writes: 0,
            last_address: None,
        }
    }

    pub fn absent() -> Self {
        Self {
            port: None,
            ..Self::new(0xFF)
        }
    }

    pub fn push(&mut self, value: Option<u8>) {
        self.script.push_back(value).unwrap();
    }

    pub fn transactions(&self) -> usize {
        self.reads + self.writes
    }
}

impl I2cBus for MockBus {
    type Error = ();

    fn write(&mut self, address: u8, _data: &[u8]) -> Result<(), ()> {
        self.writes += 1;
        self.last_address = Some(address);
        self.port.map(|_| ()).ok_or(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), ()> {
        self.reads += 1;
        self.last_address = Some(address);
        let value = self.script.pop_front().unwrap_or(self.port).ok_or(())?;
        buf.fill(value);
        Ok(())
    }
}
