use std::path::Path;

/// Holds the data from a chip8 file as a vec of bytes. A rom has no header, it is copied byte for
/// byte into ram starting at 0x200.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RomBuffer {
    buffer: Vec<u8>,
}

impl RomBuffer {
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let buffer = std::fs::read(path)?;
        Ok(RomBuffer { buffer })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        RomBuffer { buffer: bytes }
    }

    pub fn contents(&self) -> &[u8] {
        &self.buffer
    }

    /// Copies the rom into the program region of ram, returns how many bytes fit.
    /// Whatever does not fit is dropped.
    pub fn load_into(&self, memory: &mut [u8]) -> usize {
        let len = self.buffer.len().min(memory.len());
        if len < self.buffer.len() {
            log::warn!(
                "rom is {} bytes but only {} fit in memory, truncating",
                self.buffer.len(),
                memory.len()
            );
        }
        memory[..len].copy_from_slice(&self.buffer[..len]);
        len
    }
}

impl From<Vec<u8>> for RomBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&Path> for RomBuffer {
    type Error = std::io::Error;
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        Self::new(path)
    }
}
