use modular_bitfield::prelude::*;
use std::fmt;

#[bitfield]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlakeId {
    /// 16 bits for the machine ID (distinct per running instance).
    pub machine_id: B16,
    /// 8 bits for the sequence number (resets every tick).
    pub sequence: B8,
    /// 39 bits for the timestamp (10 ms ticks since a custom epoch).
    pub timestamp: B39,
    #[skip]
    __: B1,
}

impl FlakeId {
    /// Returns the ID packed as a 64-bit integer, timestamp in the high
    /// bits so IDs are roughly time-ordered numerically.
    pub fn as_u64(self) -> u64 {
        u64::from_le_bytes(self.into_bytes())
    }
}

impl fmt::Debug for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlakeId")
            .field("timestamp", &self.timestamp())
            .field("sequence", &self.sequence())
            .field("machine_id", &self.machine_id())
            .finish()
    }
}
