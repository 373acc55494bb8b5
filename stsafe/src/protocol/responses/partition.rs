// stsafe-rs/stsafe/src/protocol/responses/partition.rs

use crate::constants::ONE_WAY_COUNTER_PRESENCE;
use crate::protocol::parser::Cursor;
use crate::Result;

/// Size of a record once the optional counter has been filled in.
pub const ZONE_RECORD_LEN: usize = 9;
const COUNTER_LEN: usize = 4;

/// One zone of the data partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneInformationRecord {
    pub index: u8,
    pub zone_type: u8,
    pub access_condition: u8,
    pub data_segment_length: u16,
    /// Zero for zones without a one-way counter.
    pub one_way_counter: u32,
}

impl ZoneInformationRecord {
    pub fn has_counter(&self) -> bool {
        self.zone_type & ONE_WAY_COUNTER_PRESENCE != 0
    }

    fn write_normalized(&self, out: &mut Vec<u8>) {
        out.push(self.index);
        out.push(self.zone_type);
        out.push(self.access_condition);
        out.extend_from_slice(&self.data_segment_length.to_be_bytes());
        out.extend_from_slice(&self.one_way_counter.to_be_bytes());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataPartition {
    /// Length of the normalized view: the wire length plus four bytes for
    /// every record that arrived without a counter.
    pub length: usize,
    pub zones: Vec<ZoneInformationRecord>,
}

impl DataPartition {
    /// Count byte followed by fixed-stride records (counter always present).
    pub fn to_normalized_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.zones.len() * ZONE_RECORD_LEN);
        out.push(self.zones.len() as u8);
        for z in &self.zones {
            z.write_normalized(&mut out);
        }
        out
    }

    pub fn zone(&self, index: u8) -> Option<&ZoneInformationRecord> {
        self.zones.iter().find(|z| z.index == index)
    }
}

/// Layout: zone count(1), then per zone: index(1) + zone type(1) +
/// access condition(1) + segment length(2 BE) [+ counter(4 BE) when the
/// zone type has the counter bit]
pub fn decode_data_partition(data: &[u8]) -> Result<DataPartition> {
    let mut c = Cursor::new(data);
    let count = c.u8()? as usize;
    let mut zones = Vec::with_capacity(count);
    let mut missing_counters = 0usize;
    for _ in 0..count {
        let index = c.u8()?;
        let zone_type = c.u8()?;
        let access_condition = c.u8()?;
        let data_segment_length = c.be_u16()?;
        let one_way_counter = if zone_type & ONE_WAY_COUNTER_PRESENCE != 0 {
            c.be_u32()?
        } else {
            missing_counters += 1;
            0
        };
        zones.push(ZoneInformationRecord {
            index,
            zone_type,
            access_condition,
            data_segment_length,
            one_way_counter,
        });
    }
    Ok(DataPartition {
        length: c.position() + missing_counters * COUNTER_LEN,
        zones,
    })
}
