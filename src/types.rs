//src/types.rs

/// One distinct read sequence and the number of reads collapsing onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DereplicatedRecord {
    pub sequence: String,
    pub count: u64,
}

/// An Operational Taxonomic Unit.
///
/// `sequence` is the sequence of the record that founded the OTU and
/// `count` is that record's count. Records absorbed later leave both fields
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Otu {
    pub sequence: String,
    pub count: u64,
}

impl From<DereplicatedRecord> for Otu {
    fn from(record: DereplicatedRecord) -> Self {
        Self {
            sequence: record.sequence,
            count: record.count,
        }
    }
}
