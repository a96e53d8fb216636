//! Fault trend bucketing.

use std::collections::BTreeMap;

use faultwatch_types::{FaultBucket, TelemetryRecord};

/// Count FAULT records per 15-minute bucket, ordered by bucket start.
pub fn fault_buckets<'a, I>(records: I) -> Vec<FaultBucket>
where
    I: IntoIterator<Item = &'a TelemetryRecord>,
{
    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
    for record in records.into_iter().filter(|r| r.is_fault()) {
        *counts.entry(FaultBucket::start_of(record.timestamp)).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(start, count)| FaultBucket { start, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use faultwatch_types::DeviceStatus;

    fn record(timestamp: u64, status: DeviceStatus) -> TelemetryRecord {
        TelemetryRecord::new("a", timestamp, 1.0, 0.1, status)
    }

    #[test]
    fn test_buckets_by_quarter_hour() {
        let records = vec![
            record(1800, DeviceStatus::Fault),
            record(1000, DeviceStatus::Fault),
            record(1100, DeviceStatus::Fault),
            record(1200, DeviceStatus::Ok),
        ];

        assert_eq!(
            fault_buckets(&records),
            vec![
                FaultBucket { start: 900, count: 2 },
                FaultBucket { start: 1800, count: 1 },
            ]
        );
    }

    #[test]
    fn test_no_faults_is_empty() {
        let records = vec![record(10, DeviceStatus::Ok), record(20, DeviceStatus::Warning)];
        assert!(fault_buckets(&records).is_empty());
        assert!(fault_buckets(&Vec::<TelemetryRecord>::new()).is_empty());
    }
}
