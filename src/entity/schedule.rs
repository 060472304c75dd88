//! Daily schedules

use serde::{Deserialize, Serialize};

/// A block of the day, `start_hour` inclusive to `end_hour` exclusive.
/// Blocks with `end_hour <= start_hour` wrap past midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub start_hour: u32,
    pub end_hour: u32,
    pub activity: String,
}

impl ScheduleBlock {
    pub fn new(start_hour: u32, end_hour: u32, activity: impl Into<String>) -> Self {
        Self {
            start_hour,
            end_hour,
            activity: activity.into(),
        }
    }

    pub fn covers(&self, hour: u32) -> bool {
        if self.start_hour < self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub blocks: Vec<ScheduleBlock>,
}

impl Schedule {
    /// Standard day: sleep, optional work shift, leisure in between
    pub fn standard(employed: bool, wake_hour: u32) -> Self {
        let mut blocks = vec![ScheduleBlock::new(22, wake_hour, "sleeping")];
        if employed {
            blocks.push(ScheduleBlock::new(wake_hour, 8, "commuting"));
            blocks.push(ScheduleBlock::new(8, 17, "working"));
            blocks.push(ScheduleBlock::new(17, 22, "leisure"));
        } else {
            blocks.push(ScheduleBlock::new(wake_hour, 22, "leisure"));
        }
        Self { blocks }
    }

    /// First block covering `hour`
    pub fn activity_at(&self, hour: u32) -> Option<&str> {
        self.blocks
            .iter()
            .find(|b| b.covers(hour))
            .map(|b| b.activity.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_wraps_midnight() {
        let block = ScheduleBlock::new(22, 6, "sleeping");
        assert!(block.covers(23));
        assert!(block.covers(0));
        assert!(block.covers(5));
        assert!(!block.covers(6));
        assert!(!block.covers(12));
    }

    #[test]
    fn test_standard_employed_schedule() {
        let schedule = Schedule::standard(true, 6);
        assert_eq!(schedule.activity_at(2), Some("sleeping"));
        assert_eq!(schedule.activity_at(7), Some("commuting"));
        assert_eq!(schedule.activity_at(10), Some("working"));
        assert_eq!(schedule.activity_at(19), Some("leisure"));
    }

    #[test]
    fn test_unemployed_has_no_work_block() {
        let schedule = Schedule::standard(false, 7);
        assert_eq!(schedule.activity_at(10), Some("leisure"));
    }

    #[test]
    fn test_empty_schedule() {
        assert_eq!(Schedule::default().activity_at(10), None);
    }
}
