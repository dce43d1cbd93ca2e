//! Turns a pattern's raw, possibly overlapping declarations into one
//! partition of the day.
//!
//! Declarations are painted onto a minute grid in the order they appear, so a
//! later declaration overwrites an earlier one wherever they overlap. Minutes
//! nobody claims stay `empty`. The grid is then folded back into segments.

use crate::error::{Result, ScheduleError};
use crate::models::{ActivityState, DayTimeline, SchedulePattern, TimeOfDay, MINUTES_PER_DAY};

/// Splits a declaration into the half-open minute ranges it covers on a
/// single day. A midnight-crossing interval yields its evening part first.
pub fn split_at_midnight(start: u16, end: u16) -> Vec<(u16, u16)> {
    let ranges = if end <= start {
        vec![(start, MINUTES_PER_DAY), (0, end)]
    } else {
        vec![(start, end)]
    };
    ranges.into_iter().filter(|(s, e)| s < e).collect()
}

pub fn resolve(pattern: &SchedulePattern) -> Result<DayTimeline> {
    let mut minutes = [ActivityState::Empty; MINUTES_PER_DAY as usize];

    for (index, interval) in pattern.intervals.iter().enumerate() {
        let start = checked_minute(pattern, index, interval.start)?;
        let end = checked_minute(pattern, index, interval.end)?;

        for (from, to) in split_at_midnight(start, end) {
            minutes[from as usize..to as usize].fill(interval.state);
        }
    }

    let timeline = DayTimeline::from_minutes(&minutes);
    log::debug!(
        "resolved pattern '{}': {} declarations -> {} segments",
        pattern.title,
        pattern.intervals.len(),
        timeline.segments().len()
    );
    Ok(timeline)
}

fn checked_minute(pattern: &SchedulePattern, index: usize, time: TimeOfDay) -> Result<u16> {
    if !time.is_valid() {
        return Err(ScheduleError::InvalidInterval {
            title: pattern.title.clone(),
            index,
            value: time.minutes(),
        });
    }
    Ok(time.minutes() as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawInterval, Segment};
    use ActivityState::*;

    fn pattern(intervals: Vec<RawInterval>) -> SchedulePattern {
        SchedulePattern::new("test", intervals)
    }

    #[test]
    fn empty_pattern_is_one_empty_segment() {
        let day = resolve(&pattern(vec![])).unwrap();
        assert_eq!(day.segments(), &[Segment::new(0, 1440, Empty)]);
    }

    #[test]
    fn gaps_are_filled_with_empty() {
        let day = resolve(&pattern(vec![
            RawInterval::new(Asleep, 0, 420),
            RawInterval::new(Work, 540, 1020),
        ]))
        .unwrap();
        assert_eq!(
            day.segments(),
            &[
                Segment::new(0, 420, Asleep),
                Segment::new(420, 540, Empty),
                Segment::new(540, 1020, Work),
                Segment::new(1020, 1440, Empty),
            ]
        );
    }

    #[test]
    fn midnight_crossing_splits_in_two() {
        let day = resolve(&pattern(vec![RawInterval::new(Work, 1380, 120)])).unwrap();
        assert_eq!(
            day.segments(),
            &[
                Segment::new(0, 120, Work),
                Segment::new(120, 1380, Empty),
                Segment::new(1380, 1440, Work),
            ]
        );
        assert_eq!(day.carryover().map(|c| c.duration()), Some(180));
    }

    #[test]
    fn end_at_zero_means_until_midnight() {
        let day = resolve(&pattern(vec![RawInterval::new(Awake, 1200, 0)])).unwrap();
        assert_eq!(
            day.segments(),
            &[Segment::new(0, 1200, Empty), Segment::new(1200, 1440, Awake)]
        );
    }

    #[test]
    fn equal_start_and_end_cover_the_whole_day() {
        let day = resolve(&pattern(vec![RawInterval::new(Work, 300, 300)])).unwrap();
        assert!(day.is_uniform(Work));

        let day = resolve(&pattern(vec![RawInterval::new(Work, 0, 0)])).unwrap();
        assert!(day.is_uniform(Work));
    }

    #[test]
    fn later_declaration_wins_overlap() {
        let day = resolve(&pattern(vec![
            RawInterval::new(Awake, 360, 1320),
            RawInterval::new(Commute, 1260, 1320),
            RawInterval::new(Work, 600, 660),
        ]))
        .unwrap();
        assert_eq!(day.state_at(599), Awake);
        assert_eq!(day.state_at(600), Work);
        assert_eq!(day.state_at(660), Awake);
        assert_eq!(day.state_at(1260), Commute);

        // same declarations, reversed: the wide interval now paints last
        let day = resolve(&pattern(vec![
            RawInterval::new(Work, 600, 660),
            RawInterval::new(Commute, 1260, 1320),
            RawInterval::new(Awake, 360, 1320),
        ]))
        .unwrap();
        assert_eq!(day.state_at(600), Awake);
        assert_eq!(day.state_at(1260), Awake);
    }

    #[test]
    fn adjacent_same_state_declarations_merge() {
        let day = resolve(&pattern(vec![
            RawInterval::new(Asleep, 480, 600),
            RawInterval::new(Asleep, 600, 900),
        ]))
        .unwrap();
        assert_eq!(day.segments()[1], Segment::new(480, 900, Asleep));
    }

    #[test]
    fn out_of_range_time_is_rejected() {
        let mut bad = pattern(vec![
            RawInterval::new(Awake, 0, 60),
            RawInterval::new(Work, 100, 200),
        ]);
        bad.intervals[1].end = TimeOfDay(1440);

        match resolve(&bad) {
            Err(ScheduleError::InvalidInterval { title, index, value }) => {
                assert_eq!(title, "test");
                assert_eq!(index, 1);
                assert_eq!(value, 1440);
            }
            other => panic!("expected InvalidInterval, got {other:?}"),
        }

        bad.intervals[1].end = TimeOfDay(200);
        bad.intervals[0].start = TimeOfDay(-1);
        assert!(matches!(
            resolve(&bad),
            Err(ScheduleError::InvalidInterval { index: 0, value: -1, .. })
        ));
    }

    #[test]
    fn split_helper() {
        assert_eq!(split_at_midnight(60, 120), vec![(60, 120)]);
        assert_eq!(split_at_midnight(1380, 120), vec![(1380, 1440), (0, 120)]);
        assert_eq!(split_at_midnight(1380, 0), vec![(1380, 1440)]);
        assert_eq!(split_at_midnight(0, 0), vec![(0, 1440)]);
    }
}
