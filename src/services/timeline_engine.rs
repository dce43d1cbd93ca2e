use crate::error::Result;
use crate::models::{DayKind, DaySchedule, DayTimeline, ScheduleConfig, WeekTimeline, Weekday};
use crate::services::pattern_resolver;

/// Lays the named pattern over the week.
///
/// A workday gets the resolved pattern as is when the night before it was
/// worked. Otherwise the early hours that finish the previous night's shift
/// are blanked. An off day following a workday gets the morning after the
/// shift and is empty otherwise. The previous week's Saturday counts as a
/// worked night for Sunday only when `prev_week_night` is set and Saturday is
/// a workday. Saturday's spill into the next week is reported through
/// `carry_out` when `next_week_night` is set.
pub fn build_week(config: &ScheduleConfig, title: &str) -> Result<WeekTimeline> {
    let pattern = config.pattern(title)?;
    let resolved = pattern_resolver::resolve(pattern)?;
    let carry = resolved.carryover();
    let morning_after = carry.map(|c| resolved.after_shift(&c));
    let saturday_works = config.is_workday(Weekday::Saturday);

    let worked_night_before = |day: Weekday| match day {
        Weekday::Sunday => config.prev_week_night && saturday_works,
        _ => config.is_workday(day.previous()),
    };

    let days = Weekday::ALL.map(|weekday| {
        let night_before = worked_night_before(weekday);
        if config.is_workday(weekday) {
            let timeline = match &carry {
                Some(carry) if !night_before => resolved.without_carry_in(carry),
                _ => resolved.clone(),
            };
            return DaySchedule {
                weekday,
                kind: DayKind::Workday,
                timeline,
            };
        }
        match &morning_after {
            Some(morning) if night_before => DaySchedule {
                weekday,
                kind: DayKind::Carryover,
                timeline: morning.clone(),
            },
            _ => DaySchedule {
                weekday,
                kind: DayKind::Off,
                timeline: DayTimeline::empty(),
            },
        }
    });

    let carry_in = carry.filter(|_| worked_night_before(Weekday::Sunday));
    let carry_out = carry.filter(|_| config.next_week_night && saturday_works);
    let next_week = morning_after.filter(|_| carry_out.is_some());

    log::debug!(
        "built week for '{}': {} workdays, carry_in={}, carry_out={}",
        title,
        config.workdays.len(),
        carry_in.is_some(),
        carry_out.is_some()
    );

    Ok(WeekTimeline {
        pattern_title: pattern.title.clone(),
        days,
        carry_in,
        carry_out,
        next_week,
    })
}
