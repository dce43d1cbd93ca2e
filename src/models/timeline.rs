use serde::Serialize;

use crate::models::{ActivityState, Weekday, MINUTES_PER_DAY};

/// Half-open `[start, end)` minute range holding a single state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub start: u16,
    pub end: u16,
    pub state: ActivityState,
}

impl Segment {
    pub fn new(start: u16, end: u16, state: ActivityState) -> Self {
        Self { start, end, state }
    }

    pub fn duration(&self) -> u16 {
        self.end - self.start
    }

    pub fn contains(&self, minute: u16) -> bool {
        self.start <= minute && minute < self.end
    }
}

/// Part of a day that continues a span started before midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Carryover {
    pub state: ActivityState,
    /// Minute the span begins on the day before.
    pub since: u16,
    /// Minute the span ends on the day after.
    pub until: u16,
}

impl Carryover {
    /// Length of the whole span, both sides of midnight.
    pub fn duration(&self) -> u16 {
        (MINUTES_PER_DAY - self.since) + self.until
    }
}

/// One calendar day as an ordered partition of `[0, 1440)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DayTimeline {
    segments: Vec<Segment>,
}

impl DayTimeline {
    /// Builds a day from one state per minute, merging equal neighbours.
    pub fn from_minutes(minutes: &[ActivityState; MINUTES_PER_DAY as usize]) -> Self {
        let mut segments: Vec<Segment> = Vec::new();
        for (minute, state) in minutes.iter().enumerate() {
            let minute = minute as u16;
            match segments.last_mut() {
                Some(last) if last.state == *state => last.end = minute + 1,
                _ => segments.push(Segment::new(minute, minute + 1, *state)),
            }
        }
        Self { segments }
    }

    pub fn uniform(state: ActivityState) -> Self {
        Self {
            segments: vec![Segment::new(0, MINUTES_PER_DAY, state)],
        }
    }

    pub fn empty() -> Self {
        Self::uniform(ActivityState::Empty)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn state_at(&self, minute: u16) -> ActivityState {
        let minute = minute % MINUTES_PER_DAY;
        // segments are sorted and contiguous, so the first whose end lies past
        // the minute is the one holding it
        let idx = self.segments.partition_point(|s| s.end <= minute);
        self.segments
            .get(idx)
            .map(|s| s.state)
            .unwrap_or(ActivityState::Empty)
    }

    pub fn minutes_in(&self, state: ActivityState) -> u32 {
        self.segments
            .iter()
            .filter(|s| s.state == state)
            .map(|s| u32::from(s.duration()))
            .sum()
    }

    pub fn is_uniform(&self, state: ActivityState) -> bool {
        self.segments.len() == 1 && self.segments[0].state == state
    }

    /// The span running through midnight, when the day's last and first
    /// segments share a non-empty state. A day holding one state all day has
    /// no such span.
    pub fn carryover(&self) -> Option<Carryover> {
        let first = self.segments.first()?;
        let last = self.segments.last()?;
        if self.segments.len() < 2 || first.state != last.state || first.state == ActivityState::Empty {
            return None;
        }
        Some(Carryover {
            state: first.state,
            since: last.start,
            until: first.end,
        })
    }

    /// The morning after a night shift: the end of `carry`, the way home and
    /// the first sleep that follows, then empty for the rest of the day. When
    /// the pattern has no sleep before its next shift, the morning stops after
    /// the way home.
    pub fn after_shift(&self, carry: &Carryover) -> Self {
        let end = self
            .sleep_after(carry)
            .map_or_else(|| self.way_home_end(carry), |sleep| sleep.end);
        let mut segments = Vec::new();
        for segment in self.segments.iter().take_while(|s| s.end <= end) {
            push_merged(&mut segments, *segment);
        }
        if end < MINUTES_PER_DAY {
            push_merged(&mut segments, Segment::new(end, MINUTES_PER_DAY, ActivityState::Empty));
        }
        Self { segments }
    }

    /// This day for a shift whose previous night was not worked: the end of
    /// `carry` and the way home are blanked.
    pub fn without_carry_in(&self, carry: &Carryover) -> Self {
        let end = self.way_home_end(carry);
        let mut segments = vec![Segment::new(0, end, ActivityState::Empty)];
        for segment in self.segments.iter().skip_while(|s| s.end <= end) {
            push_merged(&mut segments, *segment);
        }
        Self { segments }
    }

    /// First sleep between the end of `carry` and the next shift.
    fn sleep_after(&self, carry: &Carryover) -> Option<&Segment> {
        if carry.state == ActivityState::Asleep {
            return None;
        }
        self.segments
            .iter()
            .skip(1)
            .take_while(|s| s.start < carry.since)
            .find(|s| s.state == ActivityState::Asleep)
    }

    /// End of the commute directly following `carry`, or `carry.until` when
    /// there is none.
    fn way_home_end(&self, carry: &Carryover) -> u16 {
        self.segments
            .iter()
            .skip(1)
            .take_while(|s| s.state == ActivityState::Commute && s.start < carry.since)
            .last()
            .map_or(carry.until, |s| s.end)
    }
}

fn push_merged(segments: &mut Vec<Segment>, segment: Segment) {
    match segments.last_mut() {
        Some(last) if last.state == segment.state => last.end = segment.end,
        _ => segments.push(segment),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    Workday,
    /// Off day whose early hours finish the previous night's shift.
    Carryover,
    Off,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub weekday: Weekday,
    pub kind: DayKind,
    pub timeline: DayTimeline,
}

/// Seven resolved days, Sunday first, built for one pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekTimeline {
    pub pattern_title: String,
    pub days: [DaySchedule; 7],
    /// Sunday's early hours came from the previous week's Saturday.
    pub carry_in: Option<Carryover>,
    /// Saturday's shift continues into the following week's Sunday.
    pub carry_out: Option<Carryover>,
    /// That following Sunday's morning, present with `carry_out`.
    pub next_week: Option<DayTimeline>,
}

impl WeekTimeline {
    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        &self.days[weekday.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DaySchedule> {
        self.days.iter()
    }
}
