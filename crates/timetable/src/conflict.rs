use models::{schedule::ScheduleEntry, weekday::Weekday};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// The resource two clashing entries both need
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum ConflictKind {
    Classroom(i32),
    Teacher(String),
    /// One student's own timetable
    Timetable,
}

/// An existing entry that shares a slot and at least one week with a candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub kind: ConflictKind,
    pub schedule_id: i32,
    #[serde(rename = "weekDay")]
    pub weekday: Weekday,
    pub section_id: u32,
    /// First week both entries meet in
    pub week: u32,
}

impl Display for Conflict {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.kind {
            ConflictKind::Classroom(id) => {
                write!(f, "classroom {id} is taken by schedule {}", self.schedule_id)?
            }
            ConflictKind::Teacher(id) => {
                write!(f, "teacher {id} already teaches schedule {}", self.schedule_id)?
            }
            ConflictKind::Timetable => write!(f, "overlaps schedule {}", self.schedule_id)?,
        }
        write!(
            f,
            " on {} section {} (e.g. week {})",
            self.weekday, self.section_id, self.week
        )
    }
}

fn first_overlap<'a>(
    candidate: &ScheduleEntry,
    others: impl IntoIterator<Item = &'a ScheduleEntry>,
    kind: ConflictKind,
) -> Option<Conflict> {
    let weeks = candidate.week_spec();

    others
        .into_iter()
        .filter(|other| other.schedule_id != candidate.schedule_id && other.same_slot(candidate))
        .find_map(|other| {
            weeks
                .first_shared_week(&other.week_spec())
                .map(|week| Conflict {
                    kind: kind.clone(),
                    schedule_id: other.schedule_id,
                    weekday: other.weekday,
                    section_id: other.section_id,
                    week,
                })
        })
}

/// Finds an entry already holding the candidate's classroom, or already taught
/// by the candidate's teacher, at the same weekday and section in a shared week.
/// Classroom clashes are reported first. Entries with the candidate's own
/// schedule id are ignored so an update does not clash with itself.
pub fn find_placement_conflict(
    candidate: &ScheduleEntry,
    existing: &[ScheduleEntry],
) -> Option<Conflict> {
    first_overlap(
        candidate,
        existing
            .iter()
            .filter(|other| other.classroom_id == candidate.classroom_id),
        ConflictKind::Classroom(candidate.classroom_id),
    )
    .or_else(|| {
        first_overlap(
            candidate,
            existing
                .iter()
                .filter(|other| other.teacher_id == candidate.teacher_id),
            ConflictKind::Teacher(candidate.teacher_id.clone()),
        )
    })
}

/// Finds an enrolled entry meeting at the same weekday and section as the
/// candidate in a shared week, wherever it is held
pub fn find_time_conflict(candidate: &ScheduleEntry, enrolled: &[ScheduleEntry]) -> Option<Conflict> {
    first_overlap(candidate, enrolled, ConflictKind::Timetable)
}
