use log::debug;
use models::{schedule::ScheduleEntry, section::ClassSection, weekday::Weekday};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One cell of the weekly grid, possibly spanning several consecutive sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBlock {
    #[serde(rename = "weekDay")]
    pub weekday: Weekday,
    pub start_section: u32,
    pub span: u32,
    /// First schedule entry of the merged run
    pub entry: ScheduleEntry,
}

impl RenderBlock {
    pub fn end_section(&self) -> u32 {
        self.start_section.saturating_add(self.span.saturating_sub(1))
    }

    pub fn covers(&self, section_id: u32) -> bool {
        self.start_section <= section_id && section_id <= self.end_section()
    }
}

/// Builds the grid cells for one semester week.
///
/// Entries inactive in `target_week` or pointing at a section missing from
/// `all_sections` are left out. On each weekday, entries of one schedule id at
/// consecutive sections merge into a single block; a gap in the sections starts
/// a new block. Each entry is used at most once, and an entry landing on a
/// section already covered that day is dropped, so blocks never overlap.
pub fn build_render_blocks(
    entries: &[ScheduleEntry],
    all_sections: &[ClassSection],
    target_week: u32,
) -> Vec<RenderBlock> {
    let known_sections: HashSet<u32> = all_sections.iter().map(|s| s.id).collect();

    let mut active: Vec<&ScheduleEntry> = entries
        .iter()
        .filter(|entry| entry.is_active_in(target_week))
        .filter(|entry| {
            let known = known_sections.contains(&entry.section_id);
            if !known {
                debug!(
                    "Schedule {} refers to unknown section {}, not rendered",
                    entry.schedule_id, entry.section_id
                );
            }
            known
        })
        .collect();

    active.sort_by_key(|entry| (entry.weekday, entry.section_id));

    active
        .chunk_by(|a, b| a.weekday == b.weekday)
        .flat_map(merge_day)
        .collect()
}

/// Merges one weekday's entries, already sorted by section
fn merge_day(entries: &[&ScheduleEntry]) -> Vec<RenderBlock> {
    let mut consumed = vec![false; entries.len()];
    let mut occupied: HashSet<u32> = HashSet::new();
    let mut blocks = Vec::new();

    for start in 0..entries.len() {
        if consumed[start] {
            continue;
        }
        consumed[start] = true;

        let first = entries[start];
        if occupied.contains(&first.section_id) {
            debug!(
                "Schedule {} overlaps an earlier block on {} section {}, skipped",
                first.schedule_id, first.weekday, first.section_id
            );
            continue;
        }
        occupied.insert(first.section_id);

        let mut last_section = first.section_id;
        while let Some(next) = last_section.checked_add(1).and_then(|section_id| {
            find_continuation(entries, &consumed, start + 1, first.schedule_id, section_id)
        }) {
            consumed[next] = true;
            last_section = entries[next].section_id;
            occupied.insert(last_section);
        }

        blocks.push(RenderBlock {
            weekday: first.weekday,
            start_section: first.section_id,
            span: (last_section - first.section_id).saturating_add(1),
            entry: first.clone(),
        });
    }

    blocks
}

/// Index of an unused entry of `schedule_id` at exactly `section_id`
fn find_continuation(
    entries: &[&ScheduleEntry],
    consumed: &[bool],
    from: usize,
    schedule_id: i32,
    section_id: u32,
) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .skip(from)
        .take_while(|(_, entry)| entry.section_id <= section_id)
        .find(|(index, entry)| {
            !consumed[*index] && entry.schedule_id == schedule_id && entry.section_id == section_id
        })
        .map(|(index, _)| index)
}

/// What occupies one (section, weekday) position of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell<'a> {
    /// A block starts here
    Block(&'a RenderBlock),
    /// Spanned over by a block starting in an earlier row
    Covered,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow<'a> {
    pub section: &'a ClassSection,
    /// Monday first
    pub cells: [GridCell<'a>; 7],
}

/// Lays blocks out on a section-by-weekday grid; `sections` must be sorted by id
pub fn layout_grid<'a>(blocks: &'a [RenderBlock], sections: &'a [ClassSection]) -> Vec<GridRow<'a>> {
    let starts: HashMap<(Weekday, u32), &RenderBlock> = blocks
        .iter()
        .map(|block| ((block.weekday, block.start_section), block))
        .collect();

    sections
        .iter()
        .map(|section| {
            let mut cells = [GridCell::Empty; 7];
            for day in Weekday::all() {
                cells[day.index()] = match starts.get(&(day, section.id)) {
                    Some(&block) => GridCell::Block(block),
                    None if blocks
                        .iter()
                        .any(|b| b.weekday == day && b.covers(section.id)) =>
                    {
                        GridCell::Covered
                    }
                    None => GridCell::Empty,
                };
            }
            GridRow { section, cells }
        })
        .collect()
}
