//! Form controller
//!
//! Owns the ordered list of segment rows a user edits before submitting.
//! Rows hold raw text exactly as typed; nothing is parsed until
//! [`FormController::submit`]. Positions are always `0..rows.len()`:
//! removing a row renumbers every row after it.

use std::path::PathBuf;

pub mod plan_file;

pub use plan_file::{PlanFile, PlanFileSegment};

use crate::domain::errors::DomainError;
use crate::domain::model::{RunContext, Segment, TimeSpec};

const MAX_HOURS: u32 = 23;
const MAX_MINUTES: u32 = 59;
const MAX_SECONDS: u32 = 59;

/// Raw hour/minute/second text of one time picker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeFields {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl TimeFields {
    pub fn new(hours: impl Into<String>, minutes: impl Into<String>, seconds: impl Into<String>) -> Self {
        Self {
            hours: hours.into(),
            minutes: minutes.into(),
            seconds: seconds.into(),
        }
    }

    /// Split a clock string (`HH:MM:SS`, `MM:SS` or `SS`) into fields.
    ///
    /// Only splits; range checks happen in [`TimeFields::parse`].
    pub fn from_clock(clock: &str) -> Result<Self, DomainError> {
        let parts: Vec<&str> = clock.trim().split(':').collect();
        match parts.as_slice() {
            [s] => Ok(Self::new("0", "0", *s)),
            [m, s] => Ok(Self::new("0", *m, *s)),
            [h, m, s] => Ok(Self::new(*h, *m, *s)),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid time '{}'. Expected HH:MM:SS, MM:SS or SS",
                clock
            ))),
        }
    }

    /// Convert to a time offset. Every field must hold a number.
    ///
    /// `position` is the 0-based row, `label` names the picker ("start"/"end")
    /// in error messages.
    pub fn parse(&self, position: usize, label: &str) -> Result<TimeSpec, DomainError> {
        let hours = parse_field(&self.hours, MAX_HOURS, position, label, "hours")?;
        let minutes = parse_field(&self.minutes, MAX_MINUTES, position, label, "minutes")?;
        let seconds = parse_field(&self.seconds, MAX_SECONDS, position, label, "seconds")?;
        Ok(TimeSpec::from_components(hours, minutes, seconds))
    }
}

fn parse_field(
    raw: &str,
    max: u32,
    position: usize,
    label: &str,
    unit: &str,
) -> Result<u32, DomainError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value <= max => Ok(value),
        _ => Err(DomainError::InvalidField {
            position: position + 1,
            field: format!("{} {}", label, unit),
            value: raw.to_string(),
        }),
    }
}

/// View-model of one segment row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentRowInput {
    pub position: usize,
    pub start: TimeFields,
    pub end: TimeFields,
    pub name: String,
}

impl SegmentRowInput {
    /// Parse the row into a segment; the name is validated later by the planner
    pub fn to_segment(&self) -> Result<Segment, DomainError> {
        let start = self.start.parse(self.position, "start")?;
        let end = self.end.parse(self.position, "end")?;
        Ok(Segment::new(start, end, self.name.trim()))
    }
}

/// Explicit, toolkit-independent state behind the segment form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormController {
    file_path: String,
    date_label: String,
    rows: Vec<SegmentRowInput>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    /// A fresh form with one blank row
    pub fn new() -> Self {
        let mut form = Self::empty();
        form.add_row();
        form
    }

    /// A form with no rows at all
    pub fn empty() -> Self {
        Self {
            file_path: String::new(),
            date_label: String::new(),
            rows: Vec::new(),
        }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn set_file_path(&mut self, path: impl Into<String>) {
        self.file_path = path.into();
    }

    pub fn date_label(&self) -> &str {
        &self.date_label
    }

    pub fn set_date_label(&mut self, label: impl Into<String>) {
        self.date_label = label.into();
    }

    pub fn rows(&self) -> &[SegmentRowInput] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_mut(&mut self, position: usize) -> Option<&mut SegmentRowInput> {
        self.rows.get_mut(position)
    }

    /// Append a blank row and return its position
    pub fn add_row(&mut self) -> usize {
        self.add_row_with(TimeFields::default(), TimeFields::default(), "")
    }

    /// Append a filled-in row and return its position
    pub fn add_row_with(&mut self, start: TimeFields, end: TimeFields, name: impl Into<String>) -> usize {
        let position = self.rows.len();
        self.rows.push(SegmentRowInput {
            position,
            start,
            end,
            name: name.into(),
        });
        position
    }

    /// Remove a row and renumber the ones after it
    pub fn remove_row(&mut self, position: usize) -> Result<SegmentRowInput, DomainError> {
        if position >= self.rows.len() {
            return Err(DomainError::BadArgs(format!(
                "No segment row at position {}",
                position + 1
            )));
        }

        let removed = self.rows.remove(position);
        self.reindex();
        Ok(removed)
    }

    fn reindex(&mut self) {
        for (position, row) in self.rows.iter_mut().enumerate() {
            row.position = position;
        }
    }

    /// Turn the current form state into a run context.
    ///
    /// Field syntax and ranges are checked here; segment semantics
    /// (ordering, names, source bounds) are left to the planner.
    pub fn submit(&self) -> Result<RunContext, DomainError> {
        let file_path = self.file_path.trim();
        if file_path.is_empty() {
            return Err(DomainError::BadArgs("No input file selected".to_string()));
        }

        let segments = self
            .rows
            .iter()
            .map(SegmentRowInput::to_segment)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RunContext::new(
            PathBuf::from(file_path),
            Some(self.date_label.clone()),
            segments,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_has_one_blank_row() {
        let form = FormController::new();
        assert_eq!(form.row_count(), 1);
        assert_eq!(form.rows()[0], SegmentRowInput::default());
        assert_eq!(FormController::empty().row_count(), 0);
    }

    #[test]
    fn test_remove_row_reindexes() {
        let mut form = FormController::empty();
        form.add_row_with(TimeFields::new("0", "0", "0"), TimeFields::new("0", "0", "10"), "A");
        form.add_row_with(TimeFields::new("0", "0", "10"), TimeFields::new("0", "0", "20"), "B");
        form.add_row_with(TimeFields::new("0", "0", "20"), TimeFields::new("0", "0", "30"), "C");

        let removed = form.remove_row(0).unwrap();
        assert_eq!(removed.name, "A");

        let rows = form.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].position, rows[0].name.as_str()), (0, "B"));
        assert_eq!((rows[1].position, rows[1].name.as_str()), (1, "C"));

        assert_eq!(form.add_row(), 2);
    }

    #[test]
    fn test_remove_missing_row_fails() {
        let mut form = FormController::new();
        assert!(form.remove_row(1).is_err());
        assert_eq!(form.row_count(), 1);
    }

    #[test]
    fn test_time_fields_parse() {
        let time = TimeFields::new("1", "02", "03").parse(0, "start").unwrap();
        assert_eq!(time.as_seconds(), 3723);

        let zero = TimeFields::new("0", "0", "0").parse(0, "start").unwrap();
        assert_eq!(zero.as_seconds(), 0);
    }

    #[test]
    fn test_time_fields_reject_blank() {
        let err = TimeFields::new("0", " ", "5").parse(0, "start").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidField {
                position: 1,
                field: "start minutes".to_string(),
                value: " ".to_string(),
            }
        );
        assert!(TimeFields::default().parse(0, "end").is_err());
    }

    #[test]
    fn test_invalid_field_message_names_accepted_forms() {
        let message = TimeFields::new("0", "0", "90")
            .parse(0, "end")
            .unwrap_err()
            .to_string();
        assert!(message.contains("invalid end seconds value '90'"));
        assert!(message.contains("1:30"));
    }

    #[test]
    fn test_time_fields_reject_out_of_range() {
        let err = TimeFields::new("24", "0", "0").parse(1, "end").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidField {
                position: 2,
                field: "end hours".to_string(),
                value: "24".to_string(),
            }
        );
        assert!(TimeFields::new("0", "60", "0").parse(0, "start").is_err());
        assert!(TimeFields::new("0", "0", "60").parse(0, "start").is_err());
        assert!(TimeFields::new("0", "-1", "0").parse(0, "start").is_err());
        assert!(TimeFields::new("0", "0", "1.5").parse(0, "start").is_err());
    }

    #[test]
    fn test_from_clock() {
        assert_eq!(
            TimeFields::from_clock("01:02:03").unwrap(),
            TimeFields::new("01", "02", "03")
        );
        assert_eq!(TimeFields::from_clock("2:30").unwrap(), TimeFields::new("0", "2", "30"));
        assert_eq!(TimeFields::from_clock("45").unwrap(), TimeFields::new("0", "0", "45"));
        assert!(TimeFields::from_clock("1:2:3:4").is_err());
    }

    #[test]
    fn test_submit_builds_context() {
        let mut form = FormController::new();
        form.set_file_path(" /videos/talk.mp4 ");
        form.set_date_label("2024-06-01");
        let row = form.row_mut(0).unwrap();
        row.start = TimeFields::new("0", "0", "0");
        row.end = TimeFields::new("0", "0", "10");
        row.name = "  A ".to_string();
        form.add_row_with(TimeFields::new("0", "0", "10"), TimeFields::new("0", "0", "30"), "B");

        let ctx = form.submit().unwrap();
        assert_eq!(ctx.source_path, PathBuf::from("/videos/talk.mp4"));
        assert_eq!(ctx.date_label, "2024-06-01");
        assert_eq!(
            ctx.segments,
            vec![Segment::from_seconds(0, 10, "A"), Segment::from_seconds(10, 30, "B")]
        );
    }

    #[test]
    fn test_submit_requires_file_path() {
        let form = FormController::new();
        assert!(matches!(form.submit(), Err(DomainError::BadArgs(_))));
    }

    #[test]
    fn test_submit_untouched_row_fails_on_blank_time() {
        let mut form = FormController::new();
        form.set_file_path("a.mp4");
        assert!(matches!(
            form.submit(),
            Err(DomainError::InvalidField { position: 1, .. })
        ));
    }

    #[test]
    fn test_submit_keeps_blank_names_for_planner() {
        let mut form = FormController::new();
        form.set_file_path("a.mp4");
        let row = form.row_mut(0).unwrap();
        row.start = TimeFields::new("0", "0", "0");
        row.end = TimeFields::new("0", "0", "1");
        let ctx = form.submit().unwrap();
        assert_eq!(ctx.segments[0].name, "");
    }
}
