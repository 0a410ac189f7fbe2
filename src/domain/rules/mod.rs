// Domain rules - Segment validation and output naming

use std::path::Path;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Business rules for a single segment
pub struct SegmentValidator;

impl SegmentValidator {
    /// Validate one segment against the probed source duration.
    ///
    /// Checks run in a fixed order: range first, then the source bound,
    /// then the name. `index` is 0-based; errors report it 1-based.
    pub fn validate(index: usize, segment: &Segment, duration: f64) -> Result<(), DomainError> {
        let position = index + 1;
        let start = segment.start.as_seconds();
        let end = segment.end.as_seconds();

        if start >= end {
            return Err(DomainError::InvalidRange {
                position,
                start,
                end,
            });
        }

        if end as f64 > duration {
            return Err(DomainError::RangeExceedsSource {
                position,
                end,
                duration,
            });
        }

        if segment.name.trim().is_empty() {
            return Err(DomainError::MissingName { position });
        }

        Ok(())
    }
}

/// Deterministic naming of the output folder and files
pub struct OutputNaming;

impl OutputNaming {
    /// Replace path separators so a label can be used inside one file name
    pub fn sanitize(text: &str) -> String {
        text.replace(['/', '\\'], "-")
    }

    /// `segments_<date>`
    pub fn folder_name(date_label: &str) -> String {
        format!("{}{}", OUTPUT_FOLDER_PREFIX, Self::sanitize(date_label))
    }

    /// `[<date>] <name>.mp4` with separators replaced
    pub fn file_name(date_label: &str, segment_name: &str) -> String {
        Self::sanitize(&format!(
            "[{}] {}.{}",
            date_label,
            segment_name.trim(),
            OUTPUT_EXTENSION
        ))
    }

    /// Sibling folder of the source named after the date
    pub fn output_folder(source_path: &Path, date_label: &str) -> std::path::PathBuf {
        let parent = source_path.parent().unwrap_or_else(|| Path::new(""));
        parent.join(Self::folder_name(date_label))
    }
}

/// Turns a run context into an output plan
pub struct SegmentPlanner;

impl SegmentPlanner {
    /// Validate every segment in submission order and derive the plan.
    ///
    /// Pure: nothing is created on disk.
    pub fn plan(context: &RunContext, duration: f64) -> Result<OutputPlan, DomainError> {
        require_source(&context.source_path)?;

        if context.segments.is_empty() {
            return Err(DomainError::NoSegments);
        }

        let output_folder = OutputNaming::output_folder(&context.source_path, &context.date_label);

        let segments = context
            .segments
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                SegmentValidator::validate(index, segment, duration)?;
                let file_name = OutputNaming::file_name(&context.date_label, &segment.name);
                Ok(PlannedSegment {
                    index,
                    segment: Segment::new(segment.start, segment.end, segment.name.trim()),
                    output_path: output_folder.join(file_name),
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(OutputPlan {
            source_path: context.source_path.clone(),
            date_label: context.date_label.clone(),
            output_folder,
            source_duration: duration,
            segments,
        })
    }
}

#[cfg(test)]
mod tests;
