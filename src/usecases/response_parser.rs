//! Structural validation of model output and the prompt sent to the model.

use crate::domain::{GeneratedSchedule, PlanParameters, ScheduledDay};
use crate::ports::SchemaHint;
use serde::Deserialize;
use serde_json::json;

/// Reasons a model reply is not a usable schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("not valid schedule JSON: {0}")]
    Json(String),

    #[error("expected {expected} days, got {actual}")]
    DayCount { expected: usize, actual: usize },

    #[error("day {index} is incomplete: {field} is empty")]
    EmptyField { index: usize, field: &'static str },
}

/// Accepted reply shapes: `{"days": [...]}` or a bare array of days.
#[derive(Deserialize)]
#[serde(untagged)]
enum LlmSchedule {
    Wrapped { days: Vec<ScheduledDay> },
    Bare(Vec<ScheduledDay>),
}

/// Schema hint describing the reply we ask the model for.
pub fn schedule_schema() -> SchemaHint {
    SchemaHint {
        name: "weekly_schedule",
        schema: json!({
            "type": "object",
            "required": ["days"],
            "properties": {
                "days": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["day", "title", "activities"],
                        "properties": {
                            "day": { "type": "string" },
                            "title": { "type": "string" },
                            "activities": { "type": "array", "items": { "type": "string" } }
                        }
                    }
                }
            }
        }),
    }
}

/// Fixed instruction template for one plan.
pub fn build_prompt(params: &PlanParameters) -> String {
    let mut prompt = format!(
        "Create a weekly workout schedule with exactly {days} workout days.\n\
         Goal: {goal}\n\
         Fitness level: {level}\n",
        days = params.weekly_days(),
        goal = params.goal_label,
        level = params.fitness_level,
    );
    if let Some(equipment) = &params.equipment {
        prompt.push_str(&format!("Available equipment: {}\n", equipment));
    }
    if let Some(workout_time) = &params.workout_time {
        prompt.push_str(&format!("Session length: {}\n", workout_time));
    }
    if let Some(weeks) = params.duration_weeks {
        prompt.push_str(&format!("Program duration: {} weeks\n", weeks));
    }
    if let Some(weight) = &params.goal_weight {
        prompt.push_str(&format!("Goal weight: {}\n", weight));
    }
    prompt.push_str(
        "\nLabel days with consecutive weekday names starting on Monday. \
         Give every day a short title and 4-6 activities, each a single line \
         with sets, reps or duration (e.g. \"Squats: 3 sets of 12 reps\").\n\
         Respond with JSON only: {\"days\": [{\"day\": ..., \"title\": ..., \"activities\": [...]}]}",
    );
    prompt
}

/// Strip markdown fences or surrounding prose from a model reply.
fn sanitize_json(raw_text: &str) -> &str {
    let trimmed = raw_text.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        let body = rest.strip_prefix("json").unwrap_or(rest);
        let body = match body.rfind("```") {
            Some(end) => &body[..end],
            None => body,
        };
        return body.trim();
    }

    let open = trimmed.find(['{', '[']);
    let close = trimmed.rfind(['}', ']']);
    match (open, close) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Parse a model reply into a schedule of exactly `expected_days` complete entries.
///
/// Entries are passed through unmodified once they validate.
pub fn parse_schedule(raw: &str, expected_days: usize) -> Result<GeneratedSchedule, ParseError> {
    let clean = sanitize_json(raw);
    let parsed: LlmSchedule =
        serde_json::from_str(clean).map_err(|e| ParseError::Json(e.to_string()))?;
    let days = match parsed {
        LlmSchedule::Wrapped { days } | LlmSchedule::Bare(days) => days,
    };

    if days.len() != expected_days {
        return Err(ParseError::DayCount {
            expected: expected_days,
            actual: days.len(),
        });
    }
    for (index, day) in days.iter().enumerate() {
        let field = if day.day.trim().is_empty() {
            Some("day")
        } else if day.title.trim().is_empty() {
            Some("title")
        } else if day.activities.iter().all(|a| a.trim().is_empty()) {
            Some("activities")
        } else {
            None
        };
        if let Some(field) = field {
            return Err(ParseError::EmptyField { index, field });
        }
    }

    Ok(GeneratedSchedule { days })
}
