//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/database types here. Adapters map their payloads into these.

use super::errors::DomainError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Most days a weekly schedule can hold. Requested frequencies above this are clamped.
pub const MAX_WEEKLY_DAYS: usize = 7;

/// Fitness objective selecting a template catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GoalCategory {
    #[default]
    BuildMuscle,
    WeightLoss,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 2] = [GoalCategory::BuildMuscle, GoalCategory::WeightLoss];

    /// Canonical tag, e.g. `"build-muscle"`.
    pub fn as_str(self) -> &'static str {
        match self {
            GoalCategory::BuildMuscle => "build-muscle",
            GoalCategory::WeightLoss => "weight-loss",
        }
    }

    /// Resolve a goal tag. Total: unknown or missing tags map to the default category.
    ///
    /// Accepts the canonical tags and the legacy display labels
    /// ("Build muscle and strength", "Weight loss"), case-insensitively.
    pub fn from_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::default();
        };
        match tag.trim().to_ascii_lowercase().as_str() {
            "build-muscle" | "build muscle and strength" => GoalCategory::BuildMuscle,
            "weight-loss" | "weight loss" => GoalCategory::WeightLoss,
            _ => Self::default(),
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored workout plan document, as written by the front end.
///
/// Only `id` and `user_id` are guaranteed; everything else is validated when
/// converted into [`PlanParameters`]. `frequency` is kept as raw JSON so a
/// document with a non-integer value still loads and is rejected per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_time: Option<String>,
    /// Program length in weeks. Non-integer values read as absent.
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<String>,
    #[serde(rename = "timePeriod", default, skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
    #[serde(rename = "goalWeight", default, skip_serializing_if = "Option::is_none")]
    pub goal_weight: Option<String>,
    #[serde(
        alias = "createdAt",
        default = "Utc::now",
        deserialize_with = "deserialize_flexible_datetime"
    )]
    pub created_at: DateTime<Utc>,
}

fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| v.as_i64()))
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` (UTC), `YYYY-MM-DD`, or a
/// Firestore timestamp export (`{"seconds": .., "nanoseconds": ..}`).
fn deserialize_flexible_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match Value::deserialize(deserializer)? {
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
                return Ok(dt.with_timezone(&Utc));
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S") {
                return Ok(Utc.from_utc_datetime(&dt));
            }
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| Utc.from_utc_datetime(&dt))
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp: '{s}'")))
        }
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)
                .ok_or_else(|| D::Error::custom("timestamp object without seconds"))?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, nanos)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {seconds}")))
        }
        Value::Null => Ok(Utc::now()),
        other => Err(D::Error::custom(format!("invalid timestamp: {other}"))),
    }
}

/// Validated generation input derived from a [`PlanRecord`].
///
/// Fitness level, equipment, session length, duration and goal weight are
/// informational: they feed the AI prompt but never change template output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanParameters {
    pub goal: GoalCategory,
    /// Goal as the user entered it (may be richer than the resolved category).
    pub goal_label: String,
    pub fitness_level: String,
    /// Requested sessions per week, always >= 1.
    pub frequency: u32,
    pub equipment: Option<String>,
    pub workout_time: Option<String>,
    pub duration_weeks: Option<i64>,
    pub goal_weight: Option<String>,
}

impl PlanParameters {
    /// Minimal parameters for a goal and frequency.
    pub fn new(goal: GoalCategory, frequency: i64) -> Result<Self, DomainError> {
        Ok(Self {
            goal,
            goal_label: goal.as_str().to_string(),
            fitness_level: "Beginner".to_string(),
            frequency: validate_frequency(Some(&Value::from(frequency)))?,
            equipment: None,
            workout_time: None,
            duration_weeks: None,
            goal_weight: None,
        })
    }

    /// Validate a stored record. Missing or non-positive frequency is a `Validation` error.
    pub fn from_record(record: &PlanRecord) -> Result<Self, DomainError> {
        let frequency = validate_frequency(record.frequency.as_ref())?;
        let goal = GoalCategory::from_tag(record.goal.as_deref());
        Ok(Self {
            goal,
            goal_label: record
                .goal
                .clone()
                .filter(|g| !g.trim().is_empty())
                .unwrap_or_else(|| goal.as_str().to_string()),
            fitness_level: record
                .fitness_level
                .clone()
                .unwrap_or_else(|| "Beginner".to_string()),
            frequency,
            equipment: record.equipment.clone(),
            workout_time: record.workout_time.clone(),
            duration_weeks: record.duration,
            goal_weight: record.goal_weight.clone(),
        })
    }

    /// Number of schedule entries to produce: `frequency` clamped to [`MAX_WEEKLY_DAYS`].
    pub fn weekly_days(&self) -> usize {
        (self.frequency as usize).min(MAX_WEEKLY_DAYS)
    }
}

fn validate_frequency(frequency: Option<&Value>) -> Result<u32, DomainError> {
    let value = match frequency {
        None | Some(Value::Null) => {
            return Err(DomainError::Validation(
                "missing required field: frequency".to_string(),
            ));
        }
        Some(v) => v,
    };
    match value.as_i64() {
        Some(f) if f >= 1 => u32::try_from(f)
            .map_err(|_| DomainError::Validation(format!("frequency out of range: {f}"))),
        _ => Err(DomainError::Validation(format!(
            "frequency must be a positive integer, got {value}"
        ))),
    }
}

/// One labeled workout day of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledDay {
    pub day: String,
    pub title: String,
    pub activities: Vec<String>,
}

/// Ordered weekly schedule. Created per request; never persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneratedSchedule {
    pub days: Vec<ScheduledDay>,
}

impl GeneratedSchedule {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleSource {
    Ai,
    Template,
}

/// Why an AI attempt was replaced by template output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationReason {
    QuotaExceeded,
    MalformedResponse,
}

impl fmt::Display for DegradationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradationReason::QuotaExceeded => f.write_str("quota_exceeded"),
            DegradationReason::MalformedResponse => f.write_str("malformed_response"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UpstreamUnavailable,
}

/// Terminal result of one orchestrator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    AiGenerated(GeneratedSchedule),
    Degraded {
        schedule: GeneratedSchedule,
        reason: DegradationReason,
    },
    Failed {
        kind: FailureKind,
        detail: String,
    },
}

impl GenerationOutcome {
    pub fn schedule(&self) -> Option<&GeneratedSchedule> {
        match self {
            GenerationOutcome::AiGenerated(schedule) => Some(schedule),
            GenerationOutcome::Degraded { schedule, .. } => Some(schedule),
            GenerationOutcome::Failed { .. } => None,
        }
    }

    pub fn source(&self) -> Option<ScheduleSource> {
        match self {
            GenerationOutcome::AiGenerated(_) => Some(ScheduleSource::Ai),
            GenerationOutcome::Degraded { .. } => Some(ScheduleSource::Template),
            GenerationOutcome::Failed { .. } => None,
        }
    }

    pub fn degradation(&self) -> Option<DegradationReason> {
        match self {
            GenerationOutcome::Degraded { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

/// Explicit per-request caller context. Built by the inbound adapter, never global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    owner_id: String,
}

impl Session {
    pub fn new(owner_id: impl Into<String>) -> Result<Self, DomainError> {
        let owner_id = owner_id.into();
        if owner_id.trim().is_empty() {
            return Err(DomainError::Validation(
                "missing required parameter: userId".to_string(),
            ));
        }
        Ok(Self { owner_id })
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(frequency: Option<i64>, goal: Option<&str>) -> PlanRecord {
        PlanRecord {
            id: "plan-1".to_string(),
            user_id: "user-1".to_string(),
            name: None,
            goal: goal.map(str::to_string),
            fitness_level: None,
            frequency: frequency.map(Value::from),
            equipment: None,
            workout_time: None,
            duration: None,
            plan_type: None,
            time_period: None,
            goal_weight: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_goal_from_tag() {
        assert_eq!(GoalCategory::from_tag(Some("weight-loss")), GoalCategory::WeightLoss);
        assert_eq!(GoalCategory::from_tag(Some("Weight loss")), GoalCategory::WeightLoss);
        assert_eq!(
            GoalCategory::from_tag(Some("Build muscle and strength")),
            GoalCategory::BuildMuscle
        );
        assert_eq!(GoalCategory::from_tag(Some("endurance")), GoalCategory::BuildMuscle);
        assert_eq!(GoalCategory::from_tag(None), GoalCategory::BuildMuscle);
    }

    #[test]
    fn test_from_record_rejects_bad_frequency() {
        for freq in [None, Some(0), Some(-3)] {
            let err = PlanParameters::from_record(&record(freq, Some("weight-loss"))).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{freq:?}");
        }
    }

    #[test]
    fn test_from_record_rejects_non_integer_frequency() {
        for raw in [serde_json::json!("five"), serde_json::json!(4.5), serde_json::json!([3])] {
            let mut r = record(None, Some("weight-loss"));
            r.frequency = Some(raw.clone());
            let err = PlanParameters::from_record(&r).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{raw}");
        }
    }

    #[test]
    fn test_plan_record_decodes_front_end_shape() {
        let r: PlanRecord = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "userId": "u1",
            "frequency": "five",
            "duration": "eight",
            "createdAt": "2025-03-01T10:00:00Z",
        }))
        .unwrap();
        assert_eq!(r.frequency, Some(serde_json::json!("five")));
        assert_eq!(r.duration, None);
        assert_eq!(r.created_at.to_rfc3339(), "2025-03-01T10:00:00+00:00");

        let r: PlanRecord = serde_json::from_value(serde_json::json!({
            "id": "p2",
            "userId": "u1",
            "createdAt": {"seconds": 1_700_000_000, "nanoseconds": 0},
        }))
        .unwrap();
        assert_eq!(r.created_at.timestamp(), 1_700_000_000);

        let before = Utc::now();
        let r: PlanRecord =
            serde_json::from_value(serde_json::json!({"id": "p3", "userId": "u1"})).unwrap();
        assert!(r.created_at >= before);
    }

    #[test]
    fn test_from_record_keeps_goal_label() {
        let params = PlanParameters::from_record(&record(Some(3), Some("reduce-belly-fat"))).unwrap();
        assert_eq!(params.goal, GoalCategory::BuildMuscle);
        assert_eq!(params.goal_label, "reduce-belly-fat");
        assert_eq!(params.fitness_level, "Beginner");
        assert_eq!(params.weekly_days(), 3);
    }

    #[test]
    fn test_weekly_days_clamps() {
        let params = PlanParameters::new(GoalCategory::WeightLoss, 12).unwrap();
        assert_eq!(params.frequency, 12);
        assert_eq!(params.weekly_days(), MAX_WEEKLY_DAYS);
    }

    #[test]
    fn test_plan_record_json_field_names() {
        let mut r = record(Some(4), Some("weight-loss"));
        r.goal_weight = Some("70".to_string());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["goalWeight"], "70");
        assert!(json.get("equipment").is_none());
    }

    #[test]
    fn test_session_requires_owner() {
        assert!(Session::new("  ").is_err());
        assert_eq!(Session::new("abc").unwrap().owner_id(), "abc");
    }
}
