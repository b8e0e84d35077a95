//! Static day-template catalogs, one per goal category.
//!
//! Pre-seeded data; nothing here is created or mutated at runtime.

use super::entities::GoalCategory;

/// One day of a template catalog: a title and its ordered activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTemplate {
    pub title: &'static str,
    pub activities: &'static [&'static str],
}

/// Weekday labels in calendar order, starting Monday.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const BUILD_MUSCLE: &[DayTemplate] = &[
    DayTemplate {
        title: "Upper Body Strength",
        activities: &[
            "Push-ups: 3 sets of 10-15 reps",
            "Dumbbell rows: 3 sets of 12 reps each arm",
            "Shoulder press: 3 sets of 10 reps",
            "Bicep curls: 3 sets of 12 reps",
            "Tricep dips: 3 sets of 8-12 reps",
        ],
    },
    DayTemplate {
        title: "Lower Body & Core",
        activities: &[
            "Squats: 3 sets of 15 reps",
            "Lunges: 3 sets of 10 reps each leg",
            "Glute bridges: 3 sets of 15 reps",
            "Plank: 3 sets of 30 seconds",
            "Mountain climbers: 3 sets of 20 reps",
        ],
    },
    DayTemplate {
        title: "Full Body Circuit",
        activities: &[
            "Burpees: 3 sets of 10 reps",
            "Jump squats: 3 sets of 15 reps",
            "Push-ups: 3 sets of 10 reps",
            "Plank to downward dog: 3 sets of 8 reps",
            "High knees: 3 sets of 30 seconds",
        ],
    },
    DayTemplate {
        title: "Cardio & Flexibility",
        activities: &[
            "Jogging or brisk walking: 20 minutes",
            "Jump rope: 3 sets of 2 minutes",
            "Stretching routine: 10 minutes",
            "Yoga poses: 5 minutes",
            "Cool down: 5 minutes",
        ],
    },
    DayTemplate {
        title: "Full Body Strength",
        activities: &[
            "Deadlifts: 3 sets of 8 reps",
            "Bench press: 3 sets of 10 reps",
            "Pull-ups: 3 sets of 5-8 reps",
            "Leg press: 3 sets of 12 reps",
            "Core circuit: 3 rounds",
        ],
    },
    DayTemplate {
        title: "Active Recovery",
        activities: &[
            "Light stretching: 15 minutes",
            "Foam rolling: 10 minutes",
            "Yoga: 20 minutes",
            "Walking: 30 minutes",
            "Meditation: 10 minutes",
        ],
    },
    DayTemplate {
        title: "HIIT Training",
        activities: &[
            "Burpees: 30 seconds",
            "Mountain climbers: 30 seconds",
            "Jump squats: 30 seconds",
            "Push-ups: 30 seconds",
            "Rest: 30 seconds between exercises",
        ],
    },
];

const WEIGHT_LOSS: &[DayTemplate] = &[
    DayTemplate {
        title: "High Intensity Cardio",
        activities: &[
            "Jumping jacks: 3 sets of 30 seconds",
            "Burpees: 3 sets of 10 reps",
            "Mountain climbers: 3 sets of 30 seconds",
            "High knees: 3 sets of 30 seconds",
            "Rest: 1 minute between sets",
        ],
    },
    DayTemplate {
        title: "Strength Training",
        activities: &[
            "Squats: 3 sets of 15 reps",
            "Push-ups: 3 sets of 10 reps",
            "Lunges: 3 sets of 10 reps each leg",
            "Plank: 3 sets of 30 seconds",
            "Wall sit: 3 sets of 30 seconds",
        ],
    },
    DayTemplate {
        title: "Circuit Training",
        activities: &[
            "Jump squats: 3 sets of 15 reps",
            "Push-ups: 3 sets of 10 reps",
            "Mountain climbers: 3 sets of 30 seconds",
            "Plank: 3 sets of 30 seconds",
            "Rest: 1 minute between circuits",
        ],
    },
    DayTemplate {
        title: "Endurance Cardio",
        activities: &[
            "Brisk walking: 30 minutes",
            "Cycling: 20 minutes",
            "Swimming: 15 minutes (if available)",
            "Stretching: 10 minutes",
            "Cool down: 5 minutes",
        ],
    },
    DayTemplate {
        title: "Full Body Burn",
        activities: &[
            "Burpees: 3 sets of 10 reps",
            "Squats: 3 sets of 15 reps",
            "Push-ups: 3 sets of 10 reps",
            "Lunges: 3 sets of 12 reps",
            "Plank: 3 sets of 30 seconds",
        ],
    },
    DayTemplate {
        title: "Active Recovery",
        activities: &[
            "Light walking: 30 minutes",
            "Stretching: 15 minutes",
            "Yoga: 20 minutes",
            "Foam rolling: 10 minutes",
        ],
    },
    DayTemplate {
        title: "HIIT Blast",
        activities: &[
            "High knees: 30 seconds",
            "Push-ups: 30 seconds",
            "Squat jumps: 30 seconds",
            "Plank: 30 seconds",
            "Rest: 30 seconds between rounds",
        ],
    },
];

/// Returns the template catalog for a goal. Every category has a non-empty catalog.
pub fn catalog_for(goal: GoalCategory) -> &'static [DayTemplate] {
    match goal {
        GoalCategory::BuildMuscle => BUILD_MUSCLE,
        GoalCategory::WeightLoss => WEIGHT_LOSS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogs_have_seven_distinct_titles() {
        for goal in GoalCategory::ALL {
            let catalog = catalog_for(goal);
            assert_eq!(catalog.len(), 7, "{goal} catalog size");
            let titles: HashSet<_> = catalog.iter().map(|t| t.title).collect();
            assert_eq!(titles.len(), catalog.len(), "{goal} titles must be unique");
            assert!(catalog.iter().all(|t| !t.activities.is_empty()));
        }
    }
}
