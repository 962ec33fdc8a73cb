use serde::Serialize;

/// The two tracked habits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    Water,
    Walking,
}

/// Static description of a habit: where it lives in the DB and what counts as
/// a goal day. Both trackers share the same code and differ only by this table.
#[derive(Debug)]
pub struct HabitProfile {
    pub label: &'static str,
    pub table: &'static str,
    /// Integer column summed for goals and best day (`quantity` / `steps`).
    pub primary_column: &'static str,
    pub primary_unit: &'static str,
    /// Real column carried alongside (only walking has one).
    pub secondary_column: Option<&'static str>,
    pub secondary_unit: Option<&'static str>,
    pub daily_goal: i64,
    pub secondary_goal: Option<f64>,
}

pub const WATER: HabitProfile = HabitProfile {
    label: "Water intake",
    table: "water_intake",
    primary_column: "quantity",
    primary_unit: "glasses",
    secondary_column: None,
    secondary_unit: None,
    daily_goal: 8,
    secondary_goal: None,
};

pub const WALKING: HabitProfile = HabitProfile {
    label: "Walking activity",
    table: "walking_activity",
    primary_column: "steps",
    primary_unit: "steps",
    secondary_column: Some("distance"),
    secondary_unit: Some("km"),
    daily_goal: 10_000,
    secondary_goal: Some(8.0),
};

impl HabitKind {
    pub const ALL: [HabitKind; 2] = [HabitKind::Water, HabitKind::Walking];

    pub fn profile(&self) -> &'static HabitProfile {
        match self {
            HabitKind::Water => &WATER,
            HabitKind::Walking => &WALKING,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            HabitKind::Water => "💧",
            HabitKind::Walking => "🚶",
        }
    }

    /// Short name used in the audit log and in CLI subcommands.
    pub fn code(&self) -> &'static str {
        match self {
            HabitKind::Water => "water",
            HabitKind::Walking => "walk",
        }
    }
}

/// Which aggregated column a query should sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricColumn {
    Primary,
    Secondary,
}

impl MetricColumn {
    /// Column name for `kind`, or `None` when the habit has no such column.
    pub fn name(&self, kind: HabitKind) -> Option<&'static str> {
        let profile = kind.profile();
        match self {
            MetricColumn::Primary => Some(profile.primary_column),
            MetricColumn::Secondary => profile.secondary_column,
        }
    }
}
