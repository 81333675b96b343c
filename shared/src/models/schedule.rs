//! Stage/week keyed lookup tables

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Stage;

/// Values keyed by stage and 1-based week number.
///
/// Weeks may be sparse. A week past the last defined week of a stage resolves
/// to that last week's value; a missing week at or below it does not resolve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct WeeklySchedule<T> {
    stages: BTreeMap<Stage, BTreeMap<u32, T>>,
}

impl<T> Default for WeeklySchedule<T> {
    fn default() -> Self {
        Self {
            stages: BTreeMap::new(),
        }
    }
}

impl<T> WeeklySchedule<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for one week, replacing any previous one
    pub fn insert(&mut self, stage: Stage, week: u32, value: T) -> &mut Self {
        self.stages.entry(stage).or_default().insert(week, value);
        self
    }

    /// Entry for `stage`/`week`, falling back to the last defined week when
    /// `week` lies beyond it
    pub fn lookup(&self, stage: Stage, week: u32) -> Option<&T> {
        let weeks = self.stages.get(&stage)?;
        if let Some(value) = weeks.get(&week) {
            return Some(value);
        }
        let (&last_week, value) = weeks.iter().next_back()?;
        (week > last_week).then_some(value)
    }

    /// Defined weeks of a stage, ascending
    pub fn weeks(&self, stage: Stage) -> impl Iterator<Item = (u32, &T)> + '_ {
        self.stages
            .get(&stage)
            .into_iter()
            .flat_map(|weeks| weeks.iter().map(|(week, value)| (*week, value)))
    }

    /// Last defined week of a stage
    pub fn last_week(&self, stage: Stage) -> Option<u32> {
        self.stages
            .get(&stage)
            .and_then(|weeks| weeks.keys().next_back().copied())
    }

    pub fn stages(&self) -> impl Iterator<Item = Stage> + '_ {
        self.stages
            .iter()
            .filter(|(_, weeks)| !weeks.is_empty())
            .map(|(stage, _)| *stage)
    }

    pub fn contains_stage(&self, stage: Stage) -> bool {
        self.stages.get(&stage).is_some_and(|weeks| !weeks.is_empty())
    }

    /// Every (stage, week, value) entry
    pub fn iter(&self) -> impl Iterator<Item = (Stage, u32, &T)> + '_ {
        self.stages.iter().flat_map(|(stage, weeks)| {
            weeks.iter().map(move |(week, value)| (*stage, *week, value))
        })
    }
}

impl<T: Clone> WeeklySchedule<T> {
    /// Set the same value for every week in `weeks`
    pub fn fill(
        &mut self,
        stage: Stage,
        weeks: std::ops::RangeInclusive<u32>,
        value: T,
    ) -> &mut Self {
        for week in weeks {
            self.insert(stage, week, value.clone());
        }
        self
    }
}
