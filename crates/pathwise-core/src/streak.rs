use crate::error::{PathwiseError, Result};
use crate::store::KvStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const STREAK_COUNT_KEY: &str = "streak.count";
const STREAK_LONGEST_KEY: &str = "streak.longest";
const STREAK_LAST_KEY: &str = "streak.last_active";
const GOALS_KEY: &str = "goals";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| PathwiseError::InvalidDate(s.to_string()))
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// StreakTracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStatus {
    /// Consecutive active days ending today or yesterday; 0 once broken.
    pub current: u32,
    pub longest: u32,
    pub last_active: Option<NaiveDate>,
    pub active_today: bool,
}

/// Consecutive-day learning streak kept in a local store.
pub struct StreakTracker<S> {
    store: S,
}

impl<S: KvStore> StreakTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn read_u32(&self, key: &str) -> Result<u32> {
        Ok(self
            .store
            .get(key)?
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0))
    }

    fn last_active(&self) -> Result<Option<NaiveDate>> {
        match self.store.get(STREAK_LAST_KEY)? {
            Some(v) => Ok(parse_date(&v).ok()),
            None => Ok(None),
        }
    }

    /// Record activity on `today`.
    pub fn check_in(&mut self, today: NaiveDate) -> Result<StreakStatus> {
        let stored = self.read_u32(STREAK_COUNT_KEY)?;
        let count = match self.last_active()? {
            Some(last) if last == today => stored.max(1),
            Some(last) if last.succ_opt() == Some(today) => stored.saturating_add(1),
            // A last-active date in the future means the clock moved back;
            // restart rather than trust it.
            _ => 1,
        };
        let longest = self.read_u32(STREAK_LONGEST_KEY)?.max(count);

        self.store.set(STREAK_COUNT_KEY, &count.to_string())?;
        self.store.set(STREAK_LONGEST_KEY, &longest.to_string())?;
        self.store.set(STREAK_LAST_KEY, &format_date(today))?;
        tracing::debug!(count, longest, %today, "streak check-in");

        Ok(StreakStatus {
            current: count,
            longest,
            last_active: Some(today),
            active_today: true,
        })
    }

    pub fn status(&self, today: NaiveDate) -> Result<StreakStatus> {
        let last = self.last_active()?;
        let stored = self.read_u32(STREAK_COUNT_KEY)?;
        let current = match last {
            Some(l) if l == today || l.succ_opt() == Some(today) => stored,
            _ => 0,
        };
        Ok(StreakStatus {
            current,
            longest: self.read_u32(STREAK_LONGEST_KEY)?,
            last_active: last,
            active_today: last == Some(today),
        })
    }

    /// Forget the streak. Goals are kept.
    pub fn reset(&mut self) -> Result<()> {
        self.store.remove(STREAK_COUNT_KEY)?;
        self.store.remove(STREAK_LONGEST_KEY)?;
        self.store.remove(STREAK_LAST_KEY)
    }
}

// ---------------------------------------------------------------------------
// GoalTracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    /// Streak length, in days, that meets the goal.
    pub target_days: u32,
    pub created_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<NaiveDate>,
}

impl Goal {
    pub fn is_completed(&self) -> bool {
        self.completed_on.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal: Goal,
    pub days_achieved: u32,
    pub met: bool,
}

pub struct GoalTracker<S> {
    store: S,
}

impl<S: KvStore> GoalTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn list(&self) -> Result<Vec<Goal>> {
        match self.store.get(GOALS_KEY)? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, goals: &[Goal]) -> Result<()> {
        let data = serde_json::to_string(goals)?;
        self.store.set(GOALS_KEY, &data)
    }

    pub fn add(&mut self, title: &str, target_days: u32, today: NaiveDate) -> Result<Goal> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PathwiseError::InvalidGoal("title must not be empty".to_string()));
        }
        if target_days == 0 {
            return Err(PathwiseError::InvalidGoal(
                "target must be at least one day".to_string(),
            ));
        }
        let goal = Goal {
            id: uuid::Uuid::new_v4().simple().to_string()[..8].to_string(),
            title: title.to_string(),
            target_days,
            created_on: today,
            completed_on: None,
        };
        let mut goals = self.list()?;
        goals.push(goal.clone());
        self.save(&goals)?;
        Ok(goal)
    }

    pub fn get(&self, id: &str) -> Result<Goal> {
        self.list()?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or_else(|| PathwiseError::GoalNotFound(id.to_string()))
    }

    /// Mark a goal done. Completing twice keeps the first date.
    pub fn complete(&mut self, id: &str, today: NaiveDate) -> Result<Goal> {
        let mut goals = self.list()?;
        let goal = goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| PathwiseError::GoalNotFound(id.to_string()))?;
        if goal.completed_on.is_none() {
            goal.completed_on = Some(today);
        }
        let done = goal.clone();
        self.save(&goals)?;
        Ok(done)
    }

    pub fn remove(&mut self, id: &str) -> Result<()> {
        let mut goals = self.list()?;
        let before = goals.len();
        goals.retain(|g| g.id != id);
        if goals.len() == before {
            return Err(PathwiseError::GoalNotFound(id.to_string()));
        }
        self.save(&goals)
    }

    /// How far the current streak carries a goal.
    pub fn progress(&self, id: &str, streak: &StreakStatus) -> Result<GoalProgress> {
        let goal = self.get(id)?;
        Ok(progress_of(goal, streak))
    }

    pub fn progress_all(&self, streak: &StreakStatus) -> Result<Vec<GoalProgress>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|g| progress_of(g, streak))
            .collect())
    }
}

fn progress_of(goal: Goal, streak: &StreakStatus) -> GoalProgress {
    let days_achieved = if goal.is_completed() {
        goal.target_days
    } else {
        streak.current.min(goal.target_days)
    };
    GoalProgress {
        met: days_achieved >= goal.target_days,
        days_achieved,
        goal,
    }
}
