use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn parse(value: &str) -> Option<Weekday> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str() == value.trim())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlayerStats {
    pub tasks_completed: u64,
    pub total_damage: u64,
    pub streak: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub username: String,
    pub level: u32,
    pub xp_total: u32,
    pub xp_required: u32,
    pub stats: PlayerStats,
    #[serde(default)]
    pub last_completed: Option<NaiveDate>,
    pub enemy_hp: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub user_id: String,
    pub day: Weekday,
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub players: BTreeMap<String, PlayerState>,
    pub tasks: BTreeMap<u64, Task>,
    pub next_task_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct AddTaskRequest {
    pub user_id: String,
    pub day: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ProgressUpdate {
    pub damage: u32,
    pub leveled_up: bool,
    pub player: PlayerState,
}

#[derive(Debug, Serialize)]
pub struct ToggleTaskResponse {
    pub task: Task,
    pub progress: Option<ProgressUpdate>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DayTaskCount {
    pub day: Weekday,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct UserTaskStats {
    pub user_id: String,
    pub tasks_created: u64,
    pub tasks_completed: u64,
}

#[derive(Debug, Serialize)]
pub struct AdminSummary {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub completion_rate: f64,
    pub total_users: u64,
    pub tasks_by_day: Vec<DayTaskCount>,
    pub user_stats: Vec<UserTaskStats>,
}

#[derive(Debug, Serialize)]
pub struct AdminUser {
    pub user_id: String,
    pub username: String,
    pub level: u32,
}
