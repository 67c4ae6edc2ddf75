use crate::models::{AdminSummary, AppData, DayTaskCount, UserTaskStats, Weekday};
use std::collections::BTreeMap;

pub fn build_summary(data: &AppData) -> AdminSummary {
    let total_tasks = data.tasks.len() as u64;
    let completed_tasks = data.tasks.values().filter(|task| task.done).count() as u64;
    let completion_rate = if total_tasks == 0 {
        0.0
    } else {
        completed_tasks as f64 / total_tasks as f64
    };

    let mut day_counts: BTreeMap<Weekday, u64> = BTreeMap::new();
    let mut per_user: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for task in data.tasks.values() {
        *day_counts.entry(task.day).or_default() += 1;
        let entry = per_user.entry(task.user_id.as_str()).or_default();
        entry.0 += 1;
        if task.done {
            entry.1 += 1;
        }
    }

    // Registered players with no tasks yet still get a row.
    for user_id in data.players.keys() {
        per_user.entry(user_id.as_str()).or_default();
    }

    let tasks_by_day = Weekday::ALL
        .into_iter()
        .map(|day| DayTaskCount {
            day,
            count: day_counts.get(&day).copied().unwrap_or(0),
        })
        .collect();

    let user_stats = per_user
        .into_iter()
        .map(|(user_id, (created, completed))| UserTaskStats {
            user_id: user_id.to_string(),
            tasks_created: created,
            tasks_completed: completed,
        })
        .collect();

    AdminSummary {
        total_tasks,
        completed_tasks,
        completion_rate,
        total_users: data.players.len() as u64,
        tasks_by_day,
        user_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::initialize_player;
    use crate::models::Task;

    fn task(id: u64, user_id: &str, day: Weekday, done: bool) -> Task {
        Task {
            id,
            user_id: user_id.to_string(),
            day,
            text: format!("task {id}"),
            done,
        }
    }

    #[test]
    fn empty_data_yields_zeroes_and_all_seven_days() {
        let summary = build_summary(&AppData::default());

        assert_eq!(summary.total_tasks, 0);
        assert_eq!(summary.completed_tasks, 0);
        assert_eq!(summary.completion_rate, 0.0);
        assert_eq!(summary.total_users, 0);
        assert_eq!(summary.tasks_by_day.len(), 7);
        assert!(summary.tasks_by_day.iter().all(|point| point.count == 0));
        assert!(summary.user_stats.is_empty());
    }

    #[test]
    fn per_day_counts_cover_every_weekday_in_order() {
        let mut data = AppData::default();
        data.tasks.insert(1, task(1, "ana", Weekday::Monday, true));
        data.tasks.insert(2, task(2, "ana", Weekday::Monday, false));
        data.tasks.insert(3, task(3, "bob", Weekday::Sunday, false));

        let summary = build_summary(&data);

        assert_eq!(summary.tasks_by_day.len(), 7);
        assert_eq!(summary.tasks_by_day[0].day, Weekday::Monday);
        assert_eq!(summary.tasks_by_day[0].count, 2);
        assert_eq!(summary.tasks_by_day[6].day, Weekday::Sunday);
        assert_eq!(summary.tasks_by_day[6].count, 1);
        assert_eq!(summary.tasks_by_day[3].count, 0);
    }

    #[test]
    fn completion_rate_tracks_done_tasks() {
        let mut data = AppData::default();
        data.tasks.insert(1, task(1, "ana", Weekday::Monday, true));
        data.tasks.insert(2, task(2, "ana", Weekday::Tuesday, false));
        data.tasks.insert(3, task(3, "ana", Weekday::Friday, true));
        data.tasks.insert(4, task(4, "bob", Weekday::Friday, false));

        let summary = build_summary(&data);

        assert_eq!(summary.total_tasks, 4);
        assert_eq!(summary.completed_tasks, 2);
        assert!((summary.completion_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn user_rows_are_sorted_and_include_idle_players() {
        let mut data = AppData::default();
        data.players
            .insert("zoe".to_string(), initialize_player("Zoe"));
        data.tasks.insert(1, task(1, "bob", Weekday::Monday, true));
        data.tasks.insert(2, task(2, "ana", Weekday::Monday, false));

        let summary = build_summary(&data);

        assert_eq!(summary.total_users, 1);
        let ids: Vec<&str> = summary
            .user_stats
            .iter()
            .map(|row| row.user_id.as_str())
            .collect();
        assert_eq!(ids, vec!["ana", "bob", "zoe"]);

        let zoe = &summary.user_stats[2];
        assert_eq!(zoe.tasks_created, 0);
        assert_eq!(zoe.tasks_completed, 0);

        let bob = &summary.user_stats[1];
        assert_eq!(bob.tasks_created, 1);
        assert_eq!(bob.tasks_completed, 1);
    }
}
