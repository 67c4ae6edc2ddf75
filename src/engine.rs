//! Progression rules: damage, experience, leveling, enemy encounters and
//! the consecutive-day streak. Pure functions over [`PlayerState`]; callers
//! persist the returned snapshot.

use crate::models::{PlayerState, PlayerStats};
use chrono::NaiveDate;

pub const BASE_ENEMY_HP: u32 = 20;
pub const ENEMY_HP_PER_LEVEL: u32 = 5;
pub const BASE_XP_REQUIRED: u32 = 20;
pub const XP_REQUIRED_PER_LEVEL: u32 = 5;
pub const XP_PER_DEFEAT: u32 = 20;
pub const DAMAGE_PER_LEVEL: u32 = 2;

#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub player: PlayerState,
    pub damage: u32,
    pub leveled_up: bool,
}

pub const fn max_enemy_hp(level: u32) -> u32 {
    BASE_ENEMY_HP.saturating_add(level.saturating_sub(1).saturating_mul(ENEMY_HP_PER_LEVEL))
}

pub const fn damage_per_task(level: u32) -> u32 {
    level.saturating_mul(DAMAGE_PER_LEVEL)
}

pub const fn xp_required_for(level: u32) -> u32 {
    BASE_XP_REQUIRED.saturating_add(level.saturating_sub(1).saturating_mul(XP_REQUIRED_PER_LEVEL))
}

pub fn initialize_player(username: &str) -> PlayerState {
    PlayerState {
        username: username.to_string(),
        level: 1,
        xp_total: 0,
        xp_required: xp_required_for(1),
        stats: PlayerStats::default(),
        last_completed: None,
        enemy_hp: max_enemy_hp(1),
    }
}

pub fn complete_task(state: &PlayerState, today: NaiveDate) -> CompletionOutcome {
    let damage = damage_per_task(state.level);
    let streak = next_streak(state.stats.streak, state.last_completed, today);

    let mut player = state.clone();
    // A stale snapshot can carry more HP than the level allows.
    player.enemy_hp = player.enemy_hp.min(max_enemy_hp(player.level));

    let mut leveled_up = false;
    if damage >= player.enemy_hp {
        player.xp_total = player.xp_total.saturating_add(XP_PER_DEFEAT);
        if player.xp_total >= player.xp_required {
            player.level = player.level.saturating_add(1);
            player.xp_total -= player.xp_required;
            player.xp_required = xp_required_for(player.level);
            leveled_up = true;
        }
        player.enemy_hp = max_enemy_hp(player.level);
    } else {
        player.enemy_hp -= damage;
    }

    player.stats.tasks_completed = player.stats.tasks_completed.saturating_add(1);
    player.stats.total_damage = player.stats.total_damage.saturating_add(u64::from(damage));
    player.stats.streak = streak;
    player.last_completed = Some(today);

    CompletionOutcome {
        player,
        damage,
        leveled_up,
    }
}

fn next_streak(current: u32, last_completed: Option<NaiveDate>, today: NaiveDate) -> u32 {
    match last_completed {
        None => 1,
        Some(last) => match (today - last).num_days() {
            d if d <= 0 => current,
            1 => current.saturating_add(1),
            _ => 1,
        },
    }
}
