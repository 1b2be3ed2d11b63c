use skystrike::entities::PowerUpKind;
use skystrike::player::*;

fn make_player() -> Player {
    Player::new(800.0, 600.0)
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn starts_as_a_centered_aircraft() {
    let player = make_player();
    assert_eq!(player.mode, ShipMode::Aircraft);
    assert_eq!((player.width, player.height), (50.0, 40.0));
    assert_eq!(player.x, 375.0);
    assert_eq!(player.y, 600.0 - 40.0 - 20.0);
    assert_eq!(player.speed, 6.0);
    assert_eq!(player.lives, START_LIVES);
    assert_eq!(player.weapon_level, 1);
    assert!(!player.is_invincible);
    assert_eq!(player.effects.smart_bombs, 0);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn move_left_steps_by_speed() {
    let mut player = make_player();
    player.speed = 5.0;
    player.move_left();
    assert_eq!(player.x, 370.0);
    player.move_left();
    assert_eq!(player.x, 365.0);
}

#[test]
fn move_left_clamps_at_zero() {
    let mut player = make_player();
    player.speed = 5.0;
    player.x = 3.0;
    player.move_left();
    assert_eq!(player.x, 0.0);
    player.move_left();
    assert_eq!(player.x, 0.0);
}

#[test]
fn move_right_clamps_at_the_far_edge() {
    let mut player = make_player();
    player.x = 745.0;
    player.move_right(800.0);
    assert_eq!(player.x, 750.0); // 800 - width
    player.move_right(800.0);
    assert_eq!(player.x, 750.0);
}

#[test]
fn vertical_movement_clamps_at_both_bounds() {
    let mut player = make_player();
    player.y = 2.0;
    player.move_up();
    assert_eq!(player.y, 0.0);

    player.y = 556.0;
    player.move_down(600.0);
    assert_eq!(player.y, 560.0); // 600 - height
}

// ── Shooting ──────────────────────────────────────────────────────────────────

#[test]
fn fan_size_follows_weapon_level() {
    let mut player = make_player();
    for (level, expected) in [(1, 1), (2, 2), (3, 3), (4, 4)] {
        player.weapon_level = level;
        player.shoot_cooldown = 0;
        let fan = player.shoot();
        assert_eq!(fan.len(), expected, "level {level}");
        for shot in &fan {
            assert!(shot.is_player);
            assert_eq!(shot.speed_y, -12.0);
        }
    }
}

#[test]
fn level_one_shot_is_centered() {
    let mut player = make_player();
    let fan = player.shoot();
    assert_eq!(fan.len(), 1);
    assert_eq!(fan[0].x, 400.0 - 2.5);
    assert_eq!(fan[0].y, player.y);
    assert_eq!(fan[0].speed_x, 0.0);
}

#[test]
fn shooting_starts_the_mode_cooldown() {
    let mut player = make_player();
    player.shoot();
    assert_eq!(player.shoot_cooldown, 12);
    assert!(player.shoot().is_empty());
}

#[test]
fn cooldown_counts_down_one_per_tick() {
    let mut player = make_player();
    player.shoot();
    for _ in 0..12 {
        assert!(player.shoot().is_empty());
        player.update();
    }
    assert_eq!(player.shoot_cooldown, 0);
    assert_eq!(player.shoot().len(), 1);
}

#[test]
fn no_shooting_while_transforming() {
    let mut player = make_player();
    player.transform();
    assert!(player.shoot().is_empty());
}

// ── Transformation ────────────────────────────────────────────────────────────

#[test]
fn transformation_flips_mode_after_its_duration() {
    let mut player = make_player();
    player.transform();
    assert!(player.is_transforming);
    for _ in 0..TRANSFORM_DURATION - 1 {
        assert!(!player.update());
        assert!(player.is_transforming);
    }
    assert!(player.update()); // completion tick
    assert!(!player.is_transforming);
    assert_eq!(player.mode, ShipMode::Tank);
    assert_eq!((player.width, player.height), (60.0, 50.0));
    assert_eq!(player.speed, 3.0);
}

#[test]
fn tank_mode_uses_its_own_cooldown_and_shot_speed() {
    let mut player = make_player();
    player.transform();
    for _ in 0..TRANSFORM_DURATION {
        player.update();
    }
    let fan = player.shoot();
    assert_eq!(player.shoot_cooldown, 8);
    assert_eq!(fan[0].speed_y, -8.0);
}

#[test]
fn transform_is_a_no_op_while_already_transforming() {
    let mut player = make_player();
    player.transform();
    for _ in 0..10 {
        player.update();
    }
    assert_eq!(player.transform_timer, 10);
    player.transform(); // must not restart the timer
    assert_eq!(player.transform_timer, 10);
}

#[test]
fn transforming_back_returns_to_aircraft() {
    let mut player = make_player();
    for _ in 0..2 {
        player.transform();
        for _ in 0..TRANSFORM_DURATION {
            player.update();
        }
    }
    assert_eq!(player.mode, ShipMode::Aircraft);
    assert_eq!((player.width, player.height), (50.0, 40.0));
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn damage_costs_a_life_and_opens_the_invincibility_window() {
    let mut player = make_player();
    assert!(player.take_damage());
    assert_eq!(player.lives, 2);
    assert!(player.is_invincible);
}

#[test]
fn damage_is_ignored_while_invincible() {
    let mut player = make_player();
    player.take_damage();
    assert!(!player.take_damage());
    assert_eq!(player.lives, 2);
}

#[test]
fn damage_is_ignored_while_shielded() {
    let mut player = make_player();
    player.apply_power_up(PowerUpKind::Shield);
    assert!(!player.take_damage());
    assert_eq!(player.lives, 3);
    assert!(!player.is_invincible);
}

#[test]
fn invincibility_expires_after_its_window() {
    let mut player = make_player();
    player.take_damage();
    for _ in 0..INVINCIBLE_DURATION {
        player.update();
    }
    assert!(!player.is_invincible);
    assert!(player.take_damage());
    assert_eq!(player.lives, 1);
}

#[test]
fn lives_never_go_negative() {
    let mut player = make_player();
    player.lives = 1;
    player.take_damage();
    assert_eq!(player.lives, 0);
    player.is_invincible = false;
    player.take_damage();
    assert_eq!(player.lives, 0);
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[test]
fn extra_life_clamps_at_the_maximum() {
    let mut player = make_player();
    player.apply_power_up(PowerUpKind::ExtraLife);
    assert_eq!(player.lives, 4);
    player.lives = MAX_LIVES;
    player.apply_power_up(PowerUpKind::ExtraLife);
    assert_eq!(player.lives, MAX_LIVES);
}

#[test]
fn weapon_level_clamps_at_the_maximum() {
    let mut player = make_player();
    player.apply_power_up(PowerUpKind::Weapon);
    assert_eq!(player.weapon_level, 2);
    player.weapon_level = MAX_WEAPON_LEVEL;
    player.apply_power_up(PowerUpKind::Weapon);
    assert_eq!(player.weapon_level, MAX_WEAPON_LEVEL);
}

#[test]
fn speed_boost_scales_and_restores_base_speed() {
    let mut player = make_player();
    player.apply_power_up(PowerUpKind::Speed);
    assert_eq!(player.speed, 6.0 * SPEED_BOOST_FACTOR);
    assert!(player.effects.speed_boost);
    for _ in 0..SPEED_BOOST_DURATION {
        player.update();
    }
    assert!(!player.effects.speed_boost);
    assert_eq!(player.speed, 6.0);
}

#[test]
fn shield_runs_out_after_its_duration() {
    let mut player = make_player();
    player.apply_power_up(PowerUpKind::Shield);
    assert!(player.effects.shield);
    for _ in 0..SHIELD_DURATION {
        player.update();
    }
    assert!(!player.effects.shield);
    assert!(player.take_damage());
}

#[test]
fn smart_bombs_accumulate_and_deplete() {
    let mut player = make_player();
    assert!(!player.use_smart_bomb());
    player.apply_power_up(PowerUpKind::SmartBomb);
    player.apply_power_up(PowerUpKind::SmartBomb);
    assert_eq!(player.effects.smart_bombs, 2);
    assert!(player.use_smart_bomb());
    assert_eq!(player.effects.smart_bombs, 1);
}

#[test]
fn slow_motion_does_not_touch_player_state() {
    let mut player = make_player();
    player.apply_power_up(PowerUpKind::SlowMotion);
    assert_eq!(player.speed, 6.0);
    assert_eq!(player.lives, 3);
    assert!(!player.effects.shield);
    assert!(!player.effects.speed_boost);
}

// ── Reset ─────────────────────────────────────────────────────────────────────

#[test]
fn reset_restores_construction_state() {
    let mut player = make_player();
    player.take_damage();
    player.apply_power_up(PowerUpKind::SmartBomb);
    player.weapon_level = 4;
    player.transform();
    player.x = 10.0;

    player.reset(800.0, 600.0);
    assert_eq!(player.mode, ShipMode::Aircraft);
    assert_eq!(player.lives, START_LIVES);
    assert_eq!(player.weapon_level, 1);
    assert_eq!(player.x, 375.0);
    assert!(!player.is_transforming);
    assert!(!player.is_invincible);
    assert_eq!(player.effects.smart_bombs, 0);
}
