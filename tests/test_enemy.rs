use skystrike::enemy::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Type table ────────────────────────────────────────────────────────────────

#[test]
fn type_table_sizes_health_and_scores() {
    let mut rng = seeded_rng();
    let basic = Enemy::new(400.0, 0.0, EnemyKind::Basic, &mut rng);
    assert_eq!((basic.width, basic.height), (50.0, 40.0));
    assert_eq!(basic.health, 1);
    assert_eq!(basic.kind.score(), 100);

    let fast = Enemy::new(400.0, 0.0, EnemyKind::Fast, &mut rng);
    assert_eq!((fast.width, fast.height), (30.0, 30.0));
    assert_eq!(fast.health, 1);
    assert_eq!(fast.kind.score(), 200);

    let tank = Enemy::new(400.0, 0.0, EnemyKind::Tank, &mut rng);
    assert_eq!((tank.width, tank.height), (70.0, 60.0));
    assert_eq!(tank.health, 5);
    assert_eq!(tank.max_health, 5);
    assert_eq!(tank.kind.score(), 1000);

    let shooter = Enemy::new(400.0, 0.0, EnemyKind::Shooter, &mut rng);
    assert_eq!((shooter.width, shooter.height), (40.0, 40.0));
    assert_eq!(shooter.health, 2);
    assert_eq!(shooter.kind.score(), 500);
}

#[test]
fn spawn_is_centered_on_the_given_x() {
    let mut rng = seeded_rng();
    let enemy = Enemy::new(400.0, -50.0, EnemyKind::Basic, &mut rng);
    assert_eq!(enemy.x, 375.0);
    assert_eq!(enemy.y, -50.0);

    let fast = Enemy::new(400.0, -50.0, EnemyKind::Fast, &mut rng);
    assert_eq!(fast.x, 385.0);
}

#[test]
fn fall_speed_is_randomized_within_the_type_range() {
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let basic = Enemy::new(400.0, 0.0, EnemyKind::Basic, &mut rng);
        assert!(basic.speed_y >= 1.0 && basic.speed_y <= 2.5);
        let fast = Enemy::new(400.0, 0.0, EnemyKind::Fast, &mut rng);
        assert!(fast.speed_y >= 3.0 && fast.speed_y <= 5.0);
        let tank = Enemy::new(400.0, 0.0, EnemyKind::Tank, &mut rng);
        assert!(tank.speed_y >= 0.5 && tank.speed_y <= 1.0);
        let shooter = Enemy::new(400.0, 0.0, EnemyKind::Shooter, &mut rng);
        assert!(shooter.speed_y >= 1.0 && shooter.speed_y <= 2.0);
    }
}

#[test]
fn only_basic_enemies_get_horizontal_drift() {
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let basic = Enemy::new(400.0, 0.0, EnemyKind::Basic, &mut rng);
        assert!(basic.speed_x >= -2.0 && basic.speed_x <= 2.0);
        for kind in [EnemyKind::Fast, EnemyKind::Tank, EnemyKind::Shooter] {
            assert_eq!(Enemy::new(400.0, 0.0, kind, &mut rng).speed_x, 0.0);
        }
    }
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn take_damage_subtracts_the_exact_amount() {
    let mut rng = seeded_rng();
    let mut tank = Enemy::new(400.0, 0.0, EnemyKind::Tank, &mut rng);
    assert!(!tank.take_damage(2));
    assert_eq!(tank.health, 3);
    assert!(!tank.marked_for_deletion);
}

#[test]
fn lethal_hit_is_reported_exactly_once() {
    let mut rng = seeded_rng();
    let mut tank = Enemy::new(400.0, 0.0, EnemyKind::Tank, &mut rng);
    assert!(!tank.take_damage(2));
    assert!(tank.take_damage(3)); // fifth point of damage kills
    assert!(tank.marked_for_deletion);
    // Hitting a dead instance must never report lethal again
    assert!(!tank.take_damage(1));
    assert!(!tank.take_damage(100));
}

#[test]
fn overkill_is_still_a_single_lethal_hit() {
    let mut rng = seeded_rng();
    let mut basic = Enemy::new(400.0, 0.0, EnemyKind::Basic, &mut rng);
    assert!(basic.take_damage(5));
    assert!(basic.marked_for_deletion);
    assert!(!basic.take_damage(1));
}

// ── Motion ────────────────────────────────────────────────────────────────────

#[test]
fn enemy_descends_by_its_fall_speed() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(400.0, 100.0, EnemyKind::Fast, &mut rng);
    let before = enemy.y;
    let speed = enemy.speed_y;
    enemy.update(800.0, 600.0, 1.0);
    assert!((enemy.y - (before + speed)).abs() < 1e-9);
}

#[test]
fn slow_motion_halves_the_descent() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(400.0, 100.0, EnemyKind::Fast, &mut rng);
    enemy.speed_y = 2.0;
    enemy.update(800.0, 600.0, 0.5);
    assert!((enemy.y - 101.0).abs() < 1e-9);
}

#[test]
fn marked_when_below_the_playfield() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(400.0, 601.0, EnemyKind::Basic, &mut rng);
    enemy.update(800.0, 600.0, 1.0);
    assert!(enemy.marked_for_deletion);
}

#[test]
fn marked_when_fully_outside_either_side() {
    let mut rng = seeded_rng();

    let mut left = Enemy::new(400.0, 100.0, EnemyKind::Tank, &mut rng);
    left.x = -left.width - 5.0;
    left.speed_x = 0.0;
    left.update(800.0, 600.0, 0.0); // freeze motion, only the bounds check runs
    assert!(left.marked_for_deletion);

    let mut right = Enemy::new(400.0, 100.0, EnemyKind::Tank, &mut rng);
    right.x = 805.0;
    right.update(800.0, 600.0, 0.0);
    assert!(right.marked_for_deletion);
}

#[test]
fn partially_offscreen_enemy_survives() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(400.0, 100.0, EnemyKind::Tank, &mut rng);
    enemy.x = -enemy.width / 2.0;
    enemy.update(800.0, 600.0, 0.0);
    assert!(!enemy.marked_for_deletion);
}

// ── Shooter cooldown ──────────────────────────────────────────────────────────

#[test]
fn shooter_fires_exactly_once_per_interval() {
    let mut rng = seeded_rng();
    let mut shooter = Enemy::new(400.0, 100.0, EnemyKind::Shooter, &mut rng);
    let mut shots = 0;
    for _ in 0..SHOOT_INTERVAL {
        if shooter.update(10_000.0, 10_000.0, 1.0).is_some() {
            shots += 1;
        }
    }
    assert_eq!(shots, 1);
}

#[test]
fn shooter_volley_moves_down_and_is_enemy_owned() {
    let mut rng = seeded_rng();
    let mut shooter = Enemy::new(400.0, 100.0, EnemyKind::Shooter, &mut rng);
    let shot = loop {
        if let Some(shot) = shooter.update(10_000.0, 10_000.0, 1.0) {
            break shot;
        }
    };
    assert!(!shot.is_player);
    assert_eq!(shot.speed_x, 0.0);
    assert_eq!(shot.speed_y, 5.0);
    assert!(shot.y > 100.0);
}

#[test]
fn non_shooters_never_fire() {
    let mut rng = seeded_rng();
    for kind in [EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Tank] {
        let mut enemy = Enemy::new(400.0, 0.0, kind, &mut rng);
        for _ in 0..300 {
            assert!(enemy.update(10_000.0, 10_000.0, 1.0).is_none());
        }
    }
}
