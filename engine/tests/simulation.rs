use frontier_defence_core::{
    AbilityError, Biome, Event, LoadoutError, MapConfig, MapLayout, MapProvider, PlacementError,
    StartError, TargetingMode, TileKind, TileMap, TowerKind, Vec2, CELL_SIZE,
};
use frontier_defence_engine::{
    BaseDestroyedPolicy, ConfigError, EngineConfig, RunState, Simulation,
};
use frontier_defence_world::query;

const LOADOUT: [TowerKind; 5] = [
    TowerKind::Scout,
    TowerKind::Sniper,
    TowerKind::Farm,
    TowerKind::Medic,
    TowerKind::Commander,
];

const MAP: MapConfig = MapConfig {
    scale: 1,
    biome: Biome::Grassland,
};

/// Straight ten-tile path along row 1; fails the first `failures` requests.
#[derive(Debug, Default)]
struct StraightMaps {
    failures: u32,
}

impl MapProvider for StraightMaps {
    fn generate(&mut self, _config: &MapConfig) -> MapLayout {
        if self.failures > 0 {
            self.failures -= 1;
            return MapLayout::default();
        }
        let mut tiles = TileMap::filled(10, 4, TileKind::Grass);
        for column in 0..10 {
            tiles.set(column, 1, TileKind::Path);
        }
        tiles.set(9, 3, TileKind::Cliff);
        MapLayout {
            tiles,
            path: vec![Vec2::new(0.0, 60.0), Vec2::new(10.0 * CELL_SIZE, 60.0)],
        }
    }
}

fn simulation(config: EngineConfig) -> Simulation<StraightMaps> {
    let mut simulation = Simulation::new(config, StraightMaps::default()).expect("valid config");
    simulation
        .configure_loadout(&LOADOUT, MAP)
        .expect("loadout accepted");
    simulation
}

/// Runs `frames` ticks and returns every event produced along the way.
fn run(simulation: &mut Simulation<StraightMaps>, frames: u32) -> Vec<Event> {
    let mut log = Vec::new();
    for _ in 0..frames {
        simulation.tick();
        log.extend_from_slice(simulation.events());
    }
    log
}

fn count(events: &[Event], predicate: impl Fn(&Event) -> bool) -> usize {
    events.iter().filter(|event| predicate(event)).count()
}

#[test]
fn configure_installs_a_map_and_start_requires_it() {
    let mut bare =
        Simulation::new(EngineConfig::default(), StraightMaps::default()).expect("valid config");
    assert_eq!(bare.start_game(), Err(StartError::NoLoadout));
    assert_eq!(
        bare.configure_loadout(&LOADOUT[..4], MAP),
        Err(LoadoutError::WrongSize {
            expected: 5,
            actual: 4
        })
    );

    let mut simulation = simulation(EngineConfig::default());
    assert!(query::has_map(simulation.world()));
    assert_eq!(simulation.start_game(), Ok(()));
    assert_eq!(simulation.start_game(), Ok(()));
    assert!(query::is_started(simulation.world()));
}

#[test]
fn zero_valued_settings_are_rejected_at_construction() {
    let zero_interval = EngineConfig {
        snapshot_interval: 0,
        ..EngineConfig::default()
    };
    assert!(matches!(
        Simulation::new(zero_interval, StraightMaps::default()),
        Err(ConfigError::Invalid(_))
    ));

    let zero_attempts = EngineConfig {
        max_map_attempts: 0,
        ..EngineConfig::default()
    };
    assert!(Simulation::new(zero_attempts, StraightMaps::default()).is_err());
}

#[test]
fn rejected_placements_leave_money_unchanged() {
    let mut simulation = simulation(EngineConfig::default());
    assert_eq!(
        simulation.place_tower(TowerKind::Scout, Vec2::new(100.0, 60.0)),
        Err(PlacementError::InvalidTile)
    );
    assert_eq!(
        simulation.place_tower(TowerKind::Sniper, Vec2::new(100.0, 100.0)),
        Err(PlacementError::InvalidTile)
    );
    assert_eq!(query::money(simulation.world()), 800);

    let first = simulation.place_tower(TowerKind::Scout, Vec2::new(20.0, 20.0));
    let second = simulation.place_tower(TowerKind::Scout, Vec2::new(300.0, 20.0));
    assert!(first.is_ok() && second.is_ok());
    assert_eq!(query::money(simulation.world()), 0);
    assert_eq!(
        simulation.place_tower(TowerKind::Scout, Vec2::new(300.0, 140.0)),
        Err(PlacementError::InsufficientFunds)
    );
    assert_eq!(query::money(simulation.world()), 0);
}

#[test]
fn upgrade_and_sell_settle_the_treasury() {
    let mut simulation = simulation(EngineConfig::default());
    let scout = simulation
        .place_tower(TowerKind::Scout, Vec2::new(60.0, 100.0))
        .expect("placed");
    assert_eq!(simulation.upgrade_tower(scout), Ok(1));
    assert_eq!(query::money(simulation.world()), 250);

    assert_eq!(simulation.sell_tower(scout), Ok(385));
    assert_eq!(query::money(simulation.world()), 635);
    assert!(simulation.sell_tower(scout).is_err());
    assert!(simulation
        .set_targeting_mode(scout, TargetingMode::Strongest)
        .is_err());
}

#[test]
fn ability_activation_respects_cooldown() {
    let mut simulation = simulation(EngineConfig::default());
    simulation.grant_money(1_500);
    let commander = simulation
        .place_tower(TowerKind::Commander, Vec2::new(60.0, 100.0))
        .expect("placed");
    assert_eq!(simulation.activate_ability(commander), Ok(()));
    assert!(matches!(
        simulation.activate_ability(commander),
        Err(AbilityError::OnCooldown { .. })
    ));

    let scout = simulation
        .place_tower(TowerKind::Scout, Vec2::new(140.0, 100.0))
        .expect("placed");
    assert_eq!(
        simulation.activate_ability(scout),
        Err(AbilityError::NoAbility)
    );
}

#[test]
fn snapshots_publish_on_the_configured_cadence() {
    let mut simulation = simulation(EngineConfig::default());
    let _ = run(&mut simulation, 7);
    assert_eq!(simulation.latest_snapshot().frame, 5);
    let _ = run(&mut simulation, 3);
    assert_eq!(simulation.latest_snapshot().frame, 10);
    assert_eq!(simulation.snapshot_now().frame, 10);
}

#[test]
fn unusable_maps_are_requested_again() {
    let config = EngineConfig {
        max_map_attempts: 2,
        ..EngineConfig::default()
    };
    let mut simulation =
        Simulation::new(config, StraightMaps { failures: 3 }).expect("valid config");
    simulation
        .configure_loadout(&LOADOUT, MAP)
        .expect("loadout accepted");
    assert!(!query::has_map(simulation.world()));

    let _ = run(&mut simulation, 1);
    assert!(query::has_map(simulation.world()));
}

#[test]
fn defended_wave_completes_and_pays_out() {
    let mut simulation = simulation(EngineConfig::default());
    let scout = simulation
        .place_tower(TowerKind::Scout, Vec2::new(60.0, 100.0))
        .expect("placed");
    simulation.start_game().expect("started");

    let events = run(&mut simulation, 1200);
    assert_eq!(
        count(&events, |event| matches!(event, Event::WaveStarted { wave: 1 })),
        1
    );
    assert!(count(&events, |event| matches!(event, Event::EnemySpawned { .. })) >= 7);
    assert!(count(&events, |event| matches!(event, Event::EnemyKilled { .. })) > 0);
    assert_eq!(
        count(&events, |event| matches!(event, Event::WaveCompleted { wave: 1, .. })),
        1
    );
    assert_eq!(query::wave(simulation.world()), 2);

    let tower = query::tower(simulation.world(), scout).expect("scout");
    assert!(tower.damage_dealt > 0.0);
    assert!(tower.cash_generated > 0);
}

#[test]
fn skipping_a_wave_clears_enemies_and_queue() {
    let mut simulation = simulation(EngineConfig::default());
    simulation.start_game().expect("started");
    let _ = run(&mut simulation, 300 + 60);
    assert_eq!(query::enemy_count(simulation.world()), 1);

    simulation.skip_wave();
    assert_eq!(query::enemy_count(simulation.world()), 0);
    assert_eq!(query::wave(simulation.world()), 2);
    let snapshot = simulation.snapshot_now();
    assert_eq!(snapshot.enemies_remaining, 0);
    assert!(!snapshot.wave_in_progress);

    let events = run(&mut simulation, 60);
    assert_eq!(
        count(&events, |event| matches!(event, Event::WaveStarted { wave: 2 })),
        1
    );
}

#[test]
fn destroyed_base_restarts_the_match() {
    let config = EngineConfig {
        base_health: 5,
        ..EngineConfig::default()
    };
    let mut simulation = simulation(config);
    simulation.start_game().expect("started");

    let events = run(&mut simulation, 1000);
    assert!(count(&events, |event| matches!(event, Event::BaseDestroyed { .. })) >= 1);
    assert!(count(&events, |event| matches!(event, Event::WorldReset)) >= 1);

    let world = simulation.world();
    assert_eq!(query::base_health(world), 5);
    assert_eq!(query::money(world), 800);
    assert_eq!(query::wave(world), 1);
    assert!(!query::is_started(world));
    assert!(query::has_map(world));
    assert_eq!(query::loadout(world), LOADOUT.as_slice());
}

#[test]
fn halt_policy_freezes_until_restart() {
    let config = EngineConfig {
        base_health: 5,
        on_base_destroyed: BaseDestroyedPolicy::Halt,
        ..EngineConfig::default()
    };
    let mut simulation = simulation(config);
    simulation.start_game().expect("started");

    let _ = run(&mut simulation, 1000);
    assert_eq!(simulation.run_state(), RunState::Halted);
    let frame = query::frame(simulation.world());
    let _ = run(&mut simulation, 10);
    assert_eq!(query::frame(simulation.world()), frame);
    assert!(query::base_health(simulation.world()) <= 0);

    simulation.restart();
    assert_eq!(simulation.run_state(), RunState::Running);
    assert_eq!(query::base_health(simulation.world()), 5);
    let _ = run(&mut simulation, 1);
    assert_eq!(query::frame(simulation.world()), frame + 1);
}

#[test]
fn god_mode_keeps_the_base_intact() {
    let mut simulation = simulation(EngineConfig::default());
    assert!(simulation.toggle_god_mode());
    simulation.start_game().expect("started");

    let events = run(&mut simulation, 1000);
    assert!(count(&events, |event| matches!(event, Event::BaseBreached { damage: 0, .. })) > 0);
    assert_eq!(query::base_health(simulation.world()), 150);
}

#[test]
fn stunned_towers_hold_fire() {
    let mut simulation = simulation(EngineConfig::default());
    let scout = simulation
        .place_tower(TowerKind::Scout, Vec2::new(60.0, 100.0))
        .expect("placed");
    assert_eq!(simulation.stun_tower(scout, 2_000), Ok(2_000));
    simulation.start_game().expect("started");

    let events = run(&mut simulation, 800);
    assert_eq!(
        count(&events, |event| matches!(event, Event::ProjectileFired { .. })),
        0
    );
}

#[test]
fn default_maps_replay_for_identical_seeds() {
    let drive = |seed: u64| {
        let mut simulation = Simulation::with_default_maps(EngineConfig {
            seed,
            ..EngineConfig::default()
        })
        .expect("valid config");
        simulation
            .configure_loadout(&LOADOUT, MapConfig::default())
            .expect("loadout accepted");
        simulation.start_game().expect("started");
        for _ in 0..600 {
            simulation.tick();
        }
        (
            query::path_waypoints(simulation.world()).to_vec(),
            simulation.snapshot_now(),
        )
    };

    let (first_path, first) = drive(11);
    let (second_path, second) = drive(11);
    assert_eq!(first_path, second_path);
    assert_eq!(first, second);

    let (other_path, _) = drive(12);
    assert_ne!(first_path, other_path);
}
