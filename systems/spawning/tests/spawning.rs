use frontier_defence_core::{
    Biome, Command, EnemyKind, Event, MapConfig, MapLayout, TileKind, TileMap, TowerKind, Vec2,
    CELL_SIZE,
};
use frontier_defence_system_spawning::{Config, Spawning, WavePhase};
use frontier_defence_world::{self as world, query, World};

fn prepared_world() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    let mut tiles = TileMap::filled(8, 3, TileKind::Grass);
    for column in 0..8 {
        tiles.set(column, 1, TileKind::Path);
    }
    for command in [
        Command::ConfigureLoadout {
            towers: vec![
                TowerKind::Scout,
                TowerKind::Soldier,
                TowerKind::Farm,
                TowerKind::Medic,
                TowerKind::Sniper,
            ],
            map: MapConfig {
                scale: 1,
                biome: Biome::Grassland,
            },
        },
        Command::InstallMap {
            layout: MapLayout {
                tiles,
                path: vec![Vec2::new(0.0, 60.0), Vec2::new(8.0 * CELL_SIZE, 60.0)],
            },
        },
        Command::StartGame,
    ] {
        world::apply(&mut world, command, &mut events);
    }
    world
}

/// Runs the scheduler against the world without any towers for `ticks` ticks.
fn drive(world: &mut World, spawning: &mut Spawning, ticks: u32) -> Vec<Event> {
    let mut log = Vec::new();
    for _ in 0..ticks {
        let mut commands = Vec::new();
        spawning.handle(query::wave(world), query::enemy_count(world), &mut commands);
        for command in commands {
            world::apply(world, command, &mut log);
        }
    }
    log
}

#[test]
fn first_wave_spawns_its_whole_queue() {
    let mut world = prepared_world();
    let mut spawning = Spawning::new(Config::new(0x5eed, 180));
    spawning.start(300);

    let events = drive(&mut world, &mut spawning, 300);
    assert_eq!(events, vec![Event::WaveStarted { wave: 1 }]);

    let events = drive(&mut world, &mut spawning, 60 + 59 * 6);
    let spawned: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::EnemySpawned { kind, health, .. } => Some((*kind, *health)),
            _ => None,
        })
        .collect();
    assert_eq!(spawned, vec![(EnemyKind::Basic, 5.0); 7]);
    assert_eq!(query::enemy_count(&world), 7);
    assert_eq!(spawning.phase(), WavePhase::InProgress);
}

#[test]
fn cleared_battlefield_completes_the_wave() {
    let mut world = prepared_world();
    let mut spawning = Spawning::new(Config::new(0x5eed, 180));
    spawning.start(1);
    let _ = drive(&mut world, &mut spawning, 1 + 60 + 59 * 6);
    assert_eq!(spawning.phase(), WavePhase::InProgress);

    let mut events = Vec::new();
    world::apply(&mut world, Command::ClearEnemies, &mut events);
    let events = drive(&mut world, &mut spawning, 1);
    assert_eq!(
        events,
        vec![Event::WaveCompleted {
            wave: 1,
            bonus: 0,
            perfect: true
        }]
    );
    assert_eq!(query::wave(&world), 2);

    let events = drive(&mut world, &mut spawning, 180);
    assert_eq!(events, vec![Event::WaveStarted { wave: 2 }]);
}

#[test]
fn identical_seeds_replay_identical_spawn_logs() {
    let replay = |seed: u64| {
        let mut world = prepared_world();
        let mut spawning = Spawning::new(Config::new(seed, 60));
        spawning.start(1);
        let mut log = Vec::new();
        for _ in 0..4 {
            log.extend(drive(&mut world, &mut spawning, 1 + 60 + 59 * 30));
            world::apply(&mut world, Command::ClearEnemies, &mut log);
            log.extend(drive(&mut world, &mut spawning, 60));
        }
        (query::wave(&world), log)
    };

    let (wave, first) = replay(99);
    assert_eq!(wave, 5);
    assert_eq!(first, replay(99).1);
}
