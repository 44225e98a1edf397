use std::fs;
use std::sync::{Arc, Mutex};

use kinematics::api::formatting::format_elapsed;
use kinematics::provider::TrackFile;
use kinematics::{
    traffic_lights, EngineConfig, KinematicsEngine, PositionFix, ReplayProvider, TripPhase,
};

/// Northbound drive along Kadetów: two slow fixes, then twenty at 36 km/h
fn synthetic_drive() -> Vec<PositionFix> {
    let mut fixes = vec![
        PositionFix::new(54.3700, 18.5020, 0).with_speed(0.5),
        PositionFix::new(54.3700, 18.5020, 1000).with_speed(0.5),
    ];
    for i in 0..20 {
        fixes.push(
            PositionFix::new(54.3700 + (i + 1) as f64 * 0.00009, 18.5020, 2000 + i as i64 * 1000)
                .with_speed(10.0)
                .with_heading(0.0),
        );
    }
    fixes
}

#[test]
fn test_replay_from_file_matches_in_memory_replay() {
    let path = std::env::temp_dir().join("kinematics_replay_track_test.json");
    let track = TrackFile {
        fixes: synthetic_drive(),
    };
    fs::write(&path, serde_json::to_string(&track).unwrap()).unwrap();

    let mut from_file = KinematicsEngine::new(EngineConfig::default(), traffic_lights());
    let mut provider = ReplayProvider::from_file(&path).unwrap().with_batch_size(4);
    from_file.run(&mut provider).unwrap();

    let mut in_memory = KinematicsEngine::new(EngineConfig::default(), traffic_lights());
    for fix in synthetic_drive() {
        in_memory.process_fix(&fix).unwrap();
    }

    assert_eq!(from_file.fixes_processed(), 22);
    assert_eq!(from_file.trip(), in_memory.trip());
    assert_eq!(from_file.ranking(), in_memory.ranking());

    let _ = fs::remove_file(&path);
}

#[test]
fn test_drive_produces_trip_figures() {
    let mut engine = KinematicsEngine::new(EngineConfig::default(), traffic_lights());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    engine.on_update(Box::new(move |outputs| {
        sink.lock().unwrap().push(outputs.sequence_number);
    }));

    let mut provider = ReplayProvider::new(synthetic_drive());
    engine.run(&mut provider).unwrap();

    assert_eq!(engine.phase(), TripPhase::Tracking);
    let trip = engine.trip();
    assert!((trip.max_speed_kmh - 36.0).abs() < 1e-6);

    // Every fix bumps the warm-up counter, so the measurement restarts on
    // the fourth fix (t = 3000) and runs to the last one (t = 21000).
    assert_eq!(trip.elapsed_millis, 18_000);
    assert_eq!(format_elapsed(trip.elapsed_millis), "18s");
    // 18 legs of 0.00009° latitude, roughly 10 m each
    assert!(trip.distance_meters > 170.0 && trip.distance_meters < 190.0);
    assert!(trip.avg_speed_kmh > 34.0 && trip.avg_speed_kmh < 38.0);

    assert_eq!(*seen.lock().unwrap(), (1..=22).collect::<Vec<u64>>());
    assert!(engine
        .ranking()
        .windows(2)
        .all(|w| w[0].distance_km <= w[1].distance_km));
}
