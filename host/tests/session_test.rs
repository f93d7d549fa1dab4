use race_core::{CarEntry, Catalog, LevelEntry};
use race_sim::{circle_script, run_race, RaceOutcome, RaceScript, ScriptFrame, SCRIPT_VERSION};

fn catalog(time: i32, laps: i32) -> Catalog {
    Catalog {
        levels: vec![LevelEntry { time, laps }],
        cars: vec![CarEntry { rank: 0 }],
    }
}

fn parked_frames(count: usize) -> Vec<ScriptFrame> {
    vec![
        ScriptFrame {
            dt: 1.0,
            stick: None,
        };
        count
    ]
}

#[test]
fn test_circling_car_wins_within_the_limit() {
    let catalog = catalog(60, 1);
    let script = circle_script(0, 0, &catalog, 8.0, 60.0).expect("script generation failed");

    let report = run_race(&script, &catalog).expect("simulation failed");

    assert_eq!(report.outcome, RaceOutcome::Success, "one lap should win");
    assert_eq!(report.laps_remaining, 0);
    assert!(
        report.seconds_remaining >= 49,
        "a single lap takes a handful of seconds, got {} left",
        report.seconds_remaining
    );
    assert_eq!(
        report.events.iter().filter(|e| *e == "lap_completed").count(),
        1,
        "expected exactly one lap event: {:?}",
        report.events
    );
    assert!(
        report.events.contains(&"overlay_shown:Success".to_owned()),
        "win overlay should be presented: {:?}",
        report.events
    );
}

#[test]
fn test_parked_car_fails_when_time_expires() {
    let catalog = catalog(5, 3);
    let script = RaceScript {
        v: SCRIPT_VERSION,
        level: 0,
        car: 0,
        frames: parked_frames(10),
    };

    let report = run_race(&script, &catalog).expect("simulation failed");

    assert_eq!(report.outcome, RaceOutcome::Failure);
    assert_eq!(report.seconds_remaining, -1, "the clock runs through zero before failing");
    assert_eq!(report.laps_remaining, 3, "no laps happen while parked");
    assert_eq!(report.frames_run, 6, "the race stops at the failure frame");
    assert!(report.events.contains(&"overlay_shown:Failure".to_owned()));
}

#[test]
fn test_short_script_is_undecided() {
    let catalog = catalog(60, 3);
    let script = RaceScript {
        v: SCRIPT_VERSION,
        level: 0,
        car: 0,
        frames: parked_frames(3),
    };

    let report = run_race(&script, &catalog).expect("simulation failed");

    assert_eq!(report.outcome, RaceOutcome::Incomplete);
    assert_eq!(report.frames_run, 3);
    assert_eq!(report.laps_remaining, 3);
}

#[test]
fn test_unsupported_script_version_is_rejected() {
    let catalog = catalog(60, 3);
    let script = RaceScript {
        v: 2,
        level: 0,
        car: 0,
        frames: parked_frames(1),
    };

    let err = run_race(&script, &catalog).unwrap_err();
    assert!(
        err.to_string().contains("Unsupported script version"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_unknown_level_is_rejected() {
    let catalog = catalog(60, 3);
    let script = RaceScript {
        v: SCRIPT_VERSION,
        level: 7,
        car: 0,
        frames: parked_frames(1),
    };

    let err = run_race(&script, &catalog).unwrap_err();
    assert!(
        err.to_string().contains("no level at index 7"),
        "unexpected error: {}",
        err
    );
}
