use segue_test_fixtures::{host, MemoryStore, ScriptedRouter};
use segue_transition_core::{keys, Config, CoreEvent, Engine, Inputs, ProgressPhase};

fn drive(
    eng: &mut Engine,
    store: &mut MemoryStore,
    router: &mut ScriptedRouter,
    reduced: bool,
    dt: f32,
    ticks: usize,
) -> Vec<(f32, CoreEvent)> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        let mut h = host(store, router, reduced);
        let tick_events: Vec<CoreEvent> = eng
            .update(dt, Inputs::default(), &mut h)
            .unwrap()
            .events
            .clone();
        let at = eng.clock_ms();
        events.extend(tick_events.into_iter().map(|e| (at, e)));
    }
    events
}

fn assert_signals(
    eng: &mut Engine,
    store: &mut MemoryStore,
    router: &mut ScriptedRouter,
    signals: Vec<segue_transition_core::SignalId>,
) {
    let mut h = host(store, router, false);
    eng.update(
        0.0,
        Inputs {
            signals,
            ..Default::default()
        },
        &mut h,
    )
    .unwrap();
}

#[test]
fn target_is_max_of_asserted_floors_in_any_order() {
    let mut cfg = Config::default();
    cfg.timed_floors.clear();
    let mut eng = Engine::new(cfg);
    let mut store = MemoryStore::new();
    let mut router = ScriptedRouter::new("/");

    let s40 = eng.register_signal(40.0);
    let s70 = eng.register_signal(70.0);
    let s55 = eng.register_signal(55.0);
    // Never asserted, so "all satisfied" stays false and the target is
    // exactly the max asserted floor.
    let _s90 = eng.register_signal(90.0);

    assert_signals(&mut eng, &mut store, &mut router, vec![s55]);
    assert_eq!(eng.progress().target, 55.0);

    assert_signals(&mut eng, &mut store, &mut router, vec![s40]);
    assert_eq!(eng.progress().target, 55.0);

    assert_signals(&mut eng, &mut store, &mut router, vec![s70]);
    assert_eq!(eng.progress().target, 70.0);

    // Idempotent: re-asserting changes nothing.
    assert_signals(&mut eng, &mut store, &mut router, vec![s70, s40, s55]);
    assert_eq!(eng.progress().target, 70.0);
}

#[test]
fn current_is_monotonic_and_never_exceeds_target() {
    let mut eng = Engine::new(Config::default());
    let mut store = MemoryStore::new();
    let mut router = ScriptedRouter::new("/");

    let s50 = eng.register_signal(50.0);
    let _never = eng.register_signal(90.0);
    assert_signals(&mut eng, &mut store, &mut router, vec![s50]);

    let mut last = eng.progress().current;
    for _ in 0..120 {
        let mut h = host(&mut store, &mut router, false);
        eng.update(30.0, Inputs::default(), &mut h).unwrap();
        let st = *eng.progress();
        assert!(st.current >= last, "current decreased: {} -> {}", last, st.current);
        assert!(st.current <= st.target, "current {} above target {}", st.current, st.target);
        assert!(st.target <= 100.0);
        last = st.current;
    }
}

#[test]
fn max_display_deadline_forces_completion() {
    // Tmin = 800, Tmax = 3000, and no signal ever asserts beyond floor 50:
    // the exit must still fire at or before elapsed = 3000.
    let mut eng = Engine::new(Config::default());
    let mut store = MemoryStore::new();
    let mut router = ScriptedRouter::new("/");

    let s50 = eng.register_signal(50.0);
    let _stalled = eng.register_signal(70.0);
    assert_signals(&mut eng, &mut store, &mut router, vec![s50]);

    let events = drive(&mut eng, &mut store, &mut router, false, 30.0, 200);
    let exit_at = events
        .iter()
        .find(|(_, e)| matches!(e, CoreEvent::ExitStarted))
        .map(|(at, _)| *at)
        .expect("exit never started");
    assert!(exit_at <= 3000.0, "exit at {exit_at}");
    assert!(
        events.iter().any(|(_, e)| matches!(e, CoreEvent::LoadingComplete)),
        "exit sequence never finished"
    );
    assert!(eng.is_loading_complete());
    assert_eq!(eng.progress().phase, ProgressPhase::Complete);
}

#[test]
fn completion_fires_exactly_once() {
    let mut eng = Engine::new(Config::default());
    let mut store = MemoryStore::new();
    let mut router = ScriptedRouter::new("/");

    let s100 = eng.register_signal(100.0);
    assert_signals(&mut eng, &mut store, &mut router, vec![s100]);

    let events = drive(&mut eng, &mut store, &mut router, false, 30.0, 300);
    let completes = events
        .iter()
        .filter(|(_, e)| matches!(e, CoreEvent::LoadingComplete))
        .count();
    let exits = events
        .iter()
        .filter(|(_, e)| matches!(e, CoreEvent::ExitStarted))
        .count();
    assert_eq!(completes, 1);
    assert_eq!(exits, 1);
}

#[test]
fn exit_waits_for_min_display() {
    let mut eng = Engine::new(Config::default());
    let mut store = MemoryStore::new();
    let mut router = ScriptedRouter::new("/");

    // Everything ready on the very first tick.
    let s100 = eng.register_signal(100.0);
    assert_signals(&mut eng, &mut store, &mut router, vec![s100]);

    let events = drive(&mut eng, &mut store, &mut router, false, 30.0, 100);
    let exit_at = events
        .iter()
        .find(|(_, e)| matches!(e, CoreEvent::ExitStarted))
        .map(|(at, _)| *at)
        .expect("exit never started");
    assert!(exit_at >= 800.0, "exit fired at {exit_at}, before Tmin");
}

#[test]
fn no_registered_signals_completes_shortly_after_min_display() {
    // Nothing to wait for: the bar runs out and the exit fires once the
    // minimum display time passes, well ahead of the max-display deadline.
    let mut eng = Engine::new(Config::default());
    let mut store = MemoryStore::new();
    let mut router = ScriptedRouter::new("/");

    let events = drive(&mut eng, &mut store, &mut router, false, 30.0, 100);
    let exit_at = events
        .iter()
        .find(|(_, e)| matches!(e, CoreEvent::ExitStarted))
        .map(|(at, _)| *at)
        .expect("exit never started");
    assert!(exit_at >= 800.0, "exit at {exit_at}, before Tmin");
    assert!(exit_at <= 1000.0, "exit at {exit_at}, idled toward Tmax");
}

#[test]
fn reduced_motion_completes_immediately_with_no_progress_frames() {
    let mut eng = Engine::new(Config::default());
    let mut store = MemoryStore::new();
    let mut router = ScriptedRouter::new("/");
    assert!(eng.scroll_lock_held());

    let mut h = host(&mut store, &mut router, true);
    let out = eng.update(16.0, Inputs::default(), &mut h).unwrap();
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::LoadingComplete)));
    assert!(
        !out.changes.iter().any(|c| c.key == keys::LOADER_PROGRESS),
        "reduced motion must not emit intermediate progress frames"
    );
    assert!(out.changes.iter().any(|c| c.key == keys::LOADER_HIDDEN));

    assert!(eng.is_loading_complete());
    // The scroll lock is restored through the same completion path.
    assert!(!eng.scroll_lock_held());
}

#[test]
fn scroll_lock_released_on_completion() {
    let mut eng = Engine::new(Config::default());
    let mut store = MemoryStore::new();
    let mut router = ScriptedRouter::new("/");
    assert!(eng.scroll_lock_held());

    let s100 = eng.register_signal(100.0);
    assert_signals(&mut eng, &mut store, &mut router, vec![s100]);
    drive(&mut eng, &mut store, &mut router, false, 30.0, 300);

    assert!(eng.is_loading_complete());
    assert!(!eng.scroll_lock_held());
}

#[test]
fn teardown_mid_run_releases_lock_without_completing() {
    let mut eng = Engine::new(Config::default());
    let mut store = MemoryStore::new();
    let mut router = ScriptedRouter::new("/");

    drive(&mut eng, &mut store, &mut router, false, 30.0, 10);
    assert!(!eng.is_loading_complete());
    assert!(eng.scroll_lock_held());

    let mut h = host(&mut store, &mut router, false);
    let out = eng
        .update(
            30.0,
            Inputs {
                commands: vec![segue_transition_core::Command::Teardown],
                ..Default::default()
            },
            &mut h,
        )
        .unwrap();
    assert!(!out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::LoadingComplete)));
    assert!(!eng.scroll_lock_held());
    assert!(!eng.is_loading_complete());
}
