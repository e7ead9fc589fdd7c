use fitlog::catalog::{InMemoryCatalog, WorkoutCatalog};
use fitlog::db::{SqliteSummaryStore, SummaryStore};
use fitlog::session::{SessionError, SessionPhase, WorkoutSession};

#[test]
fn upper_body_workout_is_logged_and_saved() {
    let catalog = InMemoryCatalog::builtin();
    let definition = catalog.workout(1).cloned().unwrap();
    let exercise_ids: Vec<i64> = definition.exercises.iter().map(|e| e.id).collect();

    let mut session = WorkoutSession::prepare(definition).unwrap();
    session.begin().unwrap();

    let mut seconds = 0;
    for (position, exercise_id) in exercise_ids.iter().enumerate() {
        assert_eq!(session.exercise_index(), position);
        for set_index in 0..3 {
            assert_eq!(session.set_number(), set_index as u32 + 1);
            session
                .record_set(*exercise_id, set_index, Some(15.0), Some(12 - set_index as u32))
                .unwrap();
            assert_eq!(session.timer().active_rest_seconds(), 90);

            // rest it out
            while session.timer().is_resting() {
                session.tick();
                seconds += 1;
            }
        }
    }

    assert_eq!(session.exercise_index(), exercise_ids.len() - 1);
    assert_eq!(session.set_number(), 3);
    assert!(session.is_session_complete());
    assert_eq!(session.elapsed_seconds(), seconds);

    let summary = session.complete_session("felt good").unwrap();
    assert_eq!(session.phase(), SessionPhase::Completed);
    assert_eq!(summary.total_duration_seconds, 15 * 90);
    assert_eq!(summary.total_sets(), 15);
    assert_eq!(summary.workout_name, "Upper Body Workout");

    let store = SqliteSummaryStore::open(":memory:").unwrap();
    let id = store.save(&summary).unwrap();
    let stored = store.get(id).unwrap().unwrap();
    assert_eq!(stored.summary.per_exercise, summary.per_exercise);
    assert_eq!(stored.summary.notes, "felt good");
}

#[test]
fn skipping_rest_and_finishing_early_is_refused() {
    let catalog = InMemoryCatalog::builtin();
    let definition = catalog.workout(2).cloned().unwrap();
    let first = definition.exercises[0].id;

    let mut session = WorkoutSession::start(definition).unwrap();
    session.record_set(first, 0, Some(10.0), Some(10)).unwrap();
    assert!(session.timer().is_resting());

    session.stop_rest();
    assert!(!session.timer().is_resting());
    assert_eq!(session.timer().active_rest_seconds(), 0);

    assert_eq!(
        session.complete_session("not yet").unwrap_err(),
        SessionError::NotReady
    );
    assert_eq!(session.phase(), SessionPhase::InProgress);
}
