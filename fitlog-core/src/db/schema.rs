diesel::table! {
    workout_summaries (id) {
        id -> BigInt,
        session_id -> Text,
        workout_id -> BigInt,
        workout_name -> Text,
        started_at -> Nullable<Text>,
        duration_seconds -> BigInt,
        exercises -> Text,
        notes -> Text,
        saved_at -> Text,
    }
}
