use super::{ExerciseDefinition, ExerciseId, WorkoutDefinition};

struct Template {
    id: ExerciseId,
    name: &'static str,
    equipment: &'static str,
    muscle_group: &'static str,
    instructions: &'static str,
    modifications: &'static str,
}

const SHOULDER_PRESS: Template = Template {
    id: 1,
    name: "Seated Dumbbell Shoulder Press",
    equipment: "Dumbbells, Bench",
    muscle_group: "Shoulders",
    instructions: "Sit on bench with back support. Hold dumbbells at shoulder height. Press weights overhead without locking elbows. Lower back to starting position with control.",
    modifications: "Use lighter weights, focus on form",
};

const ROWS: Template = Template {
    id: 2,
    name: "Seated Dumbbell Rows",
    equipment: "Dumbbells, Bench",
    muscle_group: "Back",
    instructions: "Sit on edge of bench, feet flat on floor. Lean forward slightly with flat back. Pull dumbbells toward lower ribs. Lower with control.",
    modifications: "Use bench for support if needed",
};

const CHEST_PRESS: Template = Template {
    id: 3,
    name: "Seated Dumbbell Chest Press",
    equipment: "Dumbbells, Bench",
    muscle_group: "Chest",
    instructions: "Sit on bench with back support. Hold dumbbells at chest level. Press weights forward without locking elbows. Return to starting position with control.",
    modifications: "Use lighter weights, focus on form",
};

const BICEP_CURLS: Template = Template {
    id: 4,
    name: "Seated Bicep Curls",
    equipment: "Dumbbells, Bench",
    muscle_group: "Arms",
    instructions: "Sit on bench with back support. Curl dumbbells toward shoulders. Lower with control.",
    modifications: "Perform one arm at a time if needed",
};

const TRICEP_EXTENSIONS: Template = Template {
    id: 5,
    name: "Seated Tricep Extensions",
    equipment: "Dumbbells, Bench",
    muscle_group: "Arms",
    instructions: "Sit on bench with back support. Hold one dumbbell with both hands above head. Lower dumbbell behind head by bending elbows. Extend arms back up without locking elbows.",
    modifications: "Use lighter weight, focus on form",
};

const LEG_EXTENSIONS: Template = Template {
    id: 6,
    name: "Seated Leg Extensions",
    equipment: "Bench",
    muscle_group: "Legs",
    instructions: "Sit on bench with good posture. Extend one leg until straight. Hold briefly, then lower with control.",
    modifications: "Reduce range of motion if uncomfortable",
};

const LEG_CURLS: Template = Template {
    id: 7,
    name: "Seated Leg Curls",
    equipment: "Bench",
    muscle_group: "Legs",
    instructions: "Sit on edge of bench. Bend knee, bringing heel toward buttocks. Return to starting position with control.",
    modifications: "Reduce range of motion if uncomfortable",
};

const CALF_RAISES: Template = Template {
    id: 8,
    name: "Seated Calf Raises",
    equipment: "Dumbbells, Bench",
    muscle_group: "Legs",
    instructions: "Sit on bench, feet flat on floor. Place dumbbells on thighs just above knees. Raise heels off floor as high as possible. Lower with control.",
    modifications: "Start without weights if needed",
};

const KNEE_LIFTS: Template = Template {
    id: 9,
    name: "Seated Dumbbell Knee Lifts",
    equipment: "Dumbbells, Bench",
    muscle_group: "Core, Legs",
    instructions: "Sit on bench with good posture. Hold light dumbbells on thighs. Lift one knee up toward chest. Lower with control.",
    modifications: "Start without weights if needed",
};

const HIP_ABDUCTION: Template = Template {
    id: 10,
    name: "Seated Hip Abduction",
    equipment: "Dumbbells, Bench",
    muscle_group: "Legs",
    instructions: "Sit on bench with good posture. Place light dumbbell on outer thigh. Move knee outward against resistance. Return to starting position with control.",
    modifications: "Start without weights if needed",
};

fn exercise(template: &Template, target_sets: u32, rest_seconds: u32) -> ExerciseDefinition {
    ExerciseDefinition {
        id: template.id,
        name: template.name.to_string(),
        target_sets,
        rest_seconds,
        target_reps: Some("8-12".to_string()),
        instructions: Some(template.instructions.to_string()),
        modifications: Some(template.modifications.to_string()),
        equipment: Some(template.equipment.to_string()),
        muscle_group: Some(template.muscle_group.to_string()),
    }
}

fn workout(
    id: i64,
    name: &str,
    description: &str,
    exercises: Vec<ExerciseDefinition>,
) -> WorkoutDefinition {
    WorkoutDefinition {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        exercises,
    }
}

pub(super) fn workouts() -> Vec<WorkoutDefinition> {
    let upper = [
        &SHOULDER_PRESS,
        &ROWS,
        &CHEST_PRESS,
        &BICEP_CURLS,
        &TRICEP_EXTENSIONS,
    ];
    let lower = [
        &LEG_EXTENSIONS,
        &LEG_CURLS,
        &CALF_RAISES,
        &KNEE_LIFTS,
        &HIP_ABDUCTION,
    ];
    let full = [
        &SHOULDER_PRESS,
        &ROWS,
        &LEG_EXTENSIONS,
        &BICEP_CURLS,
        &CALF_RAISES,
        &CHEST_PRESS,
    ];

    vec![
        workout(
            1,
            "Upper Body Workout",
            "Focus on chest, shoulders, back, and arms",
            upper.iter().map(|t| exercise(t, 3, 90)).collect(),
        ),
        workout(
            2,
            "Lower Body Workout",
            "Focus on legs and core",
            lower.iter().map(|t| exercise(t, 3, 90)).collect(),
        ),
        workout(
            3,
            "Full Body Workout",
            "Comprehensive workout targeting all major muscle groups",
            full.iter().map(|t| exercise(t, 2, 60)).collect(),
        ),
    ]
}
