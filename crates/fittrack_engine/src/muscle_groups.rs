//! Workout-type → muscle-group mapping.
//!
//! Supplied as a constant, overridable table; the aggregator never
//! hardcodes it. A type missing from the table is not an error: it
//! buckets under its own raw label.

use std::collections::HashMap;

/// Ordered muscle-group labels per workout-type label.
#[derive(Clone, Debug, Default)]
pub struct MuscleGroupTable {
    map: HashMap<String, Vec<String>>,
}

impl MuscleGroupTable {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// The split-routine labels the mobile app writes into its notes.
    pub fn builtin() -> Self {
        let entries: &[(&str, &[&str])] = &[
            ("Pecho - Tríceps", &["Pecho", "Tríceps"]),
            ("Espalda - Bíceps", &["Espalda", "Bíceps"]),
            ("Pierna", &["Cuádriceps", "Femoral", "Glúteo"]),
            ("Hombro - Trapecio", &["Hombro", "Trapecio"]),
            ("Full Body", &["Pecho", "Espalda", "Pierna", "Hombro"]),
            ("Core", &["Abdominales", "Lumbar"]),
        ];
        let mut table = Self::empty();
        for (workout_type, groups) in entries {
            table.insert(*workout_type, groups.iter().map(|g| (*g).to_string()));
        }
        table
    }

    pub fn insert(
        &mut self,
        workout_type: impl Into<String>,
        groups: impl IntoIterator<Item = String>,
    ) {
        self.map
            .insert(workout_type.into(), groups.into_iter().collect());
    }

    /// Resolve a workout type to its muscle groups. An unknown type
    /// falls back to the raw label as its own singleton group.
    pub fn resolve(&self, workout_type: &str) -> Vec<String> {
        self.map
            .get(workout_type)
            .cloned()
            .unwrap_or_else(|| vec![workout_type.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resolves_split_labels_in_order() {
        let table = MuscleGroupTable::builtin();
        assert_eq!(table.resolve("Pecho - Tríceps"), vec!["Pecho", "Tríceps"]);
    }

    #[test]
    fn unknown_type_falls_back_to_itself() {
        let table = MuscleGroupTable::builtin();
        assert_eq!(table.resolve("Kickboxing"), vec!["Kickboxing"]);
        assert_eq!(MuscleGroupTable::empty().resolve("Pierna"), vec!["Pierna"]);
    }

    #[test]
    fn insert_overrides_builtin_entry() {
        let mut table = MuscleGroupTable::builtin();
        table.insert("Pierna", ["Pierna completa".to_string()]);
        assert_eq!(table.resolve("Pierna"), vec!["Pierna completa"]);
    }
}
