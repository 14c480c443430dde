//! Classifier for the free-text notes field.
//!
//! Over the product's lifetime the notes column accumulated three
//! incompatible encodings (marker-tagged JSON, bare JSON, hand-written
//! structured text) plus body-composition entries that are not workouts
//! at all. `parse_notes` recovers whichever one applies, in a fixed
//! priority order, and never fails: anything unrecognizable degrades to
//! [`ParseOutcome::Unparsed`].

use crate::{ExerciseEntry, HeuristicPayload, ParseOutcome, SetEntry, WorkoutPayload};
use regex::Regex;
use std::sync::LazyLock;

/// Literal prefix tagging a machine-written JSON payload inside a note.
pub const WORKOUT_DATA_MARKER: &str = "WORKOUT_DATA:";

/// Literal token marking a body-measurement note. Such notes are
/// excluded from workout parsing entirely.
pub const BODY_COMPOSITION_MARKER: &str = "BODY_COMPOSITION";

/// Block delimiter used by the hand-written note convention.
const BLOCK_DELIMITER: &str = "---";

/// Line prefixes that can never be an exercise name.
const RESERVED_PREFIXES: &[&str] = &["datos", "serie", "tipo", "type", "ejercicios", "exercises"];

static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:type|tipo)\s*:\s*([^\n]+)").expect("type label regex")
});

static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:exercises|ejercicios)\s*:\s*(\d+)").expect("exercise count regex")
});

static SET_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:serie\s*\d+\s*:\s*)?(\d+)\s*reps?\s*[x×]\s*(\d+(?:[.,]\d+)?)\s*kg")
        .expect("set line regex")
});

/// Classify one raw note string. Pure and deterministic; identical
/// input always yields a structurally identical outcome.
pub fn parse_notes(raw: Option<&str>) -> ParseOutcome {
    let Some(raw) = raw else {
        return ParseOutcome::Unparsed;
    };
    let cleaned = clean_notes(raw);
    if cleaned.is_empty() {
        return ParseOutcome::Unparsed;
    }

    // Body-composition wins over everything, including JSON-looking
    // content in the same note.
    if cleaned.contains(BODY_COMPOSITION_MARKER) {
        return ParseOutcome::BodyComposition;
    }

    if let Some(payload) = extract_tagged_json(&cleaned) {
        return ParseOutcome::Json(payload);
    }

    if let Some(payload) = parse_bare_json(&cleaned) {
        return ParseOutcome::Json(payload);
    }

    if let Some(payload) = extract_heuristic(&cleaned) {
        return ParseOutcome::Heuristic(payload);
    }

    ParseOutcome::Unparsed
}

/// Trim, strip one matching pair of wrapping quotes, and undo the
/// literal escape sequences some writers stored verbatim.
fn clean_notes(raw: &str) -> String {
    let mut s = raw.trim();
    if s.len() >= 2 {
        let bytes = s.as_bytes();
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[s.len() - 1] == first {
            s = &s[1..s.len() - 1];
        }
    }
    s.replace("\\n", "\n")
        .replace("\\r", "")
        .replace("\\\"", "\"")
        .trim()
        .to_string()
}

/// Trusted machine-generated path: `WORKOUT_DATA:` marker followed by a
/// brace-delimited JSON object.
fn extract_tagged_json(cleaned: &str) -> Option<WorkoutPayload> {
    let marker_end = cleaned.find(WORKOUT_DATA_MARKER)? + WORKOUT_DATA_MARKER.len();
    let rest = &cleaned[marker_end..];
    let open = rest.find('{')?;
    let close = rest.rfind('}')?;
    if close < open {
        return None;
    }
    match payload_from_json(&rest[open..=close]) {
        Some(payload) => Some(payload),
        None => {
            tracing::debug!("tagged workout marker present but payload did not parse");
            None
        }
    }
}

fn parse_bare_json(cleaned: &str) -> Option<WorkoutPayload> {
    payload_from_json(cleaned)
}

fn payload_from_json(s: &str) -> Option<WorkoutPayload> {
    let value: serde_json::Value = serde_json::from_str(s).ok()?;
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

/// Heuristic extraction over the hand-written note convention: labeled
/// header fields plus `---`-delimited exercise blocks.
fn extract_heuristic(cleaned: &str) -> Option<HeuristicPayload> {
    let workout_type = scan_type_label(cleaned);
    let exercise_count = scan_exercise_count(cleaned);
    let exercises = scan_exercise_blocks(cleaned);

    if workout_type.is_none() && exercise_count.is_none() && exercises.is_empty() {
        return None;
    }
    Some(HeuristicPayload {
        workout_type,
        exercise_count,
        exercises,
    })
}

fn scan_type_label(s: &str) -> Option<String> {
    TYPE_RE
        .captures(s)
        .map(|c| c[1].trim().to_string())
        .filter(|t| !t.is_empty())
}

fn scan_exercise_count(s: &str) -> Option<u32> {
    COUNT_RE.captures(s).and_then(|c| c[1].parse().ok())
}

fn scan_exercise_blocks(s: &str) -> Vec<ExerciseEntry> {
    let blocks: Vec<&str> = s.split(BLOCK_DELIMITER).collect();
    if blocks.len() < 2 {
        return Vec::new();
    }
    // Blocks after the first are exercise candidates; a block with no
    // recognizable name is dropped.
    blocks[1..]
        .iter()
        .filter_map(|block| parse_exercise_block(block))
        .collect()
}

fn parse_exercise_block(block: &str) -> Option<ExerciseEntry> {
    let lines: Vec<&str> = block.lines().map(str::trim).collect();
    let name_idx = lines.iter().position(|line| {
        !line.is_empty() && !is_reserved_line(line) && parse_set_line(line).is_none()
    })?;

    let sets = lines[name_idx + 1..]
        .iter()
        .filter_map(|line| parse_set_line(line))
        .collect();

    Some(ExerciseEntry {
        name: lines[name_idx].to_string(),
        sets,
    })
}

fn is_reserved_line(line: &str) -> bool {
    let lowered = line.to_lowercase();
    RESERVED_PREFIXES.iter().any(|p| lowered.starts_with(p))
}

fn parse_set_line(line: &str) -> Option<SetEntry> {
    let caps = SET_LINE_RE.captures(line)?;
    let reps: u32 = caps[1].parse().ok()?;
    let weight: f64 = caps[2].replace(',', ".").parse().ok()?;
    Some(SetEntry { reps, weight })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_none_are_unparsed() {
        assert_eq!(parse_notes(None), ParseOutcome::Unparsed);
        assert_eq!(parse_notes(Some("")), ParseOutcome::Unparsed);
        assert_eq!(parse_notes(Some("   \n\t ")), ParseOutcome::Unparsed);
    }

    #[test]
    fn plain_prose_is_unparsed() {
        assert_eq!(
            parse_notes(Some("great session, felt strong today")),
            ParseOutcome::Unparsed
        );
    }

    #[test]
    fn body_composition_marker_wins_over_json() {
        let note = r#"BODY_COMPOSITION {"weight": 80.5, "body_fat": 15.2}"#;
        assert_eq!(parse_notes(Some(note)), ParseOutcome::BodyComposition);

        let tagged = format!("{WORKOUT_DATA_MARKER} {{\"exercises\": []}} BODY_COMPOSITION");
        assert_eq!(
            parse_notes(Some(tagged.as_str())),
            ParseOutcome::BodyComposition
        );
    }

    #[test]
    fn tagged_json_parses_through() {
        let note = r#"WORKOUT_DATA: {"type":"Pecho - Tríceps","exercises":[{"name":"press banca","sets":[{"reps":10,"weight":60}]}]}"#;
        let ParseOutcome::Json(p) = parse_notes(Some(note)) else {
            panic!("expected json outcome");
        };
        assert_eq!(p.workout_type.as_deref(), Some("Pecho - Tríceps"));
        assert_eq!(p.exercises.len(), 1);
        assert_eq!(p.exercises[0].sets[0].reps, 10);
        assert_eq!(p.exercises[0].sets[0].weight, 60.0);
    }

    #[test]
    fn tagged_json_with_prefix_text_and_escapes() {
        let note = "\"Completed!\\nWORKOUT_DATA: {\\\"type\\\":\\\"Espalda\\\",\\\"exercises\\\":[]}\"";
        let ParseOutcome::Json(p) = parse_notes(Some(note)) else {
            panic!("expected json outcome");
        };
        assert_eq!(p.workout_type.as_deref(), Some("Espalda"));
        assert!(p.exercises.is_empty());
    }

    #[test]
    fn bare_json_object_parses() {
        let note = r#"{"type":"Pierna","exercises":[{"name":"sentadilla","sets":[{"reps":5,"weight":100}]}]}"#;
        let ParseOutcome::Json(p) = parse_notes(Some(note)) else {
            panic!("expected json outcome");
        };
        assert_eq!(p.workout_type.as_deref(), Some("Pierna"));
    }

    #[test]
    fn json_array_is_not_an_object() {
        assert_eq!(parse_notes(Some("[1, 2, 3]")), ParseOutcome::Unparsed);
    }

    #[test]
    fn malformed_tagged_json_degrades_to_heuristics() {
        let note = "WORKOUT_DATA: {not json at all\nTipo: Pecho";
        let ParseOutcome::Heuristic(p) = parse_notes(Some(note)) else {
            panic!("expected heuristic outcome");
        };
        assert_eq!(p.workout_type.as_deref(), Some("Pecho"));
    }

    #[test]
    fn heuristic_full_note() {
        let note = "Datos del entrenamiento\n\
                    Tipo: Pecho - Tríceps\n\
                    Ejercicios: 2\n\
                    ---\n\
                    press banca\n\
                    Serie 1: 10 reps x 60 kg\n\
                    Serie 2: 8 reps x 65 kg\n\
                    ---\n\
                    fondos\n\
                    12 reps × 20 kg\n";
        let ParseOutcome::Heuristic(p) = parse_notes(Some(note)) else {
            panic!("expected heuristic outcome");
        };
        assert_eq!(p.workout_type.as_deref(), Some("Pecho - Tríceps"));
        assert_eq!(p.exercise_count, Some(2));
        assert_eq!(p.exercises.len(), 2);
        assert_eq!(p.exercises[0].name, "press banca");
        assert_eq!(p.exercises[0].sets.len(), 2);
        assert_eq!(p.exercises[1].name, "fondos");
        assert_eq!(p.exercises[1].sets[0].weight, 20.0);
    }

    #[test]
    fn heuristic_type_label_alone_is_enough() {
        let ParseOutcome::Heuristic(p) = parse_notes(Some("Type: Kickboxing")) else {
            panic!("expected heuristic outcome");
        };
        assert_eq!(p.workout_type.as_deref(), Some("Kickboxing"));
        assert!(p.exercises.is_empty());
        assert!(p.exercise_count.is_none());
    }

    #[test]
    fn block_without_name_is_dropped() {
        let note = "Tipo: Pierna\n---\nSerie 1: 5 reps x 100 kg\n---\nsentadilla\n5 reps x 100 kg";
        let ParseOutcome::Heuristic(p) = parse_notes(Some(note)) else {
            panic!("expected heuristic outcome");
        };
        assert_eq!(p.exercises.len(), 1);
        assert_eq!(p.exercises[0].name, "sentadilla");
    }

    #[test]
    fn set_line_accepts_decimal_comma_and_unicode_times() {
        let entry = parse_set_line("Serie 3: 8 reps × 22,5 kg").expect("set line");
        assert_eq!(entry.reps, 8);
        assert_eq!(entry.weight, 22.5);
    }

    #[test]
    fn set_line_rejects_prose() {
        assert!(parse_set_line("felt heavy today").is_none());
        assert!(parse_set_line("reps x kg").is_none());
    }

    #[test]
    fn quote_stripping_requires_matching_pair() {
        let ParseOutcome::Heuristic(p) = parse_notes(Some("'Tipo: Hombro'")) else {
            panic!("expected heuristic outcome");
        };
        assert_eq!(p.workout_type.as_deref(), Some("Hombro"));
        // Mismatched quotes stay in place and the label still scans.
        assert!(matches!(
            parse_notes(Some("\"Tipo: Hombro'")),
            ParseOutcome::Heuristic(_)
        ));
    }

    #[test]
    fn parse_is_idempotent_over_reserialization() {
        let note = r#"WORKOUT_DATA: {"type":"Espalda","exercises":[{"name":"remo","sets":[{"reps":12,"weight":40}]}]}"#;
        let first = parse_notes(Some(note));
        let ParseOutcome::Json(payload) = &first else {
            panic!("expected json outcome");
        };
        let reserialized = serde_json::to_string(payload).expect("serialize payload");
        let second = parse_notes(Some(reserialized.as_str()));
        assert_eq!(first, second);
    }
}
