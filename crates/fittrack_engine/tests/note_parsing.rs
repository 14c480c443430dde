//! Black-box tests for the note classifier over the encodings found in
//! historical data.

use fittrack_engine::note_parser::{BODY_COMPOSITION_MARKER, WORKOUT_DATA_MARKER};
use fittrack_engine::{ParseOutcome, parse_notes};
use serde_json::json;

#[test]
fn body_composition_marker_always_wins() {
    let cases = [
        format!("{BODY_COMPOSITION_MARKER}"),
        format!("measured today {BODY_COMPOSITION_MARKER} 80.5kg"),
        format!(r#"{BODY_COMPOSITION_MARKER} {{"weight": 80.5, "muscle_mass": 38.1}}"#),
        format!(
            r#"{WORKOUT_DATA_MARKER} {{"exercises":[{{"name":"x","sets":[]}}]}} {BODY_COMPOSITION_MARKER}"#
        ),
    ];
    for note in &cases {
        assert_eq!(
            parse_notes(Some(note.as_str())),
            ParseOutcome::BodyComposition,
            "note: {note}"
        );
    }
}

#[test]
fn tagged_json_round_trips_fields() {
    let payload = json!({
        "type": "Espalda - Bíceps",
        "exercises": [
            {"name": "dominadas", "sets": [{"reps": 8, "weight": 0}]},
            {"name": "remo con barra", "sets": [{"reps": 10, "weight": 50}, {"reps": 8, "weight": 55}]}
        ]
    });
    let note = format!("{WORKOUT_DATA_MARKER} {payload}");
    let ParseOutcome::Json(parsed) = parse_notes(Some(note.as_str())) else {
        panic!("expected json outcome");
    };
    assert_eq!(parsed.workout_type.as_deref(), Some("Espalda - Bíceps"));
    assert_eq!(parsed.exercises.len(), 2);
    assert_eq!(parsed.exercises[0].name, "dominadas");
    assert_eq!(parsed.exercises[1].sets[1].weight, 55.0);
}

#[test]
fn parse_is_deterministic() {
    let notes = [
        "",
        "   ",
        "just some prose about the gym",
        "Tipo: Pecho\n---\npress banca\n10 reps x 60 kg",
        r#"WORKOUT_DATA: {"type":"Pierna","exercises":[]}"#,
        r#"{"type":"Pierna","exercises":[]}"#,
        "BODY_COMPOSITION 80kg",
    ];
    for note in notes {
        assert_eq!(
            parse_notes(Some(note)),
            parse_notes(Some(note)),
            "note: {note}"
        );
    }
}

#[test]
fn foreign_content_never_panics_and_degrades() {
    let hostile = [
        "WORKOUT_DATA:",
        "WORKOUT_DATA: {",
        "WORKOUT_DATA: }{",
        "{\"unclosed\": ",
        "\\n\\r\\\"",
        "--- --- ---",
        "Serie 1: reps x kg",
        "���\u{0}binary-ish",
    ];
    for note in hostile {
        let outcome = parse_notes(Some(note));
        assert!(
            matches!(outcome, ParseOutcome::Unparsed | ParseOutcome::Heuristic(_)),
            "note {note:?} gave {outcome:?}"
        );
    }
}

#[test]
fn whitespace_only_variants_are_unparsed() {
    for note in ["", " ", "\n\n", "\t", "\"\"", "''"] {
        assert_eq!(parse_notes(Some(note)), ParseOutcome::Unparsed);
    }
    assert_eq!(parse_notes(None), ParseOutcome::Unparsed);
}
