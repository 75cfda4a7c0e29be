/*!
 * Tests for the structuring engine
 */

use prova::errors::StructureError;
use prova::script::lexicon;
use prova::script::{
    NO_SPEAKER_ID, ScriptStructurer, SpeakerConfig, StructurerConfig, estimate_structure,
    structure, try_structure,
};
use crate::common::{PROSE, SAMPLE_SCRIPT};

/// Test that text without speaker cues yields only directions
#[test]
fn test_structure_withNoSpeakerCues_shouldHaveNoCharacters() {
    let script = structure(PROSE);

    assert!(script.characters.is_empty());
    assert_eq!(script.line_count(), 3);
    assert!(script.lines().all(|line| line.character_id == NO_SPEAKER_ID && line.is_direction));
}

/// Test that line ids run 1, 2, 3, ... across every scene
#[test]
fn test_structure_lineIds_shouldIncreaseByOneAcrossScenes() {
    let script = structure(SAMPLE_SCRIPT);

    assert!(script.scenes.len() > 1);
    let ids: Vec<usize> = script.lines().map(|line| line.id.parse().unwrap()).collect();
    let expected: Vec<usize> = (1..=ids.len()).collect();
    assert_eq!(ids, expected);

    for scene in &script.scenes {
        assert!(scene.lines.iter().all(|line| line.scene_id == scene.id));
    }
}

/// Test that every attributed line points at a cataloged character
#[test]
fn test_structure_characterIds_shouldReferenceCatalog() {
    let script = structure(SAMPLE_SCRIPT);

    for line in script.lines() {
        assert!(
            line.character_id == NO_SPEAKER_ID || script.character_by_id(&line.character_id).is_some(),
            "dangling character id {}",
            line.character_id
        );
    }
    assert!(script.character_by_id(NO_SPEAKER_ID).is_none());
}

/// Test that structuring the same input twice gives the same script
#[test]
fn test_structure_runTwice_shouldBeIdentical() {
    assert_eq!(structure(SAMPLE_SCRIPT), structure(SAMPLE_SCRIPT));
}

/// Test that names seen only once are not characters
#[test]
fn test_structure_withSingleMention_shouldExcludeName() {
    let text = format!("{}BALIA: Giulietta!\n", SAMPLE_SCRIPT);
    let script = structure(&text);

    let names: Vec<&str> = script.characters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ROMEO", "GIULIETTA"]);
}

/// Test that a lenient catalog accepts single mentions
#[test]
fn test_structure_withLenientSpeakers_shouldIncludeSingleMention() {
    let config = StructurerConfig {
        speakers: SpeakerConfig::lenient(),
        ..Default::default()
    };
    let structurer = ScriptStructurer::new(config, &lexicon::ITALIAN);
    let text = format!("{}BALIA: Giulietta!\n", SAMPLE_SCRIPT);

    let script = structurer.structure(&text);
    assert!(script.character_by_name("BALIA").is_some());
}

/// Test the continuation merge scenario
#[test]
fn test_structure_withContinuationLine_shouldMergeIntoSpeakerLine() {
    let text = "ROMEO: Hello there.\nStill talking.\nGIULIETTA: Hi Romeo.\nROMEO: Again.\nGIULIETTA: Again too.";
    let script = structure(text);

    assert_eq!(script.characters.len(), 2);
    assert_eq!(script.characters[0].name, "ROMEO");
    assert_eq!(script.characters[1].name, "GIULIETTA");

    let lines: Vec<_> = script.lines().collect();
    assert_eq!(lines[0].text, "Hello there. Still talking.");
    assert_eq!(lines[0].character_id, script.characters[0].id);
    assert_eq!(lines[1].text, "Hi Romeo.");
    assert_eq!(lines[1].character_id, script.characters[1].id);
}

/// Test that several continuation lines all merge into the speaker line
#[test]
fn test_structure_withTwoContinuationLines_shouldMergeBoth() {
    let text = "ROMEO: Uno.\nancora\ne ancora.\nGIULIETTA: Due.\nROMEO: x.\nGIULIETTA: y.";
    let script = structure(text);

    let lines: Vec<(&str, &str)> = script
        .lines()
        .map(|line| (line.character_id.as_str(), line.text.as_str()))
        .collect();
    assert_eq!(
        lines,
        vec![("1", "Uno. ancora e ancora."), ("2", "Due."), ("1", "x."), ("2", "y.")]
    );
}

/// Test that an act marker opens a new scene
#[test]
fn test_structure_withActMarker_shouldOpenScene() {
    let script = structure(SAMPLE_SCRIPT);

    assert_eq!(script.scenes.len(), 3);
    assert_eq!(script.scenes[1].name, "ATTO I");
    assert_eq!(script.scenes[2].name, "ATTO II");

    let first_act: Vec<&str> = script.scenes[1].lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(
        first_act,
        vec!["Ciao, amore mio. Come stai oggi?", "Bene, grazie.", "(entra la balia)"]
    );
    assert!(script.scenes[1].lines[2].is_direction);
    assert!(script.lines().all(|line| line.text != "ATTO I"));
}

/// Test title selection from the leading lines
#[test]
fn test_structure_title_shouldUseFirstCandidate() {
    let script = structure(SAMPLE_SCRIPT);
    assert_eq!(script.title, "ROMEO E GIULIETTA");
}

/// Test that longer names win prefix collisions
#[test]
fn test_structure_withPrefixCollision_shouldPreferLongestName() {
    let text = "ANNA: Ciao.\nANNABELLA: Salve.\nANNA: Sì.\nANNABELLA: No.";
    let script = structure(text);

    let annabella = script.character_by_name("ANNABELLA").unwrap();
    let lines: Vec<_> = script.lines().collect();
    assert_eq!(lines[1].character_id, annabella.id);
    assert_eq!(lines[1].text, "Salve.");
}

/// Test the empty input scenario
#[test]
fn test_structure_withEmptyInput_shouldReturnDegenerateScript() {
    let script = structure("");

    assert_eq!(script.title, "Copione senza titolo");
    assert!(script.characters.is_empty());
    assert_eq!(script.scenes.len(), 1);
    assert!(script.scenes[0].lines.is_empty());
}

/// Test that the English lexicon changes placeholder names
#[test]
fn test_structure_withEnglishLexicon_shouldUseEnglishPlaceholders() {
    let structurer = ScriptStructurer::new(StructurerConfig::default(), &lexicon::ENGLISH);
    let script = structurer.structure("");

    assert_eq!(script.title, "Untitled script");
    assert_eq!(script.scenes[0].name, "Scene 1");
}

/// Test that checked structuring rejects blank and oversized input
#[test]
fn test_tryStructure_withInvalidInput_shouldFail() {
    assert_eq!(try_structure(" \n\t\n").unwrap_err(), StructureError::BlankInput);

    let config = StructurerConfig {
        max_input_bytes: 8,
        ..Default::default()
    };
    let structurer = ScriptStructurer::new(config, &lexicon::ITALIAN);
    assert!(matches!(
        structurer.try_structure("ROMEO: troppo lungo"),
        Err(StructureError::InputTooLarge { max: 8, .. })
    ));
}

/// Test the estimator scenario
#[test]
fn test_estimateStructure_withFiveCuesThreeNames_shouldBeLikelyScript() {
    let text = "ROMEO: Uno.\nGIULIETTA: Due.\nBALIA: Tre.\nROMEO: Quattro.\nGIULIETTA: Cinque.";
    let estimate = estimate_structure(text);

    assert!(estimate.is_likely_script);
    assert_eq!(estimate.character_count, 3);
    assert_eq!(estimate.dialogue_line_count, 5);
    assert_eq!(estimate.character_names, vec!["ROMEO", "GIULIETTA", "BALIA"]);
}

/// Test the estimator on prose
#[test]
fn test_estimateStructure_withProse_shouldNotBeLikelyScript() {
    let estimate = estimate_structure(PROSE);

    assert!(!estimate.is_likely_script);
    assert_eq!(estimate.dialogue_line_count, 0);
}

/// Test the JSON shape of a structured script
#[test]
fn test_script_toJson_shouldUseCamelCaseFields() {
    let script = structure(SAMPLE_SCRIPT);
    let json = script.to_json_pretty().unwrap();

    assert!(json.contains("\"characterId\""));
    assert!(json.contains("\"sceneId\""));
    assert!(json.contains("\"isDirection\""));
}
