//! Integration tests for the enredo CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DEMO: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/farol.json");

/// A two-room game with a key and an ending.
const CASA: &str = r#"{
    "settings": { "title": "Casa Teste", "maxChances": 2, "chancesEnabled": true },
    "initialSceneId": "scn_sala",
    "objects": {
        "obj_chave": { "name": "chave", "examine": "Pequena e fria.", "takable": true },
        "obj_porta": { "name": "porta" }
    },
    "scenes": {
        "scn_sala": {
            "name": "Sala",
            "description": "Uma sala vazia.",
            "objects": ["obj_chave", "obj_porta"],
            "interactions": [
                {
                    "verbs": ["abrir"],
                    "target": "obj_porta",
                    "requiredItem": "obj_chave",
                    "goToScene": "scn_rua",
                    "transition": "none",
                    "successMessage": "A porta se abre."
                }
            ]
        },
        "scn_rua": {
            "name": "Rua",
            "description": "Você está livre.",
            "isEndingScene": true
        }
    }
}"#;

fn enredo() -> Command {
    let mut cmd = Command::cargo_bin("enredo").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Create a temp directory holding the test game.
fn test_game() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("casa.json"), CASA).unwrap();
    dir
}

fn save_file(dir: &Path) -> std::path::PathBuf {
    dir.join("saves").join("enredo_save_casa-teste.json")
}

fn play(dir: &Path) -> Command {
    let mut cmd = enredo();
    cmd.arg("play")
        .arg(dir.join("casa.json"))
        .arg("--save-dir")
        .arg(dir.join("saves"))
        .arg("--instant");
    cmd
}

// -----------------------------------------------------------------------
// check
// -----------------------------------------------------------------------

#[test]
fn check_valid_game() {
    let dir = test_game();
    enredo()
        .arg("check")
        .arg(dir.path().join("casa.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed for 'Casa Teste'"))
        .stdout(predicate::str::contains("Scenes"));
}

#[test]
fn check_demo_game() {
    enredo()
        .arg("check")
        .arg(DEMO)
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed for 'O Farol'"));
}

#[test]
fn check_reports_missing_references() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("broken.json"),
        r#"{
            "initialSceneId": "scn_nowhere",
            "scenes": {
                "scn_a": {
                    "name": "A",
                    "interactions": [{ "verbs": ["ir"], "goToScene": "scn_b" }]
                }
            }
        }"#,
    )
    .unwrap();

    enredo()
        .arg("check")
        .arg(dir.path().join("broken.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"))
        .stderr(predicate::str::contains("unknown scene \"scn_b\""))
        .stderr(predicate::str::contains("2 issues"));
}

#[test]
fn check_malformed_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

    enredo()
        .arg("check")
        .arg(dir.path().join("bad.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed game definition"));
}

#[test]
fn check_missing_file() {
    enredo()
        .arg("check")
        .arg("/nonexistent/game.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// -----------------------------------------------------------------------
// play
// -----------------------------------------------------------------------

#[test]
fn play_takes_and_lists_items() {
    let dir = test_game();
    play(dir.path())
        .write_stdin("pegar chave\ninventario\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Casa Teste"))
        .stdout(predicate::str::contains("Sala"))
        .stdout(predicate::str::contains("Você pegou chave."))
        .stdout(predicate::str::contains("Você está carregando: chave."));
}

#[test]
fn play_unknown_command_uses_failure_message() {
    let dir = test_game();
    play(dir.path())
        .write_stdin("dançar\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nada acontece."));
}

#[test]
fn play_reaches_victory() {
    let dir = test_game();
    play(dir.path())
        .write_stdin("pegar chave\nabrir porta\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("A porta se abre."))
        .stdout(predicate::str::contains("Rua"))
        .stdout(predicate::str::contains("VITÓRIA"))
        .stdout(predicate::str::contains("':restart' to play again"));
}

#[test]
fn play_demo_walkthrough() {
    let dir = TempDir::new().unwrap();
    enredo()
        .arg("play")
        .arg(DEMO)
        .arg("--save-dir")
        .arg(dir.path())
        .arg("--instant")
        .write_stdin(
            "pegar chave\nnorte\nabrir a porta\npegar lampião\nsubir\nacender interruptor\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("A fechadura cede com um estalo."))
        .stdout(predicate::str::contains("Você sobe com o lampião à frente."))
        .stdout(predicate::str::contains("VITÓRIA"));
}

#[test]
fn play_diary_lists_history() {
    let dir = test_game();
    play(dir.path())
        .write_stdin("pegar chave\n:diary\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Diário"))
        .stdout(predicate::str::contains("> pegar chave"));
}

// -----------------------------------------------------------------------
// persistence
// -----------------------------------------------------------------------

#[test]
fn play_saves_and_resumes() {
    let dir = test_game();
    play(dir.path())
        .write_stdin("pegar chave\n:quit\n")
        .assert()
        .success();
    assert!(save_file(dir.path()).exists());

    play(dir.path())
        .write_stdin("inventario\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Continuing saved game."))
        .stdout(predicate::str::contains("Você está carregando: chave."));
}

#[test]
fn play_preview_never_writes() {
    let dir = test_game();
    play(dir.path())
        .arg("--preview")
        .write_stdin("pegar chave\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Você pegou chave."));
    assert!(!save_file(dir.path()).exists());
}

#[test]
fn play_new_discards_save() {
    let dir = test_game();
    play(dir.path())
        .write_stdin("pegar chave\n:quit\n")
        .assert()
        .success();

    play(dir.path())
        .arg("--new")
        .write_stdin("inventario\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Continuing saved game.").not())
        .stdout(predicate::str::contains("Você não está carregando nada."));
}

#[test]
fn play_ignores_corrupt_save() {
    let dir = test_game();
    fs::create_dir_all(dir.path().join("saves")).unwrap();
    fs::write(save_file(dir.path()), "{ garbage").unwrap();

    play(dir.path())
        .write_stdin("inventario\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Continuing saved game.").not())
        .stdout(predicate::str::contains("Você não está carregando nada."));
}

// -----------------------------------------------------------------------
// reset
// -----------------------------------------------------------------------

#[test]
fn reset_deletes_save() {
    let dir = test_game();
    play(dir.path())
        .write_stdin("pegar chave\n:quit\n")
        .assert()
        .success();

    enredo()
        .arg("reset")
        .arg(dir.path().join("casa.json"))
        .arg("--save-dir")
        .arg(dir.path().join("saves"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted saved game for 'Casa Teste'"));
    assert!(!save_file(dir.path()).exists());
}

#[test]
fn reset_without_save() {
    let dir = test_game();
    enredo()
        .arg("reset")
        .arg(dir.path().join("casa.json"))
        .arg("--save-dir")
        .arg(dir.path().join("saves"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved game for 'Casa Teste'"));
}
