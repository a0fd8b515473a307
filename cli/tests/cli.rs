use assert_cmd::Command;
use predicates::prelude::*;

fn charsheet() -> Command {
    Command::cargo_bin("charsheet").unwrap()
}

#[test]
fn roll_prints_expression_and_total() {
    charsheet()
        .args(["roll", "1d20+5", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1d20+5: ["))
        .stdout(predicate::str::contains(" = "));
}

#[test]
fn roll_is_repeatable_per_seed() {
    let run = || {
        charsheet()
            .args(["roll", "4d6dl1", "--seed", "11", "--times", "3"])
            .output()
            .unwrap()
            .stdout
    };
    let first = run();
    assert_eq!(first, run());
    assert_eq!(String::from_utf8(first).unwrap().lines().count(), 3);
}

#[test]
fn roll_json_has_total() {
    let out = charsheet().args(["roll", "adv", "--json"]).output().unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(value["total"].as_i64().is_some_and(|t| (1..=20).contains(&t)));
}

#[test]
fn bad_expression_fails() {
    charsheet()
        .args(["roll", "2d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("syntax error"));
}

#[test]
fn check_reports_outcome() {
    charsheet()
        .args(["check", "--dc", "12", "--modifier", "-1", "--adv", "advantage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mod=-1").and(predicate::str::contains("dc=12")));
}

#[test]
fn point_buy_cost() {
    charsheet()
        .args(["point-buy", "15", "15", "15", "8", "8", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cost=27 budget=27 remaining=0"));

    charsheet()
        .args(["point-buy", "15", "15", "15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected six scores"));
}

#[test]
fn ruleset_uses_its_terminology() {
    charsheet()
        .args(["ruleset", "tov"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lineage / Heritage"))
        .stdout(predicate::str::contains("Mechanist"))
        .stdout(predicate::str::contains("Heritage: Cottage, Diaspora"))
        .stdout(predicate::str::contains("Lineage: Beastkin"));

    charsheet()
        .args(["ruleset", "pathfinder"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported ruleset"));
}

#[test]
fn slots_for_a_multiclass() {
    charsheet()
        .args(["slots", "--class", "Paladin:6", "--class", "Sorcerer:14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("caster level 17"))
        .stdout(predicate::str::contains("level 9: 1"));

    charsheet()
        .args(["slots", "--class", "Warlock:5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pact: 2 × level 3"));

    charsheet()
        .args(["slots", "--class", "Paladin:5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("caster level 2"))
        .stdout(predicate::str::contains("level 2: 2"));

    charsheet()
        .args(["slots", "--class", "Fighter:5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no spell slots"));
}

#[test]
fn sheet_from_builtin() {
    charsheet()
        .args(["sheet", "--builtin", "aric"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HP 136"))
        .stdout(predicate::str::contains("save DC 19"));
}

#[test]
fn sheet_json_and_log() {
    let out = charsheet()
        .args(["sheet", "--builtin", "brin", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["max_hit_points"], 72);
    assert_eq!(value["spell_slots"]["caster_level"], 4);

    charsheet()
        .args(["sheet", "--builtin", "tamsin", "--log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lineage: Smallfolk"))
        .stdout(predicate::str::contains("Heritage: Diaspora"))
        .stdout(predicate::str::contains("[HP]"));
}

#[test]
fn sheet_from_file_with_bom() {
    let path = std::env::temp_dir().join(format!("charsheet-cli-{}.yaml", std::process::id()));
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(
        b"name: Pell\nruleset: dnd2024\nclasses:\n  - { class: Cleric, level: 1 }\nabilities: { str: 10, dex: 10, con: 14, int: 10, wis: 16, cha: 12 }\n",
    );
    std::fs::write(&path, bytes).unwrap();
    charsheet()
        .arg("sheet")
        .arg("--file")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("HP 10"))
        .stdout(predicate::str::contains("Spellcasting WIS: save DC 13"));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn sheet_needs_a_source() {
    charsheet()
        .args(["sheet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--builtin"));
    charsheet()
        .args(["sheet", "--builtin", "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown builtin"));
}
