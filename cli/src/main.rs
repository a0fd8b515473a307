use anyhow::{bail, Context};
use charsheet_engine::abilities::{point_buy_cost, ScoreCap};
use charsheet_engine::api::{self, Character, SheetConfig};
use charsheet_engine::dice::{self, roll_ability_scores};
use charsheet_engine::multiclass::{self, ClassLevelEntry, HitPointMethod};
use charsheet_engine::{ability_mod, get_ruleset, AdMode, Dice, RulesetId};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use encoding_rs::Encoding;
use std::{fs, path::Path, path::PathBuf};
use tracing::Level;

#[derive(Copy, Clone, ValueEnum)]
enum Adv {
    Normal,
    Advantage,
    Disadvantage,
}

#[derive(Copy, Clone, ValueEnum)]
enum Hp {
    Average,
    Rolled,
    Max,
}

#[derive(Subcommand)]
enum Cmd {
    /// Roll any dice expression, e.g. `4d6dl1`, `2d20kh1+5`, `adv`
    Roll {
        expr: String,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Number of times to roll the expression
        #[arg(long, default_value_t = 1)]
        times: u32,
        /// Print each result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Perform a check against a DC using a modifier and (dis)advantage
    Check {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Advantage mode
        #[arg(long, value_enum, default_value_t = Adv::Normal)]
        adv: Adv,
        /// Difficulty Class to beat (>=)
        #[arg(long)]
        dc: i32,
        /// Ability/skill modifier to add to the d20
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        modifier: i32,
    },
    /// Roll six ability scores (4d6, drop lowest)
    Stats {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Cost of a set of scores under the ruleset's point-buy rules
    PointBuy {
        #[arg(long, default_value_t = RulesetId::Dnd2014)]
        ruleset: RulesetId,
        /// Six scores, STR through CHA
        #[arg(num_args = 1.., required = true)]
        scores: Vec<i32>,
    },
    /// Describe a ruleset: terminology, creation order, classes
    Ruleset { id: RulesetId },
    /// Caster level and spell slots for a class mix
    Slots {
        #[arg(long, default_value_t = RulesetId::Dnd2014)]
        ruleset: RulesetId,
        /// `Class:Level` or `Class:Subclass:Level`, repeatable; first is the starting class
        #[arg(long = "class", required = true)]
        classes: Vec<ClassLevelEntry>,
    },
    /// Build a character sheet from a YAML/JSON snapshot or a builtin
    Sheet {
        /// Path to a character snapshot (.yaml, .yml or .json)
        #[arg(long, conflicts_with = "builtin")]
        file: Option<PathBuf>,
        /// Builtin character id (aric, brin, tamsin)
        #[arg(long)]
        builtin: Option<String>,
        #[arg(long, value_enum, default_value_t = Hp::Average)]
        hp: Hp,
        /// Ability score cap (defaults to the ruleset's)
        #[arg(long)]
        score_cap: Option<i32>,
        /// Let explicit overrides exceed the cap (up to 30)
        #[arg(long, default_value_t = false)]
        allow_over_cap: bool,
        /// RNG seed used for rolled hit points
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Print the summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Also print the derivation log
        #[arg(long, default_value_t = false)]
        log: bool,
    },
}

#[derive(Parser)]
#[command(name = "charsheet")]
#[command(about = "Dice roller and multi-ruleset character sheet calculator")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_mode(a: Adv) -> AdMode {
    match a {
        Adv::Normal => AdMode::Normal,
        Adv::Advantage => AdMode::Advantage,
        Adv::Disadvantage => AdMode::Disadvantage,
    }
}

fn to_method(hp: Hp) -> HitPointMethod {
    match hp {
        Hp::Average => HitPointMethod::Average,
        Hp::Rolled => HitPointMethod::Rolled,
        Hp::Max => HitPointMethod::Maximum,
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Cmd::Roll {
            expr,
            seed,
            times,
            json,
        } => {
            let expression = dice::parse(&expr).with_context(|| format!("parsing '{}'", expr))?;
            let mut rng = Dice::from_seed(seed);
            for _ in 0..times {
                let result = dice::roll(&expression, &mut rng);
                if json {
                    println!("{}", serde_json::to_string(&result)?);
                } else {
                    println!("{}: {}", expression, result);
                }
            }
        }
        Cmd::Check {
            seed,
            adv,
            dc,
            modifier,
        } => {
            let mode = to_mode(adv);
            let mut dice = Dice::from_seed(seed);
            let res = charsheet_engine::check(&mut dice, charsheet_engine::CheckInput { dc, modifier, mode });
            let nat = if res.natural_20 {
                " (NAT 20!)"
            } else if res.natural_1 {
                " (NAT 1)"
            } else {
                ""
            };
            println!(
                "roll={} mod={} total={} dc={} => {}{}",
                res.roll,
                modifier,
                res.total,
                res.dc,
                if res.passed { "SUCCESS" } else { "FAIL" },
                nat
            );
        }
        Cmd::Stats { seed } => {
            let mut rng = Dice::from_seed(seed);
            let scores = roll_ability_scores(&mut rng);
            let line: Vec<String> = scores
                .iter()
                .map(|s| format!("{} ({:+})", s, ability_mod(*s)))
                .collect();
            println!("{}", line.join("  "));
            println!("total={}", scores.iter().sum::<i32>());
        }
        Cmd::PointBuy { ruleset, scores } => {
            if scores.len() != 6 {
                bail!("expected six scores, got {}", scores.len());
            }
            let rules = get_ruleset(ruleset);
            let cost = point_buy_cost(&rules.generation, &scores)?;
            println!(
                "cost={} budget={} remaining={}",
                cost,
                rules.generation.point_buy_budget,
                rules.generation.point_buy_budget - cost
            );
        }
        Cmd::Ruleset { id } => print_ruleset(id),
        Cmd::Slots { ruleset, classes } => {
            let rules = get_ruleset(ruleset);
            let levels = multiclass::caster_levels(rules, &classes)?;
            let slots = multiclass::spell_slots(rules, &classes)?;
            println!(
                "caster level {} (full {}, half {}, third {})",
                slots.caster_level, levels.full, levels.half, levels.third
            );
            for (level, count) in slots.by_level() {
                println!("  level {}: {}", level, count);
            }
            if let Some(pact) = slots.pact {
                println!("  pact: {} × level {} (warlock level {})", pact.count, pact.slot_level, levels.pact);
            }
            if slots.is_empty() {
                println!("  no spell slots");
            }
        }
        Cmd::Sheet {
            file,
            builtin,
            hp,
            score_cap,
            allow_over_cap,
            seed,
            json,
            log,
        } => {
            let character = match (file, builtin) {
                (Some(path), _) => read_character(&path)?,
                (None, Some(id)) => api::load_builtin(&id)?,
                (None, None) => bail!("pass --file <path> or --builtin <id>"),
            };
            let score_cap = match (score_cap, allow_over_cap) {
                (None, false) => None,
                (cap, allow) => {
                    let mut sc = cap.map(ScoreCap::new).unwrap_or_default();
                    sc.allow_override_above_cap = allow;
                    Some(sc)
                }
            };
            let cfg = SheetConfig {
                ruleset: None,
                hit_points: to_method(hp),
                score_cap,
                seed,
            };
            let summary = api::build_sheet(&character, &cfg)
                .with_context(|| format!("building sheet for '{}'", character.name))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary);
                if log {
                    for line in &summary.log {
                        println!("{}", line);
                    }
                }
            }
        }
    }
    Ok(())
}

fn print_ruleset(id: RulesetId) {
    let rules = get_ruleset(id);
    println!("{} [{}]", rules.name, rules.id);
    println!("{}", rules.description);
    println!(
        "terms: {} / {}",
        rules.terminology.species, rules.terminology.subspecies
    );
    println!("ability bonuses from: {:?}", rules.ability_bonus_source);
    let order: Vec<String> = rules.creation_order.iter().map(|s| format!("{:?}", s)).collect();
    println!("creation: {}", order.join(" > "));
    println!("ASI levels: {:?}", rules.asi_levels);
    if !rules.talent_levels.is_empty() {
        println!("talent levels: {:?}", rules.talent_levels);
    }
    if rules.has_origin_feats {
        println!("origin feats: yes");
    }
    for class in rules.classes {
        println!(
            "  {:<10} d{:<2} {:?} caster, subclass at {} ({})",
            class.name,
            class.hit_die,
            class.caster_type,
            class.subclass_progression.selection_level,
            class.subclasses.join(", ")
        );
    }
    println!("{}: {}", rules.terminology.species, rules.species_names().join(", "));
    if !rules.heritages.is_empty() {
        println!("{}: {}", rules.terminology.subspecies, rules.heritage_names().join(", "));
    }
    println!("backgrounds: {}", rules.background_names().join(", "));
}

fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn read_character(path: &Path) -> anyhow::Result<Character> {
    let text = read_text_auto(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let character = if is_json {
        Character::from_json(&text)
    } else {
        Character::from_yaml(&text)
    };
    character.with_context(|| format!("loading character from {}", path.display()))
}
