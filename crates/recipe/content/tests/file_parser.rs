//! End-to-end recipe file scenarios.

mod common;

use common::{load, load_with};
use recipe_content::parser::NOT_ADDED;
use recipe_core::test_utils::{RecordingScheduler, RecordingWorld, StaticActors};
use recipe_core::{
    ActorHandle, Arguments, DeferredEffect, EngineConfig, Flag, FlagEnv, FlagKind, Location,
    RecipeKind, Severity,
};

const DIAMOND_TORCH: &str = "\
// Torches for the rich
@perm diamond.craft

craft Diamond Torch
@explode nobreak | fire | power 6
diamond, stick
= torch 4
";

#[test]
fn header_and_body_flags_end_to_end() {
    let loaded = load("torches", DIAMOND_TORCH);
    assert_eq!(loaded.reporter.summary().errors, 0);
    assert_eq!(loaded.reporter.summary().warnings, 0);

    let recipes: Vec<_> = loaded.registrar.added().collect();
    assert_eq!(recipes.len(), 1);
    let recipe = recipes[0];
    assert_eq!(recipe.kind, RecipeKind::Craft);
    assert_eq!(recipe.name.as_deref(), Some("Diamond Torch"));
    assert_eq!(
        recipe.flags.kinds().collect::<Vec<_>>(),
        vec![FlagKind::Permission, FlagKind::Explode]
    );
    let result = &recipe.results[0];

    // Without the permission: one reason, no craft.
    let actors = StaticActors::new().with_actor(ActorHandle::new(2, "Guest"));
    let env = FlagEnv::empty().with_actors(&actors);
    let mut args = Arguments::new(env)
        .with_actor_name("Guest")
        .with_result(result.stack.clone());
    assert!(!recipe.check_flags(&mut args, Some(result)));
    assert_eq!(
        args.reasons(),
        &["You need the diamond.craft permission to craft this.".to_string()]
    );

    // With the permission: passes, and the explosion is deferred by one tick.
    let actors = StaticActors::new()
        .with_actor(ActorHandle::new(1, "Crafter"))
        .with_permission("Crafter", "diamond.craft")
        .with_location("Crafter", Location::new("world", 10.4, 70.0, -3.6));
    let world = RecordingWorld::new();
    let env = FlagEnv::empty().with_actors(&actors).with_world(&world);
    let mut args = Arguments::new(env)
        .with_actor_name("Crafter")
        .with_result(result.stack.clone());
    assert!(recipe.check_flags(&mut args, Some(result)));
    assert!(args.reasons().is_empty());

    recipe.apply_flags(&mut args, Some(result), true);
    assert!(world.explosions().is_empty());

    let scheduler = RecordingScheduler::new();
    assert_eq!(args.dispatch_deferred(&scheduler), 1);
    assert_eq!(scheduler.delays(), vec![DeferredEffect::DELAY_TICKS]);

    for effect in scheduler.drain() {
        let ran = effect.run(env);
        assert!(ran.reasons().is_empty());
    }
    let explosions = world.explosions();
    assert_eq!(explosions.len(), 1);
    assert_eq!(explosions[0].power, 6.0);
    assert!(explosions[0].fire);
    assert!(!explosions[0].break_blocks);
    assert_eq!(explosions[0].center, Location::new("world", 10.5, 70.5, -3.5));
}

#[test]
fn failed_craft_does_not_explode_unless_asked() {
    let loaded = load("boom", "combine\n@explode fail\nstick\n= stick\n");
    let recipe = loaded.registrar.added().next().unwrap();

    let actors = StaticActors::new()
        .with_actor(ActorHandle::new(1, "Io"))
        .with_location("Io", Location::new("world", 0.0, 0.0, 0.0));
    let env = FlagEnv::empty().with_actors(&actors);

    let mut args = Arguments::new(env).with_actor_name("Io");
    recipe.apply_flags(&mut args, None, true);
    assert!(args.deferred().is_empty());

    recipe.apply_flags(&mut args, None, false);
    assert_eq!(args.deferred().len(), 1);
    assert_eq!(args.deferred()[0].kind(), FlagKind::Explode);
}

#[test]
fn unknown_directive_is_exactly_one_error() {
    let loaded = load("bogus", "bogus MyRecipe\nstick\n= stick 2\n");
    assert!(loaded.registrar.is_empty());
    assert_eq!(loaded.reporter.summary().errors, 1);
    assert_eq!(loaded.outcome.failed, 1);

    let record = &loaded.reporter.records()[0];
    assert_eq!(record.line, Some(1));
    assert!(record.message.contains("bogus"));
}

#[test]
fn unknown_directive_does_not_stop_later_recipes() {
    let loaded = load("mixed", "bogus\nstick\nsmelt\niron ore\n= iron\n");
    assert_eq!(loaded.registrar.len(), 1);
    assert_eq!(loaded.reporter.summary().errors, 1);
}

#[test]
fn empty_file_is_one_warning() {
    let loaded = load("nothing", "// only a comment\n\n   \n/* and\n a block */\n");
    assert!(loaded.registrar.is_empty());
    assert_eq!(loaded.outcome.lines, 0);

    let summary = loaded.reporter.summary();
    assert_eq!((summary.warnings, summary.errors), (1, 0));
    assert_eq!(
        loaded.reporter.records()[0].message,
        "Recipe file 'nothing' is empty."
    );
}

#[test]
fn sub_parser_failure_reports_not_added() {
    let loaded = load("bad", "craft\nstick\n= torch lots\n");
    assert!(loaded.registrar.is_empty());

    let messages: Vec<_> = loaded
        .reporter
        .records()
        .iter()
        .map(|r| r.message.as_str())
        .collect();
    assert_eq!(messages, vec!["Invalid amount in '= torch lots'", NOT_ADDED]);
    assert!(!loaded.reporter.records()[1].details.is_empty());
}

#[test]
fn result_only_flag_on_recipe_blocks_registration() {
    let loaded = load("named", "craft\n@name Fancy Torch\nstick\n= torch\n");
    assert!(loaded.registrar.is_empty());
    assert_eq!(loaded.reporter.summary().errors, 2);
    assert_eq!(
        loaded.reporter.records()[0].message,
        "flag @name only works on results"
    );
}

#[test]
fn result_flags_attach_to_results() {
    let loaded = load(
        "named",
        "craft\nstick\n= torch\n@name Fancy Torch\n@lore Bright | Warm\n",
    );
    let recipe = loaded.registrar.added().next().unwrap();
    assert!(recipe.flags.is_empty());
    assert_eq!(
        recipe.results[0].flags.kinds().collect::<Vec<_>>(),
        vec![FlagKind::Name, FlagKind::Lore]
    );
}

#[test]
fn false_removes_unless_kind_forbids_it() {
    let loaded = load(
        "removal",
        "@secret\n\
         craft\n\
         @secret false\n\
         @commands say hi\n\
         @commands false\n\
         stick\n\
         = torch\n",
    );
    let recipe = loaded.registrar.added().next().unwrap();
    assert!(!recipe.is_hidden());
    match recipe.flags.get(FlagKind::Commands) {
        Some(Flag::Commands(commands)) => assert_eq!(commands.commands, vec!["false"]),
        other => panic!("expected commands flag, got {other:?}"),
    }
}

#[test]
fn remove_flag_becomes_a_removal() {
    let loaded = load("removals", "smelt\n@remove\niron ore\n= iron\n");
    assert_eq!(loaded.registrar.removed().count(), 1);
    assert_eq!(loaded.registrar.added().count(), 0);
}

#[test]
fn unknown_flag_severity_follows_config() {
    let source = "craft\n@sparkle\nstick\n= torch\n";

    let lenient = load("sparkle", source);
    assert_eq!(lenient.registrar.len(), 1);
    assert_eq!(lenient.reporter.records()[0].severity, Severity::Warning);

    let config = EngineConfig {
        unknown_flag_is_error: true,
        ..EngineConfig::default()
    };
    let strict = load_with("sparkle", source, &config);
    assert!(strict.registrar.is_empty());
    assert_eq!(strict.reporter.records()[0].severity, Severity::Error);
}

#[test]
fn records_point_at_the_offending_line() {
    let loaded = load("lines", "craft\nstick\n= torch\n\n@explode power lots\n");
    let record = &loaded.reporter.records()[0];
    assert_eq!(record.severity, Severity::Warning);
    assert_eq!(record.line, Some(5));
    assert_eq!(record.file.as_deref(), Some("lines"));
    assert_eq!(loaded.registrar.len(), 1);
}
